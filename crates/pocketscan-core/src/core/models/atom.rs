use std::fmt;

/// The coordinate record type an atom line was read from.
///
/// PDB files separate standard polymer atoms (`ATOM`) from heteroatoms
/// (`HETATM`) such as ligands, ions, and waters. Every other record name is
/// inert for pocket parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RecordKind {
    /// Standard polymer atom (`ATOM`).
    Atom,
    /// Heteroatom (`HETATM`), e.g. a ligand, ion or water.
    Hetatm,
}

impl RecordKind {
    pub fn as_str(self) -> &'static str {
        match self {
            RecordKind::Atom => "ATOM",
            RecordKind::Hetatm => "HETATM",
        }
    }

    pub fn is_hetero(self) -> bool {
        matches!(self, RecordKind::Hetatm)
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single atom line reduced to the fields that identify its residue.
///
/// Coordinates, occupancies and the like are deliberately not retained: the
/// pocket engine only needs to know *which* residue an atom belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AtomRecord {
    /// `ATOM` or `HETATM`.
    pub kind: RecordKind,
    /// Chain identifier (column 22). `None` when the column is blank.
    pub chain_id: Option<char>,
    /// Three-letter residue name (columns 18-20), trimmed.
    pub residue_name: String,
    /// Residue sequence number (columns 23-26).
    pub residue_number: isize,
    /// Insertion code (column 27), if present and non-blank.
    pub insertion_code: Option<char>,
    /// 1-based line number in the source stream.
    pub line: usize,
}
