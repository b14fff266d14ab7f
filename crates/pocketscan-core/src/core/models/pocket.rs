use super::ids::PocketId;
use super::residue::ResidueSet;

/// A predicted binding pocket and the residues lining it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pocket {
    pub id: PocketId,
    pub residues: ResidueSet,
}

impl Pocket {
    pub fn new(id: PocketId, residues: ResidueSet) -> Self {
        Self { id, residues }
    }

    pub fn residue_count(&self) -> usize {
        self.residues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.residues.is_empty()
    }
}
