use super::atom::AtomRecord;
use crate::core::utils::identifiers;
use std::collections::BTreeMap;
use std::fmt;

/// Identity of a residue within one structure or pocket.
///
/// Field order defines the canonical ordering used for every serialized
/// residue list: chain first (blank chains sort first), then sequence
/// number, then residue name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResidueKey {
    pub chain_id: Option<char>,
    pub residue_number: isize,
    pub residue_name: String,
}

impl ResidueKey {
    pub fn new(chain_id: Option<char>, residue_name: &str, residue_number: isize) -> Self {
        Self {
            chain_id,
            residue_number,
            residue_name: residue_name.to_string(),
        }
    }
}

impl From<&AtomRecord> for ResidueKey {
    fn from(record: &AtomRecord) -> Self {
        Self {
            chain_id: record.chain_id,
            residue_number: record.residue_number,
            residue_name: record.residue_name.clone(),
        }
    }
}

/// Formats as a residue descriptor, `chain:NAME number` (e.g. `A:SER 45`).
impl fmt::Display for ResidueKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(chain) = self.chain_id {
            write!(f, "{}", chain)?;
        }
        write!(f, ":{} {}", self.residue_name, self.residue_number)
    }
}

/// Hetero-field classification of a residue, in the conventional spelling
/// used by residue dumps: blank for standard residues, `W` for waters and
/// `H_<NAME>` for any other heteroatom group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HetField {
    Standard,
    Water,
    Hetero(String),
}

impl fmt::Display for HetField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HetField::Standard => Ok(()),
            HetField::Water => f.write_str("W"),
            HetField::Hetero(name) => write!(f, "H_{}", name),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Residue {
    pub key: ResidueKey,
    /// True if any atom record contributing to this residue was a `HETATM`.
    pub is_hetero: bool,
}

impl Residue {
    pub fn new(key: ResidueKey, is_hetero: bool) -> Self {
        Self { key, is_hetero }
    }

    pub fn chain_id(&self) -> Option<char> {
        self.key.chain_id
    }

    pub fn name(&self) -> &str {
        &self.key.residue_name
    }

    pub fn number(&self) -> isize {
        self.key.residue_number
    }

    pub fn het_field(&self) -> HetField {
        if !self.is_hetero {
            HetField::Standard
        } else if identifiers::is_water(self.name()) {
            HetField::Water
        } else {
            HetField::Hetero(self.name().to_string())
        }
    }
}

/// A deduplicated set of residues in canonical [`ResidueKey`] order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResidueSet {
    residues: BTreeMap<ResidueKey, Residue>,
}

impl ResidueSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds one atom record into the set.
    ///
    /// The first record for a key creates the residue; later records for the
    /// same key can only raise its hetero flag. Returns `true` if a new
    /// residue was created.
    pub fn absorb(&mut self, record: &AtomRecord) -> bool {
        let key = ResidueKey::from(record);
        let is_hetero = record.kind.is_hetero();
        match self.residues.get_mut(&key) {
            Some(existing) => {
                existing.is_hetero |= is_hetero;
                false
            }
            None => {
                self.residues
                    .insert(key.clone(), Residue::new(key, is_hetero));
                true
            }
        }
    }

    pub fn len(&self) -> usize {
        self.residues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.residues.is_empty()
    }

    pub fn contains(&self, key: &ResidueKey) -> bool {
        self.residues.contains_key(key)
    }

    pub fn get(&self, key: &ResidueKey) -> Option<&Residue> {
        self.residues.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Residue> {
        self.residues.values()
    }

    /// Distinct chain identifiers present in the set, in canonical order.
    pub fn chain_ids(&self) -> Vec<Option<char>> {
        let mut chains: Vec<Option<char>> = self.residues.keys().map(|k| k.chain_id).collect();
        chains.dedup();
        chains
    }
}

impl<'a> IntoIterator for &'a ResidueSet {
    type Item = &'a Residue;
    type IntoIter = std::collections::btree_map::Values<'a, ResidueKey, Residue>;

    fn into_iter(self) -> Self::IntoIter {
        self.residues.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::atom::RecordKind;

    fn record(kind: RecordKind, chain: Option<char>, name: &str, number: isize) -> AtomRecord {
        AtomRecord {
            kind,
            chain_id: chain,
            residue_name: name.to_string(),
            residue_number: number,
            insertion_code: None,
            line: 1,
        }
    }

    #[test]
    fn residue_key_displays_as_descriptor() {
        assert_eq!(ResidueKey::new(Some('A'), "SER", 45).to_string(), "A:SER 45");
        assert_eq!(ResidueKey::new(None, "HOH", -3).to_string(), ":HOH -3");
    }

    #[test]
    fn residue_keys_order_by_chain_then_number_then_name() {
        let mut keys = vec![
            ResidueKey::new(Some('B'), "ALA", 1),
            ResidueKey::new(Some('A'), "SER", 10),
            ResidueKey::new(Some('A'), "GLY", 2),
            ResidueKey::new(None, "HOH", 500),
        ];
        keys.sort();
        let rendered: Vec<String> = keys.iter().map(ToString::to_string).collect();
        assert_eq!(rendered, vec![":HOH 500", "A:GLY 2", "A:SER 10", "B:ALA 1"]);
    }

    #[test]
    fn absorb_creates_each_residue_once() {
        let mut set = ResidueSet::new();
        assert!(set.absorb(&record(RecordKind::Atom, Some('A'), "SER", 45)));
        assert!(!set.absorb(&record(RecordKind::Atom, Some('A'), "SER", 45)));
        assert!(set.absorb(&record(RecordKind::Atom, Some('B'), "SER", 45)));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn absorb_raises_hetero_flag_but_never_lowers_it() {
        let key = ResidueKey::new(Some('A'), "MSE", 7);
        let mut set = ResidueSet::new();
        set.absorb(&record(RecordKind::Hetatm, Some('A'), "MSE", 7));
        set.absorb(&record(RecordKind::Atom, Some('A'), "MSE", 7));
        assert!(set.get(&key).unwrap().is_hetero);

        let mut reversed = ResidueSet::new();
        reversed.absorb(&record(RecordKind::Atom, Some('A'), "MSE", 7));
        reversed.absorb(&record(RecordKind::Hetatm, Some('A'), "MSE", 7));
        assert!(reversed.get(&key).unwrap().is_hetero);
        assert_eq!(set, reversed);
    }

    #[test]
    fn het_field_distinguishes_standard_water_and_hetero() {
        let standard = Residue::new(ResidueKey::new(Some('A'), "SER", 1), false);
        let water = Residue::new(ResidueKey::new(Some('A'), "HOH", 2), true);
        let ligand = Residue::new(ResidueKey::new(Some('A'), "ZN", 3), true);
        assert_eq!(standard.het_field().to_string(), "");
        assert_eq!(water.het_field().to_string(), "W");
        assert_eq!(ligand.het_field().to_string(), "H_ZN");
    }

    #[test]
    fn chain_ids_are_distinct_and_ordered() {
        let mut set = ResidueSet::new();
        set.absorb(&record(RecordKind::Atom, Some('B'), "ALA", 1));
        set.absorb(&record(RecordKind::Atom, Some('A'), "ALA", 2));
        set.absorb(&record(RecordKind::Atom, Some('A'), "GLY", 3));
        assert_eq!(set.chain_ids(), vec![Some('A'), Some('B')]);
    }
}
