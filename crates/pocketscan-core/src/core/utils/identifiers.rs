use crate::core::models::atom::RecordKind;
use phf::{Map, Set, phf_map, phf_set};

static RECORD_KINDS: Map<&'static str, RecordKind> = phf_map! {
    "ATOM" => RecordKind::Atom,
    "HETATM" => RecordKind::Hetatm,
};

static WATER_RESIDUE_NAMES: Set<&'static str> = phf_set! {
    "HOH", "WAT", "H2O", "DOD", "D2O", "TIP", "TIP3", "SOL",
};

/// Resolves a trimmed record-name token to the atom record kind it denotes.
pub fn record_kind(record_name: &str) -> Option<RecordKind> {
    RECORD_KINDS.get(record_name).copied()
}

pub fn is_water(residue_name: &str) -> bool {
    WATER_RESIDUE_NAMES.contains(residue_name.trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_kind_matches_exact_tokens_only() {
        assert_eq!(record_kind("ATOM"), Some(RecordKind::Atom));
        assert_eq!(record_kind("HETATM"), Some(RecordKind::Hetatm));
        assert_eq!(record_kind("ANISOU"), None);
        assert_eq!(record_kind("ATOM  "), None);
    }

    #[test]
    fn is_water_recognizes_common_solvent_names() {
        assert!(is_water("HOH"));
        assert!(is_water(" WAT "));
        assert!(!is_water("SER"));
        assert!(!is_water("hoh"));
    }
}
