use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU32;

/// 1-based pocket identifier as numbered by the external predictor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PocketId(NonZeroU32);

impl PocketId {
    pub const FIRST: PocketId = PocketId(NonZeroU32::MIN);

    /// Returns `None` for zero, which is never a valid pocket number.
    pub fn new(value: u32) -> Option<Self> {
        NonZeroU32::new(value).map(Self)
    }

    pub fn get(self) -> u32 {
        self.0.get()
    }

    pub fn next(self) -> Option<Self> {
        self.0.checked_add(1).map(Self)
    }
}

impl fmt::Display for PocketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pocket_ids_start_at_one_and_increment() {
        assert_eq!(PocketId::new(0), None);
        assert_eq!(PocketId::FIRST.get(), 1);
        assert_eq!(PocketId::FIRST.next().map(PocketId::get), Some(2));
        assert_eq!(PocketId::new(u32::MAX).unwrap().next(), None);
    }
}
