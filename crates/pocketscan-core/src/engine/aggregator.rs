use super::config::MalformedPolicy;
use crate::core::io::pdb::{MalformedRecord, PdbError, PdbFile};
use crate::core::models::atom::AtomRecord;
use crate::core::models::residue::ResidueSet;
use std::path::Path;

/// Result of scanning one record stream into residues.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanOutcome {
    pub residues: ResidueSet,
    /// Atom records that contributed to `residues`.
    pub records_read: usize,
    /// Malformed records dropped under [`MalformedPolicy::Skip`].
    pub skipped: Vec<MalformedRecord>,
}

/// Collapses atom records into a deduplicated residue set.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResidueAggregator {
    policy: MalformedPolicy,
}

impl ResidueAggregator {
    pub fn new(policy: MalformedPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> MalformedPolicy {
        self.policy
    }

    /// Aggregates already-parsed records. The result is independent of input order.
    pub fn aggregate<I>(records: I) -> ResidueSet
    where
        I: IntoIterator<Item = AtomRecord>,
    {
        let mut residues = ResidueSet::new();
        for record in records {
            residues.absorb(&record);
        }
        residues
    }

    /// Aggregates a record stream, applying the malformed-record policy.
    ///
    /// # Errors
    ///
    /// I/O errors always fail the scan. Malformed records fail it only under
    /// [`MalformedPolicy::Abort`].
    pub fn scan<I>(&self, records: I) -> Result<ScanOutcome, PdbError>
    where
        I: IntoIterator<Item = Result<AtomRecord, PdbError>>,
    {
        let mut outcome = ScanOutcome::default();
        for item in records {
            match item {
                Ok(record) => {
                    outcome.residues.absorb(&record);
                    outcome.records_read += 1;
                }
                Err(PdbError::Malformed(malformed)) if self.policy == MalformedPolicy::Skip => {
                    outcome.skipped.push(malformed);
                }
                Err(e) => return Err(e),
            }
        }
        Ok(outcome)
    }

    /// Opens, fully scans and closes the structure file at `path`.
    pub fn scan_path(&self, path: &Path) -> Result<ScanOutcome, PdbError> {
        let records = PdbFile::open(path)?;
        self.scan(records)
    }
}
