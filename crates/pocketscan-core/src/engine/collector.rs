use super::aggregator::ResidueAggregator;
use super::config::{MalformedPolicy, PocketLayout};
use super::error::EngineError;
use crate::core::io::pdb::{MalformedRecord, PdbError};
use crate::core::models::ids::PocketId;
use crate::core::models::pocket::Pocket;
use std::path::PathBuf;

/// Why probing for further pocket files stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeStop {
    /// The pocket directory does not exist.
    MissingDirectory,
    /// No file exists for this id. Higher ids are never probed.
    Gap(PocketId),
    /// The configured maximum pocket id was reached.
    Limit(PocketId),
    /// The pocket id space was exhausted.
    Exhausted,
}

/// A malformed record dropped while reading a pocket file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRecord {
    pub pocket_id: PocketId,
    pub path: PathBuf,
    pub record: MalformedRecord,
}

/// A pocket file that exists but could not be read.
#[derive(Debug)]
pub struct PocketFailure {
    pub pocket_id: PocketId,
    pub path: PathBuf,
    pub error: PdbError,
}

#[derive(Debug)]
pub struct PocketCollection {
    /// Pockets in ascending id order.
    pub pockets: Vec<Pocket>,
    pub skipped_records: Vec<SkippedRecord>,
    pub failures: Vec<PocketFailure>,
    pub stop: ProbeStop,
}

impl PocketCollection {
    fn empty(stop: ProbeStop) -> Self {
        Self {
            pockets: Vec::new(),
            skipped_records: Vec::new(),
            failures: Vec::new(),
            stop,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.pockets.is_empty()
    }

    pub fn total_residues(&self) -> usize {
        self.pockets.iter().map(Pocket::residue_count).sum()
    }
}

/// Reads the numbered per-pocket structure files of one predictor run.
#[derive(Debug, Clone)]
pub struct PocketCollector {
    layout: PocketLayout,
    aggregator: ResidueAggregator,
}

impl PocketCollector {
    pub fn new(layout: PocketLayout, policy: MalformedPolicy) -> Self {
        Self {
            layout,
            aggregator: ResidueAggregator::new(policy),
        }
    }

    pub fn layout(&self) -> &PocketLayout {
        &self.layout
    }

    /// Probes pocket ids from 1 upward and aggregates each pocket file.
    ///
    /// Probing ends at the first id without a file, so pockets numbered past a
    /// gap are not collected. A missing directory yields an empty collection.
    ///
    /// # Errors
    ///
    /// Only under [`MalformedPolicy::Abort`]: the first pocket file that cannot
    /// be read, or that contains a malformed record, fails the collection.
    pub fn collect(&self) -> Result<PocketCollection, EngineError> {
        if !self.layout.directory.is_dir() {
            return Ok(PocketCollection::empty(ProbeStop::MissingDirectory));
        }

        let mut collection = PocketCollection::empty(ProbeStop::Exhausted);
        let mut next_id = Some(PocketId::FIRST);

        while let Some(pocket_id) = next_id {
            if let Some(limit) = self.layout.naming.max_pocket_id {
                if pocket_id > limit {
                    collection.stop = ProbeStop::Limit(limit);
                    break;
                }
            }

            let path = self.layout.path_for(pocket_id);
            if !path.exists() {
                collection.stop = ProbeStop::Gap(pocket_id);
                break;
            }

            match self.aggregator.scan_path(&path) {
                Ok(outcome) => {
                    collection
                        .skipped_records
                        .extend(outcome.skipped.into_iter().map(|record| SkippedRecord {
                            pocket_id,
                            path: path.clone(),
                            record,
                        }));
                    collection
                        .pockets
                        .push(Pocket::new(pocket_id, outcome.residues));
                }
                Err(error) if self.aggregator.policy() == MalformedPolicy::Skip => {
                    collection.failures.push(PocketFailure {
                        pocket_id,
                        path,
                        error,
                    });
                }
                Err(source) => {
                    return Err(EngineError::Pocket {
                        pocket_id,
                        path,
                        source,
                    });
                }
            }

            next_id = pocket_id.next();
        }

        Ok(collection)
    }
}
