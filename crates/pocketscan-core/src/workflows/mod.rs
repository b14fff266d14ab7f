//! # Workflows Module
//!
//! High-level entry points that tie the readers, the aggregator, the pocket
//! collector, and the external collaborators together into complete runs.
//!
//! ## Overview
//!
//! - **Detection** ([`detect`]) runs a pocket predictor on a structure, reads
//!   back whatever it produced, and writes the pocket summary table.
//! - **Summaries** ([`summarize`]) build the same table from predictor output
//!   that already exists on disk, either a directory of per-pocket files or a
//!   consolidated report.
//! - **Residue tables** ([`residues`]) list every residue of one structure.
//!
//! Every workflow reports its phases through a
//! [`ProgressReporter`](crate::engine::progress::ProgressReporter) and logs
//! through `tracing`; nothing here prints directly.

pub mod detect;
pub mod residues;
pub mod summarize;
