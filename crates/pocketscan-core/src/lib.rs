//! # pocketscan Core Library
//!
//! Turns the output of an external binding-pocket predictor into a
//! residue-level pocket summary.
//!
//! ## Architectural Philosophy
//!
//! The library follows a three-layer architecture:
//!
//! - **[`core`]: The Foundation.** Stateless data models (`AtomRecord`, `ResidueSet`,
//!   `Pocket`), the fixed-column PDB record reader and the CSV table formats.
//!
//! - **[`engine`]: The Logic Core.** Residue aggregation, the pocket collector,
//!   configuration, the error taxonomy, progress reporting and the injected
//!   external-command seam used for the predictor and the viewer.
//!
//! - **[`workflows`]: The Public API.** End-to-end procedures that run the
//!   predictor, collect pockets and write summaries.

pub mod core;
pub mod engine;
pub mod workflows;
