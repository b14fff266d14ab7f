//! Provides input/output functionality for the files the pocket engine touches.
//!
//! Structural files are read through the fixed-column PDB record reader in
//! [`pdb`]. Pocket summaries, residue dumps and consolidated predictor reports
//! are delimited tables sharing the [`traits::TableFile`] interface.

pub mod pdb;
pub mod report;
pub mod summary;
pub mod traits;
