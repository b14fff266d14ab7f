//! # Engine Module
//!
//! Turns raw record streams and predictor output into pocket collections.
//!
//! ## Architecture
//!
//! - **Aggregation** ([`aggregator`]) - Atom records to deduplicated residue sets
//! - **Collection** ([`collector`]) - Numbered per-pocket files to an ordered pocket list
//! - **External Collaborators** ([`runner`], [`predictor`], [`viewer`]) - The injected
//!   command-runner seam, the pocket predictor contract and the molecular viewer
//! - **Configuration** ([`config`]) - Policies, file layouts and the detection config builder
//! - **Progress Monitoring** ([`progress`]) - Events delivered to a caller-supplied reporter
//! - **Error Handling** ([`error`]) - Engine error taxonomy
//!
//! Malformed-record handling is explicit: see [`config::MalformedPolicy`].

pub mod aggregator;
pub mod collector;
pub mod config;
pub mod error;
pub mod predictor;
pub mod progress;
pub mod runner;
pub mod viewer;
