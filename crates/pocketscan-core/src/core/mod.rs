//! # Core Module
//!
//! Stateless building blocks of the pocket engine: the data models, the
//! fixed-column record reader and the table formats.
//!
//! ## Architecture
//!
//! - **Data Models** ([`models`]) - Atom records, residues, residue sets and pockets
//! - **File I/O** ([`io`]) - PDB record reading and CSV tables
//! - **Identifiers** ([`utils`]) - Static lookup tables for record names and residue classes
//!
//! Nothing in this module logs or prints. Malformed input is surfaced as
//! values so the caller decides how to report it.

pub mod io;
pub mod models;
pub mod utils;
