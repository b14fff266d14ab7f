//! # Core Models Module
//!
//! Data structures describing what the pocket engine reads and produces.
//!
//! ## Key Components
//!
//! - [`atom`] - Atom records reduced to their residue-identifying fields
//! - [`residue`] - Residue identity, hetero classification and deduplicated residue sets
//! - [`pocket`] - A predicted pocket and the residues that line it
//! - [`ids`] - Identifier types
//!
//! ## Usage
//!
//! ```ignore
//! use pocketscan::core::models::{ids::PocketId, pocket::Pocket, residue::ResidueSet};
//!
//! let mut residues = ResidueSet::new();
//! residues.absorb(&record);
//! let pocket = Pocket::new(PocketId::FIRST, residues);
//! assert_eq!(pocket.residue_count(), 1);
//! ```

pub mod atom;
pub mod ids;
pub mod pocket;
pub mod residue;
