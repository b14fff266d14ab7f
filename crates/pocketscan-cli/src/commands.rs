pub mod collect;
pub mod detect;
pub mod report;
pub mod residues;
pub mod view;
