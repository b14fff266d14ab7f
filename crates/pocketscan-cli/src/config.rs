//! Command-line configuration: an optional TOML file, `-S KEY=VALUE`
//! overrides, and dedicated flags, merged with precedence flags > file > defaults.

mod builder;
mod defaults;
mod file;
mod models;

pub use builder::{
    build_collect_config, build_detect_config, build_report_config, build_residues_config,
    build_view_config,
};
