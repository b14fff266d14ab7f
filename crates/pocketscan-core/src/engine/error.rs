use thiserror::Error;

use super::config::ConfigError;
use crate::core::io::pdb::PdbError;
use crate::core::io::summary::TableError;
use crate::core::models::ids::PocketId;
use std::path::PathBuf;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Expected predictor output not found: {path}", path = path.display())]
    MissingOutput { path: PathBuf },

    #[error("Failed to launch '{program}': {source}")]
    CommandLaunch {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read structure file '{path}': {source}", path = path.display())]
    Structure {
        path: PathBuf,
        #[source]
        source: PdbError,
    },

    #[error("Failed to read pocket {pocket_id} from '{path}': {source}", path = path.display())]
    Pocket {
        pocket_id: PocketId,
        path: PathBuf,
        #[source]
        source: PdbError,
    },

    #[error("Failed to read table '{path}': {source}", path = path.display())]
    TableRead {
        path: PathBuf,
        #[source]
        source: TableError,
    },

    #[error("Failed to write table '{path}': {source}", path = path.display())]
    TableWrite {
        path: PathBuf,
        #[source]
        source: TableError,
    },
}
