use crate::error::{CliError, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct FilePredictorConfig {
    pub kind: Option<String>,
    pub executable: Option<PathBuf>,
    #[serde(rename = "extra-args")]
    pub extra_args: Option<Vec<String>>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct FilePocketsConfig {
    pub subdirectory: Option<String>,
    pub prefix: Option<String>,
    pub suffix: Option<String>,
    pub extension: Option<String>,
    #[serde(rename = "max-pocket-id")]
    pub max_pocket_id: Option<u32>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct FileReportConfig {
    #[serde(rename = "file-name")]
    pub file_name: Option<String>,
    #[serde(rename = "residue-separator")]
    pub residue_separator: Option<String>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct FileViewerConfig {
    pub program: Option<PathBuf>,
    pub args: Option<Vec<String>>,
    #[serde(rename = "script-name")]
    pub script_name: Option<String>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct FileOutputConfig {
    pub summary: Option<PathBuf>,
    pub residues: Option<PathBuf>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    #[serde(rename = "on-malformed")]
    pub on_malformed: Option<String>,
    pub predictor: Option<FilePredictorConfig>,
    pub pockets: Option<FilePocketsConfig>,
    pub report: Option<FileReportConfig>,
    pub viewer: Option<FileViewerConfig>,
    pub output: Option<FileOutputConfig>,
}

impl FileConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }
}
