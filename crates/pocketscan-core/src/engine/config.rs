use crate::core::io::summary::RESIDUE_DELIMITER;
use crate::core::models::ids::PocketId;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
    #[error("Unknown predictor '{0}'. Expected 'fpocket' or 'p2rank'.")]
    UnknownPredictor(String),
    #[error("Unknown malformed-record policy '{0}'. Expected 'skip' or 'abort'.")]
    UnknownPolicy(String),
    #[error("Invalid value for {key}: {reason}")]
    InvalidValue { key: &'static str, reason: String },
}

/// What to do with an `ATOM`/`HETATM` line whose fields cannot be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MalformedPolicy {
    /// Drop the record, keep it as a diagnostic and continue.
    #[default]
    Skip,
    /// Fail the file on its first malformed record.
    Abort,
}

impl FromStr for MalformedPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "skip" => Ok(MalformedPolicy::Skip),
            "abort" => Ok(MalformedPolicy::Abort),
            _ => Err(ConfigError::UnknownPolicy(s.to_string())),
        }
    }
}

/// The external pocket predictors whose output layout is understood.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PredictorKind {
    /// fpocket: one `pocket<N>_atm.pdb` file per pocket.
    #[default]
    Fpocket,
    /// P2Rank: one consolidated pocket table.
    P2rank,
}

impl PredictorKind {
    pub fn default_executable(self) -> &'static str {
        match self {
            PredictorKind::Fpocket => "fpocket",
            PredictorKind::P2rank => "prank",
        }
    }
}

impl fmt::Display for PredictorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PredictorKind::Fpocket => f.write_str("fpocket"),
            PredictorKind::P2rank => f.write_str("p2rank"),
        }
    }
}

impl FromStr for PredictorKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fpocket" => Ok(PredictorKind::Fpocket),
            "p2rank" | "prank" => Ok(PredictorKind::P2rank),
            _ => Err(ConfigError::UnknownPredictor(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PredictorConfig {
    pub kind: PredictorKind,
    pub executable: PathBuf,
    pub extra_args: Vec<String>,
}

impl PredictorConfig {
    pub fn new(kind: PredictorKind) -> Self {
        Self {
            kind,
            executable: PathBuf::from(kind.default_executable()),
            extra_args: Vec::new(),
        }
    }
}

/// Naming convention of per-pocket structure files: `<prefix><N><suffix>.<extension>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PocketNaming {
    pub subdirectory: String,
    pub prefix: String,
    pub suffix: String,
    pub extension: String,
    /// Highest pocket id to probe. `None` probes until the first gap.
    pub max_pocket_id: Option<PocketId>,
}

impl Default for PocketNaming {
    fn default() -> Self {
        Self {
            subdirectory: "pockets".to_string(),
            prefix: "pocket".to_string(),
            suffix: "_atm".to_string(),
            extension: "pdb".to_string(),
            max_pocket_id: None,
        }
    }
}

/// Where per-pocket structure files live and how they are named.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PocketLayout {
    pub directory: PathBuf,
    pub naming: PocketNaming,
}

impl PocketLayout {
    /// A layout for `directory` using the default `pocket<N>_atm.pdb` naming.
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            naming: PocketNaming::default(),
        }
    }

    pub fn with_naming(directory: impl Into<PathBuf>, naming: PocketNaming) -> Self {
        Self {
            directory: directory.into(),
            naming,
        }
    }

    /// The layout inside a predictor output directory (`<out>/<subdirectory>`).
    pub fn in_output_dir(output_dir: &Path, naming: &PocketNaming) -> Self {
        Self::with_naming(output_dir.join(&naming.subdirectory), naming.clone())
    }

    pub fn file_name(&self, id: PocketId) -> String {
        let n = &self.naming;
        if n.extension.is_empty() {
            format!("{}{}{}", n.prefix, id, n.suffix)
        } else {
            format!("{}{}{}.{}", n.prefix, id, n.suffix, n.extension)
        }
    }

    pub fn path_for(&self, id: PocketId) -> PathBuf {
        self.directory.join(self.file_name(id))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportConfig {
    /// File name of the consolidated table inside the predictor output directory.
    pub file_name: String,
    /// Separator between residue descriptors in the residue column.
    pub residue_separator: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            file_name: "pockets.csv".to_string(),
            residue_separator: RESIDUE_DELIMITER.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewerConfig {
    pub program: PathBuf,
    pub args: Vec<String>,
    /// Session script name inside the output directory. Defaults to `<stem>.pml`.
    pub script_name: Option<String>,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        if cfg!(target_os = "macos") {
            Self {
                program: PathBuf::from("open"),
                args: vec!["-a".to_string(), "PyMOL".to_string()],
                script_name: None,
            }
        } else {
            Self {
                program: PathBuf::from("pymol"),
                args: Vec::new(),
                script_name: None,
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputConfig {
    pub summary_path: PathBuf,
    pub residue_table_path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectionConfig {
    pub predictor: PredictorConfig,
    pub malformed_policy: MalformedPolicy,
    pub pocket_naming: PocketNaming,
    pub report: ReportConfig,
    pub output: OutputConfig,
}

#[derive(Default)]
pub struct DetectionConfigBuilder {
    predictor_kind: Option<PredictorKind>,
    executable: Option<PathBuf>,
    extra_args: Vec<String>,
    malformed_policy: Option<MalformedPolicy>,
    pocket_naming: Option<PocketNaming>,
    report: Option<ReportConfig>,
    summary_path: Option<PathBuf>,
    residue_table_path: Option<PathBuf>,
}

impl DetectionConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn predictor(mut self, kind: PredictorKind) -> Self {
        self.predictor_kind = Some(kind);
        self
    }

    pub fn executable(mut self, path: PathBuf) -> Self {
        self.executable = Some(path);
        self
    }

    pub fn extra_args(mut self, args: Vec<String>) -> Self {
        self.extra_args = args;
        self
    }

    pub fn malformed_policy(mut self, policy: MalformedPolicy) -> Self {
        self.malformed_policy = Some(policy);
        self
    }

    pub fn pocket_naming(mut self, naming: PocketNaming) -> Self {
        self.pocket_naming = Some(naming);
        self
    }

    pub fn report(mut self, report: ReportConfig) -> Self {
        self.report = Some(report);
        self
    }

    pub fn summary_path(mut self, path: PathBuf) -> Self {
        self.summary_path = Some(path);
        self
    }

    pub fn residue_table_path(mut self, path: Option<PathBuf>) -> Self {
        self.residue_table_path = path;
        self
    }

    pub fn build(self) -> Result<DetectionConfig, ConfigError> {
        let kind = self.predictor_kind.unwrap_or_default();
        let report = self.report.unwrap_or_default();
        if report.residue_separator.is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "report.residue-separator",
                reason: "separator cannot be empty".to_string(),
            });
        }
        let pocket_naming = self.pocket_naming.unwrap_or_default();
        if pocket_naming.prefix.is_empty() && pocket_naming.suffix.is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "pockets",
                reason: "file prefix and suffix cannot both be empty".to_string(),
            });
        }

        Ok(DetectionConfig {
            predictor: PredictorConfig {
                kind,
                executable: self
                    .executable
                    .unwrap_or_else(|| PathBuf::from(kind.default_executable())),
                extra_args: self.extra_args,
            },
            malformed_policy: self.malformed_policy.unwrap_or_default(),
            pocket_naming,
            report,
            output: OutputConfig {
                summary_path: self
                    .summary_path
                    .ok_or(ConfigError::MissingParameter("summary_path"))?,
                residue_table_path: self.residue_table_path,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_applies_defaults() {
        let config = DetectionConfigBuilder::new()
            .summary_path(PathBuf::from("pockets_summary.csv"))
            .build()
            .unwrap();
        assert_eq!(config.predictor.kind, PredictorKind::Fpocket);
        assert_eq!(config.predictor.executable, PathBuf::from("fpocket"));
        assert_eq!(config.malformed_policy, MalformedPolicy::Skip);
        assert_eq!(config.pocket_naming, PocketNaming::default());
        assert_eq!(config.report.file_name, "pockets.csv");
        assert_eq!(config.output.residue_table_path, None);
    }

    #[test]
    fn builder_requires_summary_path() {
        let result = DetectionConfigBuilder::new().build();
        assert_eq!(result, Err(ConfigError::MissingParameter("summary_path")));
    }

    #[test]
    fn builder_uses_predictor_specific_executable() {
        let config = DetectionConfigBuilder::new()
            .predictor(PredictorKind::P2rank)
            .summary_path(PathBuf::from("out.csv"))
            .build()
            .unwrap();
        assert_eq!(config.predictor.executable, PathBuf::from("prank"));

        let config = DetectionConfigBuilder::new()
            .predictor(PredictorKind::P2rank)
            .executable(PathBuf::from("./p2rank_2.5/prank"))
            .summary_path(PathBuf::from("out.csv"))
            .build()
            .unwrap();
        assert_eq!(config.predictor.executable, PathBuf::from("./p2rank_2.5/prank"));
    }

    #[test]
    fn builder_rejects_empty_separator() {
        let result = DetectionConfigBuilder::new()
            .summary_path(PathBuf::from("out.csv"))
            .report(ReportConfig {
                file_name: "pockets.csv".to_string(),
                residue_separator: String::new(),
            })
            .build();
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn predictor_kind_and_policy_parse_case_insensitively() {
        assert_eq!("FPocket".parse::<PredictorKind>(), Ok(PredictorKind::Fpocket));
        assert_eq!("p2rank".parse::<PredictorKind>(), Ok(PredictorKind::P2rank));
        assert!("cavity".parse::<PredictorKind>().is_err());
        assert_eq!("Abort".parse::<MalformedPolicy>(), Ok(MalformedPolicy::Abort));
        assert!("ignore".parse::<MalformedPolicy>().is_err());
    }

    #[test]
    fn pocket_layout_builds_fpocket_file_names() {
        let layout = PocketLayout::in_output_dir(Path::new("1tup_out"), &PocketNaming::default());
        let id = PocketId::new(3).unwrap();
        assert_eq!(layout.file_name(id), "pocket3_atm.pdb");
        assert_eq!(
            layout.path_for(id),
            Path::new("1tup_out").join("pockets").join("pocket3_atm.pdb")
        );
    }

    #[test]
    fn pocket_layout_supports_custom_naming() {
        let naming = PocketNaming {
            extension: String::new(),
            suffix: "_vert".to_string(),
            ..PocketNaming::default()
        };
        let layout = PocketLayout::with_naming("dir", naming);
        assert_eq!(layout.file_name(PocketId::FIRST), "pocket1_vert");
    }
}
