use pocketscan::engine::config::{
    DetectionConfig, MalformedPolicy, PocketLayout, ViewerConfig,
};
use std::path::PathBuf;

pub struct DetectConfig {
    pub input_path: PathBuf,
    pub core_config: DetectionConfig,
    /// Present when the viewer should be opened after detection.
    pub viewer: Option<ViewerConfig>,
}

pub struct CollectConfig {
    pub layout: PocketLayout,
    pub policy: MalformedPolicy,
    pub summary_path: PathBuf,
}

pub struct ReportSummaryConfig {
    pub report_path: PathBuf,
    pub separator: String,
    pub summary_path: PathBuf,
}

pub struct ResiduesConfig {
    pub input_path: PathBuf,
    pub policy: MalformedPolicy,
    pub output_path: PathBuf,
}

pub struct ViewConfig {
    pub input_path: PathBuf,
    pub viewer: ViewerConfig,
}
