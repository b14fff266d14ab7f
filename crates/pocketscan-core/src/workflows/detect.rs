use super::{residues, summarize};
use crate::core::io::summary::{SummaryRow, summarize_pockets};
use crate::engine::aggregator::ScanOutcome;
use crate::engine::collector::PocketCollection;
use crate::engine::config::{DetectionConfig, ViewerConfig};
use crate::engine::error::EngineError;
use crate::engine::predictor::{
    Predictor, PredictorOutput, PredictorRun, locate_output, output_dir_for,
};
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::runner::CommandRunner;
use crate::engine::viewer::{Viewer, ViewerOutcome};
use std::path::{Path, PathBuf};
use tracing::{info, instrument, warn};

/// Where the pockets of a detection run were read from.
#[derive(Debug)]
pub enum PocketSource {
    Collected(PocketCollection),
    Report(PathBuf),
}

#[derive(Debug)]
pub struct DetectionResult {
    pub predictor_run: PredictorRun,
    pub source: PocketSource,
    pub summary: Vec<SummaryRow>,
    pub summary_path: PathBuf,
    /// Whole-structure residues, when a residue table was requested.
    pub structure_residues: Option<ScanOutcome>,
}

impl DetectionResult {
    pub fn pocket_count(&self) -> usize {
        self.summary.len()
    }
}

/// Runs the predictor on `structure` and summarizes the pockets it finds.
///
/// # Errors
///
/// Failing to launch the predictor, missing predictor output, and failing to
/// write a table are fatal. Malformed pocket records are fatal only under
/// the abort policy.
#[instrument(skip_all, name = "detection_workflow", fields(structure = %structure.display()))]
pub fn run(
    structure: &Path,
    config: &DetectionConfig,
    runner: &dyn CommandRunner,
    reporter: &ProgressReporter,
) -> Result<DetectionResult, EngineError> {
    let structure_residues = match &config.output.residue_table_path {
        Some(path) => Some(residues::run(
            structure,
            config.malformed_policy,
            path,
            reporter,
        )?),
        None => None,
    };

    reporter.report(Progress::PhaseStart {
        name: "Running pocket predictor",
    });
    let predictor = Predictor::new(config.predictor.clone());
    info!(
        "Running {}: {}",
        predictor.kind(),
        predictor.invocation(structure).command_line()
    );
    let predictor_run = predictor.run(structure, runner)?;
    if !predictor_run.outcome.success {
        let message = match predictor_run.outcome.code {
            Some(code) => format!("{} exited with status {}", predictor.kind(), code),
            None => format!("{} was terminated by a signal", predictor.kind()),
        };
        warn!("{}; reading its output anyway.", message);
        reporter.report(Progress::Warning(message));
    }
    reporter.report(Progress::PhaseFinish);

    let output = locate_output(
        predictor.kind(),
        &predictor_run.output_dir,
        &config.pocket_naming,
        &config.report,
    )?;

    let (source, summary) = match output {
        PredictorOutput::PocketFiles(layout) => {
            let collection =
                summarize::collect_pockets(layout, config.malformed_policy, reporter)?;
            let summary = summarize_pockets(&collection.pockets);
            (PocketSource::Collected(collection), summary)
        }
        PredictorOutput::Report(path) => {
            let summary =
                summarize::load_report(&path, &config.report.residue_separator, reporter)?;
            (PocketSource::Report(path), summary)
        }
    };
    info!("Detected {} pocket(s).", summary.len());

    summarize::write_summary(&summary, &config.output.summary_path, reporter)?;

    Ok(DetectionResult {
        predictor_run,
        source,
        summary,
        summary_path: config.output.summary_path.clone(),
        structure_residues,
    })
}

/// Opens the viewer session script a predictor left next to `structure`.
///
/// A missing script is a warning, not an error.
#[instrument(skip_all, name = "open_viewer", fields(structure = %structure.display()))]
pub fn open_viewer(
    structure: &Path,
    config: &ViewerConfig,
    runner: &dyn CommandRunner,
    reporter: &ProgressReporter,
) -> Result<ViewerOutcome, EngineError> {
    let viewer = Viewer::new(config.clone());
    let stem = structure
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let script = viewer.script_path(&output_dir_for(structure), &stem);

    let outcome = viewer.open(&script, runner)?;
    match &outcome {
        ViewerOutcome::Launched { outcome, .. } if !outcome.success => {
            let message = format!("Viewer exited with status {:?}", outcome.code);
            warn!("{}", message);
            reporter.report(Progress::Warning(message));
        }
        ViewerOutcome::Launched { script, .. } => {
            info!("Opened {:?} in the viewer.", script);
        }
        ViewerOutcome::ScriptMissing { script } => {
            let message = format!("Viewer script {} not found", script.display());
            warn!("{}", message);
            reporter.report(Progress::Warning(message));
        }
    }
    Ok(outcome)
}
