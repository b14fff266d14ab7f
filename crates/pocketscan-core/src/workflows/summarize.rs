use crate::core::io::report::{PocketReportFile, summarize_report};
use crate::core::io::summary::{PocketSummaryFile, SummaryRow, summarize_pockets};
use crate::core::io::traits::TableFile;
use crate::engine::collector::{PocketCollection, PocketCollector, ProbeStop};
use crate::engine::config::{MalformedPolicy, PocketLayout};
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use std::path::Path;
use tracing::{debug, info, instrument, warn};

/// Collects the pockets described by `layout` and reports what was found.
#[instrument(skip_all, name = "collect_pockets", fields(dir = %layout.directory.display()))]
pub fn collect_pockets(
    layout: PocketLayout,
    policy: MalformedPolicy,
    reporter: &ProgressReporter,
) -> Result<PocketCollection, EngineError> {
    reporter.report(Progress::PhaseStart {
        name: "Collecting pockets",
    });
    let collection = PocketCollector::new(layout, policy).collect()?;

    for pocket in &collection.pockets {
        debug!(
            "Pocket {}: {} residue(s).",
            pocket.id,
            pocket.residue_count()
        );
        reporter.report(Progress::PocketCollected {
            pocket_id: pocket.id,
            residue_count: pocket.residue_count(),
        });
    }
    for skipped in &collection.skipped_records {
        let message = format!(
            "Skipped record in {}: {}",
            skipped.path.display(),
            skipped.record
        );
        warn!("{}", message);
        reporter.report(Progress::Warning(message));
    }
    for failure in &collection.failures {
        let message = format!(
            "Could not read pocket {} from {}: {}",
            failure.pocket_id,
            failure.path.display(),
            failure.error
        );
        warn!("{}", message);
        reporter.report(Progress::Warning(message));
    }

    match collection.stop {
        ProbeStop::MissingDirectory => info!("Pocket directory does not exist."),
        ProbeStop::Gap(id) => debug!("No file for pocket {}; probing stopped.", id),
        ProbeStop::Limit(id) => info!("Stopped probing at configured maximum pocket {}.", id),
        ProbeStop::Exhausted => debug!("Pocket id space exhausted."),
    }

    if collection.is_empty() {
        warn!("No pockets were found.");
        reporter.report(Progress::Warning("No pockets were found.".to_string()));
    } else {
        info!(
            "Collected {} pocket(s) with {} residue(s) in total.",
            collection.pockets.len(),
            collection.total_residues()
        );
    }
    reporter.report(Progress::PhaseFinish);
    Ok(collection)
}

/// Loads a consolidated pocket report and projects it onto summary rows.
pub fn load_report(
    path: &Path,
    separator: &str,
    reporter: &ProgressReporter,
) -> Result<Vec<SummaryRow>, EngineError> {
    reporter.report(Progress::PhaseStart {
        name: "Reading pocket report",
    });
    let rows =
        PocketReportFile::read_from_path(path).map_err(|source| EngineError::TableRead {
            path: path.to_path_buf(),
            source,
        })?;
    info!("Loaded {} pocket(s) from {:?}.", rows.len(), path);

    let summary = summarize_report(&rows, separator);
    if summary.is_empty() {
        warn!("Pocket report {:?} lists no pockets.", path);
        reporter.report(Progress::Warning("No pockets were found.".to_string()));
    }
    for row in &summary {
        if row.residue_count == 0 {
            debug!("Pocket {} lists no residues.", row.pocket_id);
        }
    }
    reporter.report(Progress::PhaseFinish);
    Ok(summary)
}

/// Writes summary rows to `path`, replacing any previous file.
pub fn write_summary(
    rows: &[SummaryRow],
    path: &Path,
    reporter: &ProgressReporter,
) -> Result<(), EngineError> {
    reporter.report(Progress::PhaseStart {
        name: "Writing pocket summary",
    });
    PocketSummaryFile::write_to_path(rows, path).map_err(|source| EngineError::TableWrite {
        path: path.to_path_buf(),
        source,
    })?;
    info!("Pocket summary with {} row(s) saved to {:?}.", rows.len(), path);
    reporter.report(Progress::Message(format!(
        "Pocket summary saved to {}",
        path.display()
    )));
    reporter.report(Progress::PhaseFinish);
    Ok(())
}

/// Summarizes an existing directory of per-pocket structure files.
pub fn summarize_pocket_dir(
    layout: PocketLayout,
    policy: MalformedPolicy,
    output: &Path,
    reporter: &ProgressReporter,
) -> Result<PocketCollection, EngineError> {
    let collection = collect_pockets(layout, policy, reporter)?;
    write_summary(&summarize_pockets(&collection.pockets), output, reporter)?;
    Ok(collection)
}

/// Summarizes an existing consolidated pocket report.
pub fn summarize_report_file(
    report: &Path,
    separator: &str,
    output: &Path,
    reporter: &ProgressReporter,
) -> Result<Vec<SummaryRow>, EngineError> {
    let summary = load_report(report, separator, reporter)?;
    write_summary(&summary, output, reporter)?;
    Ok(summary)
}
