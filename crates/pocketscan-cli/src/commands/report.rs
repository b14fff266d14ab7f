use crate::cli::ReportArgs;
use crate::config::build_report_config;
use crate::error::Result;
use crate::utils::progress::CliProgressHandler;
use pocketscan::engine::progress::ProgressReporter;
use pocketscan::workflows::summarize;

pub fn run(args: ReportArgs) -> Result<()> {
    let app = build_report_config(&args)?;

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    let summary = summarize::summarize_report_file(
        &app.report_path,
        &app.separator,
        &app.summary_path,
        &reporter,
    )?;

    println!("Detected {} pocket(s).", summary.len());
    println!("✓ Pocket summary saved to {}", app.summary_path.display());
    Ok(())
}
