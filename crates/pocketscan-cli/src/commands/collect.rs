use crate::cli::CollectArgs;
use crate::config::build_collect_config;
use crate::error::Result;
use crate::utils::progress::CliProgressHandler;
use pocketscan::engine::progress::ProgressReporter;
use pocketscan::workflows::summarize;
use tracing::info;

pub fn run(args: CollectArgs) -> Result<()> {
    let app = build_collect_config(&args)?;
    info!(
        "Collecting pockets from {:?} into {:?}",
        app.layout.directory, app.summary_path
    );

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    let collection =
        summarize::summarize_pocket_dir(app.layout, app.policy, &app.summary_path, &reporter)?;

    if collection.is_empty() {
        println!("Warning: no pocket files were found.");
    } else {
        println!(
            "Collected {} pocket(s) lining {} residue(s) in total.",
            collection.pockets.len(),
            collection.total_residues()
        );
    }
    if !collection.skipped_records.is_empty() {
        println!(
            "Skipped {} unreadable record(s); run with -v for details.",
            collection.skipped_records.len()
        );
    }
    println!("✓ Pocket summary saved to {}", app.summary_path.display());
    Ok(())
}
