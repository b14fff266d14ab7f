use crate::cli::DetectArgs;
use crate::config::build_detect_config;
use crate::error::Result;
use crate::utils::progress::CliProgressHandler;
use pocketscan::engine::progress::ProgressReporter;
use pocketscan::engine::runner::SystemCommandRunner;
use pocketscan::engine::viewer::ViewerOutcome;
use pocketscan::workflows::detect::{self, PocketSource};
use tracing::info;

pub fn run(args: DetectArgs) -> Result<()> {
    info!("Building configuration from file and CLI arguments...");
    let app = build_detect_config(&args)?;

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());
    let runner = SystemCommandRunner;

    println!(
        "Running {} on {}...",
        app.core_config.predictor.kind,
        app.input_path.display()
    );
    let result = detect::run(&app.input_path, &app.core_config, &runner, &reporter)?;

    if let Some(outcome) = &result.structure_residues {
        println!(
            "Residue table with {} residue(s) saved to {}",
            outcome.residues.len(),
            app.core_config
                .output
                .residue_table_path
                .as_deref()
                .map(|p| p.display().to_string())
                .unwrap_or_default()
        );
    }

    match &result.source {
        PocketSource::Collected(collection) if !collection.failures.is_empty() => println!(
            "Warning: {} pocket file(s) could not be read.",
            collection.failures.len()
        ),
        PocketSource::Report(path) => info!("Pockets read from report {:?}.", path),
        _ => {}
    }

    if result.pocket_count() == 0 {
        println!("Warning: the predictor found no pockets.");
    } else {
        println!("\nDetected {} pocket(s).", result.pocket_count());
        for row in result.summary.iter().take(5) {
            println!("  Pocket {:>3}: {:>3} residue(s)", row.pocket_id, row.residue_count);
        }
        if result.pocket_count() > 5 {
            println!("  ...");
        }
    }
    println!("✓ Pocket summary saved to {}", result.summary_path.display());

    if let Some(viewer) = &app.viewer {
        match detect::open_viewer(&app.input_path, viewer, &runner, &reporter)? {
            ViewerOutcome::Launched { script, .. } => {
                println!("Opened viewer session: {}", script.display())
            }
            ViewerOutcome::ScriptMissing { script } => {
                println!("Viewer script not found at {}", script.display())
            }
        }
    }

    Ok(())
}
