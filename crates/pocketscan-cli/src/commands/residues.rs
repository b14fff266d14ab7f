use crate::cli::ResiduesArgs;
use crate::config::build_residues_config;
use crate::error::Result;
use crate::utils::progress::CliProgressHandler;
use pocketscan::engine::progress::ProgressReporter;
use pocketscan::workflows::residues;

pub fn run(args: ResiduesArgs) -> Result<()> {
    let app = build_residues_config(&args)?;

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    let outcome = residues::run(&app.input_path, app.policy, &app.output_path, &reporter)?;

    let preview: Vec<String> = outcome
        .residues
        .iter()
        .take(5)
        .map(|r| r.key.to_string())
        .collect();
    println!(
        "Extracted {} residue(s): {}{}",
        outcome.residues.len(),
        preview.join(", "),
        if outcome.residues.len() > 5 { ", ..." } else { "" }
    );
    println!("✓ Residue table saved to {}", app.output_path.display());
    Ok(())
}
