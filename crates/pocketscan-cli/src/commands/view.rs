use crate::cli::ViewArgs;
use crate::config::build_view_config;
use crate::error::Result;
use pocketscan::engine::progress::ProgressReporter;
use pocketscan::engine::runner::SystemCommandRunner;
use pocketscan::engine::viewer::ViewerOutcome;
use pocketscan::workflows::detect;

pub fn run(args: ViewArgs) -> Result<()> {
    let app = build_view_config(&args)?;

    let outcome = detect::open_viewer(
        &app.input_path,
        &app.viewer,
        &SystemCommandRunner,
        &ProgressReporter::new(),
    )?;
    match outcome {
        ViewerOutcome::Launched { script, .. } => {
            println!("Opened viewer session: {}", script.display())
        }
        ViewerOutcome::ScriptMissing { script } => {
            println!("Viewer script not found at {}", script.display())
        }
    }
    Ok(())
}
