use super::config::ViewerConfig;
use super::error::EngineError;
use super::runner::{CommandOutcome, CommandRunner, Invocation};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewerOutcome {
    Launched {
        script: PathBuf,
        outcome: CommandOutcome,
    },
    /// The session script does not exist; nothing was launched.
    ScriptMissing { script: PathBuf },
}

/// External molecular viewer opened on a predictor's session script.
#[derive(Debug, Clone, Default)]
pub struct Viewer {
    config: ViewerConfig,
}

impl Viewer {
    pub fn new(config: ViewerConfig) -> Self {
        Self { config }
    }

    /// Session script inside `output_dir`: the configured name, or `<stem>.pml`.
    pub fn script_path(&self, output_dir: &Path, stem: &str) -> PathBuf {
        match &self.config.script_name {
            Some(name) => output_dir.join(name),
            None => output_dir.join(format!("{}.pml", stem)),
        }
    }

    pub fn invocation(&self, script: &Path) -> Invocation {
        Invocation::new(&self.config.program)
            .args(&self.config.args)
            .arg(script)
    }

    /// Opens `script` in the viewer if it exists.
    ///
    /// # Errors
    ///
    /// Only a failure to start the viewer process is an error. An absent
    /// script is reported through [`ViewerOutcome::ScriptMissing`].
    pub fn open(
        &self,
        script: &Path,
        runner: &dyn CommandRunner,
    ) -> Result<ViewerOutcome, EngineError> {
        if !script.is_file() {
            return Ok(ViewerOutcome::ScriptMissing {
                script: script.to_path_buf(),
            });
        }
        let invocation = self.invocation(script);
        let outcome = runner
            .run(&invocation)
            .map_err(|source| EngineError::CommandLaunch {
                program: invocation.program_name(),
                source,
            })?;
        Ok(ViewerOutcome::Launched {
            script: script.to_path_buf(),
            outcome,
        })
    }
}
