use super::config::{PocketLayout, PocketNaming, PredictorConfig, PredictorKind, ReportConfig};
use super::error::EngineError;
use super::runner::{CommandOutcome, CommandRunner, Invocation};
use std::path::{Path, PathBuf};

/// Output directory a predictor writes for `structure`: `<stem>_out`, next to the input.
pub fn output_dir_for(structure: &Path) -> PathBuf {
    let stem = structure
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "structure".to_string());
    structure.with_file_name(format!("{}_out", stem))
}

/// Where the pocket data of a finished predictor run can be read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PredictorOutput {
    /// One structure file per pocket.
    PocketFiles(PocketLayout),
    /// A single consolidated pocket table.
    Report(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PredictorRun {
    pub invocation: Invocation,
    pub outcome: CommandOutcome,
    pub output_dir: PathBuf,
}

/// An external pocket predictor invoked as a blocking subprocess.
#[derive(Debug, Clone)]
pub struct Predictor {
    config: PredictorConfig,
}

impl Predictor {
    pub fn new(config: PredictorConfig) -> Self {
        Self { config }
    }

    pub fn kind(&self) -> PredictorKind {
        self.config.kind
    }

    pub fn invocation(&self, structure: &Path) -> Invocation {
        let invocation = Invocation::new(&self.config.executable);
        let invocation = match self.config.kind {
            PredictorKind::Fpocket => invocation.arg("-f").arg(structure),
            PredictorKind::P2rank => invocation.arg("predict").arg("-f").arg(structure),
        };
        invocation.args(&self.config.extra_args)
    }

    /// Runs the predictor on `structure` and waits for it to exit.
    ///
    /// A non-zero exit status is returned in the outcome, not as an error:
    /// whether the run produced usable output is decided by [`locate_output`].
    pub fn run(
        &self,
        structure: &Path,
        runner: &dyn CommandRunner,
    ) -> Result<PredictorRun, EngineError> {
        let invocation = self.invocation(structure);
        let outcome = runner
            .run(&invocation)
            .map_err(|source| EngineError::CommandLaunch {
                program: invocation.program_name(),
                source,
            })?;
        Ok(PredictorRun {
            invocation,
            outcome,
            output_dir: output_dir_for(structure),
        })
    }
}

/// Checks that a predictor run left its expected output behind.
///
/// # Errors
///
/// [`EngineError::MissingOutput`] names the output directory, or for P2Rank the
/// report file, that does not exist. A missing fpocket `pockets/` directory is
/// not an error; it is collected as zero pockets.
pub fn locate_output(
    kind: PredictorKind,
    output_dir: &Path,
    naming: &PocketNaming,
    report: &ReportConfig,
) -> Result<PredictorOutput, EngineError> {
    if !output_dir.is_dir() {
        return Err(EngineError::MissingOutput {
            path: output_dir.to_path_buf(),
        });
    }
    match kind {
        PredictorKind::Fpocket => Ok(PredictorOutput::PocketFiles(
            PocketLayout::in_output_dir(output_dir, naming),
        )),
        PredictorKind::P2rank => {
            let path = output_dir.join(&report.file_name);
            if path.is_file() {
                Ok(PredictorOutput::Report(path))
            } else {
                Err(EngineError::MissingOutput { path })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::io;
    use tempfile::tempdir;

    struct RecordingRunner {
        calls: RefCell<Vec<Invocation>>,
        outcome: io::Result<CommandOutcome>,
    }

    impl RecordingRunner {
        fn ok() -> Self {
            Self {
                calls: RefCell::new(Vec::new()),
                outcome: Ok(CommandOutcome::succeeded()),
            }
        }
    }

    impl CommandRunner for RecordingRunner {
        fn run(&self, invocation: &Invocation) -> io::Result<CommandOutcome> {
            self.calls.borrow_mut().push(invocation.clone());
            match &self.outcome {
                Ok(outcome) => Ok(*outcome),
                Err(e) => Err(io::Error::new(e.kind(), e.to_string())),
            }
        }
    }

    #[test]
    fn output_dir_strips_extension_and_keeps_parent() {
        assert_eq!(
            output_dir_for(Path::new("data/1tup.pdb")),
            PathBuf::from("data/1tup_out")
        );
        assert_eq!(output_dir_for(Path::new("1tup")), PathBuf::from("1tup_out"));
    }

    #[test]
    fn invocation_matches_predictor_command_line() {
        let fpocket = Predictor::new(PredictorConfig::new(PredictorKind::Fpocket));
        assert_eq!(
            fpocket.invocation(Path::new("1tup.pdb")).command_line(),
            "fpocket -f 1tup.pdb"
        );

        let mut config = PredictorConfig::new(PredictorKind::P2rank);
        config.executable = PathBuf::from("./p2rank_2.5/prank");
        config.extra_args = vec!["-threads".to_string(), "2".to_string()];
        let p2rank = Predictor::new(config);
        assert_eq!(
            p2rank.invocation(Path::new("1tup.pdb")).command_line(),
            "./p2rank_2.5/prank predict -f 1tup.pdb -threads 2"
        );
    }

    #[test]
    fn run_invokes_runner_once_and_reports_output_dir() {
        let runner = RecordingRunner::ok();
        let predictor = Predictor::new(PredictorConfig::new(PredictorKind::Fpocket));
        let run = predictor.run(Path::new("in/1tup.pdb"), &runner).unwrap();
        assert_eq!(runner.calls.borrow().len(), 1);
        assert_eq!(run.output_dir, PathBuf::from("in/1tup_out"));
        assert!(run.outcome.success);
    }

    #[test]
    fn run_names_program_when_launch_fails() {
        let runner = RecordingRunner {
            calls: RefCell::new(Vec::new()),
            outcome: Err(io::Error::new(io::ErrorKind::NotFound, "not found")),
        };
        let predictor = Predictor::new(PredictorConfig::new(PredictorKind::Fpocket));
        let err = predictor.run(Path::new("1tup.pdb"), &runner).unwrap_err();
        assert!(matches!(err, EngineError::CommandLaunch { ref program, .. } if program == "fpocket"));
    }

    #[test]
    fn locate_output_requires_output_directory() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("1tup_out");
        let err = locate_output(
            PredictorKind::Fpocket,
            &missing,
            &PocketNaming::default(),
            &ReportConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, EngineError::MissingOutput { ref path } if *path == missing));
    }

    #[test]
    fn locate_output_resolves_fpocket_pocket_directory() {
        let dir = tempdir().unwrap();
        let output = locate_output(
            PredictorKind::Fpocket,
            dir.path(),
            &PocketNaming::default(),
            &ReportConfig::default(),
        )
        .unwrap();
        assert_eq!(
            output,
            PredictorOutput::PocketFiles(PocketLayout::new(dir.path().join("pockets")))
        );
    }

    #[test]
    fn locate_output_requires_p2rank_report() {
        let dir = tempdir().unwrap();
        let err = locate_output(
            PredictorKind::P2rank,
            dir.path(),
            &PocketNaming::default(),
            &ReportConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, EngineError::MissingOutput { ref path } if path.ends_with("pockets.csv")));

        std::fs::write(dir.path().join("pockets.csv"), "pocket_number,score,pocket_residues\n")
            .unwrap();
        let output = locate_output(
            PredictorKind::P2rank,
            dir.path(),
            &PocketNaming::default(),
            &ReportConfig::default(),
        )
        .unwrap();
        assert_eq!(output, PredictorOutput::Report(dir.path().join("pockets.csv")));
    }
}
