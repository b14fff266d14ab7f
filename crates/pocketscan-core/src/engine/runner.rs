use std::ffi::OsString;
use std::io;
use std::path::PathBuf;
use std::process::Command;

/// A fully described external command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: PathBuf,
    pub args: Vec<OsString>,
}

impl Invocation {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn program_name(&self) -> String {
        self.program.display().to_string()
    }

    /// Shell-like rendering for logs. Not suitable for re-execution.
    pub fn command_line(&self) -> String {
        let mut line = self.program_name();
        for arg in &self.args {
            line.push(' ');
            line.push_str(&arg.to_string_lossy());
        }
        line
    }
}

/// How an external command finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandOutcome {
    pub success: bool,
    /// Exit code, if the process exited normally.
    pub code: Option<i32>,
}

impl CommandOutcome {
    pub fn succeeded() -> Self {
        Self {
            success: true,
            code: Some(0),
        }
    }
}

/// Capability to run external programs to completion.
///
/// The predictor and the viewer are always launched through this trait so
/// that workflows can be exercised without real binaries.
pub trait CommandRunner {
    /// Runs the command and blocks until it exits.
    ///
    /// # Errors
    ///
    /// Returns an error only if the process could not be started.
    fn run(&self, invocation: &Invocation) -> io::Result<CommandOutcome>;
}

/// Runs commands as child processes sharing this process's standard streams.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemCommandRunner;

impl CommandRunner for SystemCommandRunner {
    fn run(&self, invocation: &Invocation) -> io::Result<CommandOutcome> {
        let mut command = Command::new(&invocation.program);
        command.args(&invocation.args);
        let status = command.status()?;
        Ok(CommandOutcome {
            success: status.success(),
            code: status.code(),
        })
    }
}
