//! External command execution
//!
//! Every git and build invocation goes through the [CommandRunner] trait so
//! the pipeline can be exercised against [mock::RecordingRunner] in tests and
//! [system::SystemRunner] for real.
//!
//! Commands are always a program plus an argument array. Nothing is ever
//! handed to a shell, so a commit message reaches git as one opaque argument.

pub mod mock;
pub mod system;

pub use mock::RecordingRunner;
pub use system::SystemRunner;

use std::ffi::OsStr;
use std::fmt;

use crate::error::{DeployError, Result};

/// Exit code reported when the program could not be started at all.
pub const SPAWN_FAILURE_CODE: i32 = 127;

/// A single external invocation.
///
/// Defaults to quiet (output captured) and critical (non-zero exit is fatal).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    program: String,
    args: Vec<String>,
    quiet: bool,
    critical: bool,
}

impl Command {
    pub fn new(program: impl Into<String>) -> Self {
        Command {
            program: program.into(),
            args: Vec::new(),
            quiet: true,
            critical: true,
        }
    }

    pub fn git() -> Self {
        Command::new("git")
    }

    /// Create from a command array such as `["npm", "run", "build"]`.
    pub fn from_slice<S: AsRef<str>>(cmd: &[S]) -> Self {
        let mut iter = cmd.iter();
        let program = iter
            .next()
            .map(|s| s.as_ref().to_string())
            .unwrap_or_default();
        Command::new(program).args(iter)
    }

    pub fn arg(mut self, arg: impl AsRef<str>) -> Self {
        self.args.push(arg.as_ref().to_string());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.args
            .extend(args.into_iter().map(|a| a.as_ref().to_string()));
        self
    }

    pub fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    pub fn critical(mut self, critical: bool) -> Self {
        self.critical = critical;
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn get_args(&self) -> impl Iterator<Item = &OsStr> {
        self.args.iter().map(OsStr::new)
    }

    pub fn arg_list(&self) -> &[String] {
        &self.args
    }

    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    pub fn is_critical(&self) -> bool {
        self.critical
    }
}

/// Quote an argument for display only. Never used to build an invocation.
fn display_arg(arg: &str) -> String {
    let plain = !arg.is_empty()
        && arg
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_./=:@+,%".contains(c));
    if plain {
        arg.to_string()
    } else {
        format!("'{}'", arg.replace('\'', r"'\''"))
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", display_arg(&self.program))?;
        for arg in &self.args {
            write!(f, " {}", display_arg(arg))?;
        }
        Ok(())
    }
}

/// Exit status and captured streams of a finished command.
///
/// Streams are empty when the command ran unquiet, since its output went
/// straight to the terminal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.code == 0
    }

    /// Result handed back for a tolerated failure: no output, code retained.
    pub fn empty(code: i32) -> Self {
        CommandOutput {
            code,
            ..Default::default()
        }
    }
}

/// Runs external commands.
///
/// Implementors only provide [CommandRunner::execute]; the fatal/tolerated
/// policy lives in [CommandRunner::run] so every runner applies it the same way.
pub trait CommandRunner {
    /// Execute the command and report what happened, whatever the exit code.
    ///
    /// Returns `Err` only when the process could not be started.
    fn execute(&self, command: &Command) -> std::io::Result<CommandOutput>;

    /// Execute the command and apply its critical flag.
    ///
    /// # Returns
    /// * `Ok(CommandOutput)` - Success (stdout trimmed), or a tolerated failure
    ///   with empty streams and the original exit code
    /// * `Err(DeployError::CommandFailed)` - A critical command exited non-zero
    ///   or could not be started
    fn run(&self, command: &Command) -> Result<CommandOutput> {
        let output = match self.execute(command) {
            Ok(output) => output,
            Err(e) => {
                log::debug!("failed to start `{}`: {}", command, e);
                CommandOutput {
                    code: SPAWN_FAILURE_CODE,
                    stdout: String::new(),
                    stderr: e.to_string(),
                }
            }
        };

        log::debug!("`{}` exited with {}", command, output.code);

        if output.success() {
            return Ok(CommandOutput {
                code: output.code,
                stdout: output.stdout.trim().to_string(),
                stderr: output.stderr,
            });
        }

        if command.is_critical() {
            return Err(DeployError::CommandFailed {
                command: command.to_string(),
                code: output.code,
                stdout: output.stdout,
                stderr: output.stderr,
            });
        }

        Ok(CommandOutput::empty(output.code))
    }
}
