use std::path::{Path, PathBuf};
use std::process::{self, Stdio};

use crate::runner::{Command, CommandOutput, CommandRunner};
use crate::ui;

/// Runs commands as real child processes.
///
/// `debug` forces every command to stream its output live, overriding the
/// per-command quiet flag.
#[derive(Debug, Clone, Default)]
pub struct SystemRunner {
    debug: bool,
    cwd: Option<PathBuf>,
}

impl SystemRunner {
    pub fn new(debug: bool) -> Self {
        SystemRunner { debug, cwd: None }
    }

    /// Run every command from `dir` instead of the inherited working directory.
    pub fn current_dir<P: AsRef<Path>>(mut self, dir: P) -> Self {
        self.cwd = Some(dir.as_ref().to_path_buf());
        self
    }

    pub fn is_debug(&self) -> bool {
        self.debug
    }

    fn build(&self, command: &Command) -> process::Command {
        let mut cmd = process::Command::new(command.program());
        cmd.args(command.get_args());
        if let Some(dir) = &self.cwd {
            cmd.current_dir(dir);
        }
        cmd
    }
}

impl CommandRunner for SystemRunner {
    fn execute(&self, command: &Command) -> std::io::Result<CommandOutput> {
        let quiet = command.is_quiet() && !self.debug;
        log::debug!("running `{}` (quiet: {})", command, quiet);

        if quiet {
            let output = self.build(command).stdin(Stdio::null()).output()?;
            return Ok(CommandOutput {
                code: output.status.code().unwrap_or(1),
                stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }

        ui::display_command(command);
        let status = self.build(command).status()?;
        Ok(CommandOutput::empty(status.code().unwrap_or(1)))
    }
}
