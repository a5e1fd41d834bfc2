use std::cell::RefCell;
use std::collections::{HashMap, HashSet};

use crate::runner::{Command, CommandOutput, CommandRunner};

/// Mock runner that records every command without running anything.
///
/// Commands are matched by their display form (`git push origin main`).
/// Unscripted commands succeed with empty output.
#[derive(Debug, Default)]
pub struct RecordingRunner {
    calls: RefCell<Vec<Command>>,
    responses: RefCell<HashMap<String, CommandOutput>>,
    unspawnable: RefCell<HashSet<String>>,
}

impl RecordingRunner {
    /// Create a runner on which every command succeeds
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the outcome of a command line
    pub fn respond_with(&self, command_line: &str, code: i32, stdout: &str, stderr: &str) {
        self.responses.borrow_mut().insert(
            command_line.to_string(),
            CommandOutput {
                code,
                stdout: stdout.to_string(),
                stderr: stderr.to_string(),
            },
        );
    }

    /// Script a non-zero exit with no output
    pub fn fail_with(&self, command_line: &str, code: i32) {
        self.respond_with(command_line, code, "", "");
    }

    /// Make a program fail to start, as if it were not installed
    pub fn fail_to_spawn(&self, program: &str) {
        self.unspawnable.borrow_mut().insert(program.to_string());
    }

    /// Every command executed so far, in display form
    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().iter().map(|c| c.to_string()).collect()
    }

    /// Every command executed so far
    pub fn commands(&self) -> Vec<Command> {
        self.calls.borrow().clone()
    }

    pub fn was_called(&self, command_line: &str) -> bool {
        self.calls().iter().any(|c| c == command_line)
    }
}

impl CommandRunner for RecordingRunner {
    fn execute(&self, command: &Command) -> std::io::Result<CommandOutput> {
        self.calls.borrow_mut().push(command.clone());

        if self.unspawnable.borrow().contains(command.program()) {
            return Err(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("{}: command not found", command.program()),
            ));
        }

        Ok(self
            .responses
            .borrow()
            .get(&command.to_string())
            .cloned()
            .unwrap_or_default())
    }
}
