//! User interface module - interaction (prompts) and formatting.
//!
//! Separates concerns:
//! - `formatter` - Pure formatting functions
//! - This module - Interactive prompts and user input handling

use std::io::{self, BufRead, Write};

use crate::domain::CommitMessage;

pub mod formatter;

// Re-export formatter functions for convenience
pub use formatter::{
    display_branch, display_command, display_deploy_error, display_error,
    display_recovery_instructions, display_status, display_step, display_success,
    display_warning,
};

/// Prompts for the commit message used for both the source and output commits.
///
/// Blank input (or end of input) selects `default`.
pub fn prompt_commit_message(default: &str) -> io::Result<CommitMessage> {
    let stdin = io::stdin();
    read_commit_message(&mut stdin.lock(), &mut io::stdout(), default)
}

/// Prompt on `output` and read one line from `input`.
pub fn read_commit_message<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    default: &str,
) -> io::Result<CommitMessage> {
    write!(output, "Enter your commit message: ")?;
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;

    Ok(CommitMessage::from_input(&line, default))
}
