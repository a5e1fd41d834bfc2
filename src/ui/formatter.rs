//! Pure formatting functions for UI output.
//!
//! This module contains all display/formatting logic separated from user interaction.
//! Colors come from `console`, which drops them when the stream is not a terminal.

use console::style;

use crate::error::DeployError;
use crate::runner::Command;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{}", style(format!("❌ {}", message)).for_stderr().red());
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{}", style(format!("✔ {}", message)).green());
}

/// Format and print a pipeline step header in cyan.
pub fn display_step(message: &str) {
    println!("{}", style(format!("\n• {}", message)).cyan());
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Format and print a warning in yellow.
pub fn display_warning(message: &str) {
    eprintln!("{} {}", style("⚠ WARNING:").for_stderr().yellow(), message);
}

/// Echo a command before it streams its output.
pub fn display_command(command: &Command) {
    println!("{}", style(format!("> {}", command)).cyan());
}

/// Print the checked-out branch, green on the mainline and red elsewhere.
pub fn display_branch(branch: &str, is_mainline: bool) {
    let name = if is_mainline {
        style(branch).green()
    } else {
        style(branch).red()
    };
    println!("On branch {}", name);
}

/// Print the commands that move work onto the mainline.
///
/// # Arguments
/// * `mainline` - The branch deployments must run from
/// * `steps` - Recovery commands, in order
pub fn display_recovery_instructions(mainline: &str, steps: &[String]) {
    println!(
        "Move changes to the {} branch, then switch to the {} branch.",
        mainline, mainline
    );
    for step in steps {
        println!("{}", step);
    }
}

/// Report a fatal error, including captured output for failed commands.
pub fn display_deploy_error(error: &DeployError) {
    match error {
        DeployError::CommandFailed {
            stdout, stderr, ..
        } => {
            eprintln!();
            display_error(&error.to_string());
            eprintln!();
            if !stdout.trim().is_empty() {
                println!("{}", stdout.trim_end());
            }
            if !stderr.trim().is_empty() {
                eprintln!("{}", stderr.trim_end());
            }
        }
        _ => display_error(&error.to_string()),
    }
}
