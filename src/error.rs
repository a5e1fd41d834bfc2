use std::path::PathBuf;

use thiserror::Error;

use crate::verify::VerifyError;

/// Unified error type for site-deploy operations
#[derive(Error, Debug)]
pub enum DeployError {
    #[error("Not inside a git repository.")]
    NotARepository,

    #[error("Detached HEAD. Checkout '{mainline}' before deploying.")]
    DetachedHead { mainline: String },

    #[error("Command failed: {command}")]
    CommandFailed {
        command: String,
        code: i32,
        stdout: String,
        stderr: String,
    },

    #[error("Commit failed: {command} (exit code {code})")]
    CommitFailed { command: String, code: i32 },

    #[error("Build verification failed: {0}")]
    Verification(#[from] VerifyError),

    #[error("Failed to write {}: {source}", .path.display())]
    Artifact {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in site-deploy
pub type Result<T> = std::result::Result<T, DeployError>;

impl DeployError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        DeployError::Config(msg.into())
    }

    /// Process exit code for this error.
    ///
    /// Command failures carry the subprocess's own code; everything else is 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            DeployError::CommandFailed { code, .. } | DeployError::CommitFailed { code, .. } => {
                if *code == 0 {
                    1
                } else {
                    *code
                }
            }
            _ => 1,
        }
    }
}
