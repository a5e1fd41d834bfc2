/// Commit message as entered by the user.
///
/// Treated as an opaque string: it is passed to git as a single argument and
/// never interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitMessage(String);

impl CommitMessage {
    /// Build from raw prompt input, falling back to `default` when blank
    pub fn from_input(input: &str, default: &str) -> Self {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            CommitMessage(default.to_string())
        } else {
            CommitMessage(trimmed.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Message for the commit that records the build output, e.g. `Update (dist)`
    pub fn for_output(&self, output_dir: &str) -> CommitMessage {
        CommitMessage(format!("{} ({})", self.0, output_dir))
    }
}

impl std::fmt::Display for CommitMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// What happened when a commit was attempted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    Committed,
    /// Nothing was staged. Tolerated.
    NothingToCommit,
    Failed { code: i32 },
}

impl CommitOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, CommitOutcome::Failed { .. })
    }
}
