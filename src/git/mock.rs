use crate::error::Result;
use crate::git::Repository;
use std::path::{Path, PathBuf};

/// Mock repository for testing without actual git operations
pub struct MockRepository {
    root: PathBuf,
    branch: Option<String>,
}

impl MockRepository {
    /// Create a mock repository rooted at `root` with `branch` checked out
    pub fn on_branch(root: impl Into<PathBuf>, branch: impl Into<String>) -> Self {
        MockRepository {
            root: root.into(),
            branch: Some(branch.into()),
        }
    }

    /// Create a mock repository with a detached HEAD
    pub fn detached(root: impl Into<PathBuf>) -> Self {
        MockRepository {
            root: root.into(),
            branch: None,
        }
    }

    /// Switch the checked-out branch
    pub fn set_branch(&mut self, branch: impl Into<String>) {
        self.branch = Some(branch.into());
    }
}

impl Repository for MockRepository {
    fn root(&self) -> &Path {
        &self.root
    }

    fn current_branch(&self) -> Result<Option<String>> {
        Ok(self.branch.clone())
    }
}
