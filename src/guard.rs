//! Repository guard: run only from a named branch inside a repository.

use std::path::Path;

use crate::config::GitConfig;
use crate::domain::BranchContext;
use crate::error::{DeployError, Result};
use crate::git::{Git2Repository, Repository};

/// Discover the repository containing `start`.
///
/// # Returns
/// * `Ok(Git2Repository)` - `start` is inside a working tree
/// * `Err(DeployError::NotARepository)` - otherwise
pub fn ensure_repository(start: &Path) -> Result<Git2Repository> {
    Git2Repository::discover(start)
}

/// Read the checked-out branch, failing on a detached HEAD.
pub fn current_branch<R: Repository + ?Sized>(repo: &R, git: &GitConfig) -> Result<String> {
    match repo.current_branch()? {
        Some(name) if !name.is_empty() => Ok(name),
        _ => Err(DeployError::DetachedHead {
            mainline: git.mainline.clone(),
        }),
    }
}

/// Compare the checked-out branch against the mainline.
pub fn check_branch<R: Repository + ?Sized>(repo: &R, git: &GitConfig) -> Result<BranchContext> {
    let name = current_branch(repo, git)?;
    Ok(BranchContext::new(name, &git.mainline))
}
