//! Repository lookups behind a trait
//!
//! The pipeline only needs to know where the working tree is and which branch
//! is checked out. Those reads go through [Repository] so the guard logic can
//! be tested without a real checkout:
//!
//! - [repository::Git2Repository]: A real implementation using the `git2` crate
//! - [mock::MockRepository]: A mock implementation for testing
//!
//! Everything that writes (staging, committing, pushing, subtree push) goes
//! through the git CLI via [crate::runner] instead, since `git2` has no
//! subtree support and pushes should honor the user's credential helpers.

pub mod mock;
pub mod repository;

pub use mock::MockRepository;
pub use repository::Git2Repository;

use std::path::Path;

use crate::error::Result;

/// Read-only repository operations used by the repository guard.
pub trait Repository {
    /// Root of the working tree.
    fn root(&self) -> &Path;

    /// Name of the checked-out branch.
    ///
    /// # Returns
    /// * `Ok(Some(name))` - A branch is checked out (possibly unborn)
    /// * `Ok(None)` - HEAD is detached
    /// * `Err` - If HEAD cannot be read
    fn current_branch(&self) -> Result<Option<String>>;
}
