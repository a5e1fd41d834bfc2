//! Domain logic - pure rules independent of git and process execution

pub mod branch;
pub mod commit;

pub use branch::BranchContext;
pub use commit::{CommitMessage, CommitOutcome};
