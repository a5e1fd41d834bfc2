pub mod build;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod git;
pub mod guard;
pub mod runner;
pub mod ui;
pub mod verify;

pub use error::{DeployError, Result};
