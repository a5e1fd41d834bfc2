pub mod orchestration;

pub use orchestration::{DeployOutcome, Deployer};
