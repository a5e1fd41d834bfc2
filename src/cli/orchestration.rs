//! Main deployment workflow
//!
//! Runs the pipeline strictly top to bottom, stopping at the first failure:
//! branch guard, commit and push of the mainline, build, artifact
//! post-processing, build verification, and the subtree push of the output
//! directory into the publishing branch.
//!
//! Nothing is rolled back. If the mainline push succeeds and a later step
//! fails, the mainline and the publishing branch are left out of step and a
//! warning says so.

use std::io;
use std::path::{Path, PathBuf};

use crate::build;
use crate::config::Config;
use crate::domain::{CommitMessage, CommitOutcome};
use crate::error::{DeployError, Result};
use crate::git::Repository;
use crate::guard;
use crate::runner::{Command, CommandRunner};
use crate::ui;
use crate::verify;

/// Result of a deployment run that did not fail
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeployOutcome {
    /// The output directory was pushed to the publishing branch
    Deployed { message: CommitMessage },

    /// Not on the mainline; recovery advice was printed and nothing ran
    WrongBranch { branch: String },
}

/// Drives one deployment against a repository and a command runner.
pub struct Deployer<'a, R: Repository + ?Sized, C: CommandRunner + ?Sized> {
    repo: &'a R,
    runner: &'a C,
    config: &'a Config,
    workdir: PathBuf,
}

impl<'a, R: Repository + ?Sized, C: CommandRunner + ?Sized> Deployer<'a, R, C> {
    /// Create a deployer that resolves the output directory against the repository root
    pub fn new(repo: &'a R, runner: &'a C, config: &'a Config) -> Self {
        Deployer {
            repo,
            runner,
            config,
            workdir: repo.root().to_path_buf(),
        }
    }

    /// Resolve the output directory against `dir` instead of the repository root.
    ///
    /// Must be the same directory the runner executes commands in.
    pub fn with_workdir(mut self, dir: impl AsRef<Path>) -> Self {
        self.workdir = dir.as_ref().to_path_buf();
        self
    }

    /// Run the whole pipeline.
    ///
    /// `prompt` is called with the default message, and only once the branch check passed.
    pub fn run<F>(&self, prompt: F) -> Result<DeployOutcome>
    where
        F: FnOnce(&str) -> io::Result<CommitMessage>,
    {
        let git = &self.config.git;

        let branch = guard::check_branch(self.repo, git)?;
        ui::display_branch(&branch.name, branch.is_mainline);

        if !branch.can_deploy() {
            ui::display_recovery_instructions(
                &git.mainline,
                &branch.recovery_steps(&git.mainline, &git.remote),
            );
            return Ok(DeployOutcome::WrongBranch {
                branch: branch.name,
            });
        }

        let message = prompt(&self.config.behavior.default_message)?;

        self.commit_and_sync(&message)?;

        if let Err(e) = self.build_and_publish(&message) {
            ui::display_warning(&format!(
                "'{}' was already pushed to '{}' but '{}' was not updated.",
                git.mainline, git.remote, git.publish_branch
            ));
            return Err(e);
        }

        ui::display_success("Deployment complete.");
        Ok(DeployOutcome::Deployed { message })
    }

    fn build_and_publish(&self, message: &CommitMessage) -> Result<()> {
        self.build()?;
        self.verify()?;
        self.publish(message)?;
        Ok(())
    }

    /// Stage everything, commit, and push the mainline.
    pub fn commit_and_sync(&self, message: &CommitMessage) -> Result<CommitOutcome> {
        let git = &self.config.git;
        ui::display_step("Committing source…");

        self.runner
            .run(&Command::git().args(["add", "."]).quiet(false))?;
        let outcome = self.commit(message, None)?;
        self.runner.run(
            &Command::git()
                .args(["push", git.remote.as_str(), git.mainline.as_str()])
                .quiet(false),
        )?;

        Ok(outcome)
    }

    /// Run the build command, then write the fallback page and marker file.
    pub fn build(&self) -> Result<()> {
        ui::display_step("Building…");
        build::run_build(self.runner, &self.config.build)?;
        build::post_process(&self.workdir, &self.config.build)
    }

    /// Check the output directory before anything is published.
    pub fn verify(&self) -> Result<()> {
        ui::display_step("Verifying build…");
        verify::verify_build(&self.workdir, &self.config.build)?;

        let build = &self.config.build;
        ui::display_success(&format!(
            "Build verified ({} + {} + {} bundle).",
            build.entry,
            build.assets_dir,
            build.bundle_extension.trim_start_matches('.').to_uppercase()
        ));
        Ok(())
    }

    /// Commit the output directory alone and subtree-push it to the publishing branch.
    ///
    /// This rewrites the publishing branch's history.
    pub fn publish(&self, message: &CommitMessage) -> Result<CommitOutcome> {
        let git = &self.config.git;
        let output_dir = self.config.build.output_dir.as_str();
        ui::display_step(&format!("Deploying to {} (subtree)…", git.publish_branch));

        // Force past .gitignore, and never stage anything outside the output directory.
        self.runner
            .run(&Command::git().args(["add", "-f", "--", output_dir]).quiet(false))?;
        let outcome = self.commit(&message.for_output(output_dir), Some(output_dir))?;
        self.runner.run(
            &Command::git()
                .args(["subtree", "push", "--prefix", output_dir])
                .args([git.remote.as_str(), git.publish_branch.as_str()])
                .quiet(false),
        )?;

        Ok(outcome)
    }

    /// Commit whatever is staged, optionally limited to `pathspec`.
    ///
    /// An empty index is tolerated. Any other commit failure is fatal with
    /// git's exit code.
    fn commit(&self, message: &CommitMessage, pathspec: Option<&str>) -> Result<CommitOutcome> {
        let mut staged = Command::git()
            .args(["diff", "--cached", "--quiet"])
            .critical(false);
        let mut commit = Command::git()
            .args(["commit", "-m", message.as_str()])
            .quiet(false)
            .critical(false);
        if let Some(path) = pathspec {
            staged = staged.args(["--", path]);
            commit = commit.args(["--", path]);
        }

        if self.runner.run(&staged)?.success() {
            ui::display_status("Nothing to commit.");
            return Ok(CommitOutcome::NothingToCommit);
        }

        let result = self.runner.run(&commit)?;
        let outcome = if result.success() {
            CommitOutcome::Committed
        } else {
            CommitOutcome::Failed { code: result.code }
        };

        match outcome {
            CommitOutcome::Failed { code } => Err(DeployError::CommitFailed {
                command: commit.to_string(),
                code,
            }),
            outcome => Ok(outcome),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::MockRepository;
    use crate::runner::RecordingRunner;

    fn message() -> CommitMessage {
        CommitMessage::from_input("Ship it", "Update")
    }

    #[test]
    fn test_commit_with_nothing_staged() {
        let repo = MockRepository::on_branch("/site", "main");
        let runner = RecordingRunner::new();
        let config = Config::default();
        let deployer = Deployer::new(&repo, &runner, &config);

        let outcome = deployer.commit(&message(), None).unwrap();
        assert_eq!(outcome, CommitOutcome::NothingToCommit);
        assert_eq!(runner.calls(), vec!["git diff --cached --quiet"]);
    }

    #[test]
    fn test_commit_with_staged_changes() {
        let repo = MockRepository::on_branch("/site", "main");
        let runner = RecordingRunner::new();
        runner.fail_with("git diff --cached --quiet", 1);
        let config = Config::default();
        let deployer = Deployer::new(&repo, &runner, &config);

        let outcome = deployer.commit(&message(), None).unwrap();
        assert_eq!(outcome, CommitOutcome::Committed);
        assert!(runner.was_called("git commit -m 'Ship it'"));
    }

    #[test]
    fn test_commit_failure_is_fatal() {
        let repo = MockRepository::on_branch("/site", "main");
        let runner = RecordingRunner::new();
        runner.fail_with("git diff --cached --quiet", 1);
        runner.fail_with("git commit -m 'Ship it'", 3);
        let config = Config::default();
        let deployer = Deployer::new(&repo, &runner, &config);

        let err = deployer.commit(&message(), None).unwrap_err();
        assert!(matches!(err, DeployError::CommitFailed { code: 3, .. }));
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn test_commit_scoped_to_pathspec() {
        let repo = MockRepository::on_branch("/site", "main");
        let runner = RecordingRunner::new();
        runner.fail_with("git diff --cached --quiet -- dist", 1);
        let config = Config::default();
        let deployer = Deployer::new(&repo, &runner, &config);

        deployer
            .commit(&message().for_output("dist"), Some("dist"))
            .unwrap();
        assert_eq!(
            runner.calls(),
            vec![
                "git diff --cached --quiet -- dist",
                "git commit -m 'Ship it (dist)' -- dist",
            ]
        );
    }
}
