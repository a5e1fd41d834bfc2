//! Build step and the artifacts static hosting needs next to the output.

use std::fs;
use std::path::Path;

use crate::config::BuildConfig;
use crate::error::{DeployError, Result};
use crate::runner::{Command, CommandRunner};

/// Run the configured build command, streaming its output.
pub fn run_build<C: CommandRunner + ?Sized>(runner: &C, build: &BuildConfig) -> Result<()> {
    let command = Command::from_slice(&build.command).quiet(false);
    runner.run(&command)?;
    Ok(())
}

/// Copy the entry page to the fallback page and create the empty marker file.
///
/// Both are required for the site to be served correctly, so either failing
/// is fatal.
pub fn post_process(workdir: &Path, build: &BuildConfig) -> Result<()> {
    let output = workdir.join(&build.output_dir);

    let entry = output.join(&build.entry);
    let fallback = output.join(&build.fallback);
    fs::copy(&entry, &fallback).map_err(|source| DeployError::Artifact {
        path: fallback.clone(),
        source,
    })?;
    log::debug!("copied {} to {}", entry.display(), fallback.display());

    let marker = output.join(&build.marker);
    fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&marker)
        .map_err(|source| DeployError::Artifact {
            path: marker.clone(),
            source,
        })?;
    log::debug!("touched {}", marker.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::RecordingRunner;

    #[test]
    fn test_build_runs_configured_command_unquiet() {
        let runner = RecordingRunner::new();
        run_build(&runner, &BuildConfig::default()).unwrap();

        let commands = runner.commands();
        assert_eq!(commands.len(), 1);
        assert_eq!(commands[0].to_string(), "npm run build");
        assert!(!commands[0].is_quiet());
    }

    #[test]
    fn test_build_failure_keeps_exit_code() {
        let runner = RecordingRunner::new();
        runner.fail_with("npm run build", 2);
        let err = run_build(&runner, &BuildConfig::default()).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_post_process_creates_fallback_and_marker() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("dist")).unwrap();
        fs::write(dir.path().join("dist/index.html"), "<h1>home</h1>").unwrap();

        post_process(dir.path(), &BuildConfig::default()).unwrap();

        assert_eq!(
            fs::read_to_string(dir.path().join("dist/404.html")).unwrap(),
            "<h1>home</h1>"
        );
        let marker = fs::metadata(dir.path().join("dist/.nojekyll")).unwrap();
        assert!(marker.is_file());
        assert_eq!(marker.len(), 0);
    }

    #[test]
    fn test_post_process_is_repeatable() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("dist")).unwrap();
        fs::write(dir.path().join("dist/index.html"), "v2").unwrap();
        fs::write(dir.path().join("dist/404.html"), "v1").unwrap();
        fs::write(dir.path().join("dist/.nojekyll"), "").unwrap();

        post_process(dir.path(), &BuildConfig::default()).unwrap();
        assert_eq!(
            fs::read_to_string(dir.path().join("dist/404.html")).unwrap(),
            "v2"
        );
    }

    #[test]
    fn test_post_process_without_entry_fails() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("dist")).unwrap();

        let err = post_process(dir.path(), &BuildConfig::default()).unwrap_err();
        assert!(matches!(err, DeployError::Artifact { .. }));
        assert_eq!(err.exit_code(), 1);
    }
}
