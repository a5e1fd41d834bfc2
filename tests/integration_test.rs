// tests/integration_test.rs
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;

fn site_deploy(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("site-deploy").unwrap();
    cmd.current_dir(dir)
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .arg("--config")
        .arg(dir.join("deploy.toml"));
    cmd
}

fn init_repo_on(dir: &Path, branch: &str) {
    let repo = git2::Repository::init(dir).unwrap();
    repo.set_head(&format!("refs/heads/{}", branch)).unwrap();
    fs::write(dir.join("deploy.toml"), "").unwrap();
}

#[test]
fn test_site_deploy_help() {
    Command::cargo_bin("site-deploy")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("site-deploy"))
        .stdout(predicate::str::contains("publishing branch"));
}

#[test]
fn test_site_deploy_version() {
    Command::cargo_bin("site-deploy")
        .unwrap()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_outside_repository_exits_1() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("deploy.toml"), "").unwrap();

    site_deploy(dir.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Not inside a git repository."));
}

#[test]
fn test_wrong_branch_prints_recovery_and_exits_0() {
    let dir = tempfile::tempdir().unwrap();
    init_repo_on(dir.path(), "feature");

    site_deploy(dir.path())
        .write_stdin("should never be read\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("On branch feature"))
        .stdout(predicate::str::contains("git checkout main"))
        .stdout(predicate::str::contains("git merge feature"))
        .stdout(predicate::str::contains("git push origin main"))
        .stdout(predicate::str::contains("Enter your commit message").not());

    assert!(!dir.path().join("dist").exists());
}

#[test]
fn test_wrong_branch_respects_configured_mainline() {
    let dir = tempfile::tempdir().unwrap();
    init_repo_on(dir.path(), "main");
    fs::write(
        dir.path().join("deploy.toml"),
        "[git]\nmainline = \"trunk\"\nremote = \"upstream\"\n",
    )
    .unwrap();

    site_deploy(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("git pull upstream trunk"));
}

#[test]
fn test_bad_config_exits_1() {
    let dir = tempfile::tempdir().unwrap();
    init_repo_on(dir.path(), "main");
    fs::write(dir.path().join("deploy.toml"), "[build]\noutput_dir = \"../x\"\n").unwrap();

    site_deploy(dir.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Error loading config"));
}

#[cfg(unix)]
#[test]
fn test_failing_build_exit_code_is_propagated() {
    let dir = tempfile::tempdir().unwrap();
    let bare = tempfile::tempdir().unwrap();
    git2::Repository::init_bare(bare.path()).unwrap();

    let repo = git2::Repository::init(dir.path()).unwrap();
    repo.set_head("refs/heads/main").unwrap();
    repo.remote("origin", bare.path().to_str().unwrap()).unwrap();
    let mut config = repo.config().unwrap();
    config.set_str("user.name", "Test").unwrap();
    config.set_str("user.email", "test@example.com").unwrap();

    fs::write(
        dir.path().join("deploy.toml"),
        "[build]\ncommand = [\"sh\", \"-c\", \"exit 7\"]\n",
    )
    .unwrap();

    site_deploy(dir.path())
        .arg("--message")
        .arg("First deploy")
        .assert()
        .code(7)
        .stderr(predicate::str::contains("Command failed: sh -c 'exit 7'"));
}
