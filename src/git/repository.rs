use crate::error::{DeployError, Result};
use git2::{ErrorCode, Repository as Git2Repo};
use std::path::{Path, PathBuf};

/// Wrapper around git2::Repository with our trait interface
pub struct Git2Repository {
    repo: Git2Repo,
    root: PathBuf,
}

impl Git2Repository {
    /// Discover the repository containing `path`, searching parent directories.
    ///
    /// Bare repositories are rejected since there is no working tree to build.
    pub fn discover<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = match Git2Repo::discover(path) {
            Ok(repo) => repo,
            Err(e) if e.code() == ErrorCode::NotFound => return Err(DeployError::NotARepository),
            Err(e) => return Err(e.into()),
        };

        let root = repo
            .workdir()
            .map(Path::to_path_buf)
            .ok_or(DeployError::NotARepository)?;

        Ok(Git2Repository { repo, root })
    }
}

impl super::Repository for Git2Repository {
    fn root(&self) -> &Path {
        &self.root
    }

    fn current_branch(&self) -> Result<Option<String>> {
        match self.repo.head() {
            Ok(head) if head.is_branch() => Ok(head.shorthand().map(str::to_string)),
            Ok(_) => Ok(None),
            // A fresh repository has a symbolic HEAD pointing at a branch with no commits yet.
            Err(e) if e.code() == ErrorCode::UnbornBranch => {
                let head = self.repo.find_reference("HEAD")?;
                Ok(head
                    .symbolic_target()
                    .and_then(|target| target.strip_prefix("refs/heads/"))
                    .map(str::to_string))
            }
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::Repository;

    fn commit_empty_tree(repo: &Git2Repo) -> git2::Oid {
        let sig = git2::Signature::now("Test", "test@example.com").unwrap();
        let tree_id = repo.index().unwrap().write_tree().unwrap();
        let tree = repo.find_tree(tree_id).unwrap();
        repo.commit(Some("HEAD"), &sig, &sig, "initial", &tree, &[])
            .unwrap()
    }

    #[test]
    fn test_discover_outside_repository() {
        let dir = tempfile::tempdir().unwrap();
        let result = Git2Repository::discover(dir.path());
        assert!(matches!(result, Err(DeployError::NotARepository)));
    }

    #[test]
    fn test_discover_from_subdirectory() {
        let dir = tempfile::tempdir().unwrap();
        Git2Repo::init(dir.path()).unwrap();
        let nested = dir.path().join("src").join("pages");
        std::fs::create_dir_all(&nested).unwrap();

        let repo = Git2Repository::discover(&nested).unwrap();
        assert_eq!(
            std::fs::canonicalize(repo.root()).unwrap(),
            std::fs::canonicalize(dir.path()).unwrap()
        );
    }

    #[test]
    fn test_unborn_branch_reports_name() {
        let dir = tempfile::tempdir().unwrap();
        let repo = Git2Repo::init(dir.path()).unwrap();
        repo.set_head("refs/heads/main").unwrap();

        let wrapped = Git2Repository::discover(dir.path()).unwrap();
        assert_eq!(wrapped.current_branch().unwrap(), Some("main".to_string()));
    }

    #[test]
    fn test_checked_out_branch() {
        let dir = tempfile::tempdir().unwrap();
        let repo = Git2Repo::init(dir.path()).unwrap();
        repo.set_head("refs/heads/feature").unwrap();
        commit_empty_tree(&repo);

        let wrapped = Git2Repository::discover(dir.path()).unwrap();
        assert_eq!(
            wrapped.current_branch().unwrap(),
            Some("feature".to_string())
        );
    }

    #[test]
    fn test_detached_head_reports_none() {
        let dir = tempfile::tempdir().unwrap();
        let repo = Git2Repo::init(dir.path()).unwrap();
        let oid = commit_empty_tree(&repo);
        repo.set_head_detached(oid).unwrap();

        let wrapped = Git2Repository::discover(dir.path()).unwrap();
        assert_eq!(wrapped.current_branch().unwrap(), None);
    }
}
