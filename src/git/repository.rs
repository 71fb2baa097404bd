use super::error::{GitError, Result};
use git2::Repository as Git2Repo;
use std::path::{Path, PathBuf};

/// A working copy identified by its absolute path
///
/// Note: git2::Repository is not Sync, so instead of holding a live handle
/// we remember where the git directory is and open a fresh handle per query.
/// A repository created with [`Repository::at`] has no embedded handle and
/// can only be queried through the git executable.
#[derive(Clone, Debug, PartialEq)]
pub struct Repository {
    path: PathBuf,
    git_dir: Option<PathBuf>,
}

impl Repository {
    /// Open the repository whose working tree is at `path`
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::open(path.as_ref()).map_err(|e| {
            if e.code() == git2::ErrorCode::NotFound {
                GitError::RepoNotFound
            } else {
                GitError::Git(e)
            }
        })?;
        Self::from_git2(&repo)
    }

    /// Discover and open a repository starting from the current directory
    pub fn discover() -> Result<Self> {
        Self::discover_from(std::env::current_dir()?)
    }

    /// Discover and open a repository starting from a specific path
    pub fn discover_from<P: AsRef<Path>>(start_path: P) -> Result<Self> {
        let repo = Git2Repo::discover(start_path.as_ref()).map_err(|e| {
            if e.code() == git2::ErrorCode::NotFound {
                GitError::NotARepo
            } else {
                GitError::Git(e)
            }
        })?;
        Self::from_git2(&repo)
    }

    /// Refer to a working directory without an embedded git handle
    pub fn at<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self {
            path: std::path::absolute(path.as_ref())?,
            git_dir: None,
        })
    }

    fn from_git2(repo: &Git2Repo) -> Result<Self> {
        let workdir = repo.workdir().ok_or(GitError::NotARepo)?;
        Ok(Self {
            path: std::path::absolute(workdir)?,
            git_dir: Some(repo.path().to_path_buf()),
        })
    }

    /// Absolute path of the working tree root
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Last component of the working tree path
    pub fn name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// Open a git2::Repository for synchronous operations
    pub fn open_git2(&self) -> Result<Git2Repo> {
        match &self.git_dir {
            Some(dir) => Ok(Git2Repo::open(dir)?),
            None => Err(GitError::NoLibraryHandle(self.path.display().to_string())),
        }
    }
}
