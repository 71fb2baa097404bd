use super::entry::{FileEntry, sort_entries};
use super::error::{GitError, Result};
use super::library::LibraryStatus;
use super::plain::plain_status;
use super::process::ProcessStatus;
use super::repository::Repository;
use super::runner::{CommandRunner, SystemRunner};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use tracing::debug;

/// Something that can list the changed files of a working copy
///
/// Implementations return entries in any order; [`StatusResolver`] sorts.
pub trait StatusProvider {
    fn compute_status(&self, repo: &Repository) -> Result<Vec<FileEntry>>;
}

/// Which backend answers status queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusStrategy {
    /// Run `git status --short` and parse the report
    #[default]
    Process,
    /// Ask libgit2 for the status mapping
    Library,
}

impl StatusStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusStrategy::Process => "process",
            StatusStrategy::Library => "library",
        }
    }
}

impl FromStr for StatusStrategy {
    type Err = GitError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "process" | "git" => Ok(StatusStrategy::Process),
            "library" | "libgit2" | "git2" => Ok(StatusStrategy::Library),
            _ => Err(GitError::UnhandledStrategy(s.to_string())),
        }
    }
}

impl fmt::Display for StatusStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How untracked files are reported, as git's `--untracked-files`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UntrackedFiles {
    /// Leave untracked files out
    No,
    /// Report untracked directories without descending into them
    Normal,
    /// Report every untracked file
    #[default]
    All,
}

impl UntrackedFiles {
    pub fn as_str(&self) -> &'static str {
        match self {
            UntrackedFiles::No => "no",
            UntrackedFiles::Normal => "normal",
            UntrackedFiles::All => "all",
        }
    }

    /// The option passed to `git status`
    pub fn as_flag(&self) -> String {
        format!("--untracked-files={}", self.as_str())
    }
}

impl FromStr for UntrackedFiles {
    type Err = GitError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "no" => Ok(UntrackedFiles::No),
            "normal" => Ok(UntrackedFiles::Normal),
            "all" => Ok(UntrackedFiles::All),
            _ => Err(GitError::InvalidUntrackedMode(s.to_string())),
        }
    }
}

impl fmt::Display for UntrackedFiles {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Dispatches status queries to the configured backend and orders the result
#[derive(Debug, Clone)]
pub struct StatusResolver {
    strategy: StatusStrategy,
    runner: Arc<dyn CommandRunner>,
    process: ProcessStatus,
    library: LibraryStatus,
}

impl StatusResolver {
    /// Create a resolver that runs git as a child process when needed
    pub fn new(strategy: StatusStrategy) -> Self {
        Self::with_runner(strategy, Arc::new(SystemRunner))
    }

    /// Create a resolver with a custom command runner
    pub fn with_runner(strategy: StatusStrategy, runner: Arc<dyn CommandRunner>) -> Self {
        Self {
            strategy,
            process: ProcessStatus::new(runner.clone()),
            runner,
            library: LibraryStatus::default(),
        }
    }

    /// Use a different git executable for the process backend and plain status
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.process = self.process.with_program(program);
        self
    }

    /// Report untracked files the same way from either backend
    pub fn with_untracked_files(mut self, mode: UntrackedFiles) -> Self {
        self.process = self.process.with_untracked_option(mode.as_flag());
        self.library = LibraryStatus::new(mode);
        self
    }

    pub fn strategy(&self) -> StatusStrategy {
        self.strategy
    }

    fn provider(&self) -> &dyn StatusProvider {
        match self.strategy {
            StatusStrategy::Process => &self.process,
            StatusStrategy::Library => &self.library,
        }
    }

    /// List changed files, sorted by name
    pub fn status(&self, repo: &Repository) -> Result<Vec<FileEntry>> {
        debug!(strategy = %self.strategy, repo = %repo.path().display(), "resolving status");
        let mut entries = self.provider().compute_status(repo)?;
        sort_entries(&mut entries);
        Ok(entries)
    }

    /// Human-readable `git status` report with normalized line endings
    pub fn plain_status(&self, repo: &Repository) -> Result<String> {
        plain_status(self.runner.as_ref(), self.process.program(), repo)
    }
}

/// Resolve status with a backend named by a textual setting
///
/// Unknown settings fail with [`GitError::UnhandledStrategy`].
pub fn status_with(setting: &str, repo: &Repository) -> Result<Vec<FileEntry>> {
    let strategy = setting.parse::<StatusStrategy>()?;
    StatusResolver::new(strategy).status(repo)
}

/// Load the repository status asynchronously
pub async fn load_status(resolver: &StatusResolver, repo: &Repository) -> Result<Vec<FileEntry>> {
    let resolver = resolver.clone();
    let repo = repo.clone();

    tokio::task::spawn_blocking(move || resolver.status(&repo))
        .await
        .map_err(|e| GitError::Io(std::io::Error::other(e)))?
}
