use thiserror::Error;

#[derive(Error, Debug)]
pub enum GitError {
    #[error("Git repository not found")]
    RepoNotFound,

    #[error("Not in a git repository")]
    NotARepo,

    #[error("Repository has no embedded git handle: {0}")]
    NoLibraryHandle(String),

    #[error("Git error: {0}")]
    Git(#[from] git2::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("`{program} {args}` failed: {reason}")]
    CommandFailed {
        program: String,
        args: String,
        reason: String,
        /// Whatever the command printed before failing.
        output: String,
    },

    #[error("Unhandled status strategy: {0}")]
    UnhandledStrategy(String),

    #[error("Unknown untracked-files mode: {0}")]
    InvalidUntrackedMode(String),
}

impl GitError {
    /// Text captured from a failed command, if this error came from one.
    pub fn captured_output(&self) -> Option<&str> {
        match self {
            GitError::CommandFailed { output, .. } => Some(output),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, GitError>;

/// Why a single short-status line could not be decoded
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LineError {
    #[error("line too short for status columns: {0:?}")]
    TooShort(String),

    #[error("expected a space after the status columns: {0:?}")]
    MissingSeparator(String),

    #[error("no path token in line: {0:?}")]
    EmptyPath(String),
}
