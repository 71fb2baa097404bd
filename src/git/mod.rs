// Working-copy status resolution over the git CLI or libgit2

pub mod entry;
pub mod error;
pub mod library;
pub mod parser;
pub mod plain;
pub mod process;
pub mod repository;
pub mod runner;
pub mod status;

pub use entry::{FileEntry, StatusCode, sort_entries};
pub use error::{GitError, LineError, Result};
pub use library::{LibraryStatus, library_status};
pub use parser::{decode_line, parse_short_status};
pub use plain::{normalize_line_endings, plain_status};
pub use process::{PLACEHOLDER, ProcessStatus, UNTRACKED_ALL, short_status};
pub use repository::Repository;
pub use runner::{CommandRunner, SystemRunner};
pub use status::{
    StatusProvider, StatusResolver, StatusStrategy, UntrackedFiles, load_status, status_with,
};
