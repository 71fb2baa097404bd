use std::fmt;
use std::path::{Path, PathBuf};

/// Single-character status code as reported by the backend
///
/// Codes are stored verbatim; the named constants only cover the
/// vocabulary git uses in its short format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StatusCode(pub char);

impl StatusCode {
    pub const UNMODIFIED: StatusCode = StatusCode(' ');
    pub const MODIFIED: StatusCode = StatusCode('M');
    pub const ADDED: StatusCode = StatusCode('A');
    pub const DELETED: StatusCode = StatusCode('D');
    pub const RENAMED: StatusCode = StatusCode('R');
    pub const COPIED: StatusCode = StatusCode('C');
    pub const TYPE_CHANGED: StatusCode = StatusCode('T');
    pub const UNMERGED: StatusCode = StatusCode('U');
    pub const UNTRACKED: StatusCode = StatusCode('?');
    pub const IGNORED: StatusCode = StatusCode('!');

    pub fn as_char(self) -> char {
        self.0
    }

    /// Get a description of the status
    pub fn description(self) -> &'static str {
        match self.0 {
            ' ' => "unmodified",
            'M' => "modified",
            'A' => "new file",
            'D' => "deleted",
            'R' => "renamed",
            'C' => "copied",
            'T' => "typechange",
            'U' => "unmerged",
            '?' => "untracked",
            '!' => "ignored",
            _ => "unknown",
        }
    }

    pub fn is_unmodified(self) -> bool {
        self == StatusCode::UNMODIFIED
    }
}

impl From<char> for StatusCode {
    fn from(c: char) -> Self {
        StatusCode(c)
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A file with pending changes in the working copy
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FileEntry {
    /// Path relative to the repository root
    pub name: String,
    /// Repository root joined with `name`
    pub abs_path: PathBuf,
    /// Index (staging area) status
    pub x: StatusCode,
    /// Working tree status
    pub y: StatusCode,
}

impl FileEntry {
    pub fn new(root: &Path, name: impl Into<String>, x: StatusCode, y: StatusCode) -> Self {
        let name = name.into();
        Self {
            abs_path: root.join(&name),
            name,
            x,
            y,
        }
    }

    /// Get a short status code (like git status --short)
    pub fn short_code(&self) -> String {
        format!("{}{}", self.x, self.y)
    }

    pub fn is_untracked(&self) -> bool {
        self.x == StatusCode::UNTRACKED && self.y == StatusCode::UNTRACKED
    }

    pub fn is_ignored(&self) -> bool {
        self.x == StatusCode::IGNORED && self.y == StatusCode::IGNORED
    }

    pub fn is_conflicted(&self) -> bool {
        self.x == StatusCode::UNMERGED
            || self.y == StatusCode::UNMERGED
            || (self.x == StatusCode::ADDED && self.y == StatusCode::ADDED)
            || (self.x == StatusCode::DELETED && self.y == StatusCode::DELETED)
    }

    /// Check if the entry has a change recorded in the index
    pub fn is_staged(&self) -> bool {
        !self.x.is_unmodified() && self.is_tracked_change()
    }

    /// Check if the entry has a working-tree change not yet staged
    pub fn is_unstaged(&self) -> bool {
        !self.y.is_unmodified() && self.is_tracked_change()
    }

    fn is_tracked_change(&self) -> bool {
        !self.is_untracked() && !self.is_ignored() && !self.is_conflicted()
    }
}

/// Sort entries ascending by name, comparing bytes
pub fn sort_entries(entries: &mut [FileEntry]) {
    entries.sort_by(|a, b| a.name.as_bytes().cmp(b.name.as_bytes()));
}
