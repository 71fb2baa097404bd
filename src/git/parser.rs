//! Decoder for `git status --short` reports.
//!
//! Each line is `XY PATH`: the index column, the working-tree column, one
//! space, then the path. The path is read as the longest run of path-safe
//! characters, so names containing spaces, and names git quotes, are not
//! recovered. Renames (`R  old -> new`) yield the old name.

use super::entry::{FileEntry, StatusCode};
use super::error::LineError;
use std::path::Path;
use tracing::warn;

fn is_path_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '/' | '.' | '-')
}

/// Decode a single non-empty report line
pub fn decode_line(root: &Path, line: &str) -> Result<FileEntry, LineError> {
    let mut chars = line.chars();
    let (Some(x), Some(y)) = (chars.next(), chars.next()) else {
        return Err(LineError::TooShort(line.to_string()));
    };
    match chars.next() {
        Some(' ') => {}
        Some(_) => return Err(LineError::MissingSeparator(line.to_string())),
        None => return Err(LineError::TooShort(line.to_string())),
    }

    let rest = chars.as_str();
    let end = rest.find(|c: char| !is_path_char(c)).unwrap_or(rest.len());
    let name = &rest[..end];
    if name.is_empty() {
        return Err(LineError::EmptyPath(line.to_string()));
    }

    Ok(FileEntry::new(root, name, StatusCode(x), StatusCode(y)))
}

/// Parse a short status report into entries, in report order
///
/// Lines that do not decode are logged and skipped.
pub fn parse_short_status(root: &Path, text: &str) -> Vec<FileEntry> {
    if text.is_empty() {
        return Vec::new();
    }

    text.lines()
        .filter(|line| !line.is_empty())
        .filter_map(|line| match decode_line(root, line) {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!(error = %e, "skipping undecodable status line");
                None
            }
        })
        .collect()
}
