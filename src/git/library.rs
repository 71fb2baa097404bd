use super::entry::{FileEntry, StatusCode};
use super::error::Result;
use super::repository::Repository;
use super::status::{StatusProvider, UntrackedFiles};
use git2::{Index, Status as Git2Status, StatusOptions};
use std::collections::HashMap;
use tracing::{debug, warn};

/// Status backend that queries libgit2 directly
#[derive(Debug, Clone, Copy, Default)]
pub struct LibraryStatus {
    untracked: UntrackedFiles,
}

impl LibraryStatus {
    pub fn new(untracked: UntrackedFiles) -> Self {
        Self { untracked }
    }
}

/// Index column code for a set of git2 status flags
fn staging_code(flags: Git2Status) -> StatusCode {
    if flags.is_conflicted() {
        StatusCode::UNMERGED
    } else if flags.is_ignored() {
        StatusCode::IGNORED
    } else if flags.is_index_new() {
        StatusCode::ADDED
    } else if flags.is_index_modified() {
        StatusCode::MODIFIED
    } else if flags.is_index_deleted() {
        StatusCode::DELETED
    } else if flags.is_index_renamed() {
        StatusCode::RENAMED
    } else if flags.is_index_typechange() {
        StatusCode::TYPE_CHANGED
    } else if flags.is_wt_new() {
        StatusCode::UNTRACKED
    } else {
        StatusCode::UNMODIFIED
    }
}

/// Working-tree column code for a set of git2 status flags
fn worktree_code(flags: Git2Status) -> StatusCode {
    if flags.is_conflicted() {
        StatusCode::UNMERGED
    } else if flags.is_ignored() {
        StatusCode::IGNORED
    } else if flags.is_wt_new() {
        StatusCode::UNTRACKED
    } else if flags.is_wt_modified() {
        StatusCode::MODIFIED
    } else if flags.is_wt_deleted() {
        StatusCode::DELETED
    } else if flags.is_wt_renamed() {
        StatusCode::RENAMED
    } else if flags.is_wt_typechange() {
        StatusCode::TYPE_CHANGED
    } else {
        StatusCode::UNMODIFIED
    }
}

/// Code pair for an unmerged path, from which conflict stages exist
///
/// Same table as git's short format: stage 1 is the common ancestor,
/// stage 2 ours, stage 3 theirs.
fn conflict_codes(ancestor: bool, ours: bool, theirs: bool) -> (StatusCode, StatusCode) {
    let (a, d, u) = (StatusCode::ADDED, StatusCode::DELETED, StatusCode::UNMERGED);
    match (ancestor, ours, theirs) {
        (true, false, false) => (d, d),
        (false, true, false) => (a, u),
        (true, true, false) => (u, d),
        (false, false, true) => (u, a),
        (true, false, true) => (d, u),
        (false, true, true) => (a, a),
        _ => (u, u),
    }
}

/// Conflict code pairs keyed by path
fn conflicts_by_path(index: &Index) -> Result<HashMap<Vec<u8>, (StatusCode, StatusCode)>> {
    let mut codes = HashMap::new();
    for conflict in index.conflicts()? {
        let conflict = conflict?;
        let path = [&conflict.our, &conflict.their, &conflict.ancestor]
            .into_iter()
            .flatten()
            .next()
            .map(|e| e.path.clone());
        if let Some(path) = path {
            let pair = conflict_codes(
                conflict.ancestor.is_some(),
                conflict.our.is_some(),
                conflict.their.is_some(),
            );
            codes.insert(path, pair);
        }
    }
    Ok(codes)
}

/// Query the embedded git handle for every changed path
///
/// Errors opening the handle or computing status are returned as-is. Paths
/// that are not valid UTF-8 are logged and skipped.
pub fn library_status(repo: &Repository, untracked: UntrackedFiles) -> Result<Vec<FileEntry>> {
    let git_repo = repo.open_git2()?;

    let mut opts = StatusOptions::new();
    opts.include_untracked(untracked != UntrackedFiles::No);
    opts.recurse_untracked_dirs(untracked == UntrackedFiles::All);
    opts.include_ignored(false);
    opts.renames_head_to_index(true);

    let statuses = git_repo.statuses(Some(&mut opts))?;

    let mut conflicts = None;
    let mut entries = Vec::with_capacity(statuses.len());
    for entry in statuses.iter() {
        let flags = entry.status();
        let Some(path) = entry.path() else {
            warn!(
                path = %String::from_utf8_lossy(entry.path_bytes()),
                "skipping non UTF-8 path"
            );
            continue;
        };

        let (x, y) = if flags.is_conflicted() {
            if conflicts.is_none() {
                conflicts = Some(conflicts_by_path(&git_repo.index()?)?);
            }
            conflicts
                .as_ref()
                .and_then(|c| c.get(path.as_bytes()).copied())
                .unwrap_or((StatusCode::UNMERGED, StatusCode::UNMERGED))
        } else {
            (staging_code(flags), worktree_code(flags))
        };

        entries.push(FileEntry::new(repo.path(), path, x, y));
    }

    debug!(count = entries.len(), "collected library status");
    Ok(entries)
}

impl StatusProvider for LibraryStatus {
    fn compute_status(&self, repo: &Repository) -> Result<Vec<FileEntry>> {
        library_status(repo, self.untracked)
    }
}
