//! Filesystem collection backend
//!
//! Uses walkdir to enumerate every entry below the scan root.

use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::core::model::{DumpError, Entry, EntryKind, EntrySet};

/// Resolve a user-supplied root to an absolute, existing directory
pub fn resolve_root(path: &Path) -> Result<PathBuf, DumpError> {
    let resolved = path.canonicalize().map_err(|e| DumpError::InvalidRoot {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    if !resolved.is_dir() {
        return Err(DumpError::InvalidRoot {
            path: path.to_path_buf(),
            reason: "not a directory".to_string(),
        });
    }

    Ok(resolved)
}

/// Collect every descendant of `root` (files, directories, symlinks).
///
/// The root itself is not part of the result. Symlinks are not followed;
/// a link is classified by its target, or as a dangling link when the
/// target cannot be resolved.
pub fn collect_entries(root: &Path) -> Result<EntrySet, DumpError> {
    if !root.is_dir() {
        return Err(DumpError::InvalidRoot {
            path: root.to_path_buf(),
            reason: "not a directory".to_string(),
        });
    }

    let mut entries = EntrySet::new();

    for item in WalkDir::new(root).min_depth(1).follow_links(false) {
        let item = match item {
            Ok(e) => e,
            Err(e) => {
                tracing::warn!(error = %e, "skipping unreadable entry");
                continue;
            }
        };

        let kind = classify(item.path(), item.file_type());
        entries.insert(Entry::new(item.into_path(), kind));
    }

    tracing::debug!(root = %root.display(), count = entries.len(), "collected entries");
    Ok(entries)
}

fn classify(path: &Path, file_type: fs::FileType) -> EntryKind {
    if file_type.is_symlink() {
        return match fs::metadata(path) {
            Ok(target) => kind_of(target.file_type()),
            Err(_) => EntryKind::SymlinkToMissingTarget,
        };
    }

    kind_of(file_type)
}

/// Only regular files count as files; FIFOs, sockets and devices do not
fn kind_of(file_type: fs::FileType) -> EntryKind {
    if file_type.is_dir() {
        EntryKind::Directory
    } else if file_type.is_file() {
        EntryKind::File
    } else {
        EntryKind::Special
    }
}
