//! Snapshot data model
//!
//! Every stage of a scan hands these values to the next one by move.
//! Entries are never mutated after collection, only kept or dropped.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// The kind of filesystem object an entry refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    File,
    Directory,
    /// A symlink whose target cannot be resolved
    SymlinkToMissingTarget,
    /// FIFO, socket or device node; listed but never read
    Special,
}

/// One filesystem object discovered under the scan root.
///
/// Identity is the absolute path: the canonical root joined with the
/// entry's components as they were found during the walk.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Entry {
    path: PathBuf,
    kind: EntryKind,
}

impl Entry {
    pub fn new(path: impl Into<PathBuf>, kind: EntryKind) -> Self {
        Self {
            path: path.into(),
            kind,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn kind(&self) -> EntryKind {
        self.kind
    }

    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }

    pub fn is_file(&self) -> bool {
        self.kind == EntryKind::File
    }
}

/// Unordered, deduplicated collection of entries
pub type EntrySet = HashSet<Entry>;

/// Error taxonomy for a scan.
///
/// Only `InvalidRoot` is fatal. The rest are contained to the unit that
/// failed and surface as a warning or an in-document placeholder.
#[derive(Debug, Error)]
pub enum DumpError {
    #[error("specified root path '{path}' is not a valid directory: {reason}")]
    InvalidRoot { path: PathBuf, reason: String },

    #[error("invalid pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("could not decode '{}' as UTF-8", path.display())]
    Decode { path: PathBuf },

    #[error("could not read '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not write output to '{}': {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl DumpError {
    pub fn invalid_pattern(pattern: &str, reason: impl Into<String>) -> Self {
        DumpError::InvalidPattern {
            pattern: pattern.to_string(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_identity_is_path_and_kind() {
        let mut set = EntrySet::new();
        set.insert(Entry::new("/project/a.rs", EntryKind::File));
        set.insert(Entry::new("/project/a.rs", EntryKind::File));
        set.insert(Entry::new("/project/src", EntryKind::Directory));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_entry_kind_predicates() {
        let dir = Entry::new("/p/src", EntryKind::Directory);
        let file = Entry::new("/p/a.rs", EntryKind::File);
        let dangling = Entry::new("/p/link", EntryKind::SymlinkToMissingTarget);
        let fifo = Entry::new("/p/pipe", EntryKind::Special);

        assert!(dir.is_dir() && !dir.is_file());
        assert!(file.is_file() && !file.is_dir());
        assert!(!dangling.is_file() && !dangling.is_dir());
        assert!(!fifo.is_file() && !fifo.is_dir());
    }

    #[test]
    fn test_error_messages() {
        let err = DumpError::invalid_pattern("[abc", "unterminated character class");
        assert_eq!(
            err.to_string(),
            "invalid pattern '[abc': unterminated character class"
        );

        let err = DumpError::Decode {
            path: PathBuf::from("bad.txt"),
        };
        assert!(err.to_string().contains("UTF-8"));
    }
}
