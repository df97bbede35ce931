//! Exclusion filter
//!
//! Applies one pattern list to a collected entry set, relative to a fixed
//! reference directory.

use std::collections::HashMap;
use std::path::Path;

use crate::core::model::{Entry, EntrySet};
use crate::core::paths::{make_relative, normalize_separators};
use crate::filters::matcher::PatternMatcher;

/// Return the entries that are not excluded by `patterns`.
///
/// - An empty pattern list or entry set returns the input unchanged.
/// - Entries whose path is not under `reference_dir` are dropped silently.
/// - If the patterns fail to compile, the error is logged and the input
///   is returned unfiltered.
pub fn apply_exclusions<S: AsRef<str>>(
    entries: EntrySet,
    patterns: &[S],
    reference_dir: &Path,
) -> EntrySet {
    if patterns.is_empty() || entries.is_empty() {
        return entries;
    }

    let normalized: Vec<String> = patterns
        .iter()
        .map(|p| normalize_separators(p.as_ref()))
        .collect();

    let matcher = match PatternMatcher::compile(&normalized) {
        Ok(m) => m,
        Err(e) => {
            tracing::warn!(
                error = %e,
                patterns = ?normalized,
                "could not compile patterns, leaving entries unfiltered"
            );
            return entries;
        }
    };

    let mut by_relative: HashMap<String, Entry> = HashMap::with_capacity(entries.len());
    for entry in entries {
        match make_relative(entry.path(), reference_dir) {
            Some(rel) => {
                by_relative.insert(rel, entry);
            }
            None => {
                tracing::debug!(path = %entry.path().display(), "entry outside reference directory, dropped");
            }
        }
    }

    let before = by_relative.len();
    let kept: EntrySet = by_relative
        .into_iter()
        .filter(|(rel, entry)| !matcher.is_excluded(rel, entry.is_dir()))
        .map(|(_, entry)| entry)
        .collect();

    tracing::debug!(
        rules = matcher.len(),
        considered = before,
        kept = kept.len(),
        "applied exclusions"
    );
    kept
}
