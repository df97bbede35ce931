//! Path helpers shared by the filters and the renderer
//!
//! Every path that reaches a matcher or the document is root-relative and
//! uses '/' as its separator.

use std::path::Path;

/// Path as a '/'-separated string
pub fn normalize_path(path: &Path) -> String {
    normalize_separators(&path.to_string_lossy())
}

/// Replace the host separator with '/'.
///
/// On '/' hosts this is the identity, so a backslash keeps its meaning
/// as a glob escape.
pub fn normalize_separators(s: &str) -> String {
    if std::path::MAIN_SEPARATOR == '/' {
        s.to_string()
    } else {
        s.replace(std::path::MAIN_SEPARATOR, "/")
    }
}

/// Path relative to `root`, or `None` when it lies outside of it
pub fn make_relative(path: &Path, root: &Path) -> Option<String> {
    path.strip_prefix(root).ok().map(normalize_path)
}

/// Language hint for a fenced code block, taken from the file extension
pub fn language_hint(path: &Path) -> String {
    path.extension()
        .map(|ext| ext.to_string_lossy().into_owned())
        .filter(|ext| !ext.is_empty())
        .unwrap_or_else(|| "text".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_under_scan_root() {
        let root = Path::new("/work/repo");
        let entry = Path::new("/work/repo/.github/workflows/ci.yml");
        assert_eq!(
            make_relative(entry, root).as_deref(),
            Some(".github/workflows/ci.yml")
        );
    }

    #[test]
    fn test_entry_outside_scan_root() {
        let root = Path::new("/work/repo");
        assert_eq!(make_relative(Path::new("/work/other/a.rs"), root), None);
        // a sibling sharing the prefix is still outside
        assert_eq!(make_relative(Path::new("/work/repo2/a.rs"), root), None);
    }

    #[test]
    fn test_root_itself_is_empty() {
        let root = Path::new("/work/repo");
        assert_eq!(make_relative(root, root).as_deref(), Some(""));
    }

    #[cfg(unix)]
    #[test]
    fn test_backslash_is_kept_for_glob_escapes() {
        assert_eq!(normalize_separators(r"\!important"), r"\!important");
        assert_eq!(normalize_path(Path::new("docs/a b.md")), "docs/a b.md");
    }

    #[test]
    fn test_language_hint_from_extension() {
        assert_eq!(language_hint(Path::new("src/lib.rs")), "rs");
        assert_eq!(language_hint(Path::new("dist/bundle.min.js")), "js");
        assert_eq!(language_hint(Path::new("Dockerfile")), "text");
        // dotfiles have no extension
        assert_eq!(language_hint(Path::new(".env")), "text");
    }
}
