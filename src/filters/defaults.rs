//! Built-in pattern sets enabled by `--default-patterns`

/// Default output file name
pub const DEFAULT_OUTPUT_FILENAME: &str = "repo_dump.md";

/// Structure defaults, before the output file rule
pub const DEFAULT_EXCLUDE_STRUCTURE: &[&str] = &["**/.git/*", "**/lib/*/*", "**/.cspell/*"];

/// Editable defaults
pub const DEFAULT_EXCLUDE_EDITABLE: &[&str] = &["**/lib/*"];

/// Escape a file name so it matches only itself as a pattern
pub fn escape_literal(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for (i, c) in name.chars().enumerate() {
        let special = matches!(c, '\\' | '[' | ']' | '*' | '?' | ' ')
            || (i == 0 && matches!(c, '!' | '#'));
        if special {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Patterns that keep the report out of its own listings
pub fn output_file_patterns(output_file: &str) -> Vec<String> {
    let literal = escape_literal(output_file);
    vec![literal.clone(), format!("**/{}", literal)]
}

/// Effective structure patterns: defaults (if enabled) then custom ones
pub fn structure_patterns(custom: &[String], use_defaults: bool, output_file: &str) -> Vec<String> {
    let mut patterns = Vec::new();
    if use_defaults {
        patterns.extend(DEFAULT_EXCLUDE_STRUCTURE.iter().map(|p| p.to_string()));
        patterns.push(format!("**/{}", escape_literal(output_file)));
    }
    patterns.extend(custom.iter().cloned());
    patterns
}

/// Effective editable patterns: defaults (if enabled), custom ones, then
/// the output file rules so a rerun never embeds its previous report
pub fn editable_patterns(custom: &[String], use_defaults: bool, output_file: &str) -> Vec<String> {
    let mut patterns = Vec::new();
    if use_defaults {
        patterns.extend(DEFAULT_EXCLUDE_EDITABLE.iter().map(|p| p.to_string()));
    }
    patterns.extend(custom.iter().cloned());
    patterns.extend(output_file_patterns(output_file));
    patterns
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::matcher::PatternMatcher;

    #[test]
    fn test_structure_without_defaults_is_custom_only() {
        let custom = vec!["*.log".to_string()];
        assert_eq!(structure_patterns(&custom, false, "out.md"), custom);
        assert!(structure_patterns(&[], false, "out.md").is_empty());
    }

    #[test]
    fn test_structure_defaults_come_first() {
        let custom = vec!["!.git/HEAD".to_string()];
        let patterns = structure_patterns(&custom, true, "out.md");
        assert_eq!(patterns[0], "**/.git/*");
        assert!(patterns.contains(&"**/out.md".to_string()));
        assert_eq!(patterns.last().unwrap(), "!.git/HEAD");
    }

    #[test]
    fn test_editable_always_excludes_output() {
        let patterns = editable_patterns(&[], false, "snapshot.md");
        assert_eq!(patterns, vec!["snapshot.md", "**/snapshot.md"]);

        let custom = vec!["*.lock".to_string()];
        let patterns = editable_patterns(&custom, true, "snapshot.md");
        assert_eq!(
            patterns,
            vec!["**/lib/*", "*.lock", "snapshot.md", "**/snapshot.md"]
        );
    }

    #[test]
    fn test_escape_literal() {
        assert_eq!(escape_literal("repo_dump.md"), "repo_dump.md");
        assert_eq!(escape_literal("report[1].md"), r"report\[1\].md");
        assert_eq!(escape_literal("!notes?.md"), r"\!notes\?.md");
        assert_eq!(escape_literal("#dump *.md"), r"\#dump\ \*.md");
        // only a leading ! or # is special
        assert_eq!(escape_literal("a!b#c"), "a!b#c");
    }

    #[test]
    fn test_output_name_with_class_syntax_excludes_itself() {
        let custom = vec!["*.lock".to_string()];
        let patterns = editable_patterns(&custom, false, "report[1].md");
        let m = PatternMatcher::compile(&patterns).unwrap();

        assert!(m.is_excluded("report[1].md", false));
        assert!(m.is_excluded("sub/report[1].md", false));
        assert!(!m.is_excluded("report1.md", false));
        assert!(m.is_excluded("Cargo.lock", false));
    }

    #[test]
    fn test_unbalanced_output_name_still_compiles() {
        let custom = vec!["*.lock".to_string()];
        for patterns in [
            editable_patterns(&custom, true, "[draft.md"),
            structure_patterns(&custom, true, "[draft.md"),
        ] {
            let m = PatternMatcher::compile(&patterns).unwrap();
            assert!(m.is_excluded("[draft.md", false));
            assert!(m.is_excluded("Cargo.lock", false));
        }
    }

    #[test]
    fn test_output_name_with_leading_bang_is_not_a_negation() {
        let patterns = editable_patterns(&[], false, "!dump.md");
        let m = PatternMatcher::compile(&patterns).unwrap();
        assert!(m.is_excluded("!dump.md", false));
    }
}
