//! Compiled gitignore matcher
//!
//! Compiles an ordered pattern list once and answers exclusion queries
//! for root-relative, '/'-separated paths.

use regex::Regex;

use crate::core::model::DumpError;
use crate::filters::pattern::Pattern;

#[derive(Debug)]
struct Rule {
    negated: bool,
    dir_only: bool,
    regex: Regex,
}

impl Rule {
    /// A rule matches the path itself, or any ancestor of it.
    ///
    /// Ancestors are directories, so a directory-only rule always applies
    /// to them.
    fn matches(&self, path: &str, is_dir: bool) -> bool {
        if (is_dir || !self.dir_only) && self.regex.is_match(path) {
            return true;
        }

        path.match_indices('/')
            .any(|(i, _)| self.regex.is_match(&path[..i]))
    }
}

/// Ordered set of compiled rules
#[derive(Debug, Default)]
pub struct PatternMatcher {
    rules: Vec<Rule>,
}

impl PatternMatcher {
    /// Compile patterns in order. Blank lines and comments are skipped.
    pub fn compile<S: AsRef<str>>(patterns: &[S]) -> Result<Self, DumpError> {
        let mut rules = Vec::with_capacity(patterns.len());

        for line in patterns {
            let Some(pattern) = Pattern::parse(line.as_ref())? else {
                continue;
            };

            let regex = Regex::new(&pattern.to_regex())
                .map_err(|e| DumpError::invalid_pattern(&pattern.source, e.to_string()))?;

            rules.push(Rule {
                negated: pattern.negated,
                dir_only: pattern.dir_only,
                regex,
            });
        }

        Ok(Self { rules })
    }

    /// Whether `path` ends up excluded.
    ///
    /// The last matching rule decides: a plain rule excludes, a negated
    /// rule re-includes. No match means included.
    pub fn is_excluded(&self, path: &str, is_dir: bool) -> bool {
        self.rules
            .iter()
            .rev()
            .find(|rule| rule.matches(path, is_dir))
            .is_some_and(|rule| !rule.negated)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
