//! Renderer module
//!
//! Renders the snapshot to Markdown: a YAML front matter block, path
//! listings and fenced file contents.

use chrono::{DateTime, SecondsFormat, Utc};
use std::path::{Path, PathBuf};

use crate::core::model::Entry;
use crate::core::paths::{make_relative, normalize_path};

pub const INITIAL_LIST_TITLE: &str = "# Initial Collected Paths (Folders and Files)";
pub const STRUCTURE_TITLE: &str = "# Repository Structure";
pub const EDITABLE_TITLE: &str = "# Editable Files (List)";
pub const CONTENT_TITLE: &str = "# Content of Editable Files";

pub const BINARY_PLACEHOLDER: &str = "[File is binary or unreadable]";
pub const DECODE_PLACEHOLDER: &str = "[Error: Could not decode file content with UTF-8]";

/// What the front matter says about the active filters
#[derive(Debug, Clone)]
pub enum FilterMode {
    InitialList,
    Full {
        default_patterns_enabled: bool,
        custom_exclude_structure_patterns: Vec<String>,
        custom_exclude_editable_patterns: Vec<String>,
    },
}

/// Metadata header of a report
#[derive(Debug, Clone)]
pub struct ScanMetadata {
    pub scan_timestamp: DateTime<Utc>,
    pub root_path: String,
    pub mode: FilterMode,
}

impl ScanMetadata {
    pub fn new(root: &Path, mode: FilterMode) -> Self {
        Self {
            scan_timestamp: Utc::now(),
            root_path: normalize_path(root),
            mode,
        }
    }
}

/// Body of one content block
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentBody {
    Text { lang: String, content: String },
    Binary,
    DecodeError,
    ReadError(String),
}

impl ContentBody {
    pub fn is_placeholder(&self) -> bool {
        !matches!(self, ContentBody::Text { .. })
    }
}

/// A file's embedded content, keyed by its root-relative path
#[derive(Debug, Clone)]
pub struct ContentBlock {
    pub path: String,
    pub body: ContentBody,
}

/// The four sections of a full report, in document order
#[derive(Debug, Clone, Default)]
pub struct ReportSections {
    pub metadata: Vec<String>,
    pub structure: Vec<String>,
    pub editable: Vec<String>,
    pub content: Vec<String>,
}

impl ReportSections {
    /// Concatenate the sections, one line per row
    pub fn to_document(&self) -> String {
        let mut output = String::new();
        for line in self
            .metadata
            .iter()
            .chain(&self.structure)
            .chain(&self.editable)
            .chain(&self.content)
        {
            output.push_str(line);
            output.push('\n');
        }
        output
    }
}

/// Renderer bound to the reference directory of one scan
pub struct Renderer {
    root: PathBuf,
}

impl Renderer {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Render the YAML front matter
    pub fn render_metadata(&self, meta: &ScanMetadata) -> Vec<String> {
        let mut lines = vec![
            "---".to_string(),
            format!(
                "scan_timestamp: \"{}\"",
                meta.scan_timestamp
                    .to_rfc3339_opts(SecondsFormat::Micros, false)
            ),
            format!("root_path: {}", yaml_string(&meta.root_path)),
        ];

        match &meta.mode {
            FilterMode::InitialList => lines.push("filter_mode: Initial List".to_string()),
            FilterMode::Full {
                default_patterns_enabled,
                custom_exclude_structure_patterns,
                custom_exclude_editable_patterns,
            } => {
                lines.push(format!(
                    "default_patterns_enabled: {}",
                    default_patterns_enabled
                ));
                lines.push(format!(
                    "custom_exclude_structure_patterns: {}",
                    yaml_list(custom_exclude_structure_patterns)
                ));
                lines.push(format!(
                    "custom_exclude_editable_patterns: {}",
                    yaml_list(custom_exclude_editable_patterns)
                ));
            }
        }

        lines.push("---".to_string());
        lines.push(String::new());
        lines
    }

    /// Render entries as a Markdown list sorted by root-relative path.
    ///
    /// Directories get a trailing '/'.
    pub fn render_listing<'a, I>(&self, entries: I) -> Vec<String>
    where
        I: IntoIterator<Item = &'a Entry>,
    {
        let mut rows: Vec<(String, String)> = entries
            .into_iter()
            .map(|entry| match make_relative(entry.path(), &self.root) {
                Some(rel) => {
                    let line = if entry.is_dir() {
                        format!("- `{}/`", rel)
                    } else {
                        format!("- `{}`", rel)
                    };
                    (rel, line)
                }
                None => {
                    let abs = normalize_path(entry.path());
                    let line = format!("- `{} (Error: Not relative)`", abs);
                    (abs, line)
                }
            })
            .collect();

        rows.sort_by(|a, b| a.0.cmp(&b.0));
        rows.into_iter().map(|(_, line)| line).collect()
    }

    /// Render one `## FILE:` block
    pub fn render_content_block(&self, block: &ContentBlock) -> Vec<String> {
        let (lang, body) = match &block.body {
            ContentBody::Text { lang, content } => (lang.as_str(), content.clone()),
            ContentBody::Binary => ("text", BINARY_PLACEHOLDER.to_string()),
            ContentBody::DecodeError => ("text", DECODE_PLACEHOLDER.to_string()),
            ContentBody::ReadError(reason) => ("text", format!("[Error reading file: {}]", reason)),
        };

        vec![
            format!("## FILE: `{}`", block.path),
            String::new(),
            format!("```{}", lang),
            body,
            "```".to_string(),
            String::new(),
        ]
    }

    /// Titled section: heading, blank line, rows
    pub fn section(&self, title: &str, rows: Vec<String>) -> Vec<String> {
        let mut lines = Vec::with_capacity(rows.len() + 2);
        lines.push(title.to_string());
        lines.push(String::new());
        lines.extend(rows);
        lines
    }
}

/// Double-quoted YAML scalar (JSON strings are valid YAML)
fn yaml_string(s: &str) -> String {
    serde_json::to_string(s).unwrap_or_else(|_| format!("\"{}\"", s))
}

/// Flow sequence (JSON arrays are valid YAML)
fn yaml_list(items: &[String]) -> String {
    serde_json::to_string(items).unwrap_or_else(|_| "[]".to_string())
}
