//! Snapshot report flow
//!
//! collect → structure filter → file projection → editable filter →
//! render the four report sections → write the document.

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::backends::scan::collect_entries;
use crate::core::file_reader::{read_text_file, SniffingDetector, TextDetector};
use crate::core::model::{DumpError, Entry, EntryKind, EntrySet};
use crate::core::paths::{language_hint, make_relative, normalize_path};
use crate::core::render::{
    ContentBlock, ContentBody, FilterMode, ReportSections, Renderer, ScanMetadata, CONTENT_TITLE,
    EDITABLE_TITLE, INITIAL_LIST_TITLE, STRUCTURE_TITLE,
};
use crate::core::tokenizer::{count_tokens, TokenModel};
use crate::filters::defaults::{editable_patterns, structure_patterns, DEFAULT_OUTPUT_FILENAME};
use crate::filters::exclusion::apply_exclusions;

/// Everything one run needs, resolved up front
#[derive(Debug, Clone)]
pub struct ReportConfig {
    /// Absolute, existing root directory
    pub root: PathBuf,
    pub initial_list: bool,
    pub exclude_structure: Vec<String>,
    pub exclude_editable: Vec<String>,
    pub use_defaults: bool,
    pub output_file: String,
    pub show_stats: bool,
    pub stats_format: StatsFormat,
    pub token_model: TokenModel,
    pub quiet: bool,
}

impl ReportConfig {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            initial_list: false,
            exclude_structure: Vec::new(),
            exclude_editable: Vec::new(),
            use_defaults: false,
            output_file: DEFAULT_OUTPUT_FILENAME.to_string(),
            show_stats: false,
            stats_format: StatsFormat::default(),
            token_model: TokenModel::default(),
            quiet: false,
        }
    }

    pub fn output_path(&self) -> PathBuf {
        self.root.join(&self.output_file)
    }
}

/// How the `--stats` summary is printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatsFormat {
    #[default]
    Text,
    Json,
}

impl fmt::Display for StatsFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatsFormat::Text => f.write_str("text"),
            StatsFormat::Json => f.write_str("json"),
        }
    }
}

impl FromStr for StatsFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(StatsFormat::Text),
            "json" => Ok(StatsFormat::Json),
            _ => Err(format!("unknown stats format '{}' (expected text or json)", s)),
        }
    }
}

/// Counters for the `--stats` summary
#[derive(Debug, Clone, Default, Serialize)]
pub struct ReportStats {
    pub collected: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub structure: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub editable: Option<usize>,
    pub placeholders: usize,
    pub document_bytes: usize,
    pub estimated_tokens: usize,
    pub token_model: String,
}

/// An assembled, not yet written report
#[derive(Debug, Clone)]
pub struct Report {
    pub sections: ReportSections,
    pub stats: ReportStats,
    /// Root-relative paths of the embedded files, in document order
    pub editable_paths: Vec<String>,
}

impl Report {
    pub fn document(&self) -> String {
        self.sections.to_document()
    }
}

/// Orchestrates one scan
pub struct ReportBuilder<D = SniffingDetector> {
    config: ReportConfig,
    detector: D,
    renderer: Renderer,
}

impl ReportBuilder<SniffingDetector> {
    pub fn new(config: ReportConfig) -> Self {
        Self::with_detector(config, SniffingDetector)
    }
}

impl<D: TextDetector> ReportBuilder<D> {
    pub fn with_detector(config: ReportConfig, detector: D) -> Self {
        let renderer = Renderer::new(config.root.clone());
        Self {
            config,
            detector,
            renderer,
        }
    }

    /// Unfiltered listing of everything under the root
    pub fn build_initial_list(&self) -> Result<Report, DumpError> {
        let entries = collect_entries(&self.config.root)?;

        let meta = ScanMetadata::new(&self.config.root, FilterMode::InitialList);
        let sections = ReportSections {
            metadata: self.renderer.render_metadata(&meta),
            structure: self
                .renderer
                .section(INITIAL_LIST_TITLE, self.renderer.render_listing(&entries)),
            ..Default::default()
        };

        let stats = ReportStats {
            collected: entries.len(),
            ..Default::default()
        };

        Ok(self.finish(sections, stats, Vec::new()))
    }

    /// Filtered report with all four sections
    pub fn build_full(&self) -> Result<Report, DumpError> {
        let cfg = &self.config;
        let root = cfg.root.as_path();

        let all = collect_entries(root)?;
        let collected = all.len();

        let structure_rules =
            structure_patterns(&cfg.exclude_structure, cfg.use_defaults, &cfg.output_file);
        let structure = apply_exclusions(all, &structure_rules, root);

        let files: EntrySet = structure.iter().filter(|e| e.is_file()).cloned().collect();

        let editable_rules =
            editable_patterns(&cfg.exclude_editable, cfg.use_defaults, &cfg.output_file);
        let editable = apply_exclusions(files, &editable_rules, root);

        let dangling = structure
            .iter()
            .filter(|e| e.kind() == EntryKind::SymlinkToMissingTarget)
            .count();
        tracing::debug!(
            collected,
            structure = structure.len(),
            dangling,
            editable = editable.len(),
            "filtering finished"
        );

        let mut ordered: Vec<(String, &Entry)> = editable
            .iter()
            .map(|e| {
                let rel = make_relative(e.path(), root).unwrap_or_else(|| normalize_path(e.path()));
                (rel, e)
            })
            .collect();
        ordered.sort_by(|a, b| a.0.cmp(&b.0));

        let mut placeholders = 0;
        let mut content_rows = Vec::new();
        for (rel, entry) in &ordered {
            let block = ContentBlock {
                path: rel.clone(),
                body: self.content_body(entry.path()),
            };
            if block.body.is_placeholder() {
                placeholders += 1;
            }
            content_rows.extend(self.renderer.render_content_block(&block));
        }

        let meta = ScanMetadata::new(
            root,
            FilterMode::Full {
                default_patterns_enabled: cfg.use_defaults,
                custom_exclude_structure_patterns: cfg.exclude_structure.clone(),
                custom_exclude_editable_patterns: cfg.exclude_editable.clone(),
            },
        );

        let mut structure_rows = self
            .renderer
            .section(STRUCTURE_TITLE, self.renderer.render_listing(&structure));
        structure_rows.push(String::new());

        let mut editable_rows = self
            .renderer
            .section(EDITABLE_TITLE, self.renderer.render_listing(&editable));
        editable_rows.push(String::new());

        let sections = ReportSections {
            metadata: self.renderer.render_metadata(&meta),
            structure: structure_rows,
            editable: editable_rows,
            content: self.renderer.section(CONTENT_TITLE, content_rows),
        };

        let stats = ReportStats {
            collected,
            structure: Some(structure.len()),
            editable: Some(editable.len()),
            placeholders,
            ..Default::default()
        };

        let editable_paths = ordered.into_iter().map(|(rel, _)| rel).collect();
        Ok(self.finish(sections, stats, editable_paths))
    }

    /// Run the configured mode end to end
    pub fn run(&self) -> Result<()> {
        let cfg = &self.config;

        if cfg.initial_list {
            self.status(format!(
                "Scanning directory: {} for initial list...",
                cfg.root.display()
            ));
            let report = self.build_initial_list()?;
            print!("{}", report.document());
            self.print_stats(&report.stats)?;
            return Ok(());
        }

        self.status(format!("Scanning directory: {}", cfg.root.display()));
        let report = self.build_full()?;
        tracing::debug!(files = ?report.editable_paths, "embedded files");
        self.status(format!(
            "Content of editable files processed. Full output in '{}'.",
            cfg.output_file
        ));

        let output_path = cfg.output_path();
        match write_document(&output_path, &report.document()) {
            Ok(()) => self.status(format!(
                "{} {}",
                "Formatted output written to:".green(),
                output_path.display()
            )),
            Err(e) => {
                tracing::error!(error = %e, "report write failed");
                eprintln!("{} {}", "error:".red().bold(), e);
            }
        }

        self.print_stats(&report.stats)?;
        Ok(())
    }

    fn content_body(&self, path: &Path) -> ContentBody {
        if !self.detector.is_likely_text(path) {
            return ContentBody::Binary;
        }

        match read_text_file(path) {
            Ok(content) => ContentBody::Text {
                lang: language_hint(path),
                content: content.trim().to_string(),
            },
            Err(DumpError::Decode { .. }) => {
                tracing::warn!(path = %path.display(), "file is not valid UTF-8");
                ContentBody::DecodeError
            }
            Err(DumpError::Read { source, .. }) => {
                tracing::warn!(path = %path.display(), error = %source, "cannot read file");
                ContentBody::ReadError(source.to_string())
            }
            Err(other) => ContentBody::ReadError(other.to_string()),
        }
    }

    fn finish(
        &self,
        sections: ReportSections,
        mut stats: ReportStats,
        editable_paths: Vec<String>,
    ) -> Report {
        if self.config.show_stats {
            let document = sections.to_document();
            stats.document_bytes = document.len();
            stats.estimated_tokens = count_tokens(&document, self.config.token_model);
            stats.token_model = self.config.token_model.to_string();
        }

        Report {
            sections,
            stats,
            editable_paths,
        }
    }

    fn status(&self, message: String) {
        if !self.config.quiet {
            eprintln!("{}", message);
        }
    }

    fn print_stats(&self, stats: &ReportStats) -> Result<()> {
        if !self.config.show_stats {
            return Ok(());
        }

        if self.config.stats_format == StatsFormat::Json {
            eprintln!("{}", render_stats_json(stats)?);
            return Ok(());
        }

        eprintln!("📦 Snapshot Statistics:");
        eprintln!("   Collected entries: {}", stats.collected);
        if let Some(structure) = stats.structure {
            eprintln!("   Structure entries: {}", structure);
        }
        if let Some(editable) = stats.editable {
            eprintln!("   Editable files: {}", editable);
            eprintln!("   Placeholders: {}", stats.placeholders);
        }
        eprintln!("   Document bytes: {}", stats.document_bytes);
        eprintln!(
            "   Tokens: {} (model: {})",
            stats.estimated_tokens, stats.token_model
        );
        eprintln!();
        Ok(())
    }
}

/// Summary as a single JSON object
pub fn render_stats_json(stats: &ReportStats) -> Result<String> {
    Ok(serde_json::to_string(stats)?)
}

/// Write the assembled document
pub fn write_document(path: &Path, document: &str) -> Result<(), DumpError> {
    fs::write(path, document).map_err(|source| DumpError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Run the report command
pub fn run_report(config: ReportConfig) -> Result<()> {
    ReportBuilder::new(config).run()
}
