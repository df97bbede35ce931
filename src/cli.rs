//! CLI module - Command-line interface definitions and handlers

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

use crate::backends::scan::resolve_root;
use crate::core::tokenizer::TokenModel;
use crate::filters::defaults::DEFAULT_OUTPUT_FILENAME;
use crate::flows::report::{run_report, ReportConfig, StatsFormat};

/// repodump - snapshot a repository into a single Markdown document.
#[derive(Parser, Debug)]
#[command(name = "repodump")]
#[command(
    author,
    version,
    about,
    long_about = r#"repodump walks ROOT and writes one Markdown document describing it.

The document has four parts:
- YAML front matter (timestamp, root, active filters)
- Repository Structure: every entry that survives the structure filter
- Editable Files (List): the files that survive the editable filter
- Content of Editable Files: the text of each editable file

Filters use gitignore syntax. The editable filter only ever sees files
that survived the structure filter.

Examples:
    repodump . -d
    repodump . -d -e "target/" -s "*.lock" "!Cargo.lock"
    repodump ~/src/project --initial-list
    repodump . -o snapshot.md --stats
"#
)]
pub struct Cli {
    /// Root directory to scan.
    #[arg(
        value_name = "ROOT",
        long_help = "Root directory to scan.\n\n\
All paths in the document are relative to this directory, and the report is\n\
written inside it."
    )]
    pub root: PathBuf,

    /// List every collected path on stdout and exit.
    #[arg(
        short,
        long,
        long_help = "Print the unfiltered list of every collected folder and file to stdout.\n\n\
No filters are applied and no file is written. Useful to decide which patterns\n\
to pass with --exclude-structure / --exclude-editable."
    )]
    pub initial_list: bool,

    /// Gitignore patterns excluded from the structure listing.
    #[arg(
        short = 'e',
        long,
        value_name = "PATTERN",
        num_args = 1..,
        action = clap::ArgAction::Append,
        long_help = "Gitignore-style patterns removed from the Repository Structure section.\n\n\
Everything excluded here is also absent from the editable list. Patterns are\n\
applied after the defaults, so \"!pattern\" can re-include a defaulted path."
    )]
    pub exclude_structure: Vec<String>,

    /// Gitignore patterns excluded from the editable files.
    #[arg(
        short = 's',
        long,
        value_name = "PATTERN",
        num_args = 1..,
        action = clap::ArgAction::Append,
        long_help = "Gitignore-style patterns removed from the editable files.\n\n\
Excluded files stay in the structure listing but their content is not embedded."
    )]
    pub exclude_editable: Vec<String>,

    /// Enable the built-in default patterns.
    #[arg(
        short = 'd',
        long,
        long_help = "Enable the built-in pattern sets.\n\n\
Structure: **/.git/*, **/lib/*/*, **/.cspell/*, **/<output-file>\n\
Editable:  **/lib/*"
    )]
    pub default_patterns: bool,

    /// Name of the report file, written inside ROOT.
    #[arg(
        short = 'o',
        long,
        env = "REPODUMP_OUTPUT_FILE",
        default_value = DEFAULT_OUTPUT_FILENAME,
        value_name = "NAME",
        long_help = "Name of the report file, written inside ROOT.\n\n\
The report itself is never embedded in the content section, so repeated runs\n\
do not snowball."
    )]
    pub output_file: String,

    /// Print a run summary to stderr.
    #[arg(
        long,
        long_help = "Print entry counts, document size and an estimated token count to stderr\n\
once the document is assembled."
    )]
    pub stats: bool,

    /// Format of the --stats summary (text/json).
    #[arg(
        long,
        default_value = "text",
        value_name = "FORMAT",
        long_help = "Format of the --stats summary.\n\n\
Supported values:\n\
- text (default): human-readable lines\n\
- json: one JSON object, handy for scripts\n\n\
Has no effect without --stats."
    )]
    pub stats_format: StatsFormat,

    /// Token encoding used by --stats.
    #[arg(
        long,
        default_value = "cl100k",
        value_name = "MODEL",
        long_help = "Token encoding used for the --stats estimate.\n\n\
Supported values:\n\
- cl100k (default)\n\
- o200k\n\
- heuristic (chars / 4)"
    )]
    pub token_model: TokenModel,

    /// Quiet mode (errors only).
    #[arg(
        short,
        long,
        conflicts_with = "verbose",
        long_help = "Suppress status lines. Errors are still printed."
    )]
    pub quiet: bool,

    /// Verbose mode (more diagnostics).
    #[arg(
        short,
        long,
        long_help = "Enable debug diagnostics on stderr. RUST_LOG takes precedence when set."
    )]
    pub verbose: bool,

    /// Disable colored output.
    #[arg(
        long,
        long_help = "Disable colored output. This is useful when piping stderr to files or when\n\
your terminal does not support ANSI colors."
    )]
    pub no_color: bool,
}

impl Cli {
    /// Default tracing filter when RUST_LOG is not set
    pub fn log_level(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else if self.quiet {
            "error"
        } else {
            "warn"
        }
    }

    /// Resolve the root and collect the options into a report config
    pub fn into_config(self) -> Result<ReportConfig> {
        let root = resolve_root(&self.root)
            .with_context(|| format!("cannot scan '{}'", self.root.display()))?;

        let mut config = ReportConfig::new(root);
        config.initial_list = self.initial_list;
        config.exclude_structure = self.exclude_structure;
        config.exclude_editable = self.exclude_editable;
        config.use_defaults = self.default_patterns;
        config.output_file = self.output_file;
        config.show_stats = self.stats;
        config.stats_format = self.stats_format;
        config.token_model = self.token_model;
        config.quiet = self.quiet;
        Ok(config)
    }
}

pub fn run(cli: Cli) -> Result<()> {
    if cli.no_color {
        colored::control::set_override(false);
    }

    let config = cli.into_config()?;
    tracing::debug!(?config, "starting scan");
    run_report(config)
}
