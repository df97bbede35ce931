//! repodump - snapshot a repository into a single Markdown document
//!
//! repodump provides:
//! - Recursive collection of folders, files and symlinks under a root
//! - Two-stage gitignore filtering (structure, then editable files)
//! - Text/binary detection and UTF-8 content embedding
//! - Markdown output with YAML front matter

use clap::Parser;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

mod backends;
mod cli;
mod core;
mod filters;
mod flows;

fn main() {
    let cli = cli::Cli::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_level()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    if let Err(e) = cli::run(cli) {
        eprintln!("{} {:#}", "error:".red().bold(), e);
        std::process::exit(1);
    }
}
