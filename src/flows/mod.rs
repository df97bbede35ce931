//! Flows module - End-to-end operations
//!
//! Provides:
//! - report: collect, filter, render and write a repository snapshot

pub mod report;
