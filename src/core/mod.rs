//! Core module - Contains the fundamental data structures and utilities
//!
//! This module provides:
//! - Snapshot model (Entry, EntryKind) and error taxonomy
//! - Markdown rendering of report sections
//! - Path normalization utilities
//! - File reading and text detection
//! - Token counting for the run summary

pub mod file_reader;
pub mod model;
pub mod paths;
pub mod render;
pub mod tokenizer;
