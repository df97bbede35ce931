//! Filters module - gitignore-style exclusion
//!
//! Provides:
//! - pattern: pattern line parsing into a segment AST
//! - matcher: compiled, ordered rule sets (last match wins)
//! - exclusion: applying a rule set to collected entries
//! - defaults: built-in pattern sets

pub mod defaults;
pub mod exclusion;
pub mod matcher;
pub mod pattern;
