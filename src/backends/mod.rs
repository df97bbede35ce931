//! Backends module - Filesystem access
//!
//! Provides:
//! - scan: root resolution and entry collection with walkdir

pub mod scan;
