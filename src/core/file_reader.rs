//! File reading for the content dump
//!
//! Provides:
//! - The text/binary detection collaborator (`TextDetector`)
//! - Whole-file UTF-8 reading with typed failures

use std::fs::{self, File};
use std::io::Read;
use std::path::Path;

use crate::core::model::DumpError;

/// Number of leading bytes inspected when sniffing a file
pub const SNIFF_LEN: usize = 8 * 1024;

/// Share of control bytes above which a non-UTF-8 sample is treated as binary
pub const MAX_CONTROL_RATIO: f64 = 0.30;

/// Best-effort binary/text classifier.
///
/// Misclassification is tolerated: a false positive ends up as a decode
/// placeholder, a false negative as a binary placeholder.
pub trait TextDetector {
    fn is_likely_text(&self, path: &Path) -> bool;
}

/// Default detector that inspects the head of the file
#[derive(Debug, Clone, Copy, Default)]
pub struct SniffingDetector;

impl TextDetector for SniffingDetector {
    fn is_likely_text(&self, path: &Path) -> bool {
        match sniff(path) {
            Ok(is_text) => is_text,
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "cannot sniff file");
                false
            }
        }
    }
}

fn sniff(path: &Path) -> std::io::Result<bool> {
    if !fs::metadata(path)?.is_file() {
        return Ok(false);
    }

    let file = File::open(path)?;
    let mut buffer = Vec::with_capacity(SNIFF_LEN);
    file.take(SNIFF_LEN as u64).read_to_end(&mut buffer)?;

    Ok(looks_like_text(&buffer))
}

/// Classify a byte sample
pub fn looks_like_text(sample: &[u8]) -> bool {
    if sample.is_empty() {
        return true;
    }

    if sample.contains(&0) {
        return false;
    }

    match std::str::from_utf8(sample) {
        Ok(_) => return true,
        // The sample may end in the middle of a multi-byte character
        Err(e) if e.error_len().is_none() => return true,
        Err(_) => {}
    }

    let control = sample.iter().filter(|&&b| is_control_byte(b)).count();
    (control as f64 / sample.len() as f64) < MAX_CONTROL_RATIO
}

fn is_control_byte(b: u8) -> bool {
    match b {
        b'\t' | b'\n' | b'\r' | 0x08 | 0x0c | 0x1b => false,
        0x00..=0x1f | 0x7f => true,
        _ => false,
    }
}

/// Read an entire file as UTF-8.
///
/// The handle is dropped before returning on every path.
pub fn read_text_file(path: &Path) -> Result<String, DumpError> {
    let bytes = fs::read(path).map_err(|source| DumpError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    String::from_utf8(bytes).map_err(|_| DumpError::Decode {
        path: path.to_path_buf(),
    })
}
