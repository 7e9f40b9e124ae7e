//! Export error types.
//!
//! Queries over the roster never fail; writing an export is the only fallible
//! operation in the core, and its failures are surfaced to the caller as-is.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors that can occur while writing a roster export.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The destination's parent directory could not be created.
    #[error("failed to create output directory {}: {source}", path.display())]
    CreateDir { path: PathBuf, source: io::Error },

    /// Opening, writing or flushing the destination failed.
    #[error("failed to write export to {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },

    /// The export view could not be serialized.
    #[error("failed to serialize roster: {0}")]
    Serialize(#[from] serde_json::Error),

    /// A roster value holds characters the output format cannot represent.
    #[error("roster cannot be written as XML: {0}")]
    Encode(#[source] io::Error),
}

impl ExportError {
    /// Returns the filesystem path involved in the failure, if any.
    pub fn path(&self) -> Option<&Path> {
        match self {
            ExportError::CreateDir { path, .. } | ExportError::Write { path, .. } => Some(path),
            ExportError::Serialize(_) | ExportError::Encode(_) => None,
        }
    }
}
