//! Error types for the stmx-core library.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the stmx library.
#[derive(Error, Debug)]
pub enum StmxError {
    /// Required statement columns could not be resolved.
    #[error(transparent)]
    MissingColumns(#[from] MissingColumnsError),

    /// Input file could not be ingested.
    #[error("ingest error: {0}")]
    Ingest(#[from] IngestError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Raised before any row is processed when a required logical field has no
/// matching header.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub struct MissingColumnsError {
    /// Logical fields that could not be resolved.
    pub missing: Vec<String>,
    /// Every header detected in the input, after normalization.
    pub detected: Vec<String>,
}

impl fmt::Display for MissingColumnsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "missing required columns: {}; detected headers: [{}]",
            self.missing.join(", "),
            self.detected
                .iter()
                .map(|h| format!("\"{}\"", h))
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}

/// Errors raised by the ingestion collaborator.
#[derive(Error, Debug)]
pub enum IngestError {
    /// The file format is not supported or the file cannot be parsed at all.
    #[error("unsupported format for {path}: {reason}")]
    UnsupportedFormat { path: PathBuf, reason: String },

    /// The file has no header row.
    #[error("no header row found in {path}")]
    NoHeader { path: PathBuf },
}

/// Result type for the stmx library.
pub type Result<T> = std::result::Result<T, StmxError>;
