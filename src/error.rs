//! Error types for the geneinfo library.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while building or applying gene annotations.
#[derive(Debug, Error)]
pub enum Error {
    /// An I/O error occurred.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// A tab-separated table could not be read or written.
    #[error(transparent)]
    Csv(#[from] csv::Error),

    /// A parse error occurred while reading input data.
    #[error("{0}")]
    Parse(String),

    /// A validation constraint was violated.
    #[error("{0}")]
    Validation(String),

    /// The gene information file does not exist. Raised before any row is read.
    #[error("gene information file not found: {}", .0.display())]
    SourceNotFound(PathBuf),
}
