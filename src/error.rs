//! Error types for project import.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the importer.
///
/// Only document-level failures are errors; everything recoverable inside a
/// machining program is collected as a warning on the [`crate::ImportReport`]
/// instead, so one bad record never aborts the batch.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("Empty file: {path}")]
    EmptyFile { path: PathBuf },

    #[error("Malformed document: {0}")]
    Xml(#[from] roxmltree::Error),

    #[error("Unexpected root element '{found}', expected 'project'")]
    UnexpectedRoot { found: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for importer operations.
pub type Result<T> = std::result::Result<T, ImportError>;
