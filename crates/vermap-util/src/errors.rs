use miette::Diagnostic;
use thiserror::Error;

/// Unified error type for all vermap operations.
#[derive(Debug, Error, Diagnostic)]
pub enum VermapError {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid or malformed publication manifest (e.g. Publish.toml).
    #[error("Manifest error: {message}")]
    #[diagnostic(help("Check your Publish.toml for syntax errors"))]
    Manifest { message: String },

    /// Invalid or inconsistent resolution graph snapshot.
    #[error("Snapshot error: {message}")]
    #[diagnostic(help("Regenerate the snapshot from a fresh dependency resolution"))]
    Snapshot { message: String },

    /// Catch-all for miscellaneous errors.
    #[error("{message}")]
    Generic { message: String },
}
