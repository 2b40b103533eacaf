use std::path::PathBuf;

use thiserror::Error;

/// Domain error type for font resolution and document assembly.
///
/// The application layer wraps these in `anyhow::Error`; `main` downcasts to
/// pick the user-facing message and exit code.
#[derive(Debug, Error)]
pub enum CvError {
    #[error("Font '{0}' is not a TTF font")]
    FontNotTtf(String),

    #[error("Font '{0}' not found. Please specify an existing font")]
    FontNotFound(String),

    #[error("Could not load font {}: {reason}", path.display())]
    FontLoad { path: PathBuf, reason: String },

    #[error("Could not load background image {}: {reason}", path.display())]
    Background { path: PathBuf, reason: String },

    #[error("Invalid column: {0}")]
    Column(String),

    #[error("PDF error: {0}")]
    Pdf(String),

    #[error("Could not write {}: {reason}", path.display())]
    OutputWrite { path: PathBuf, reason: String },
}

impl CvError {
    /// True for failures that surface to the user only as a generic message.
    pub fn is_output_failure(&self) -> bool {
        matches!(self, CvError::OutputWrite { .. })
    }
}
