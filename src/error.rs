//! Error types for plotgfa

use thiserror::Error;

/// Result type alias for plotgfa operations
pub type Result<T> = std::result::Result<T, PlotGfaError>;

/// Main error type for plotgfa
#[derive(Error, Debug)]
pub enum PlotGfaError {
    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A GFA record with fewer fields than its record type needs
    #[error("GFA parse error at line {line}: {message}")]
    GfaParse { line: usize, message: String },

    /// Image encoding errors
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// Invalid input errors
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// File not found errors
    #[error("File not found: {0}")]
    FileNotFound(String),
}
