//! Error types for the ocrfields-core library.

use thiserror::Error;

/// Main error type for the ocrfields library.
#[derive(Error, Debug)]
pub enum OcrFieldsError {
    /// A block violated its construction invariant.
    #[error("invalid block: {0}")]
    Block(#[from] BlockError),

    /// Pages of a document are not numbered 1..=n in order.
    #[error("page numbering is not contiguous: expected page {expected}, found {found}")]
    PageNumbering { expected: u32, found: u32 },

    /// Recognition output could not be decoded.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors raised while constructing a [`Block`](crate::Block).
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum BlockError {
    /// Confidence outside of [0.0, 1.0] (or NaN).
    #[error("confidence {0} is outside of [0.0, 1.0]")]
    ConfidenceOutOfRange(f64),
}

/// Result type for the ocrfields library.
pub type Result<T> = std::result::Result<T, OcrFieldsError>;
