//! Error types for document parsing and serialization.

use thiserror::Error;

/// Errors that can occur when parsing or serializing documents.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// XML parse error, carrying the byte offset the reader stopped at.
    #[error("XML parse error at byte {offset}: {message}")]
    Parse { message: String, offset: u64 },

    /// XML serialization error.
    #[error("XML error: {0}")]
    Xml(String),
}

/// Result type for document operations.
pub type Result<T> = std::result::Result<T, Error>;
