//! Error types for datastream splitting and composition.
//!
//! Only fatal conditions surface here; recoverable per-ref problems are
//! collected in [`crate::Report`] instead so a bad entry never aborts
//! its siblings.

use thiserror::Error;

/// Errors that abort a whole decompose or compose call.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Document parse or serialization error.
    #[error("{0}")]
    Xml(#[from] sds_xml::Error),

    /// Output path exceeds the maximum length for directory creation.
    #[error("path is {len} bytes, longer than the {max} byte maximum")]
    PathTooLong { len: usize, max: usize },

    /// A directory segment could not be created.
    #[error("could not create directory '{segment}': {source}")]
    CreateDir {
        segment: String,
        source: std::io::Error,
    },

    /// The requested datastream was not found in the collection.
    #[error("could not find any datastream{}", .id.as_deref().map(|i| format!(" of id '{i}'")).unwrap_or_default())]
    DatastreamNotFound { id: Option<String> },

    /// The selected datastream has no `checklists` container.
    #[error("no checklists element found in the matching datastream")]
    MissingChecklists,

    /// The target document has no container for the classified component.
    #[error("datastream has no '{0}' container")]
    MissingContainer(&'static str),
}

/// Result type for datastream operations.
pub type Result<T> = std::result::Result<T, Error>;
