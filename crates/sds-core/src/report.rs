//! Recoverable-problem reporting for decompose runs.

use std::fmt;

use thiserror::Error;

/// Outcome of a [`crate::decompose`] run.
///
/// Fatal conditions are returned as [`crate::Error`]; everything that
/// only affected a single ref or catalog entry lands here, in document
/// order, so the caller decides how to display it.
#[derive(Debug, Default)]
pub struct Report {
    /// Number of component files written to disk.
    pub files_written: usize,
    /// Recoverable problems, in the order they were encountered.
    pub problems: Vec<Problem>,
}

impl Report {
    /// True when every ref and catalog entry was dumped cleanly.
    pub fn is_clean(&self) -> bool {
        self.problems.is_empty()
    }

    pub(crate) fn problem(&mut self, subject: impl Into<String>, kind: ProblemKind) {
        self.problems.push(Problem {
            subject: subject.into(),
            kind,
        });
    }
}

/// A recoverable problem encountered while walking a datastream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Problem {
    /// The component id, component-ref id, or catalog entry name the
    /// problem applies to.
    pub subject: String,
    /// What went wrong.
    pub kind: ProblemKind,
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.subject, self.kind)
    }
}

/// Classification of recoverable problems.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ProblemKind {
    /// Component-ref has no `id` attribute. The dump still proceeds on
    /// the component id derived from `href`.
    #[error("no or invalid id attribute on component-ref")]
    MissingRefId,

    /// Component-ref has no usable `href` attribute.
    #[error("no or invalid xlink:href attribute on component-ref")]
    MissingHref,

    /// No `component` with the id named by `href` exists in the document.
    #[error("component was not found in the document")]
    ComponentNotFound,

    /// The component exists but holds no element payload.
    #[error("component has no element contents, nothing to dump")]
    EmptyComponent,

    /// Catalog entry without a `name` attribute.
    #[error("no or invalid name for a component referenced in the catalog")]
    MissingCatalogName,

    /// Catalog entry without a usable `uri` attribute.
    #[error("no or invalid URI for a component referenced in the catalog")]
    MissingCatalogUri,

    /// Catalog entry named a component-ref that does not exist in the
    /// datastream.
    #[error("component-ref referenced in the catalog was not found in the datastream")]
    UnresolvedCatalogRef,

    /// The catalog chain loops back to a component-ref already on the
    /// current walk path.
    #[error("catalog cycle detected, ref already visited on this walk")]
    CatalogCycle,
}
