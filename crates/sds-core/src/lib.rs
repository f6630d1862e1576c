//! Split and compose SCAP source datastream collections.
//!
//! A source datastream collection is a single XML file bundling several
//! security-content components (checklists, checks, dictionaries,
//! extended data). Components are referenced indirectly: each
//! `component-ref` carries an `id` and an `xlink:href` pointing at a
//! sibling `component`, and may own a `catalog` of further refs, making
//! extraction a recursive graph walk rather than a flat listing.
//!
//! [`decompose`] walks a selected datastream and writes every referenced
//! component out as a standalone file, mirroring catalog nesting as
//! subdirectories. [`compose_skeleton`] and [`add_component_with_ref`]
//! build a collection document the other way around.
//!
//! # Example
//!
//! ```no_run
//! let report = sds_core::decompose("collection-ds.xml", None, "out")?;
//! for problem in &report.problems {
//!     eprintln!("skipped: {}", problem);
//! }
//! println!("wrote {} files", report.files_written);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod compose;
mod decompose;
mod error;
mod locate;
mod paths;
mod report;

pub use compose::{add_component_with_ref, compose_from_file, compose_skeleton, ComponentKind};
pub use decompose::{decompose, dump_component};
pub use error::{Error, Result};
pub use locate::{find_component, find_component_ref};
pub use paths::{ensure_directory_path, split_dir_and_base, MAX_PATH_LEN};
pub use report::{Problem, ProblemKind, Report};

/// Namespace of the source datastream vocabulary.
pub const DATASTREAM_NS: &str = "http://scap.nist.gov/schema/scap/source/1.2";

/// Namespace of the `xlink:href` attributes on component-refs.
pub const XLINK_NS: &str = "http://www.w3.org/1999/xlink";

/// Namespace of the XML catalogs nested inside component-refs.
pub const CATALOG_NS: &str = "urn:oasis:names:tc:entity:xmlns:xml:catalog";
