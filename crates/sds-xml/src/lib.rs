//! Arena-backed XML document tree.
//!
//! SCAP source datastream collections are containers that embed whole
//! checklist, check, and dictionary documents as subtrees of a single
//! XML file. Splitting them apart means cloning subtrees out of a live
//! document and serializing the clones as standalone files, so the tree
//! representation here is built around that operation: nodes live in a
//! flat arena owned by [`Document`] and are addressed by [`NodeId`]
//! handles, and [`Document::extract_subtree`] produces a brand-new,
//! self-contained document without touching the source tree.
//!
//! # Example
//!
//! ```no_run
//! use sds_xml::Document;
//!
//! let text = std::fs::read_to_string("collection-ds.xml")?;
//! let doc = Document::parse(&text)?;
//! println!("root element: {}", doc.name(doc.root()));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod document;
mod error;
mod node;
mod parse;
mod write;

pub use document::Document;
pub use error::{Error, Result};
pub use node::NodeId;
