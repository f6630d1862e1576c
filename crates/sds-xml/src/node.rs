//! Node storage for the document arena.

/// Handle to an element node in a [`crate::Document`] arena.
///
/// Handles are plain indices and stay valid for the lifetime of the
/// document that issued them. They are meaningless when applied to a
/// different document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) usize);

/// Element data stored in the arena.
///
/// Namespace declarations are kept as ordinary `xmlns`/`xmlns:prefix`
/// attributes; element and attribute names keep their prefix as parsed.
#[derive(Debug, Clone)]
pub(crate) struct NodeData {
    pub(crate) name: String,
    pub(crate) attributes: Vec<(String, String)>,
    pub(crate) text: String,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
}

impl NodeData {
    pub(crate) fn new(name: impl Into<String>, parent: Option<NodeId>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            text: String::new(),
            parent,
            children: Vec::new(),
        }
    }
}
