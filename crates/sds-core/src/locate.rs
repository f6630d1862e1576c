//! Lookup of components and component-refs inside a collection.

use sds_xml::{Document, NodeId};

/// Find the `component` element with the given `id` among the direct
/// children of the collection root.
pub fn find_component(doc: &Document, id: &str) -> Option<NodeId> {
    doc.children(doc.root()).find(|&candidate| {
        doc.local_name(candidate) == "component" && doc.attribute(candidate, "id") == Some(id)
    })
}

/// Find the `component-ref` with the given `id` anywhere under the
/// datastream's containers.
///
/// Search order is container declaration order, then ref order within
/// each container; the first match wins.
pub fn find_component_ref(doc: &Document, datastream: NodeId, id: &str) -> Option<NodeId> {
    for container in doc.children(datastream) {
        for component_ref in doc.children(container) {
            if doc.local_name(component_ref) != "component-ref" {
                continue;
            }
            if doc.attribute(component_ref, "id") == Some(id) {
                return Some(component_ref);
            }
        }
    }
    None
}
