//! Compose a datastream collection skeleton from component files.

use sds_xml::{Document, NodeId};

use crate::{CATALOG_NS, DATASTREAM_NS, Error, Result, XLINK_NS};

/// Kind of a security-content component, classified from its filename
/// suffix. Determines which datastream container a ref belongs in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentKind {
    Checklist,
    Check,
    Dictionary,
    Extended,
}

impl ComponentKind {
    /// Classify a file path by suffix. The composite `-cpe-oval.xml`
    /// suffix is tested before the bare `-oval.xml` it also ends with.
    pub fn classify(filepath: &str) -> Self {
        if filepath.ends_with("-xccdf.xml") {
            ComponentKind::Checklist
        } else if filepath.ends_with("-cpe-oval.xml") || filepath.ends_with("-cpe-dictionary.xml") {
            ComponentKind::Dictionary
        } else if filepath.ends_with("-oval.xml") {
            ComponentKind::Check
        } else {
            ComponentKind::Extended
        }
    }

    /// Local name of the container element refs of this kind live in.
    pub fn container(self) -> &'static str {
        match self {
            ComponentKind::Checklist => "checklists",
            ComponentKind::Check => "checks",
            ComponentKind::Dictionary => "dictionaries",
            ComponentKind::Extended => "extended-components",
        }
    }
}

/// Build an empty collection document: a `ds:data-stream-collection`
/// root declaring the datastream, xlink, and catalog namespaces, with
/// the four standard containers attached in order.
///
/// Returns the document and the node owning the containers.
pub fn compose_skeleton() -> (Document, NodeId) {
    let mut doc = Document::new("ds:data-stream-collection");
    let root = doc.root();
    doc.set_attribute(root, "xmlns:ds", DATASTREAM_NS);
    doc.set_attribute(root, "xmlns:xlink", XLINK_NS);
    doc.set_attribute(root, "xmlns:cat", CATALOG_NS);

    for name in ["dictionaries", "checklists", "checks", "extended-components"] {
        let container = doc.create_element(format!("ds:{name}"));
        doc.append_child(root, container);
    }

    (doc, root)
}

/// Create a component-ref for `filepath` and attach it, with an empty
/// catalog, to the container its suffix classifies it into.
///
/// The ref gets `id = ref_id` and `xlink:href = "#" + filepath`, and is
/// appended as the last child of the chosen container. Catalog
/// population for dependent components is not performed here.
pub fn add_component_with_ref(
    doc: &mut Document,
    holder: NodeId,
    filepath: &str,
    ref_id: &str,
) -> Result<()> {
    let kind = ComponentKind::classify(filepath);
    let container = doc
        .child_named(holder, kind.container())
        .ok_or(Error::MissingContainer(kind.container()))?;

    let component_ref = doc.create_element("ds:component-ref");
    doc.set_attribute(component_ref, "id", ref_id);
    doc.set_attribute(component_ref, "xlink:href", format!("#{filepath}"));

    let catalog = doc.create_element("cat:catalog");
    doc.append_child(component_ref, catalog);

    doc.append_child(container, component_ref);
    Ok(())
}

/// Build a collection skeleton holding a single ref for `filepath`,
/// using the path itself as the ref id.
pub fn compose_from_file(filepath: &str) -> Result<Document> {
    let (mut doc, holder) = compose_skeleton();
    add_component_with_ref(&mut doc, holder, filepath, filepath)?;
    Ok(doc)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_is_exhaustive_and_exclusive() {
        assert_eq!(ComponentKind::classify("foo-xccdf.xml"), ComponentKind::Checklist);
        assert_eq!(ComponentKind::classify("bar-oval.xml"), ComponentKind::Check);
        assert_eq!(ComponentKind::classify("bar-cpe-oval.xml"), ComponentKind::Dictionary);
        assert_eq!(
            ComponentKind::classify("bar-cpe-dictionary.xml"),
            ComponentKind::Dictionary
        );
        assert_eq!(ComponentKind::classify("bar.xml"), ComponentKind::Extended);
        assert_eq!(ComponentKind::classify("bar-oval.xml.bak"), ComponentKind::Extended);
    }

    #[test]
    fn test_skeleton_has_four_containers_in_order() {
        let (doc, holder) = compose_skeleton();
        let names: Vec<_> = doc.children(holder).map(|c| doc.local_name(c).to_string()).collect();
        assert_eq!(names, ["dictionaries", "checklists", "checks", "extended-components"]);
        assert_eq!(doc.attribute(doc.root(), "xmlns:ds"), Some(DATASTREAM_NS));
    }

    #[test]
    fn test_compose_single_checklist_round_trip() {
        let doc = compose_from_file("foo-xccdf.xml").unwrap();
        let holder = doc.root();

        let checklists = doc.child_named(holder, "checklists").unwrap();
        let refs: Vec<_> = doc.children(checklists).collect();
        assert_eq!(refs.len(), 1);

        let component_ref = refs[0];
        assert_eq!(doc.local_name(component_ref), "component-ref");
        assert_eq!(doc.attribute(component_ref, "id"), Some("foo-xccdf.xml"));
        assert_eq!(doc.attribute(component_ref, "href"), Some("#foo-xccdf.xml"));
        assert!(doc.child_named(component_ref, "catalog").is_some());

        for empty in ["dictionaries", "checks", "extended-components"] {
            let container = doc.child_named(holder, empty).unwrap();
            assert_eq!(doc.children(container).count(), 0);
        }
    }

    #[test]
    fn test_composed_document_survives_serialization() {
        let doc = compose_from_file("deps-oval.xml").unwrap();
        let text = doc.to_xml_string().unwrap();
        let reparsed = Document::parse(&text).unwrap();
        assert!(doc.tree_eq(&reparsed));

        let checks = reparsed.child_named(reparsed.root(), "checks").unwrap();
        assert_eq!(reparsed.children(checks).count(), 1);
    }

    #[test]
    fn test_add_to_document_without_container_fails() {
        let mut doc = Document::new("ds:data-stream-collection");
        let root = doc.root();
        let result = add_component_with_ref(&mut doc, root, "foo-xccdf.xml", "r1");
        assert!(matches!(result, Err(Error::MissingContainer("checklists"))));
    }
}
