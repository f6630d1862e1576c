//! The arena document and its tree operations.

use std::collections::HashSet;

use crate::node::{NodeData, NodeId};

/// An XML document owning a flat arena of element nodes.
///
/// The root element is always the first node in the arena. The tree is
/// mutated in place through [`NodeId`] handles; no node is ever removed,
/// so handles never dangle.
#[derive(Debug, Clone)]
pub struct Document {
    pub(crate) nodes: Vec<NodeData>,
}

impl Document {
    /// Create a new document with a single root element.
    pub fn new(root_name: impl Into<String>) -> Self {
        Self {
            nodes: vec![NodeData::new(root_name, None)],
        }
    }

    /// Get the root element.
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Get the qualified name of an element (prefix included, as parsed).
    pub fn name(&self, node: NodeId) -> &str {
        &self.nodes[node.0].name
    }

    /// Get the local part of an element name, with any namespace prefix
    /// stripped.
    pub fn local_name(&self, node: NodeId) -> &str {
        let name = self.name(node);
        match name.split_once(':') {
            Some((_, local)) => local,
            None => name,
        }
    }

    /// Get the text content of an element.
    pub fn text(&self, node: NodeId) -> &str {
        &self.nodes[node.0].text
    }

    /// Look up an attribute by name.
    ///
    /// An unqualified `key` also matches a prefixed attribute with the
    /// same local name (so `href` finds `xlink:href`), mirroring how
    /// attribute lookup behaves in namespace-unaware consumers of SCAP
    /// content. Namespace declarations never match an unqualified key.
    pub fn attribute(&self, node: NodeId, key: &str) -> Option<&str> {
        self.nodes[node.0]
            .attributes
            .iter()
            .find(|(k, _)| attr_matches(k, key))
            .map(|(_, v)| v.as_str())
    }

    /// Set an attribute, replacing an existing one with the same
    /// qualified name.
    pub fn set_attribute(&mut self, node: NodeId, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        let attributes = &mut self.nodes[node.0].attributes;
        if let Some(existing) = attributes.iter_mut().find(|(k, _)| *k == key) {
            existing.1 = value;
        } else {
            attributes.push((key, value));
        }
    }

    /// Iterate the element children of a node, in document order.
    pub fn children(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes[node.0].children.iter().copied()
    }

    /// Find the first child whose local name matches `name`.
    pub fn child_named(&self, node: NodeId, name: &str) -> Option<NodeId> {
        self.children(node).find(|&c| self.local_name(c) == name)
    }

    /// Get the parent of a node, `None` for the root.
    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes[node.0].parent
    }

    /// Create a detached element.
    ///
    /// The node belongs to this document's arena but is not reachable
    /// from the root until attached with [`Document::append_child`].
    pub fn create_element(&mut self, name: impl Into<String>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(NodeData::new(name, None));
        id
    }

    /// Append `child` as the last child of `parent`.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
    }

    /// Deep-clone the subtree rooted at `node` into a brand-new document,
    /// reconciling namespaces so the clone is self-contained.
    ///
    /// Every namespace prefix the subtree actually uses that is declared
    /// on an ancestor (nearest declaration wins) is re-declared on the
    /// new root, unless the subtree root already declares it itself.
    /// This document is not modified.
    pub fn extract_subtree(&self, node: NodeId) -> Document {
        let mut out = Document { nodes: Vec::new() };
        self.clone_into(node, None, &mut out);

        let mut needed = HashSet::new();
        self.collect_prefixes(node, &mut needed);

        // Prefixes the cloned root already declares win over ancestors.
        let mut resolved: HashSet<String> = out.nodes[0]
            .attributes
            .iter()
            .filter_map(|(k, _)| decl_prefix(k).map(str::to_string))
            .collect();

        let mut cursor = self.nodes[node.0].parent;
        while let Some(ancestor) = cursor {
            for (key, value) in &self.nodes[ancestor.0].attributes {
                if let Some(prefix) = decl_prefix(key) {
                    if needed.contains(prefix) && !resolved.contains(prefix) {
                        out.nodes[0].attributes.push((key.clone(), value.clone()));
                        resolved.insert(prefix.to_string());
                    }
                }
            }
            cursor = self.nodes[ancestor.0].parent;
        }

        out
    }

    fn clone_into(&self, node: NodeId, parent: Option<NodeId>, out: &mut Document) -> NodeId {
        let data = &self.nodes[node.0];
        let id = NodeId(out.nodes.len());
        out.nodes.push(NodeData {
            name: data.name.clone(),
            attributes: data.attributes.clone(),
            text: data.text.clone(),
            parent,
            children: Vec::new(),
        });
        if let Some(p) = parent {
            out.nodes[p.0].children.push(id);
        }
        for &child in &data.children {
            self.clone_into(child, Some(id), out);
        }
        id
    }

    /// Collect every namespace prefix the subtree uses. The empty string
    /// stands for the default namespace, used by unprefixed elements.
    /// Unprefixed attributes carry no namespace and are not counted.
    fn collect_prefixes(&self, node: NodeId, prefixes: &mut HashSet<String>) {
        let data = &self.nodes[node.0];
        match data.name.split_once(':') {
            Some((prefix, _)) => {
                prefixes.insert(prefix.to_string());
            }
            None => {
                prefixes.insert(String::new());
            }
        }
        for (key, _) in &data.attributes {
            if let Some((prefix, _)) = key.split_once(':') {
                if prefix != "xmlns" {
                    prefixes.insert(prefix.to_string());
                }
            }
        }
        for &child in &data.children {
            self.collect_prefixes(child, prefixes);
        }
    }

    /// Structural equality of two documents: names, attribute sets
    /// (order-insensitive), text content, and child order must match.
    pub fn tree_eq(&self, other: &Document) -> bool {
        self.node_eq(self.root(), other, other.root())
    }

    fn node_eq(&self, a: NodeId, other: &Document, b: NodeId) -> bool {
        let an = &self.nodes[a.0];
        let bn = &other.nodes[b.0];
        if an.name != bn.name || an.text != bn.text {
            return false;
        }
        let mut aa = an.attributes.clone();
        let mut ba = bn.attributes.clone();
        aa.sort();
        ba.sort();
        if aa != ba {
            return false;
        }
        if an.children.len() != bn.children.len() {
            return false;
        }
        an.children
            .iter()
            .zip(&bn.children)
            .all(|(&x, &y)| self.node_eq(x, other, y))
    }
}

fn attr_matches(qualified: &str, key: &str) -> bool {
    if qualified == key {
        return true;
    }
    match qualified.split_once(':') {
        Some(("xmlns", _)) => false,
        Some((_, local)) => local == key,
        None => false,
    }
}

/// `xmlns` declares the default namespace (prefix `""`); `xmlns:p`
/// declares `p`. Anything else is not a declaration.
fn decl_prefix(key: &str) -> Option<&str> {
    if key == "xmlns" {
        Some("")
    } else {
        key.strip_prefix("xmlns:")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_and_query() {
        let mut doc = Document::new("root");
        let root = doc.root();
        doc.set_attribute(root, "id", "r1");

        let child = doc.create_element("child");
        doc.set_attribute(child, "name", "a");
        doc.append_child(root, child);

        assert_eq!(doc.name(root), "root");
        assert_eq!(doc.attribute(root, "id"), Some("r1"));
        assert_eq!(doc.children(root).count(), 1);
        assert_eq!(doc.child_named(root, "child"), Some(child));
        assert_eq!(doc.parent(child), Some(root));
    }

    #[test]
    fn test_attribute_local_name_matching() {
        let mut doc = Document::new("ds:component-ref");
        let root = doc.root();
        doc.set_attribute(root, "xlink:href", "#target");
        doc.set_attribute(root, "xmlns:xlink", "http://www.w3.org/1999/xlink");

        assert_eq!(doc.attribute(root, "href"), Some("#target"));
        assert_eq!(doc.attribute(root, "xlink:href"), Some("#target"));
        // Namespace declarations must not leak through local-name lookup.
        assert_eq!(doc.attribute(root, "xlink"), None);
    }

    #[test]
    fn test_set_attribute_replaces() {
        let mut doc = Document::new("e");
        let root = doc.root();
        doc.set_attribute(root, "id", "a");
        doc.set_attribute(root, "id", "b");
        assert_eq!(doc.attribute(root, "id"), Some("b"));
        assert_eq!(doc.nodes[0].attributes.len(), 1);
    }

    #[test]
    fn test_local_name() {
        let doc = Document::new("ds:data-stream");
        assert_eq!(doc.local_name(doc.root()), "data-stream");
        let doc = Document::new("component");
        assert_eq!(doc.local_name(doc.root()), "component");
    }

    #[test]
    fn test_extract_subtree_pulls_ancestor_declarations() {
        let xml = r#"<ds:collection xmlns:ds="urn:ds" xmlns:x="urn:x" xmlns:unused="urn:u">
            <ds:component id="c1">
                <x:payload attr="1"><x:inner/></x:payload>
            </ds:component>
        </ds:collection>"#;
        let doc = Document::parse(xml).unwrap();
        let component = doc.child_named(doc.root(), "component").unwrap();
        let payload = doc.children(component).next().unwrap();

        let extracted = doc.extract_subtree(payload);
        let root = extracted.root();
        assert_eq!(extracted.name(root), "x:payload");
        assert_eq!(extracted.attribute(root, "xmlns:x"), Some("urn:x"));
        // Prefixes the subtree never uses are not dragged along.
        assert_eq!(extracted.attribute(root, "xmlns:unused"), None);
        assert_eq!(extracted.attribute(root, "xmlns:ds"), None);
        // Source tree untouched.
        assert_eq!(doc.attribute(payload, "xmlns:x"), None);
    }

    #[test]
    fn test_extract_subtree_keeps_local_declaration() {
        let xml = r#"<root xmlns:p="urn:outer">
            <p:item xmlns:p="urn:inner"><p:leaf/></p:item>
        </root>"#;
        let doc = Document::parse(xml).unwrap();
        let item = doc.children(doc.root()).next().unwrap();

        let extracted = doc.extract_subtree(item);
        // The subtree's own declaration wins over the ancestor's.
        assert_eq!(extracted.attribute(extracted.root(), "xmlns:p"), Some("urn:inner"));
    }

    #[test]
    fn test_extract_subtree_default_namespace() {
        let xml = r#"<root xmlns="urn:default"><item a="1"/></root>"#;
        let doc = Document::parse(xml).unwrap();
        let item = doc.children(doc.root()).next().unwrap();

        let extracted = doc.extract_subtree(item);
        assert_eq!(extracted.attribute(extracted.root(), "xmlns"), Some("urn:default"));
    }

    #[test]
    fn test_tree_eq_attribute_order_insensitive() {
        let a = Document::parse(r#"<e x="1" y="2"><c/></e>"#).unwrap();
        let b = Document::parse(r#"<e y="2" x="1"><c/></e>"#).unwrap();
        assert!(a.tree_eq(&b));

        let c = Document::parse(r#"<e x="1" y="2"><d/></e>"#).unwrap();
        assert!(!a.tree_eq(&c));

        let d = Document::parse(r#"<e x="1"><c/></e>"#).unwrap();
        assert!(!a.tree_eq(&d));
    }
}
