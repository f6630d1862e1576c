//! Parse XML text into an arena document.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::node::NodeId;
use crate::{Document, Error, Result};

impl Document {
    /// Parse an XML document from text.
    ///
    /// Comments, processing instructions, and the XML declaration are
    /// dropped; whitespace-only text is trimmed away. Exactly one root
    /// element is required.
    pub fn parse(xml: &str) -> Result<Document> {
        let mut reader = Reader::from_str(xml);
        reader.config_mut().trim_text(true);

        let mut doc = Document { nodes: Vec::new() };
        let mut stack: Vec<NodeId> = Vec::new();
        let mut have_root = false;

        loop {
            match reader.read_event() {
                Ok(Event::Start(e)) => {
                    let node = doc.push_element(&e, stack.last().copied(), &mut have_root, &reader)?;
                    stack.push(node);
                }
                Ok(Event::Empty(e)) => {
                    doc.push_element(&e, stack.last().copied(), &mut have_root, &reader)?;
                }
                Ok(Event::End(_)) => {
                    stack.pop();
                }
                Ok(Event::Text(e)) => {
                    if let Some(&node) = stack.last() {
                        let text = e.unescape().map_err(|err| parse_error(&reader, err))?;
                        if !text.trim().is_empty() {
                            doc.nodes[node.0].text.push_str(text.trim());
                        }
                    }
                }
                Ok(Event::Eof) => break,
                Ok(_) => {} // Declarations, comments, PIs, CDATA markers.
                Err(e) => return Err(parse_error(&reader, e)),
            }
        }

        if doc.nodes.is_empty() {
            return Err(parse_error(&reader, "no root element found"));
        }

        Ok(doc)
    }

    fn push_element(
        &mut self,
        elem: &BytesStart,
        parent: Option<NodeId>,
        have_root: &mut bool,
        reader: &Reader<&[u8]>,
    ) -> Result<NodeId> {
        if parent.is_none() && *have_root {
            return Err(parse_error(reader, "multiple root elements"));
        }

        let name = String::from_utf8_lossy(elem.name().as_ref()).into_owned();
        let id = NodeId(self.nodes.len());
        self.nodes.push(crate::node::NodeData::new(name, parent));

        for attr in elem.attributes() {
            let attr = attr.map_err(|err| parse_error(reader, err))?;
            let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
            let value = attr
                .unescape_value()
                .map_err(|err| parse_error(reader, err))?
                .into_owned();
            self.nodes[id.0].attributes.push((key, value));
        }

        match parent {
            Some(p) => self.nodes[p.0].children.push(id),
            None => *have_root = true,
        }

        Ok(id)
    }
}

fn parse_error(reader: &Reader<&[u8]>, err: impl std::fmt::Display) -> Error {
    Error::Parse {
        message: err.to_string(),
        offset: reader.buffer_position(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple() {
        let doc = Document::parse(r#"<root version="1.0"/>"#).unwrap();
        let root = doc.root();
        assert_eq!(doc.name(root), "root");
        assert_eq!(doc.attribute(root, "version"), Some("1.0"));
        assert_eq!(doc.children(root).count(), 0);
    }

    #[test]
    fn test_parse_with_declaration_and_nesting() {
        let xml = r#"<?xml version="1.0" encoding="utf-8"?>
<a>
    <b attr="1">
        <c/>
        <d attr="2"/>
    </b>
    <e/>
</a>"#;
        let doc = Document::parse(xml).unwrap();
        let root = doc.root();
        assert_eq!(doc.name(root), "a");
        assert_eq!(doc.children(root).count(), 2);

        let b = doc.child_named(root, "b").unwrap();
        assert_eq!(doc.attribute(b, "attr"), Some("1"));
        assert_eq!(doc.children(b).count(), 2);
    }

    #[test]
    fn test_parse_text_content() {
        let doc = Document::parse("<root><child>Hello World</child></root>").unwrap();
        let child = doc.children(doc.root()).next().unwrap();
        assert_eq!(doc.text(child), "Hello World");
    }

    #[test]
    fn test_parse_unescapes_attributes() {
        let doc = Document::parse(r#"<e name="a &amp; b"/>"#).unwrap();
        assert_eq!(doc.attribute(doc.root(), "name"), Some("a & b"));
    }

    #[test]
    fn test_parse_empty_input() {
        let result = Document::parse("");
        assert!(matches!(result, Err(Error::Parse { .. })));
    }

    #[test]
    fn test_parse_malformed() {
        let result = Document::parse("<a><b></a>");
        assert!(matches!(result, Err(Error::Parse { .. })));
    }

    #[test]
    fn test_parse_multiple_roots() {
        let result = Document::parse("<a/><b/>");
        assert!(matches!(result, Err(Error::Parse { .. })));
    }
}
