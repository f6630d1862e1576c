//! Serialize an arena document back to XML text.

use std::fs;
use std::io::Write;
use std::path::Path;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::node::NodeId;
use crate::{Document, Error, Result};

impl Document {
    /// Serialize the document to a UTF-8 XML string, with an XML
    /// declaration and two-space indentation.
    pub fn to_xml_string(&self) -> Result<String> {
        let mut output = Vec::new();
        let mut writer = Writer::new_with_indent(&mut output, b' ', 2);

        writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))
            .map_err(|e| Error::Xml(e.to_string()))?;

        self.write_element(&mut writer, self.root())?;

        String::from_utf8(output).map_err(|e| Error::Xml(e.to_string()))
    }

    /// Serialize the document to a file at `path`, UTF-8 encoded.
    pub fn write_to(&self, path: impl AsRef<Path>) -> Result<()> {
        fs::write(path, self.to_xml_string()?)?;
        Ok(())
    }

    fn write_element<W: Write>(&self, writer: &mut Writer<W>, node: NodeId) -> Result<()> {
        let data = &self.nodes[node.0];

        let mut elem = BytesStart::new(data.name.as_str());
        for (key, value) in &data.attributes {
            elem.push_attribute((key.as_str(), value.as_str()));
        }

        if data.children.is_empty() && data.text.is_empty() {
            writer
                .write_event(Event::Empty(elem))
                .map_err(|e| Error::Xml(e.to_string()))?;
        } else {
            writer
                .write_event(Event::Start(elem))
                .map_err(|e| Error::Xml(e.to_string()))?;

            if !data.text.is_empty() {
                writer
                    .write_event(Event::Text(BytesText::new(&data.text)))
                    .map_err(|e| Error::Xml(e.to_string()))?;
            }

            for &child in &data.children {
                self.write_element(writer, child)?;
            }

            writer
                .write_event(Event::End(BytesEnd::new(data.name.as_str())))
                .map_err(|e| Error::Xml(e.to_string()))?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialize_declaration_and_root() {
        let mut doc = Document::new("ds:data-stream-collection");
        doc.set_attribute(doc.root(), "xmlns:ds", "urn:ds");

        let out = doc.to_xml_string().unwrap();
        assert!(out.starts_with(r#"<?xml version="1.0" encoding="utf-8"?>"#));
        assert!(out.contains(r#"<ds:data-stream-collection xmlns:ds="urn:ds"/>"#));
    }

    #[test]
    fn test_round_trip_tree_equal() {
        let xml = r##"<catalog total="2">
            <entry name="a &amp; b" uri="#first"/>
            <entry name="second" uri="#second">note</entry>
        </catalog>"##;
        let doc = Document::parse(xml).unwrap();

        let serialized = doc.to_xml_string().unwrap();
        let reparsed = Document::parse(&serialized).unwrap();
        assert!(doc.tree_eq(&reparsed));
    }

    #[test]
    fn test_write_to_file() {
        let dir = std::env::temp_dir().join("sds-xml-write-test");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("out.xml");

        let doc = Document::parse("<root><leaf/></root>").unwrap();
        doc.write_to(&path).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert!(Document::parse(&text).unwrap().tree_eq(&doc));
        fs::remove_dir_all(&dir).unwrap();
    }
}
