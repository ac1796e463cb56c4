//! Generic element tree read and written with quick-xml

use quick_xml::Reader;
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum XmlError {
    #[error("XML parsing error at position {position}: {message}")]
    Malformed { position: u64, message: String },
    #[error("Document has no root element")]
    NoRoot,
    #[error("Unexpected closing tag at position {0}")]
    UnbalancedEnd(u64),
    #[error("Unclosed element <{0}>")]
    Unclosed(String),
    #[error("XML write error: {0}")]
    Write(String),
}

/// One element: local name, attributes in document order, text and children.
///
/// Namespace prefixes are dropped from element and attribute names; namespace
/// declarations are kept verbatim (`xmlns`, `xmlns:x`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmlNode {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub text: Option<String>,
    pub children: Vec<XmlNode>,
}

impl XmlNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attr(key, value);
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_child(mut self, child: XmlNode) -> Self {
        self.children.push(child);
        self
    }

    /// Set or replace an attribute
    pub fn set_attr(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = value,
            None => self.attributes.push((key, value)),
        }
    }

    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn push(&mut self, child: XmlNode) {
        self.children.push(child);
    }

    /// First child with the given name
    pub fn child(&self, name: &str) -> Option<&XmlNode> {
        self.children.iter().find(|c| c.name == name)
    }

    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a XmlNode> {
        self.children.iter().filter(move |c| c.name == name)
    }

    pub fn text(&self) -> &str {
        self.text.as_deref().unwrap_or("")
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_none() && self.children.is_empty()
    }

    /// Parse a complete document and return its root element
    pub fn parse(xml: &str) -> Result<XmlNode, XmlError> {
        let mut reader = Reader::from_str(xml);
        reader.config_mut().trim_text(true);

        let mut stack: Vec<XmlNode> = Vec::new();
        let mut root: Option<XmlNode> = None;

        loop {
            match reader.read_event() {
                Ok(Event::Start(ref e)) => stack.push(open_element(e, &reader)?),
                Ok(Event::Empty(ref e)) => {
                    let node = open_element(e, &reader)?;
                    attach(&mut stack, &mut root, node);
                }
                Ok(Event::End(_)) => {
                    let node = stack
                        .pop()
                        .ok_or(XmlError::UnbalancedEnd(reader.buffer_position() as u64))?;
                    attach(&mut stack, &mut root, node);
                }
                Ok(Event::Text(ref t)) => {
                    let text = t.unescape().map_err(|e| XmlError::Malformed {
                        position: reader.buffer_position() as u64,
                        message: e.to_string(),
                    })?;
                    append_text(&mut stack, &text);
                }
                Ok(Event::CData(ref c)) => {
                    append_text(&mut stack, &String::from_utf8_lossy(c.as_ref()));
                }
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(XmlError::Malformed {
                        position: reader.error_position() as u64,
                        message: e.to_string(),
                    });
                }
                _ => {}
            }
        }

        if let Some(open) = stack.pop() {
            return Err(XmlError::Unclosed(open.name));
        }
        root.ok_or(XmlError::NoRoot)
    }

    /// Serialize with an XML declaration; `indent` of 0 writes one line
    pub fn to_xml(&self, indent: usize) -> Result<String, XmlError> {
        let mut writer = if indent > 0 {
            Writer::new_with_indent(Vec::new(), b' ', indent)
        } else {
            Writer::new(Vec::new())
        };
        writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
            .map_err(|e| XmlError::Write(e.to_string()))?;
        write_node(&mut writer, self)?;
        String::from_utf8(writer.into_inner()).map_err(|e| XmlError::Write(e.to_string()))
    }
}

fn open_element(e: &BytesStart<'_>, reader: &Reader<&[u8]>) -> Result<XmlNode, XmlError> {
    let mut node = XmlNode::new(String::from_utf8_lossy(e.local_name().as_ref()));
    for attr in e.attributes() {
        let attr = attr.map_err(|err| XmlError::Malformed {
            position: reader.buffer_position() as u64,
            message: err.to_string(),
        })?;
        let full_key = attr.key.as_ref();
        let key = if full_key.starts_with(b"xmlns") {
            String::from_utf8_lossy(full_key).to_string()
        } else {
            String::from_utf8_lossy(attr.key.local_name().as_ref()).to_string()
        };
        let value = attr.unescape_value().map_err(|err| XmlError::Malformed {
            position: reader.buffer_position() as u64,
            message: err.to_string(),
        })?;
        node.attributes.push((key, value.into_owned()));
    }
    Ok(node)
}

fn attach(stack: &mut [XmlNode], root: &mut Option<XmlNode>, node: XmlNode) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(node),
        None => {
            // Only the first top-level element counts as the root.
            if root.is_none() {
                *root = Some(node);
            }
        }
    }
}

fn append_text(stack: &mut [XmlNode], text: &str) {
    if let Some(current) = stack.last_mut() {
        current.text.get_or_insert_with(String::new).push_str(text);
    }
}

fn write_node(writer: &mut Writer<Vec<u8>>, node: &XmlNode) -> Result<(), XmlError> {
    let mut start = BytesStart::new(node.name.as_str());
    for (key, value) in &node.attributes {
        start.push_attribute((key.as_str(), value.as_str()));
    }

    if node.is_empty() {
        return writer
            .write_event(Event::Empty(start))
            .map_err(|e| XmlError::Write(e.to_string()));
    }

    writer
        .write_event(Event::Start(start))
        .map_err(|e| XmlError::Write(e.to_string()))?;
    if let Some(text) = &node.text {
        writer
            .write_event(Event::Text(BytesText::new(text)))
            .map_err(|e| XmlError::Write(e.to_string()))?;
    }
    for child in &node.children {
        write_node(writer, child)?;
    }
    writer
        .write_event(Event::End(BytesEnd::new(node.name.as_str())))
        .map_err(|e| XmlError::Write(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_builds_tree() {
        let xml = r#"<?xml version="1.0"?>
            <ssrf:SSRF xmlns:ssrf="urn:test" cls="U">
              <Note cls="R"><Serial cls="U">N1</Serial><Text cls="U">a &amp; b</Text></Note>
              <Empty/>
            </ssrf:SSRF>"#;
        let root = XmlNode::parse(xml).unwrap();
        assert_eq!(root.name, "SSRF");
        assert_eq!(root.attr("xmlns:ssrf"), Some("urn:test"));
        assert_eq!(root.attr("cls"), Some("U"));
        assert_eq!(root.children.len(), 2);

        let note = root.child("Note").unwrap();
        assert_eq!(note.attr("cls"), Some("R"));
        assert_eq!(note.child("Serial").unwrap().text(), "N1");
        assert_eq!(note.child("Text").unwrap().text(), "a & b");
        assert!(root.child("Empty").unwrap().is_empty());
    }

    #[test]
    fn test_parse_rejects_broken_documents() {
        assert!(matches!(
            XmlNode::parse("<A><B></A>"),
            Err(XmlError::Malformed { .. })
        ));
        assert!(XmlNode::parse("<A>").is_err());
        assert_eq!(XmlNode::parse(""), Err(XmlError::NoRoot));
    }

    #[test]
    fn test_write_then_parse_preserves_tree() {
        let tree = XmlNode::new("SSRF")
            .with_attr("xmlns", "urn:test")
            .with_child(
                XmlNode::new("Note")
                    .with_attr("cls", "U")
                    .with_child(
                        XmlNode::new("Text")
                            .with_attr("cls", "U")
                            .with_text("<x> & \"y\""),
                    ),
            )
            .with_child(XmlNode::new("Empty"));

        for indent in [0, 2] {
            let xml = tree.to_xml(indent).unwrap();
            assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
            assert_eq!(XmlNode::parse(&xml).unwrap(), tree);
        }
    }

    #[test]
    fn test_set_attr_replaces() {
        let mut node = XmlNode::new("X").with_attr("cls", "U");
        node.set_attr("cls", "S");
        assert_eq!(node.attributes, vec![("cls".to_string(), "S".to_string())]);
    }
}
