//! Minimal element tree built from quick-xml events
//!
//! The audit format is small and read once, so the parser works on a fully
//! materialised tree rather than on the event stream.

use std::collections::HashMap;

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use super::parser::ParseError;

/// Child of an element: text or a nested element
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    /// Character data (entities resolved)
    Text(String),
    /// Nested element
    Element(Node),
}

/// An XML element
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Node {
    /// Local element name
    pub name: String,
    attributes: HashMap<String, String>,
    children: Vec<Content>,
}

impl Node {
    fn from_start(start: &BytesStart<'_>) -> Result<Self, ParseError> {
        let name = String::from_utf8_lossy(start.local_name().as_ref()).into_owned();
        let mut attributes = HashMap::new();
        for attribute in start.attributes() {
            let attribute = attribute.map_err(|e| ParseError::Xml(e.to_string()))?;
            let key = String::from_utf8_lossy(attribute.key.local_name().as_ref()).into_owned();
            let value = attribute.unescape_value().map_err(|e| ParseError::Xml(e.to_string()))?;
            attributes.insert(key, value.into_owned());
        }
        Ok(Self {
            name,
            attributes,
            children: Vec::new(),
        })
    }

    /// Attribute value, `None` when absent
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Attribute value, `None` when absent or blank
    #[must_use]
    pub fn non_empty_attribute(&self, name: &str) -> Option<&str> {
        self.attribute(name).map(str::trim).filter(|v| !v.is_empty())
    }

    /// Child elements with the given name, in document order
    pub fn elements<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Self> + 'a {
        self.children.iter().filter_map(move |child| match child {
            Content::Element(node) if node.name == name => Some(node),
            _ => None,
        })
    }

    /// All child elements, in document order
    pub fn child_elements(&self) -> impl Iterator<Item = &Self> {
        self.children.iter().filter_map(|child| match child {
            Content::Element(node) => Some(node),
            Content::Text(_) => None,
        })
    }

    /// Concatenated text of this element and all descendants, trimmed
    #[must_use]
    pub fn text_content(&self) -> String {
        let mut text = String::new();
        self.collect_text(&mut text);
        text.trim().to_string()
    }

    fn collect_text(&self, out: &mut String) {
        for child in &self.children {
            match child {
                Content::Text(text) => out.push_str(text),
                Content::Element(node) => node.collect_text(out),
            }
        }
    }
}

/// Read a document into its root element
pub fn read_tree(xml: &str) -> Result<Node, ParseError> {
    let mut reader = Reader::from_str(xml);
    let mut stack: Vec<Node> = Vec::new();
    let mut root: Option<Node> = None;

    loop {
        let event = reader
            .read_event()
            .map_err(|e| ParseError::Xml(format!("at byte {}: {e}", reader.buffer_position())))?;

        match event {
            Event::Start(start) => stack.push(Node::from_start(&start)?),
            Event::Empty(start) => {
                let node = Node::from_start(&start)?;
                attach(&mut stack, &mut root, node)?;
            },
            Event::End(_) => {
                let node = stack
                    .pop()
                    .ok_or_else(|| ParseError::Xml("unexpected closing tag".to_string()))?;
                attach(&mut stack, &mut root, node)?;
            },
            Event::Text(text) => {
                if let Some(parent) = stack.last_mut() {
                    let text = text.unescape().map_err(|e| ParseError::Xml(e.to_string()))?;
                    parent.children.push(Content::Text(text.into_owned()));
                }
            },
            Event::CData(data) => {
                if let Some(parent) = stack.last_mut() {
                    let text = String::from_utf8_lossy(&data).into_owned();
                    parent.children.push(Content::Text(text));
                }
            },
            Event::Eof => break,
            _ => {},
        }
    }

    if let Some(open) = stack.last() {
        return Err(ParseError::Xml(format!("unclosed element <{}>", open.name)));
    }
    root.ok_or(ParseError::MissingRoot)
}

/// Attach a finished element to its parent, or make it the root
fn attach(stack: &mut [Node], root: &mut Option<Node>, node: Node) -> Result<(), ParseError> {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(Content::Element(node));
        Ok(())
    } else if root.is_none() {
        *root = Some(node);
        Ok(())
    } else {
        Err(ParseError::Xml(format!("second root element <{}>", node.name)))
    }
}
