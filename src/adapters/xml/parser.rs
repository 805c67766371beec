//! Audit document parser
//!
//! Reads the XML audit format into an [`AuditDocument`]:
//!
//! ```xml
//! <specification name="CDI" id="cdi" version="2.0" generateSectionIds="true">
//!   <section id="concepts" level="1" title="Concepts">
//!     <assertion id="a">
//!       <text>A bean comprises ...</text>
//!     </assertion>
//!     <group>
//!       <text>Bean types</text>
//!       <assertion id="b" testable="false"><text>...</text></assertion>
//!     </group>
//!   </section>
//! </specification>
//! ```
//!
//! With `generateSectionIds` set, section ids are derived from the `level`
//! attributes in document order and the authored ids are kept as originals.

use std::fs;
use std::io::{BufRead, Read};
use std::path::Path;

use anyhow::Context;
use thiserror::Error;

use super::tree::{Node, read_tree};
use crate::core::models::{Assertion, AuditDocument, DocumentError, Group, Section};
use crate::core::services::{SectionIdGenerator, section_order};

/// Errors that abort parsing of a document
#[derive(Debug, Error)]
pub enum ParseError {
    /// Input is not well-formed XML
    #[error("malformed XML: {0}")]
    Xml(String),

    /// Input contains no element at all
    #[error("document has no root element")]
    MissingRoot,

    /// Section id generation is on but a section has no level
    #[error("section '{section}' has no level attribute but section id generation is enabled")]
    MissingLevel {
        /// Authored id of the section
        section: String,
    },

    /// A level attribute is not a non-negative integer
    #[error("section '{section}' has an invalid level: {value}")]
    InvalidLevel {
        /// Authored id of the section
        section: String,
        /// Attribute value as written
        value: String,
    },

    /// Document structure violates an invariant
    #[error(transparent)]
    Document(#[from] DocumentError),

    /// Input could not be read
    #[error("failed to read document: {0}")]
    Io(#[from] std::io::Error),
}

/// Parse an audit document from a string
pub fn parse_str(xml: &str) -> Result<AuditDocument, ParseError> {
    let root = read_tree(xml)?;
    DocumentBuilder::new(&root).build(&root)
}

/// Parse an audit document from a reader
pub fn parse_reader(mut reader: impl BufRead) -> Result<AuditDocument, ParseError> {
    let mut xml = String::new();
    reader.read_to_string(&mut xml)?;
    parse_str(&xml)
}

/// Load and parse an audit document file
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load_file(path: &Path) -> anyhow::Result<AuditDocument> {
    let content =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    let document =
        parse_str(&content).with_context(|| format!("failed to parse {}", path.display()))?;
    log::debug!(
        "parsed {} ({} sections, generated ids: {})",
        path.display(),
        document.section_count(),
        document.has_generated_ids()
    );
    Ok(document)
}

/// Boolean attribute: true only for a case-insensitive `true`
fn flag(node: &Node, name: &str, default: bool) -> bool {
    node.attribute(name).map_or(default, |v| v.trim().eq_ignore_ascii_case("true"))
}

/// Optional text of the last child element with the given name
fn child_text(node: &Node, name: &str) -> Option<String> {
    node.elements(name).last().map(Node::text_content)
}

/// Walks the element tree and assembles the document
struct DocumentBuilder {
    document: AuditDocument,
    generator: Option<SectionIdGenerator>,
}

impl DocumentBuilder {
    fn new(root: &Node) -> Self {
        let generate = flag(root, "generateSectionIds", false);
        let document = AuditDocument::new(
            root.attribute("name").unwrap_or_default().to_string(),
            root.attribute("id").unwrap_or_default().to_string(),
            root.attribute("version").unwrap_or_default().to_string(),
            generate,
        );
        Self {
            document,
            generator: generate.then(SectionIdGenerator::new),
        }
    }

    fn build(mut self, root: &Node) -> Result<AuditDocument, ParseError> {
        for node in root.elements("section") {
            self.section(node)?;
        }
        Ok(self.document)
    }

    fn section(&mut self, node: &Node) -> Result<(), ParseError> {
        let original_id = node.attribute("id").unwrap_or_default().to_string();
        let level = node
            .non_empty_attribute("level")
            .map(|value| {
                value.parse::<u32>().map_err(|_| ParseError::InvalidLevel {
                    section: original_id.clone(),
                    value: value.to_string(),
                })
            })
            .transpose()?;

        let (id, level) = match (&mut self.generator, level) {
            (Some(generator), Some(level)) => (generator.next_id(level), level),
            (Some(_), None) => {
                return Err(ParseError::MissingLevel {
                    section: original_id,
                });
            },
            (None, level) => {
                let inferred =
                    || u32::try_from(section_order::depth(&original_id)).unwrap_or(u32::MAX);
                (original_id.clone(), level.unwrap_or_else(inferred))
            },
        };

        let title = node.attribute("title").unwrap_or_default().to_string();
        self.document.add_section(Section::new(id.clone(), title, level, original_id))?;

        for child in node.child_elements() {
            match child.name.as_str() {
                "assertion" => self.document.push_assertion(assertion(child, &id))?,
                "group" => self.document.push_group(group(child, &id))?,
                _ => {},
            }
        }
        Ok(())
    }
}

fn assertion(node: &Node, section_id: &str) -> Assertion {
    Assertion::new(
        node.attribute("id").unwrap_or_default().to_string(),
        child_text(node, "text").unwrap_or_default(),
        section_id.to_string(),
    )
    .with_note(child_text(node, "note"))
    .with_testable(flag(node, "testable", true))
    .with_implied(flag(node, "implied", false))
}

fn group(node: &Node, section_id: &str) -> Group {
    let text = child_text(node, "text").unwrap_or_default();
    let mut group = Group::new(text, section_id.to_string());
    group.assertions = node.elements("assertion").map(|a| assertion(a, section_id)).collect();
    group
}
