//! Parsed audit document
//!
//! An [`AuditDocument`] owns every section of one specification together with
//! the ordered elements of each section. When the document asked for generated
//! section ids, it also keeps the mapping between the ids written in the
//! document and the generated ones, in both directions.

use std::collections::HashMap;

use serde::Serialize;
use thiserror::Error;

use super::{Assertion, Group, Section, SectionElement};
use crate::core::services::section_order;

/// Structural errors while assembling a document
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DocumentError {
    /// Two sections share the same effective id
    #[error("duplicate section id: {0}")]
    DuplicateSection(String),

    /// Two assertions of one section share the same id
    #[error("duplicate assertion id {assertion} in section {section}")]
    DuplicateAssertion {
        /// Effective section id
        section: String,
        /// Assertion id
        assertion: String,
    },

    /// An element refers to a section that was never added
    #[error("unknown section: {0}")]
    UnknownSection(String),
}

/// The model of one specification document
#[derive(Debug, Clone, Default, Serialize)]
pub struct AuditDocument {
    name: String,
    spec_id: String,
    version: String,
    generated_ids: bool,
    sections: HashMap<String, Section>,
    elements: HashMap<String, Vec<SectionElement>>,
    #[serde(skip)]
    original_to_generated: HashMap<String, String>,
    #[serde(skip)]
    generated_to_original: HashMap<String, String>,
}

impl AuditDocument {
    /// Create an empty document
    #[must_use]
    pub fn new(name: String, spec_id: String, version: String, generated_ids: bool) -> Self {
        Self {
            name,
            spec_id,
            version,
            generated_ids,
            ..Self::default()
        }
    }

    /// Specification name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Specification id
    #[must_use]
    pub fn spec_id(&self) -> &str {
        &self.spec_id
    }

    /// Specification version
    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Whether section ids were generated from levels
    #[must_use]
    pub const fn has_generated_ids(&self) -> bool {
        self.generated_ids
    }

    /// Number of sections
    #[must_use]
    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    /// Add a section with no elements
    ///
    /// With generated ids, the original/generated mapping is recorded.
    pub fn add_section(&mut self, section: Section) -> Result<(), DocumentError> {
        if self.sections.contains_key(&section.id) {
            return Err(DocumentError::DuplicateSection(section.id));
        }

        if self.generated_ids {
            if let Some(previous) = self
                .original_to_generated
                .insert(section.original_id.clone(), section.id.clone())
            {
                log::warn!(
                    "section id '{}' declared twice; now maps to {} instead of {}",
                    section.original_id,
                    section.id,
                    previous
                );
            }
            self.generated_to_original.insert(section.id.clone(), section.original_id.clone());
        }

        self.elements.insert(section.id.clone(), Vec::new());
        self.sections.insert(section.id.clone(), section);
        Ok(())
    }

    /// Append a standalone assertion to its section
    pub fn push_assertion(&mut self, mut assertion: Assertion) -> Result<(), DocumentError> {
        let section_id = assertion.section_id.clone();
        let items = self
            .elements
            .get_mut(&section_id)
            .ok_or_else(|| DocumentError::UnknownSection(section_id.clone()))?;

        if items.iter().any(|item| item.find(&assertion.id).is_some()) {
            return Err(DocumentError::DuplicateAssertion {
                section: section_id,
                assertion: assertion.id,
            });
        }

        assertion.group = None;
        items.push(SectionElement::Assertion(assertion));
        Ok(())
    }

    /// Append a group to its section
    ///
    /// Every member is re-homed to the group's section and tagged with the
    /// group's position.
    pub fn push_group(&mut self, mut group: Group) -> Result<(), DocumentError> {
        let section_id = group.section_id.clone();
        let items = self
            .elements
            .get_mut(&section_id)
            .ok_or_else(|| DocumentError::UnknownSection(section_id.clone()))?;

        let index = items.len();
        for (i, member) in group.assertions.iter().enumerate() {
            let clashes_outside = items.iter().any(|item| item.find(&member.id).is_some());
            let clashes_inside = group.assertions[..i].iter().any(|a| a.id == member.id);
            if clashes_outside || clashes_inside {
                return Err(DocumentError::DuplicateAssertion {
                    section: section_id,
                    assertion: member.id.clone(),
                });
            }
        }

        for member in &mut group.assertions {
            member.section_id.clone_from(&section_id);
            member.group = Some(index);
        }

        items.push(SectionElement::Group(group));
        Ok(())
    }

    /// Look up a section by effective id
    #[must_use]
    pub fn section(&self, section_id: &str) -> Option<&Section> {
        self.sections.get(section_id)
    }

    /// Title of a section
    #[must_use]
    pub fn section_title(&self, section_id: &str) -> Option<&str> {
        self.sections.get(section_id).map(|s| s.title.as_str())
    }

    /// All effective section ids in hierarchical order
    #[must_use]
    pub fn section_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.sections.keys().map(String::as_str).collect();
        ids.sort_by(|a, b| section_order::compare_section_ids(a, b).then_with(|| a.cmp(b)));
        ids
    }

    /// Chapter ids (single segment) in hierarchical order
    #[must_use]
    pub fn chapter_ids(&self) -> Vec<&str> {
        self.section_ids().into_iter().filter(|id| section_order::is_chapter(id)).collect()
    }

    /// Sections in hierarchical order
    #[must_use]
    pub fn sections(&self) -> Vec<&Section> {
        self.section_ids().into_iter().filter_map(|id| self.sections.get(id)).collect()
    }

    /// Ordered elements of a section; empty for an unknown id
    #[must_use]
    pub fn elements(&self, section_id: &str) -> &[SectionElement] {
        self.elements.get(section_id).map(Vec::as_slice).unwrap_or_default()
    }

    /// Assertions of a section with group members expanded in place
    #[must_use]
    pub fn assertions(&self, section_id: &str) -> Vec<&Assertion> {
        self.elements(section_id).iter().flat_map(SectionElement::assertions).collect()
    }

    /// Find one assertion by effective section id
    #[must_use]
    pub fn assertion(&self, section_id: &str, assertion_id: &str) -> Option<&Assertion> {
        self.elements(section_id).iter().find_map(|item| item.find(assertion_id))
    }

    /// Whether an assertion exists
    ///
    /// With generated ids, `section_id` is the id written in the document and
    /// is translated before the lookup. Unknown ids yield `false`.
    #[must_use]
    pub fn has_assertion(&self, section_id: &str, assertion_id: &str) -> bool {
        let effective = if self.generated_ids {
            match self.original_to_generated.get(section_id) {
                Some(generated) => generated.as_str(),
                None => return false,
            }
        } else {
            section_id
        };
        self.assertion(effective, assertion_id).is_some()
    }

    /// Generated id for a document-authored section id
    #[must_use]
    pub fn generated_id_for(&self, original_id: &str) -> Option<&str> {
        if self.generated_ids {
            self.original_to_generated.get(original_id).map(String::as_str)
        } else {
            self.sections.get(original_id).map(|s| s.id.as_str())
        }
    }

    /// Document-authored id for an effective section id
    #[must_use]
    pub fn original_id_for(&self, section_id: &str) -> Option<&str> {
        if self.generated_ids {
            self.generated_to_original.get(section_id).map(String::as_str)
        } else {
            self.sections.get(section_id).map(|s| s.original_id.as_str())
        }
    }

    /// Mutable elements of a section
    pub(crate) fn elements_mut(&mut self, section_id: &str) -> Option<&mut Vec<SectionElement>> {
        self.elements.get_mut(section_id)
    }
}
