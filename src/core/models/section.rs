//! Section model
//!
//! A section is a titled node in the specification hierarchy. Chapters are
//! sections whose id has a single segment.

use serde::{Deserialize, Serialize};

use crate::core::services::section_order;

/// A section of the specification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Effective hierarchical id (generated when the document asks for it)
    pub id: String,

    /// Section title
    pub title: String,

    /// Nesting level, 1 for chapters
    pub level: u32,

    /// Id as written in the document
    pub original_id: String,
}

impl Section {
    /// Create a new section
    #[must_use]
    pub const fn new(id: String, title: String, level: u32, original_id: String) -> Self {
        Self {
            id,
            title,
            level,
            original_id,
        }
    }

    /// Whether this section is a chapter (single-segment id)
    #[must_use]
    pub fn is_chapter(&self) -> bool {
        section_order::is_chapter(&self.id)
    }

    /// Whether the effective id differs from the document-authored one
    #[must_use]
    pub fn has_generated_id(&self) -> bool {
        self.id != self.original_id
    }
}

impl std::fmt::Display for Section {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.id, self.title)
    }
}
