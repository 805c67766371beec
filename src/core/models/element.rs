//! Section elements: assertions and groups
//!
//! A section holds an ordered list of [`SectionElement`]s. Each one is either
//! a standalone [`Assertion`] or a [`Group`] of assertions sharing some
//! descriptive text.

use serde::Serialize;

use super::{CoverageStatus, Test};

/// A normative statement of the specification
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Assertion {
    /// Id, unique within the owning section
    pub id: String,

    /// Assertion text
    pub text: String,

    /// Optional editorial note
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,

    /// Whether a test can exercise this assertion
    pub testable: bool,

    /// Whether the assertion is implied rather than stated
    pub implied: bool,

    /// Effective id of the owning section
    pub section_id: String,

    /// Index of the owning group in the section's element list
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<usize>,

    status: Option<CoverageStatus>,

    tests: Vec<Test>,
}

impl Assertion {
    /// Create an assertion that has not been correlated yet
    #[must_use]
    pub fn new(id: String, text: String, section_id: String) -> Self {
        Self {
            id,
            text,
            note: None,
            testable: true,
            implied: false,
            section_id,
            group: None,
            status: None,
            tests: Vec::new(),
        }
    }

    /// Set the note
    #[must_use]
    pub fn with_note(mut self, note: Option<String>) -> Self {
        self.note = note;
        self
    }

    /// Set the testable flag
    #[must_use]
    pub const fn with_testable(mut self, testable: bool) -> Self {
        self.testable = testable;
        self
    }

    /// Set the implied flag
    #[must_use]
    pub const fn with_implied(mut self, implied: bool) -> Self {
        self.implied = implied;
        self
    }

    /// Computed status, `None` before correlation
    #[must_use]
    pub const fn status(&self) -> Option<CoverageStatus> {
        self.status
    }

    /// Tests matched during correlation
    #[must_use]
    pub fn tests(&self) -> &[Test] {
        &self.tests
    }

    /// Record the correlation result. Only the first call has an effect.
    pub(crate) fn annotate(&mut self, status: CoverageStatus, tests: Vec<Test>) {
        if self.status.is_some() {
            log::debug!("assertion {}/{} already annotated", self.section_id, self.id);
            return;
        }
        self.status = Some(status);
        self.tests = tests;
    }
}

/// A cluster of assertions sharing descriptive text
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Group {
    /// Group description
    pub text: String,

    /// Effective id of the owning section
    pub section_id: String,

    /// Member assertions, in document order
    pub assertions: Vec<Assertion>,
}

impl Group {
    /// Create an empty group
    #[must_use]
    pub const fn new(text: String, section_id: String) -> Self {
        Self {
            text,
            section_id,
            assertions: Vec::new(),
        }
    }
}

/// An entry of a section: either an assertion or a group
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SectionElement {
    /// A standalone assertion
    Assertion(Assertion),
    /// A group of assertions
    Group(Group),
}

impl SectionElement {
    /// Text of the assertion or group
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Assertion(a) => &a.text,
            Self::Group(g) => &g.text,
        }
    }

    /// Effective id of the owning section
    #[must_use]
    pub fn section_id(&self) -> &str {
        match self {
            Self::Assertion(a) => &a.section_id,
            Self::Group(g) => &g.section_id,
        }
    }

    /// Assertions carried by this element (one, or the group members)
    #[must_use]
    pub fn assertions(&self) -> &[Assertion] {
        match self {
            Self::Assertion(a) => std::slice::from_ref(a),
            Self::Group(g) => &g.assertions,
        }
    }

    /// Mutable access to the assertions carried by this element
    pub(crate) fn assertions_mut(&mut self) -> &mut [Assertion] {
        match self {
            Self::Assertion(a) => std::slice::from_mut(a),
            Self::Group(g) => &mut g.assertions,
        }
    }

    /// Find an assertion by id within this element
    #[must_use]
    pub fn find(&self, assertion_id: &str) -> Option<&Assertion> {
        self.assertions().iter().find(|a| a.id == assertion_id)
    }
}
