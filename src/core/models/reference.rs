//! References from test methods to specification assertions
//!
//! References are produced outside this crate (typically by scanning test
//! metadata) and consumed as plain records.

use serde::{Deserialize, Serialize};

/// A test method's claim to exercise one assertion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecReference {
    /// Id of the specification the test targets
    pub spec_id: String,

    /// Specification version declared by the test class
    #[serde(default)]
    pub spec_version: Option<String>,

    /// Document-authored section id
    pub section: String,

    /// Assertion id within the section
    pub assertion: String,

    /// Package of the test class
    pub package: String,

    /// Simple class name
    pub class: String,

    /// Method name
    pub method: String,

    /// Test-group tags of the method
    #[serde(default)]
    pub groups: Vec<String>,

    /// Archive the test is deployed in
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub archive: Option<String>,
}

impl SpecReference {
    /// Fully-qualified test name: `package.Class.method`
    #[must_use]
    pub fn fqn(&self) -> String {
        format!("{}.{}.{}", self.package, self.class, self.method)
    }

    /// Fully-qualified class name: `package.Class`
    #[must_use]
    pub fn class_fqn(&self) -> String {
        format!("{}.{}", self.package, self.class)
    }

    /// Whether the reference targets `version` (ASCII case-insensitive)
    #[must_use]
    pub fn targets_version(&self, version: &str) -> bool {
        self.spec_version.as_deref().is_some_and(|v| v.eq_ignore_ascii_case(version))
    }

    /// Order by fully-qualified name, ignoring case
    #[must_use]
    pub fn cmp_by_fqn(&self, other: &Self) -> std::cmp::Ordering {
        self.fqn().to_lowercase().cmp(&other.fqn().to_lowercase())
    }
}

/// A distinct test method, as listed in test-group summaries
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestMethod {
    /// Package of the test class
    pub package: String,
    /// Simple class name
    pub class: String,
    /// Method name
    pub method: String,
    /// Test-group tags of the method
    pub groups: Vec<String>,
}

impl TestMethod {
    /// Fully-qualified test name: `package.Class.method`
    #[must_use]
    pub fn fqn(&self) -> String {
        format!("{}.{}.{}", self.package, self.class, self.method)
    }
}

impl From<&SpecReference> for TestMethod {
    fn from(reference: &SpecReference) -> Self {
        Self {
            package: reference.package.clone(),
            class: reference.class.clone(),
            method: reference.method.clone(),
            groups: reference.groups.clone(),
        }
    }
}

// Identity is the method itself; the group list is payload.
impl PartialEq for TestMethod {
    fn eq(&self, other: &Self) -> bool {
        self.package == other.package && self.class == other.class && self.method == other.method
    }
}

impl Eq for TestMethod {}
