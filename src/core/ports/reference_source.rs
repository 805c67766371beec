//! Reference source port
//!
//! Defines the interface for loading test references.

use super::super::models::SpecReference;

/// Source of test references
///
/// References are extracted from test metadata outside this crate; a source
/// only hands them over.
#[cfg_attr(test, mockall::automock)]
pub trait ReferenceSource: Send + Sync {
    /// Load every reference
    fn load(&self) -> anyhow::Result<Vec<SpecReference>>;

    /// Load the references of one specification
    fn load_for_spec(&self, spec_id: &str) -> anyhow::Result<Vec<SpecReference>> {
        Ok(self.load()?.into_iter().filter(|r| r.spec_id == spec_id).collect())
    }
}
