//! Correlation result
//!
//! A [`CoverageReport`] owns the annotated document and every derived row.
//! Nothing in it can be changed after correlation.

use std::collections::BTreeMap;

use serde::Serialize;

use super::{AuditDocument, SpecReference, TableData, Tally, TestMethod, Thresholds};

/// Annotated document plus aggregated coverage
#[derive(Debug, Clone, Serialize)]
pub struct CoverageReport {
    pub(crate) document: AuditDocument,

    /// Version the references were filtered against
    pub target_version: String,

    /// Thresholds used for display bands
    pub thresholds: Thresholds,

    /// One row per chapter, in hierarchical order
    pub chapters: Vec<TableData>,

    /// One row per section, in hierarchical order
    pub sections: Vec<TableData>,

    /// Sum of all chapter rows
    pub totals: Tally,

    /// Versioned references that match no assertion, sorted by test name
    pub unmatched: Vec<SpecReference>,

    /// References outside the target version, sorted by test name
    pub unversioned: Vec<SpecReference>,

    /// Test methods per configured summary group
    pub test_groups: BTreeMap<String, Vec<TestMethod>>,
}

impl CoverageReport {
    /// The annotated document
    #[must_use]
    pub const fn document(&self) -> &AuditDocument {
        &self.document
    }

    /// Row of a chapter
    #[must_use]
    pub fn chapter(&self, chapter_id: &str) -> Option<&TableData> {
        self.chapters.iter().find(|row| row.section.id == chapter_id)
    }

    /// Row of a section
    #[must_use]
    pub fn section(&self, section_id: &str) -> Option<&TableData> {
        self.sections.iter().find(|row| row.section.id == section_id)
    }

    /// Overall coverage, or the not-applicable sentinel
    #[must_use]
    pub fn total_coverage(&self) -> f64 {
        self.totals.coverage()
    }

    /// Test classes of unversioned references with the first version seen
    #[must_use]
    pub fn unversioned_classes(&self) -> BTreeMap<String, Option<String>> {
        let mut classes = BTreeMap::new();
        for reference in &self.unversioned {
            classes
                .entry(reference.class_fqn())
                .or_insert_with(|| reference.spec_version.clone());
        }
        classes
    }
}
