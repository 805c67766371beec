//! Coverage correlator - matches test references to assertions
//!
//! This module contains the pure correlation logic with no I/O. It runs in
//! four passes over one document:
//!
//! 1. Split references into those targeting the report version and the rest
//! 2. Collect versioned references that match no assertion
//! 3. Compute the status of every assertion and attach its tests
//! 4. Aggregate section, chapter and total rows

use std::collections::{BTreeMap, HashMap, HashSet};

use crate::core::models::{
    AuditDocument, CoverageReport, CoverageStatus, Link, LinkProvider, SpecReference, TableData,
    Tally, Test, TestMethod, Thresholds,
};
use crate::core::services::section_order;

/// Base URLs for links from tests to their sources
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkSettings {
    /// GitHub tree URL of the test sources
    pub github_base_url: Option<String>,
    /// Subversion URL of the test sources
    pub svn_base_url: Option<String>,
    /// Fisheye URL of the test sources
    pub fisheye_base_url: Option<String>,
    /// File extension of test sources
    pub source_extension: String,
}

impl Default for LinkSettings {
    fn default() -> Self {
        Self {
            github_base_url: None,
            svn_base_url: None,
            fisheye_base_url: None,
            source_extension: "java".to_string(),
        }
    }
}

impl LinkSettings {
    /// Links to the source of a referenced test class
    #[must_use]
    pub fn links_for(&self, reference: &SpecReference) -> Vec<Link> {
        [
            (LinkProvider::GitHub, &self.github_base_url),
            (LinkProvider::Svn, &self.svn_base_url),
            (LinkProvider::Fisheye, &self.fisheye_base_url),
        ]
        .into_iter()
        .filter_map(|(provider, base)| {
            base.as_deref().map(|base| {
                Link::to_class(
                    provider,
                    base,
                    &reference.package,
                    &reference.class,
                    &self.source_extension,
                )
            })
        })
        .collect()
    }
}

/// Settings for one correlation run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CoverageConfig {
    /// Version references must declare; the document's version when `None`
    pub target_version: Option<String>,
    /// Test groups whose tests do not count as implemented
    pub unimplemented_groups: HashSet<String>,
    /// Test groups summarised in the report
    pub summary_groups: Vec<String>,
    /// Pass/fail thresholds
    pub thresholds: Thresholds,
    /// Source link settings
    pub links: LinkSettings,
}

/// Correlates test references with the assertions of a document
#[derive(Debug, Clone, Default)]
pub struct Correlator {
    config: CoverageConfig,
}

impl Correlator {
    /// Create a correlator
    #[must_use]
    pub const fn new(config: CoverageConfig) -> Self {
        Self { config }
    }

    /// The configuration in use
    #[must_use]
    pub const fn config(&self) -> &CoverageConfig {
        &self.config
    }

    /// Whether a test with these groups counts as implemented
    ///
    /// An empty group list is always implemented.
    #[must_use]
    pub fn is_implemented(&self, groups: &[String]) -> bool {
        groups.iter().all(|g| !self.config.unimplemented_groups.contains(g))
    }

    /// Status of an assertion given its matched references
    #[must_use]
    pub fn status_for(&self, testable: bool, matched: &[&SpecReference]) -> CoverageStatus {
        if !testable {
            CoverageStatus::Untestable
        } else if matched.is_empty() {
            CoverageStatus::Uncovered
        } else if matched.iter().any(|r| self.is_implemented(&r.groups)) {
            CoverageStatus::Covered
        } else {
            CoverageStatus::Unimplemented
        }
    }

    /// Correlate `references` with `document`
    ///
    /// The document is annotated in place and returned inside the report.
    #[must_use]
    pub fn correlate(
        &self,
        mut document: AuditDocument,
        references: Vec<SpecReference>,
    ) -> CoverageReport {
        let target_version =
            self.config.target_version.clone().unwrap_or_else(|| document.version().to_string());
        let test_groups = self.summarise_groups(&references);

        let (by_section, mut unversioned) = partition_by_version(references, &target_version);
        let mut unmatched = find_unmatched(&document, &by_section);

        let tallies = self.annotate(&mut document, &by_section);
        let (sections, chapters, totals) = aggregate(&document, &tallies);

        unmatched.sort_by(SpecReference::cmp_by_fqn);
        unversioned.sort_by(SpecReference::cmp_by_fqn);

        if !unmatched.is_empty() {
            log::warn!(
                "{}: {} reference(s) match no assertion",
                document.spec_id(),
                unmatched.len()
            );
        }
        if !unversioned.is_empty() {
            log::warn!(
                "{}: {} reference(s) do not target version {}",
                document.spec_id(),
                unversioned.len(),
                target_version
            );
        }

        CoverageReport {
            document,
            target_version,
            thresholds: self.config.thresholds,
            chapters,
            sections,
            totals,
            unmatched,
            unversioned,
            test_groups,
        }
    }

    /// Pass 3: status and tests of every assertion, tallied per section
    fn annotate(
        &self,
        document: &mut AuditDocument,
        by_section: &HashMap<String, Vec<SpecReference>>,
    ) -> HashMap<String, Tally> {
        let sections: Vec<(String, String)> = document
            .sections()
            .into_iter()
            .map(|s| (s.id.clone(), s.original_id.clone()))
            .collect();

        let mut tallies = HashMap::new();
        for (section_id, original_id) in sections {
            let candidates = by_section.get(&original_id).map(Vec::as_slice).unwrap_or_default();
            let mut tally = Tally::default();

            let Some(items) = document.elements_mut(&section_id) else {
                continue;
            };
            for assertion in items.iter_mut().flat_map(|item| item.assertions_mut()) {
                let matched: Vec<&SpecReference> =
                    candidates.iter().filter(|r| r.assertion == assertion.id).collect();
                let status = self.status_for(assertion.testable, &matched);

                if status == CoverageStatus::Untestable && !matched.is_empty() {
                    log::warn!(
                        "untestable assertion {}/{} is referenced by {} test(s)",
                        section_id,
                        assertion.id,
                        matched.len()
                    );
                }

                tally.record(assertion.testable, status, matched.len());
                let tests = matched
                    .iter()
                    .map(|r| Test::from_reference(r, self.config.links.links_for(r)))
                    .collect();
                assertion.annotate(status, tests);
            }

            log::debug!("section {section_id}: {tally:?}");
            tallies.insert(section_id, tally);
        }
        tallies
    }

    /// Distinct test methods per summary group, over all references
    fn summarise_groups(&self, references: &[SpecReference]) -> BTreeMap<String, Vec<TestMethod>> {
        self.config
            .summary_groups
            .iter()
            .map(|group| {
                let mut methods: Vec<TestMethod> = references
                    .iter()
                    .filter(|r| r.groups.contains(group))
                    .map(TestMethod::from)
                    .collect();
                methods.sort_by_cached_key(|m| m.fqn().to_lowercase());
                methods.dedup_by(|a, b| a.fqn().to_lowercase() == b.fqn().to_lowercase());
                (group.clone(), methods)
            })
            .collect()
    }
}

/// Pass 1: group versioned references by section id, set the rest aside
fn partition_by_version(
    references: Vec<SpecReference>,
    target_version: &str,
) -> (HashMap<String, Vec<SpecReference>>, Vec<SpecReference>) {
    let mut by_section: HashMap<String, Vec<SpecReference>> = HashMap::new();
    let mut unversioned = Vec::new();

    for reference in references {
        if reference.targets_version(target_version) {
            by_section.entry(reference.section.clone()).or_default().push(reference);
        } else {
            unversioned.push(reference);
        }
    }
    (by_section, unversioned)
}

/// Pass 2: versioned references with no matching assertion
fn find_unmatched(
    document: &AuditDocument,
    by_section: &HashMap<String, Vec<SpecReference>>,
) -> Vec<SpecReference> {
    by_section
        .values()
        .flatten()
        .filter(|r| !document.has_assertion(&r.section, &r.assertion))
        .cloned()
        .collect()
}

/// Pass 4: section rows, chapter rollups and the grand total
fn aggregate(
    document: &AuditDocument,
    tallies: &HashMap<String, Tally>,
) -> (Vec<TableData>, Vec<TableData>, Tally) {
    let tally_of = |id: &str| tallies.get(id).copied().unwrap_or_default();

    let sections: Vec<TableData> = document
        .sections()
        .into_iter()
        .map(|section| TableData::new(section.clone(), &tally_of(&section.id)))
        .collect();

    let mut totals = Tally::default();
    let mut chapters = Vec::new();
    for section in document.sections().into_iter().filter(|s| s.is_chapter()) {
        let mut chapter = tally_of(&section.id);
        for (id, tally) in tallies {
            if section_order::is_descendant_of(id, &section.id) {
                chapter.absorb(tally);
            }
        }
        totals.absorb(&chapter);
        chapters.push(TableData::new(section.clone(), &chapter));
    }

    (sections, chapters, totals)
}
