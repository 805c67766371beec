//! Tests for correlating references with parsed documents

use std::collections::HashSet;

use specaudit::core::models::{CoverageStatus, LinkProvider, ThresholdBand};
use specaudit::core::services::{CoverageConfig, Correlator, LinkSettings};

use super::common::{cdi_document, cdi_references, interceptors_document, reference};

fn cdi_correlator() -> Correlator {
    Correlator::new(CoverageConfig {
        unimplemented_groups: HashSet::from(["broken".to_string()]),
        summary_groups: vec!["integration".to_string()],
        ..CoverageConfig::default()
    })
}

#[test]
fn test_statuses_by_original_section_id() {
    let report = cdi_correlator().correlate(cdi_document(), cdi_references());
    let doc = report.document();

    let status = |section: &str, id: &str| doc.assertion(section, id).unwrap().status();
    assert_eq!(status("1", "a"), Some(CoverageStatus::Covered));
    assert_eq!(status("1", "b"), Some(CoverageStatus::Untestable));
    assert_eq!(status("1.1", "a"), Some(CoverageStatus::Unimplemented));
    assert_eq!(status("1.1", "b"), Some(CoverageStatus::Covered));
    assert_eq!(status("1.2", "a"), Some(CoverageStatus::Uncovered));
    // only reference is for another version
    assert_eq!(status("2", "a"), Some(CoverageStatus::Uncovered));
}

#[test]
fn test_section_and_chapter_rows() {
    let report = cdi_correlator().correlate(cdi_document(), cdi_references());

    let concepts = report.section("1").unwrap();
    assert_eq!(
        (concepts.assertions, concepts.testable, concepts.implemented, concepts.test_count),
        (2, 1, 1, 2)
    );
    assert_eq!(concepts.coverage_percent(), Some(100.0));

    let types = report.section("1.1").unwrap();
    assert_eq!((types.tested, types.unimplemented), (2, 1));
    assert!((types.coverage - 50.0).abs() < f64::EPSILON);

    let chapter = report.chapter("1").unwrap();
    assert_eq!(chapter.assertions, 5);
    assert_eq!(chapter.testable, 4);
    assert_eq!(chapter.implemented, 2);
    assert_eq!(chapter.unimplemented, 1);
    assert_eq!(chapter.tested, 3);
    assert_eq!(chapter.test_count, 4);
    assert!((chapter.coverage - 50.0).abs() < f64::EPSILON);

    assert_eq!(report.chapters.len(), 2);
    assert_eq!(report.totals.assertions, 6);
    assert_eq!(report.totals.testable, 5);
    assert!((report.total_coverage() - 40.0).abs() < 1e-9);
}

#[test]
fn test_invariants_hold_for_every_row() {
    let report = cdi_correlator().correlate(cdi_document(), cdi_references());
    for row in report.sections.iter().chain(&report.chapters) {
        assert!(row.implemented + row.unimplemented <= row.testable, "{}", row.section.id);
        assert!(row.testable <= row.assertions);
        assert!(row.coverage_percent().is_none_or(|c| (0.0..=100.0).contains(&c)));
    }
}

#[test]
fn test_unmatched_unversioned_and_groups() {
    let report = cdi_correlator().correlate(cdi_document(), cdi_references());

    let unmatched: Vec<_> = report.unmatched.iter().map(|r| r.fqn()).collect();
    assert_eq!(unmatched, vec!["org.jboss.cdi.tck.scopes.ScopeTest.testMissing"]);

    assert_eq!(report.unversioned.len(), 1);
    let classes = report.unversioned_classes();
    assert_eq!(
        classes.get("org.jboss.cdi.tck.lifecycle.LifecycleTest"),
        Some(&Some("1.1".to_string()))
    );

    let integration: Vec<_> = report.test_groups["integration"].iter().map(|m| m.fqn()).collect();
    assert_eq!(integration, vec!["org.jboss.cdi.tck.types.BeanTypesTest.testConcreteClass"]);
}

#[test]
fn test_target_version_override() {
    let correlator = Correlator::new(CoverageConfig {
        target_version: Some("1.1".to_string()),
        ..CoverageConfig::default()
    });
    let report = correlator.correlate(cdi_document(), cdi_references());

    assert_eq!(report.target_version, "1.1");
    assert_eq!(report.unversioned.len(), 5);
    assert_eq!(
        report.document().assertion("2", "a").unwrap().status(),
        Some(CoverageStatus::Covered)
    );
}

#[test]
fn test_tests_carry_links_and_archive() {
    let correlator = Correlator::new(CoverageConfig {
        links: LinkSettings {
            github_base_url: Some("https://github.com/org/tck/tree/main/src/test/java/".into()),
            ..LinkSettings::default()
        },
        ..CoverageConfig::default()
    });
    let report = correlator.correlate(cdi_document(), cdi_references());

    let tests = report.document().assertion("1.1", "b").unwrap().tests();
    assert_eq!(tests.len(), 1);
    assert_eq!(tests[0].name, "BeanTypesTest.testConcreteClass()");
    assert_eq!(tests[0].archive.as_deref(), Some("bean-types.war"));
    assert_eq!(tests[0].links.len(), 1);
    assert_eq!(tests[0].links[0].provider, LinkProvider::GitHub);
    assert_eq!(
        tests[0].links[0].url,
        "https://github.com/org/tck/tree/main/src/test/java/org/jboss/cdi/tck/types/BeanTypesTest.java"
    );
}

#[test]
fn test_chapter_scenario_on_plain_ids() {
    let references = vec![reference("interceptors", Some("1.2"), "1", "a", &[])];
    let report = Correlator::default().correlate(interceptors_document(), references);

    let chapter = report.chapter("1").unwrap();
    assert_eq!(
        (chapter.assertions, chapter.testable, chapter.implemented, chapter.unimplemented),
        (2, 2, 1, 0)
    );
    assert_eq!(chapter.tested, 1);
    assert!((chapter.coverage - 50.0).abs() < f64::EPSILON);
    assert_eq!(chapter.band(&report.thresholds), Some(ThresholdBand::Warn));

    let empty = report.chapter("2").unwrap();
    assert_eq!(empty.coverage_percent(), None);
    assert!(empty.display_coverage().abs() < f64::EPSILON);
    assert_eq!(empty.band(&report.thresholds), None);
}

#[test]
fn test_references_for_generated_ids_do_not_match() {
    // references must use the ids written in the document
    let references = vec![reference("cdi", Some("2.0"), "1", "a", &[])];
    let report = Correlator::default().correlate(cdi_document(), references);

    assert_eq!(report.unmatched.len(), 1);
    assert_eq!(report.totals.implemented, 0);
}
