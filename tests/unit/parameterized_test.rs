//! Parameterized tests using test-case
//!
//! These tests use test-case to run the same test logic with different inputs.

use std::cmp::Ordering;
use std::collections::HashSet;

use specaudit::core::models::{CoverageStatus, ThresholdBand, Thresholds};
use specaudit::core::services::{
    CoverageConfig, Correlator, Markup, SectionIdGenerator, compare_optional_section_ids,
    compare_section_ids,
};
use test_case::test_case;

use super::common::reference;

// =============================================================================
// Section Id Ordering
// =============================================================================

#[test_case("1", "1.1", Ordering::Less ; "parent before child")]
#[test_case("1.10", "2", Ordering::Less ; "numeric not lexicographic")]
#[test_case("1.2", "1.10", Ordering::Less ; "second segment numeric")]
#[test_case("2", "2.1.1", Ordering::Less ; "ancestor before grandchild")]
#[test_case("3", "2.9", Ordering::Greater ; "chapter decides")]
#[test_case("1.0", "1", Ordering::Greater ; "zero segment is still longer")]
#[test_case("1.", "1", Ordering::Equal ; "trailing dot ignored")]
#[test_case("", "", Ordering::Equal ; "both empty")]
#[test_case("", "1", Ordering::Less ; "empty before one")]
#[test_case("1.a", "1.1", Ordering::Greater ; "text after number")]
#[test_case("1.a", "1.b", Ordering::Less ; "text lexicographic")]
#[test_case("99999999999999999999", "100000000000000000000", Ordering::Less ; "wider than u64 stays numeric")]
fn test_compare_section_ids(a: &str, b: &str, expected: Ordering) {
    assert_eq!(compare_section_ids(a, b), expected);
    assert_eq!(compare_section_ids(b, a), expected.reverse());
}

#[test_case(None, Some(""), Ordering::Equal ; "none equals empty")]
#[test_case(None, Some("1"), Ordering::Less ; "none before one")]
#[test_case(None, None, Ordering::Equal ; "none equals none")]
fn test_compare_optional(a: Option<&str>, b: Option<&str>, expected: Ordering) {
    assert_eq!(compare_optional_section_ids(a, b), expected);
}

// =============================================================================
// Id Generation
// =============================================================================

#[test_case(&[1, 2, 2, 1, 2, 2, 3, 1, 1, 2, 3, 4],
            &["1", "1.1", "1.2", "2", "2.1", "2.2", "2.2.1", "3", "4", "4.1", "4.1.1", "4.1.1.1"]
            ; "reference sequence")]
#[test_case(&[1, 4, 4], &["1", "1.1", "1.2"] ; "level jump keeps seen levels only")]
#[test_case(&[1, 2, 3, 2, 3], &["1", "1.1", "1.1.1", "1.2", "1.2.1"] ; "deeper counter resets")]
#[test_case(&[2, 2, 1, 2], &["1", "2", "1", "1.1"] ; "start below the top")]
fn test_generated_sequence(levels: &[u32], expected: &[&str]) {
    let mut generator = SectionIdGenerator::new();
    let ids: Vec<String> = levels.iter().map(|&level| generator.next_id(level)).collect();
    assert_eq!(ids, expected);
}

// =============================================================================
// Status Rules
// =============================================================================

#[test_case(true, &[], CoverageStatus::Uncovered ; "no references")]
#[test_case(true, &[&[]], CoverageStatus::Covered ; "untagged reference")]
#[test_case(true, &[&["broken"]], CoverageStatus::Unimplemented ; "only excluded tags")]
#[test_case(true, &[&["broken", "slow"]], CoverageStatus::Unimplemented ; "one excluded tag is enough")]
#[test_case(true, &[&["broken"], &["smoke"]], CoverageStatus::Covered ; "any implemented reference")]
#[test_case(false, &[], CoverageStatus::Untestable ; "untestable without references")]
#[test_case(false, &[&[]], CoverageStatus::Untestable ; "untestable with references")]
fn test_status_rules(testable: bool, tags: &[&[&str]], expected: CoverageStatus) {
    let correlator = Correlator::new(CoverageConfig {
        unimplemented_groups: HashSet::from(["broken".to_string()]),
        ..CoverageConfig::default()
    });
    let references: Vec<_> =
        tags.iter().map(|groups| reference("s", Some("1"), "1", "a", groups)).collect();
    let matched: Vec<_> = references.iter().collect();
    assert_eq!(correlator.status_for(testable, &matched), expected);
}

// =============================================================================
// Threshold Bands
// =============================================================================

#[test_case(-1.0, None ; "not applicable")]
#[test_case(0.0, Some(ThresholdBand::Fail) ; "zero fails")]
#[test_case(49.99, Some(ThresholdBand::Fail) ; "just below fail")]
#[test_case(50.0, Some(ThresholdBand::Warn) ; "fail threshold warns")]
#[test_case(74.99, Some(ThresholdBand::Warn) ; "just below pass")]
#[test_case(75.0, Some(ThresholdBand::Pass) ; "pass threshold passes")]
#[test_case(100.0, Some(ThresholdBand::Pass) ; "full coverage")]
fn test_default_bands(coverage: f64, expected: Option<ThresholdBand>) {
    assert_eq!(Thresholds::default().classify(coverage), expected);
}

// =============================================================================
// Markup
// =============================================================================

#[test_case("plain", "plain" ; "no markers")]
#[test_case("a _b_ c", "a b c" ; "highlight")]
#[test_case("~old~ new", "old new" ; "deleted")]
#[test_case("call |foo()|", "call foo()" ; "literal")]
#[test_case("snake_case", "snake_case" ; "single underscore kept")]
#[test_case("|a_b_c|", "a_b_c" ; "literal wins when first")]
fn test_markup_plain(input: &str, expected: &str) {
    assert_eq!(Markup::compile().unwrap().plain(input), expected);
}

#[test_case("COVERED", CoverageStatus::Covered ; "covered")]
#[test_case("UNIMPLEMENTED", CoverageStatus::Unimplemented ; "unimplemented")]
fn test_status_round_trips_through_str(text: &str, status: CoverageStatus) {
    assert_eq!(text.parse::<CoverageStatus>().unwrap(), status);
    assert_eq!(status.as_str(), text);
}
