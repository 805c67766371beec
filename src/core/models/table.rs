//! Aggregated coverage rows
//!
//! A [`Tally`] accumulates assertion counts; a [`TableData`] is one
//! read-only row of the chapter or section summary.

use serde::{Deserialize, Serialize};

use super::{CoverageStatus, Section};

/// Coverage value used when a row has no testable assertions
pub const NOT_APPLICABLE: f64 = -1.0;

/// Default pass threshold, in percent
pub const DEFAULT_PASS_THRESHOLD: f64 = 75.0;

/// Default fail threshold, in percent
pub const DEFAULT_FAIL_THRESHOLD: f64 = 50.0;

/// Running assertion counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tally {
    /// Total assertions
    pub assertions: usize,
    /// Assertions marked testable
    pub testable: usize,
    /// Assertions with status `Covered`
    pub implemented: usize,
    /// Assertions with status `Unimplemented`
    pub unimplemented: usize,
    /// Raw number of matched references
    pub test_count: usize,
}

impl Tally {
    /// Count one assertion
    pub const fn record(&mut self, testable: bool, status: CoverageStatus, references: usize) {
        self.assertions += 1;
        if testable {
            self.testable += 1;
        }
        match status {
            CoverageStatus::Covered => self.implemented += 1,
            CoverageStatus::Unimplemented => self.unimplemented += 1,
            CoverageStatus::Uncovered | CoverageStatus::Untestable => {},
        }
        self.test_count += references;
    }

    /// Add another tally into this one
    pub const fn absorb(&mut self, other: &Self) {
        self.assertions += other.assertions;
        self.testable += other.testable;
        self.implemented += other.implemented;
        self.unimplemented += other.unimplemented;
        self.test_count += other.test_count;
    }

    /// Assertions with at least one reference (implemented or not)
    #[must_use]
    pub const fn tested(&self) -> usize {
        self.implemented + self.unimplemented
    }

    /// `implemented / testable * 100`, or [`NOT_APPLICABLE`]
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn coverage(&self) -> f64 {
        if self.testable > 0 {
            self.implemented as f64 / self.testable as f64 * 100.0
        } else {
            NOT_APPLICABLE
        }
    }
}

/// Display band of a coverage value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThresholdBand {
    /// Below the fail threshold
    Fail,
    /// Between the fail and pass thresholds
    Warn,
    /// At or above the pass threshold
    Pass,
}

/// Pass/fail thresholds in percent
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    /// Coverage at or above this passes
    pub pass: f64,
    /// Coverage below this fails
    pub fail: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            pass: DEFAULT_PASS_THRESHOLD,
            fail: DEFAULT_FAIL_THRESHOLD,
        }
    }
}

impl Thresholds {
    /// Band of a coverage value; `None` for the not-applicable sentinel
    #[must_use]
    pub fn classify(&self, coverage: f64) -> Option<ThresholdBand> {
        if coverage < 0.0 {
            None
        } else if coverage < self.fail {
            Some(ThresholdBand::Fail)
        } else if coverage < self.pass {
            Some(ThresholdBand::Warn)
        } else {
            Some(ThresholdBand::Pass)
        }
    }
}

/// One row of the chapter or section summary
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableData {
    /// The section (or chapter) this row describes
    pub section: Section,
    /// Total assertions
    pub assertions: usize,
    /// Testable assertions
    pub testable: usize,
    /// Implemented plus unimplemented
    pub tested: usize,
    /// Raw matched reference count
    pub test_count: usize,
    /// Assertions covered only by excluded test groups
    pub unimplemented: usize,
    /// Covered assertions
    pub implemented: usize,
    /// Coverage percentage, or [`NOT_APPLICABLE`]
    pub coverage: f64,
}

impl TableData {
    /// Build a row from a section and its tally
    #[must_use]
    pub fn new(section: Section, tally: &Tally) -> Self {
        Self {
            section,
            assertions: tally.assertions,
            testable: tally.testable,
            tested: tally.tested(),
            test_count: tally.test_count,
            unimplemented: tally.unimplemented,
            implemented: tally.implemented,
            coverage: tally.coverage(),
        }
    }

    /// Coverage percentage, `None` when no assertion is testable
    #[must_use]
    pub fn coverage_percent(&self) -> Option<f64> {
        (self.coverage >= 0.0).then_some(self.coverage)
    }

    /// Coverage clamped to `[0, 100]` and rounded to two decimals
    #[must_use]
    pub fn display_coverage(&self) -> f64 {
        (self.coverage.clamp(0.0, 100.0) * 100.0).round() / 100.0
    }

    /// Threshold band, `None` when no assertion is testable
    #[must_use]
    pub fn band(&self, thresholds: &Thresholds) -> Option<ThresholdBand> {
        thresholds.classify(self.coverage)
    }
}
