//! Domain models for specaudit
//!
//! Pure data structures with no I/O dependencies.
//!
//! - [`AuditDocument`] - A parsed specification: sections and their elements
//! - [`Section`] - A node of the specification hierarchy
//! - [`SectionElement`] - An [`Assertion`] or a [`Group`] of assertions
//! - [`SpecReference`] - A test method's claim to exercise an assertion
//! - [`TableData`] - One aggregated row of the coverage summary
//! - [`CoverageReport`] - The annotated document with all derived rows

mod document;
mod element;
mod reference;
mod report;
mod section;
mod status;
mod table;

pub use document::{AuditDocument, DocumentError};
pub use element::{Assertion, Group, SectionElement};
pub use reference::{SpecReference, TestMethod};
pub use report::CoverageReport;
pub use section::Section;
pub use status::CoverageStatus;
pub use table::{
    DEFAULT_FAIL_THRESHOLD, DEFAULT_PASS_THRESHOLD, NOT_APPLICABLE, TableData, Tally,
    ThresholdBand, Thresholds,
};
pub use test::{Link, LinkProvider, Test};
