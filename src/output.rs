//! Output formatting for human and JSON modes
//!
//! This module provides structured output that can be rendered either as
//! human-readable text or machine-parseable JSON.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use colored::{ColoredString, Colorize};
use serde::Serialize;

use crate::core::models::{
    Assertion, AuditDocument, CoverageReport, CoverageStatus, SpecReference, TableData,
    ThresholdBand, Thresholds,
};
use crate::core::services::{FragmentKind, Markup};

/// Output mode for the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output (machine-readable)
    Json,
}

/// What a report summary includes beyond the chapter table
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SummaryOptions {
    /// Include one row per section
    pub sections: bool,
    /// Include every assertion with its status and tests
    pub details: bool,
}

/// One row of a coverage table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowSummary {
    /// Effective section id
    pub id: String,
    /// Document-authored section id
    pub original_id: String,
    /// Section title
    pub title: String,
    /// Total assertions
    pub assertions: usize,
    /// Testable assertions
    pub testable: usize,
    /// Implemented plus unimplemented
    pub tested: usize,
    /// Covered assertions
    pub implemented: usize,
    /// Assertions covered only by excluded test groups
    pub unimplemented: usize,
    /// Raw matched reference count
    pub test_count: usize,
    /// Coverage rounded to two decimals; `None` when nothing is testable
    pub coverage: Option<f64>,
    /// Threshold band; `None` when nothing is testable
    pub band: Option<ThresholdBand>,
    /// Anchor in the published specification
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl RowSummary {
    fn from_row(row: &TableData, thresholds: &Thresholds) -> Self {
        Self {
            id: row.section.id.clone(),
            original_id: row.section.original_id.clone(),
            title: row.section.title.clone(),
            assertions: row.assertions,
            testable: row.testable,
            tested: row.tested,
            implemented: row.implemented,
            unimplemented: row.unimplemented,
            test_count: row.test_count,
            coverage: row.coverage_percent().map(|_| row.display_coverage()),
            band: row.band(thresholds),
            url: None,
        }
    }
}

/// An assertion with its correlation result
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssertionSummary {
    /// Effective section id
    pub section: String,
    /// Assertion id
    pub id: String,
    /// Text with markup removed
    pub text: String,
    /// Coverage status
    pub status: Option<CoverageStatus>,
    /// `Class.method()` of every matched test
    pub tests: Vec<String>,
}

/// A reference listed outside the coverage table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReferenceSummary {
    /// `package.Class.method`
    pub test: String,
    /// Referenced section id
    pub section: String,
    /// Referenced assertion id
    pub assertion: String,
    /// Declared version
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

impl From<&SpecReference> for ReferenceSummary {
    fn from(reference: &SpecReference) -> Self {
        Self {
            test: reference.fqn(),
            section: reference.section.clone(),
            assertion: reference.assertion.clone(),
            version: reference.spec_version.clone(),
        }
    }
}

/// Coverage summary of one document
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportSummary {
    /// Specification id
    pub spec_id: String,
    /// Specification name
    pub name: String,
    /// Document version
    pub version: String,
    /// Version the references were filtered against
    pub target_version: String,
    /// Thresholds used for the bands
    pub thresholds: Thresholds,
    /// Grand total row
    pub totals: RowSummary,
    /// One row per chapter
    pub chapters: Vec<RowSummary>,
    /// One row per section, when requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sections: Option<Vec<RowSummary>>,
    /// Every assertion, when requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assertions: Option<Vec<AssertionSummary>>,
    /// References that match no assertion
    pub unmatched: Vec<ReferenceSummary>,
    /// Test classes outside the target version, with the version they declare
    pub unversioned: BTreeMap<String, Option<String>>,
    /// Test methods per summary group, as `package.Class.method`
    pub test_groups: BTreeMap<String, Vec<String>>,
}

impl ReportSummary {
    /// Summarise a report
    ///
    /// `section_url` maps an authored section id to its anchor in the
    /// published specification.
    #[must_use]
    pub fn new(
        report: &CoverageReport,
        options: SummaryOptions,
        markup: &Markup,
        section_url: impl Fn(&str) -> Option<String>,
    ) -> Self {
        let document = report.document();
        let thresholds = &report.thresholds;
        let row = |data: &TableData| RowSummary {
            url: section_url(&data.section.original_id),
            ..RowSummary::from_row(data, thresholds)
        };

        let mut totals = RowSummary {
            id: String::new(),
            original_id: String::new(),
            title: "Total".to_string(),
            assertions: report.totals.assertions,
            testable: report.totals.testable,
            tested: report.totals.tested(),
            implemented: report.totals.implemented,
            unimplemented: report.totals.unimplemented,
            test_count: report.totals.test_count,
            coverage: None,
            band: thresholds.classify(report.total_coverage()),
            url: None,
        };
        if report.totals.testable > 0 {
            totals.coverage = Some((report.total_coverage() * 100.0).round() / 100.0);
        }

        Self {
            spec_id: document.spec_id().to_string(),
            name: document.name().to_string(),
            version: document.version().to_string(),
            target_version: report.target_version.clone(),
            thresholds: *thresholds,
            totals,
            chapters: report.chapters.iter().map(row).collect(),
            sections: options.sections.then(|| report.sections.iter().map(row).collect()),
            assertions: options.details.then(|| assertion_summaries(document, markup)),
            unmatched: report.unmatched.iter().map(ReferenceSummary::from).collect(),
            unversioned: report.unversioned_classes(),
            test_groups: report
                .test_groups
                .iter()
                .map(|(group, methods)| {
                    (group.clone(), methods.iter().map(|m| m.fqn()).collect())
                })
                .collect(),
        }
    }

    fn render_human(&self) {
        let title = if self.name.is_empty() { &self.spec_id } else { &self.name };
        println!("{} {}", title.bold(), self.version);
        if !self.target_version.eq_ignore_ascii_case(&self.version) {
            println!("Target version: {}", self.target_version);
        }
        println!();

        print_table("Chapter", &self.chapters, &self.totals);

        if let Some(sections) = &self.sections {
            println!();
            print_table("Section", sections, &self.totals);
        }

        if let Some(assertions) = &self.assertions {
            println!("\nAssertions:");
            for a in assertions {
                let status = a.status.map_or_else(|| "-".normal(), status_label);
                println!("  [{}/{}] {} {}", a.section, a.id, status, a.text);
                for test in &a.tests {
                    println!("          {}", test.dimmed());
                }
            }
        }

        if !self.unmatched.is_empty() {
            println!("\nUnmatched references ({}):", self.unmatched.len());
            for r in &self.unmatched {
                println!("  {} -> {}/{}", r.test, r.section, r.assertion);
            }
        }

        if !self.unversioned.is_empty() {
            println!(
                "\nTest classes outside version {} ({}):",
                self.target_version,
                self.unversioned.len()
            );
            for (class, version) in &self.unversioned {
                println!("  {class} ({})", version.as_deref().unwrap_or("no version"));
            }
        }

        for (group, methods) in &self.test_groups {
            println!("\nTest group '{group}' ({}):", methods.len());
            for method in methods {
                println!("  {method}");
            }
        }
    }
}

fn assertion_summaries(document: &AuditDocument, markup: &Markup) -> Vec<AssertionSummary> {
    document
        .section_ids()
        .into_iter()
        .flat_map(|section_id| document.assertions(section_id))
        .map(|a: &Assertion| AssertionSummary {
            section: a.section_id.clone(),
            id: a.id.clone(),
            text: markup.plain(&a.text),
            status: a.status(),
            tests: a.tests().iter().map(|t| t.name.clone()).collect(),
        })
        .collect()
}

fn print_table(heading: &str, rows: &[RowSummary], totals: &RowSummary) {
    println!(
        "{:<12} {:>10} {:>8} {:>6} {:>11} {:>13} {:>9}",
        heading, "Assertions", "Testable", "Tests", "Implemented", "Unimplemented", "Coverage"
    );
    for row in rows.iter().chain(std::iter::once(totals)) {
        let label = if row.id.is_empty() {
            row.title.bold().to_string()
        } else {
            format!("{} {}", row.id, row.title)
        };
        println!(
            "{:<12} {:>10} {:>8} {:>6} {:>11} {:>13} {:>9}",
            truncate(&label, 12),
            row.assertions,
            row.testable,
            row.test_count,
            row.implemented,
            row.unimplemented,
            coverage_cell(row),
        );
    }
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        text.to_string()
    } else {
        let mut cut: String = text.chars().take(width.saturating_sub(1)).collect();
        cut.push('…');
        cut
    }
}

fn coverage_cell(row: &RowSummary) -> ColoredString {
    match (row.coverage, row.band) {
        (Some(value), Some(band)) => {
            let text = format!("{value:.2}%");
            match band {
                ThresholdBand::Fail => text.red(),
                ThresholdBand::Warn => text.yellow(),
                ThresholdBand::Pass => text.green(),
            }
        },
        _ => "n/a".dimmed(),
    }
}

fn status_label(status: CoverageStatus) -> ColoredString {
    let text = status.as_str();
    match status {
        CoverageStatus::Covered => text.green(),
        CoverageStatus::Uncovered => text.red(),
        CoverageStatus::Unimplemented => text.yellow(),
        CoverageStatus::Untestable => text.dimmed(),
    }
}

/// Render marked-up text for a terminal
#[must_use]
pub fn styled_text(markup: &Markup, text: &str) -> String {
    markup
        .parse(text)
        .into_iter()
        .map(|fragment| match fragment.kind {
            FragmentKind::Plain => fragment.text,
            FragmentKind::Highlight => fragment.text.bold().to_string(),
            FragmentKind::Deleted => fragment.text.strikethrough().to_string(),
            FragmentKind::Literal => fragment.text.cyan().to_string(),
        })
        .collect()
}

/// A document that could not be loaded
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentFailure {
    /// Path of the document
    pub path: String,
    /// Error chain
    pub error: String,
}

/// Result of a report run over several documents
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRun {
    /// When the report was produced
    pub generated_at: DateTime<Utc>,
    /// One summary per loaded document
    pub reports: Vec<ReportSummary>,
    /// Documents that failed to load
    pub failures: Vec<DocumentFailure>,
}

impl ReportRun {
    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => self.render_human(),
            OutputMode::Json => self.render_json(),
        }
    }

    fn render_human(&self) {
        for (i, report) in self.reports.iter().enumerate() {
            if i > 0 {
                println!("\n{}\n", "-".repeat(72));
            }
            report.render_human();
        }

        if !self.failures.is_empty() {
            eprintln!();
            for failure in &self.failures {
                eprintln!("{} {}: {}", "error:".red().bold(), failure.path, failure.error);
            }
        }
    }

    fn render_json(&self) {
        println!("{}", serde_json::to_string_pretty(self).unwrap_or_default());
    }
}

/// Section listing entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionInfo {
    /// Effective section id
    pub id: String,
    /// Document-authored section id
    pub original_id: String,
    /// Nesting level
    pub level: u32,
    /// Section title
    pub title: String,
    /// Number of assertions, group members included
    pub assertions: usize,
}

/// Result of the `sections` command
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionListResult {
    /// Specification id
    pub spec_id: String,
    /// Whether ids were generated from levels
    pub generated_ids: bool,
    /// Sections in hierarchical order
    pub sections: Vec<SectionInfo>,
}

impl SectionListResult {
    /// List the sections of a document
    #[must_use]
    pub fn new(document: &AuditDocument) -> Self {
        Self {
            spec_id: document.spec_id().to_string(),
            generated_ids: document.has_generated_ids(),
            sections: document
                .sections()
                .into_iter()
                .map(|s| SectionInfo {
                    id: s.id.clone(),
                    original_id: s.original_id.clone(),
                    level: s.level,
                    title: s.title.clone(),
                    assertions: document.assertions(&s.id).len(),
                })
                .collect(),
        }
    }

    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => self.render_human(),
            OutputMode::Json => self.render_json(),
        }
    }

    fn render_human(&self) {
        if self.sections.is_empty() {
            println!("No sections in {}.", self.spec_id);
            return;
        }

        for s in &self.sections {
            let indent = "  ".repeat(s.level.saturating_sub(1) as usize);
            let original = if self.generated_ids {
                format!(" [{}]", s.original_id).dimmed().to_string()
            } else {
                String::new()
            };
            println!("{indent}{} {}{original} ({})", s.id.bold(), s.title, s.assertions);
        }
    }

    fn render_json(&self) {
        println!("{}", serde_json::to_string_pretty(self).unwrap_or_default());
    }
}

/// Details of one assertion
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssertionInfo {
    /// Assertion id
    pub id: String,
    /// Effective section id
    pub section_id: String,
    /// Section title
    pub section_title: String,
    /// Assertion text (markup kept)
    pub text: String,
    /// Optional note
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    /// Testable flag
    pub testable: bool,
    /// Implied flag
    pub implied: bool,
    /// Text of the enclosing group
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
}

/// Result of the `lookup` command
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LookupResult {
    /// Whether the assertion exists
    pub found: bool,
    /// Section id as given
    pub section: String,
    /// Assertion id as given
    pub assertion: String,
    /// The assertion, when found
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<AssertionInfo>,
}

impl LookupResult {
    /// Look up an assertion by document-authored section id
    #[must_use]
    pub fn new(document: &AuditDocument, section: &str, assertion: &str) -> Self {
        let details = document
            .has_assertion(section, assertion)
            .then(|| document.generated_id_for(section))
            .flatten()
            .and_then(|effective| document.assertion(effective, assertion))
            .map(|a| AssertionInfo {
                id: a.id.clone(),
                section_id: a.section_id.clone(),
                section_title: document
                    .section_title(&a.section_id)
                    .unwrap_or_default()
                    .to_string(),
                text: a.text.clone(),
                note: a.note.clone(),
                testable: a.testable,
                implied: a.implied,
                group: a
                    .group
                    .and_then(|i| document.elements(&a.section_id).get(i))
                    .map(|g| g.text().to_string()),
            });

        Self {
            found: details.is_some(),
            section: section.to_string(),
            assertion: assertion.to_string(),
            details,
        }
    }

    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode, markup: &Markup) {
        match mode {
            OutputMode::Human => self.render_human(markup),
            OutputMode::Json => self.render_json(),
        }
    }

    fn render_human(&self, markup: &Markup) {
        let Some(a) = &self.details else {
            println!("Assertion {}/{} not found.", self.section, self.assertion);
            return;
        };

        println!("{} {}", a.section_id.bold(), a.section_title);
        if let Some(group) = &a.group {
            println!("  {}", styled_text(markup, group));
        }
        println!("  [{}] {}", a.id, styled_text(markup, &a.text));
        if let Some(note) = &a.note {
            println!("  note: {}", note.dimmed());
        }
        let mut flags = Vec::new();
        if !a.testable {
            flags.push("untestable");
        }
        if a.implied {
            flags.push("implied");
        }
        if !flags.is_empty() {
            println!("  ({})", flags.join(", "));
        }
    }

    fn render_json(&self) {
        println!("{}", serde_json::to_string_pretty(self).unwrap_or_default());
    }
}
