//! Correlate audit documents with test references

use std::path::PathBuf;

use specaudit::adapters::json::JsonReferenceSource;
use specaudit::adapters::xml;
use specaudit::config::{ConfigOverrides, ReportConfig};
use specaudit::core::models::AuditDocument;
use specaudit::core::services::{Correlator, Markup, audit_documents};
use specaudit::output::{DocumentFailure, OutputMode, ReportRun, ReportSummary, SummaryOptions};

/// Arguments of the `report` command
#[derive(Debug, Clone, Default)]
pub struct ReportArgs {
    /// Audit files or glob patterns
    pub audits: Vec<String>,
    /// Reference files or directories
    pub references: Vec<PathBuf>,
    /// Explicit configuration file
    pub config: Option<PathBuf>,
    /// `--target-version`
    pub target_version: Option<String>,
    /// `--pass`
    pub pass: Option<f64>,
    /// `--fail`
    pub fail: Option<f64>,
    /// `--unimplemented`
    pub unimplemented: Vec<String>,
    /// `--sections`
    pub sections: bool,
    /// `--details`
    pub details: bool,
}

/// Expand glob patterns; plain paths pass through unchanged.
/// A pattern that matches nothing is reported as a failure.
fn expand_audits(audits: &[String]) -> (Vec<PathBuf>, Vec<DocumentFailure>) {
    let mut paths = Vec::new();
    let mut failures = Vec::new();

    for audit in audits {
        if !audit.contains(['*', '?', '[']) {
            paths.push(PathBuf::from(audit));
            continue;
        }

        let matched: Vec<PathBuf> = match glob::glob(audit) {
            Ok(entries) => entries.filter_map(Result::ok).filter(|p| p.is_file()).collect(),
            Err(e) => {
                failures.push(DocumentFailure {
                    path: audit.clone(),
                    error: format!("invalid pattern: {e}"),
                });
                continue;
            },
        };

        if matched.is_empty() {
            failures.push(DocumentFailure {
                path: audit.clone(),
                error: "pattern matched no files".to_string(),
            });
        }
        paths.extend(matched);
    }

    (paths, failures)
}

/// Run the report; exits with status 1 when a document failed to load
pub fn report(args: ReportArgs, mode: OutputMode) -> anyhow::Result<()> {
    let config = ReportConfig::load(args.config.as_deref())?.with_overrides(ConfigOverrides {
        target_version: args.target_version,
        pass_threshold: args.pass,
        fail_threshold: args.fail,
        unimplemented_test_groups: args.unimplemented,
    })?;

    let (paths, mut failures) = expand_audits(&args.audits);

    let mut documents: Vec<AuditDocument> = Vec::new();
    for path in paths {
        match xml::load_file(&path) {
            Ok(document) => documents.push(document),
            Err(e) => {
                log::debug!("skipping {}: {e:#}", path.display());
                failures.push(DocumentFailure {
                    path: path.display().to_string(),
                    error: format!("{e:#}"),
                });
            },
        }
    }

    let source = JsonReferenceSource::new(args.references);
    let correlator = Correlator::new(config.to_coverage_config());
    let reports = audit_documents(documents, &source, &correlator)?;

    let markup = Markup::compile()?;
    let options = SummaryOptions {
        sections: args.sections,
        details: args.details,
    };
    let run = ReportRun {
        generated_at: chrono::Utc::now(),
        reports: reports
            .iter()
            .map(|r| ReportSummary::new(r, options, &markup, |id| config.section_url(id)))
            .collect(),
        failures,
    };
    run.render(mode);

    if !run.failures.is_empty() {
        std::process::exit(1);
    }
    Ok(())
}
