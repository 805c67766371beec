//! Audit service - correlates documents against a reference source

use std::collections::HashMap;

use crate::core::models::{AuditDocument, CoverageReport, SpecReference};
use crate::core::ports::ReferenceSource;

use super::Correlator;

/// Group references by the specification they target
#[must_use]
pub fn split_by_spec(references: Vec<SpecReference>) -> HashMap<String, Vec<SpecReference>> {
    let mut by_spec: HashMap<String, Vec<SpecReference>> = HashMap::new();
    for reference in references {
        by_spec.entry(reference.spec_id.clone()).or_default().push(reference);
    }
    by_spec
}

/// Correlate each document with the references targeting its spec id
///
/// Documents are independent: each gets its own correlation pass and the
/// references of other specifications never reach it.
pub fn audit_documents(
    documents: Vec<AuditDocument>,
    source: &dyn ReferenceSource,
    correlator: &Correlator,
) -> anyhow::Result<Vec<CoverageReport>> {
    let by_spec = split_by_spec(source.load()?);

    let orphaned: usize = by_spec
        .iter()
        .filter(|(spec_id, _)| !documents.iter().any(|d| d.spec_id() == spec_id.as_str()))
        .map(|(_, refs)| refs.len())
        .sum();
    if orphaned > 0 {
        log::debug!("{orphaned} reference(s) target no loaded specification");
    }

    Ok(documents
        .into_iter()
        .map(|document| {
            let references = by_spec.get(document.spec_id()).cloned().unwrap_or_default();
            log::debug!("correlating {} reference(s) with {}", references.len(), document.spec_id());
            correlator.correlate(document, references)
        })
        .collect())
}
