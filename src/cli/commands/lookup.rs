//! Look up one assertion

use std::path::Path;

use specaudit::adapters::xml;
use specaudit::core::services::Markup;
use specaudit::output::{LookupResult, OutputMode};

/// Print one assertion; exits with status 1 when it does not exist
pub fn lookup(
    audit: &Path,
    section: &str,
    assertion: &str,
    mode: OutputMode,
) -> anyhow::Result<()> {
    let document = xml::load_file(audit)?;
    let markup = Markup::compile()?;

    let result = LookupResult::new(&document, section, assertion);
    result.render(mode, &markup);

    if !result.found {
        std::process::exit(1);
    }
    Ok(())
}
