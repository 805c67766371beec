//! List the sections of an audit document

use std::path::Path;

use specaudit::adapters::xml;
use specaudit::output::{OutputMode, SectionListResult};

/// Print every section in hierarchical order
pub fn sections(audit: &Path, mode: OutputMode) -> anyhow::Result<()> {
    let document = xml::load_file(audit)?;
    SectionListResult::new(&document).render(mode);
    Ok(())
}
