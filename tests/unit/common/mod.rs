//! Shared test fixtures and helpers
//!
//! This module provides common utilities for testing specaudit components.

use std::fs;
use std::path::{Path, PathBuf};

use specaudit::adapters::json::JsonReferenceSource;
use specaudit::adapters::xml;
use specaudit::core::models::{AuditDocument, SpecReference};
use tempfile::TempDir;

/// Path of a file under `tests/fixtures`
pub fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures").join(name)
}

/// The CDI audit: generated section ids
///
/// ```text
/// 1    concepts      a, b (untestable)
/// 1.1  capabilities  group { a, b }
/// 1.2  scopes        a
/// 2    lifecycle     a (implied)
/// ```
pub fn cdi_document() -> AuditDocument {
    xml::load_file(&fixture("cdi-audit.xml")).unwrap()
}

/// The Interceptors audit: ids as written (1, 1.1, 2)
pub fn interceptors_document() -> AuditDocument {
    xml::load_file(&fixture("interceptors-audit.xml")).unwrap()
}

/// References of the CDI fixture
pub fn cdi_references() -> Vec<SpecReference> {
    JsonReferenceSource::read_file(&fixture("references/cdi.json")).unwrap()
}

/// A reference with a fixed test class
pub fn reference(
    spec_id: &str,
    version: Option<&str>,
    section: &str,
    assertion: &str,
    groups: &[&str],
) -> SpecReference {
    SpecReference {
        spec_id: spec_id.to_string(),
        spec_version: version.map(ToString::to_string),
        section: section.to_string(),
        assertion: assertion.to_string(),
        package: "org.example.tck".to_string(),
        class: "ExampleTest".to_string(),
        method: format!("test_{section}_{assertion}").replace('.', "_"),
        groups: groups.iter().map(ToString::to_string).collect(),
        archive: None,
    }
}

/// A scratch directory for audit, reference and config files
pub struct Workspace {
    dir: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("failed to create temp dir"),
        }
    }

    /// Get the root path of the workspace
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write a file, creating parent directories
    pub fn write(&self, path: &str, content: &str) -> PathBuf {
        let full_path = self.dir.path().join(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&full_path, content).unwrap();
        full_path
    }

    /// Copy a fixture into the workspace under the same name
    pub fn copy_fixture(&self, name: &str) -> PathBuf {
        let content = fs::read_to_string(fixture(name)).unwrap();
        self.write(name, &content)
    }
}

impl Default for Workspace {
    fn default() -> Self {
        Self::new()
    }
}
