//! Reference source backed by JSON files
//!
//! Each file holds one array of references. A directory is searched
//! recursively for `*.json` files, skipping hidden entries.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use walkdir::WalkDir;

use crate::core::models::SpecReference;
use crate::core::ports::ReferenceSource;

/// References read from JSON files and directories
#[derive(Debug, Clone, Default)]
pub struct JsonReferenceSource {
    paths: Vec<PathBuf>,
}

impl JsonReferenceSource {
    /// Create a source over files or directories
    #[must_use]
    pub const fn new(paths: Vec<PathBuf>) -> Self {
        Self { paths }
    }

    /// Configured paths
    #[must_use]
    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    /// Every JSON file under the configured paths, sorted per path
    pub fn files(&self) -> anyhow::Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        for path in &self.paths {
            if path.is_dir() {
                files.extend(Self::json_files_in(path)?);
            } else if path.exists() {
                files.push(path.clone());
            } else {
                anyhow::bail!("reference path does not exist: {}", path.display());
            }
        }
        Ok(files)
    }

    fn json_files_in(root: &Path) -> anyhow::Result<Vec<PathBuf>> {
        let mut found = Vec::new();
        for entry in WalkDir::new(root).follow_links(true).into_iter().filter_entry(|e| {
            e.path() == root || !Self::is_hidden(e)
        }) {
            let entry = entry?;
            if entry.file_type().is_file()
                && entry.path().extension().is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
            {
                found.push(entry.into_path());
            }
        }

        // Sort for deterministic output
        found.sort();
        Ok(found)
    }

    fn is_hidden(entry: &walkdir::DirEntry) -> bool {
        entry.file_name().to_str().is_some_and(|s| s.starts_with('.'))
    }

    /// Read the references of one file
    pub fn read_file(path: &Path) -> anyhow::Result<Vec<SpecReference>> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("invalid reference file {}", path.display()))
    }
}

impl ReferenceSource for JsonReferenceSource {
    fn load(&self) -> anyhow::Result<Vec<SpecReference>> {
        let mut references = Vec::new();
        for file in self.files()? {
            let loaded = Self::read_file(&file)?;
            log::debug!("loaded {} reference(s) from {}", loaded.len(), file.display());
            references.extend(loaded);
        }
        Ok(references)
    }
}
