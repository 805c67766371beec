//! Report configuration
//!
//! Thresholds, test-group lists and source link settings for a report run.
//! Loaded from TOML; see [`paths`] for the lookup order.
//!
//! ```toml
//! target_version = "2.0"
//! pass_threshold = 75
//! fail_threshold = 50
//! unimplemented_test_groups = ["broken"]
//! summary_test_groups = ["integration"]
//!
//! [links]
//! github_base_url = "https://github.com/org/tck/tree/main/src/test/java"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::models::{DEFAULT_FAIL_THRESHOLD, DEFAULT_PASS_THRESHOLD, Thresholds};
use crate::core::services::{CoverageConfig, LinkSettings};
use crate::paths;

/// Errors while loading or validating configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read
    #[error("failed to read {path}: {source}")]
    Read {
        /// Config file path
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },

    /// The file is not valid TOML for this schema
    #[error("invalid configuration in {path}: {source}")]
    Parse {
        /// Config file path
        path: PathBuf,
        /// Underlying error
        source: toml::de::Error,
    },

    /// A threshold lies outside `0..=100`
    #[error("{name} threshold {value} is outside 0..=100")]
    ThresholdRange {
        /// Which threshold
        name: &'static str,
        /// Offending value
        value: f64,
    },

    /// The fail threshold is above the pass threshold
    #[error("fail threshold {fail} is above pass threshold {pass}")]
    ThresholdOrder {
        /// Pass threshold
        pass: f64,
        /// Fail threshold
        fail: f64,
    },
}

/// Report configuration file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Version references must declare; each document's own when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_version: Option<String>,
    /// Coverage at or above this passes
    pub pass_threshold: f64,
    /// Coverage below this fails
    pub fail_threshold: f64,
    /// Test groups whose tests do not count as implemented
    pub unimplemented_test_groups: Vec<String>,
    /// Test groups listed in the report
    pub summary_test_groups: Vec<String>,
    /// Base URL of the published specification, used for section anchors
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specification_base_url: Option<String>,
    /// Source link settings
    pub links: LinkConfig,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            target_version: None,
            pass_threshold: DEFAULT_PASS_THRESHOLD,
            fail_threshold: DEFAULT_FAIL_THRESHOLD,
            unimplemented_test_groups: Vec::new(),
            summary_test_groups: Vec::new(),
            specification_base_url: None,
            links: LinkConfig::default(),
        }
    }
}

/// `[links]` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkConfig {
    /// GitHub tree URL of the test sources
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github_base_url: Option<String>,
    /// Subversion URL of the test sources
    #[serde(skip_serializing_if = "Option::is_none")]
    pub svn_base_url: Option<String>,
    /// Fisheye URL of the test sources
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fisheye_base_url: Option<String>,
    /// File extension of test sources
    pub source_extension: String,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            github_base_url: None,
            svn_base_url: None,
            fisheye_base_url: None,
            source_extension: "java".to_string(),
        }
    }
}

/// Values given on the command line, applied over the file
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigOverrides {
    /// `--target-version`
    pub target_version: Option<String>,
    /// `--pass`
    pub pass_threshold: Option<f64>,
    /// `--fail`
    pub fail_threshold: Option<f64>,
    /// `--unimplemented`; replaces the file list when non-empty
    pub unimplemented_test_groups: Vec<String>,
}

impl ReportConfig {
    /// Parse and validate TOML content
    pub fn parse(content: &str, origin: &Path) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: origin.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load one configuration file
    pub fn load_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content, path)
    }

    /// Load configuration using the standard lookup order
    ///
    /// An explicit path must exist; the project and global files are
    /// optional and defaults apply when neither is present.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let project = paths::project_config(Path::new("."));
        match Self::locate(explicit, &project, &paths::global_config()) {
            Some(path) => {
                log::debug!("using configuration {}", path.display());
                Self::load_file(&path)
            },
            None => {
                log::debug!("no configuration file found, using defaults");
                Ok(Self::default())
            },
        }
    }

    /// First configuration file in lookup order
    #[must_use]
    pub fn locate(explicit: Option<&Path>, project: &Path, global: &Path) -> Option<PathBuf> {
        if let Some(path) = explicit {
            return Some(path.to_path_buf());
        }
        [project, global].into_iter().find(|p| p.is_file()).map(Path::to_path_buf)
    }

    /// Check threshold ranges and order
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [("pass", self.pass_threshold), ("fail", self.fail_threshold)] {
            if !(0.0..=100.0).contains(&value) {
                return Err(ConfigError::ThresholdRange { name, value });
            }
        }
        if self.fail_threshold > self.pass_threshold {
            return Err(ConfigError::ThresholdOrder {
                pass: self.pass_threshold,
                fail: self.fail_threshold,
            });
        }
        Ok(())
    }

    /// Apply command-line overrides and validate the result
    pub fn with_overrides(mut self, overrides: ConfigOverrides) -> Result<Self, ConfigError> {
        if overrides.target_version.is_some() {
            self.target_version = overrides.target_version;
        }
        if let Some(pass) = overrides.pass_threshold {
            self.pass_threshold = pass;
        }
        if let Some(fail) = overrides.fail_threshold {
            self.fail_threshold = fail;
        }
        if !overrides.unimplemented_test_groups.is_empty() {
            self.unimplemented_test_groups = overrides.unimplemented_test_groups;
        }
        self.validate()?;
        Ok(self)
    }

    /// Thresholds as a model value
    #[must_use]
    pub const fn thresholds(&self) -> Thresholds {
        Thresholds {
            pass: self.pass_threshold,
            fail: self.fail_threshold,
        }
    }

    /// Settings for the correlator
    #[must_use]
    pub fn to_coverage_config(&self) -> CoverageConfig {
        let clean = |groups: &[String]| -> Vec<String> {
            groups
                .iter()
                .map(|g| g.trim().to_string())
                .filter(|g| !g.is_empty())
                .collect()
        };

        CoverageConfig {
            target_version: self.target_version.clone(),
            unimplemented_groups: clean(&self.unimplemented_test_groups).into_iter().collect(),
            summary_groups: clean(&self.summary_test_groups),
            thresholds: self.thresholds(),
            links: LinkSettings {
                github_base_url: self.links.github_base_url.clone(),
                svn_base_url: self.links.svn_base_url.clone(),
                fisheye_base_url: self.links.fisheye_base_url.clone(),
                source_extension: self.links.source_extension.clone(),
            },
        }
    }

    /// Anchor URL of a section in the published specification
    #[must_use]
    pub fn section_url(&self, original_id: &str) -> Option<String> {
        self.specification_base_url
            .as_deref()
            .map(|base| format!("{}#{original_id}", base.trim_end_matches('#')))
    }
}
