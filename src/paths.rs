//! Centralized path definitions for specaudit
//!
//! ## Configuration lookup
//!
//! ```text
//! ./specaudit.toml                      # per-project, next to the audit files
//! <config_dir>/specaudit/config.toml    # per-user (XDG on Linux)
//! ```
//!
//! An explicit `--config` path always wins over both.

use std::path::{Path, PathBuf};

/// Project configuration filename
pub const PROJECT_CONFIG: &str = "specaudit.toml";

/// Global config directory name
const GLOBAL_DIR: &str = "specaudit";

/// Global config filename
const GLOBAL_CONFIG_FILE: &str = "config.toml";

/// Get the project configuration path inside `dir`.
#[must_use]
pub fn project_config(dir: &Path) -> PathBuf {
    dir.join(PROJECT_CONFIG)
}

/// Get the global specaudit directory.
///
/// Returns `<config_dir>/specaudit/`, falling back to `~/.config/specaudit/`.
#[must_use]
pub fn global_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("~").join(".config"))
        .join(GLOBAL_DIR)
}

/// Get the global config file path.
#[must_use]
pub fn global_config() -> PathBuf {
    global_config_dir().join(GLOBAL_CONFIG_FILE)
}
