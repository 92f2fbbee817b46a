//! Plugin configuration.
//!
//! Handles loading and validating the `script-meta.toml` file that tells the
//! generator how to label the package and its folders.
//!
//! ## Configuration Options
//!
//! ```toml
//! package = "my-scripts"                 # Root document name (required)
//! packageDescription = "Useful scripts"  # Root document description
//! packageIcon = "assets/icon.png"        # Local path or http(s) URL
//! readmeFile = "README.md"               # Copied verbatim to the output root
//! environment = "production"             # or "development"
//! sites = ["https://example.com"]        # Passed through to the root document
//!
//! [[folderDescriptionList]]
//! path = "/tools"                        # Rooted, `/`-joined directory path
//! description = "Everyday tools"
//! iconPath = "assets/tools.png"
//! defaultAction = "run"
//! ```
//!
//! Every key except `package` is optional. Unknown keys are rejected to catch
//! typos early, and the whole file is validated before any tree work starts.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Default configuration file name, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "script-meta.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Which line-break encoding the bundled artifacts carry.
///
/// Development bundles still hold escaped `\n`/`\r` sequences inside their
/// module strings; production bundles have real line breaks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    #[default]
    Production,
}

/// Per-directory annotation supplied by the operator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct FolderDescription {
    /// Rooted directory path, e.g. `/tools/net`. Matched exactly.
    pub path: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub icon_path: Option<String>,
    #[serde(default)]
    pub default_action: Option<String>,
}

/// Generator configuration loaded from `script-meta.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PluginConfig {
    /// Package name, used as the root document's name.
    pub package: String,
    #[serde(default)]
    pub package_description: String,
    #[serde(default)]
    pub package_icon: Option<String>,
    /// README file (relative to the context directory) copied to the output root.
    #[serde(default)]
    pub readme_file: Option<String>,
    /// Opaque list passed through into the root document.
    #[serde(default)]
    pub sites: Vec<serde_json::Value>,
    #[serde(default)]
    pub environment: Environment,
    #[serde(default)]
    pub folder_description_list: Vec<FolderDescription>,
}

impl PluginConfig {
    /// Validate shape constraints that serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.package.trim().is_empty() {
            return Err(ConfigError::Validation("package must not be empty".into()));
        }
        check_reference("packageIcon", self.package_icon.as_deref())?;
        check_reference("readmeFile", self.readme_file.as_deref())?;

        let mut seen = HashSet::new();
        for folder in &self.folder_description_list {
            if folder.path.is_empty() {
                return Err(ConfigError::Validation(
                    "folderDescriptionList entries need a non-empty path".into(),
                ));
            }
            if has_dot_segment(&folder.path) {
                return Err(ConfigError::Validation(format!(
                    "folder path {:?} must not contain '.' or '..' segments",
                    folder.path
                )));
            }
            if !seen.insert(folder.path.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "folder path {:?} is listed more than once",
                    folder.path
                )));
            }
            check_reference("iconPath", folder.icon_path.as_deref())?;
        }
        Ok(())
    }
}

fn check_reference(key: &str, value: Option<&str>) -> Result<(), ConfigError> {
    match value {
        Some(v) if v.trim().is_empty() => Err(ConfigError::Validation(format!(
            "{key} must not be empty when set"
        ))),
        _ => Ok(()),
    }
}

fn has_dot_segment(path: &str) -> bool {
    path.split('/').any(|segment| segment == "." || segment == "..")
}

/// Parse and validate a configuration from TOML text.
pub fn parse_config(content: &str) -> Result<PluginConfig, ConfigError> {
    let config: PluginConfig = toml::from_str(content)?;
    config.validate()?;
    Ok(config)
}

/// Load and validate the configuration file at `path`.
pub fn load_config(path: &Path) -> Result<PluginConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

/// Returns a fully-commented stock `script-meta.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# script-meta configuration
# =========================
# Only `package` is required. Unknown keys cause an error.

# Name of the root meta.json document.
package = "my-scripts"

# Description of the root meta.json document.
packageDescription = ""

# Icon for the root document. Local paths are resolved against the context
# directory and copied under icons/; http(s) URLs are kept as-is.
# packageIcon = "assets/icon.png"

# README copied verbatim to the output root.
# readmeFile = "README.md"

# "production" splits artifact text on real line breaks; "development"
# splits on the escaped \n sequences left in unminified bundles.
environment = "production"

# Passed through untouched into the root document.
sites = []

# ---------------------------------------------------------------------------
# Folder annotations
# ---------------------------------------------------------------------------
# One table per directory. `path` is rooted and matched exactly; entries
# whose path matches no output directory are ignored.
#
# [[folderDescriptionList]]
# path = "/tools"
# description = "Everyday tools"
# iconPath = "assets/tools.png"
# defaultAction = "run"
"##
}
