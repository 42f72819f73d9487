//! Run configuration for scriptbundle.
//!
//! An optional `scriptbundle.toml` in the working directory (or the file
//! passed with `--config`) provides project settings. CLI flags override
//! config file values, which override defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, ScriptBundleError};

/// Default configuration file name, looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "scriptbundle.toml";

/// Directory searched for source files.
pub const DEFAULT_ROOT_DIR: &str = "Assets";

/// Directory that receives the versioned bundles.
pub const DEFAULT_OUTPUT_DIR: &str = "AllScripts_CS";

/// Filename prefix of every versioned bundle.
pub const DEFAULT_BASE_NAME: &str = "AllScripts";

/// Extension of the files to collect.
pub const DEFAULT_EXTENSION: &str = ".cs";

// ---------------------------------------------------------------------------
// BundleConfig
// ---------------------------------------------------------------------------

/// Immutable configuration handed to the bundling pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BundleConfig {
    /// Root directory searched recursively for source files.
    #[serde(default = "default_root_dir")]
    pub root_dir: PathBuf,

    /// Directory holding the versioned output files.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Output filename prefix (`<base_name><NNNN>.txt`).
    #[serde(default = "default_base_name")]
    pub base_name: String,

    /// Target extension. `cs`, `.cs` and `*.cs` are equivalent.
    #[serde(default = "default_extension")]
    pub extension: String,

    /// Descend into dot-directories and collect dot-files.
    #[serde(default)]
    pub include_hidden: bool,
}

impl Default for BundleConfig {
    fn default() -> Self {
        Self {
            root_dir: default_root_dir(),
            output_dir: default_output_dir(),
            base_name: default_base_name(),
            extension: default_extension(),
            include_hidden: false,
        }
    }
}

fn default_root_dir() -> PathBuf {
    DEFAULT_ROOT_DIR.into()
}
fn default_output_dir() -> PathBuf {
    DEFAULT_OUTPUT_DIR.into()
}
fn default_base_name() -> String {
    DEFAULT_BASE_NAME.into()
}
fn default_extension() -> String {
    DEFAULT_EXTENSION.into()
}

impl BundleConfig {
    /// The extension as a filename suffix with exactly one leading dot.
    pub fn normalized_extension(&self) -> String {
        normalize_extension(&self.extension)
    }

    /// Reject configurations the pipeline cannot honour.
    pub fn validate(&self) -> Result<()> {
        if self.base_name.trim().is_empty() {
            return Err(ScriptBundleError::config("base_name must not be empty"));
        }
        if self.base_name.contains(['/', '\\']) {
            return Err(ScriptBundleError::config(format!(
                "base_name '{}' must not contain a path separator",
                self.base_name
            )));
        }
        if self.normalized_extension().len() <= 1 {
            return Err(ScriptBundleError::config(format!(
                "extension '{}' is empty",
                self.extension
            )));
        }
        Ok(())
    }
}

/// Turn `cs`, `.cs` or `*.cs` into `.cs`.
pub fn normalize_extension(raw: &str) -> String {
    let trimmed = raw.trim().trim_start_matches('*').trim_start_matches('.');
    format!(".{trimmed}")
}

// ---------------------------------------------------------------------------
// Overrides
// ---------------------------------------------------------------------------

/// Per-field overrides, typically collected from CLI flags.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub root_dir: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub base_name: Option<String>,
    pub extension: Option<String>,
    pub include_hidden: Option<bool>,
}

impl BundleConfig {
    /// Apply overrides on top of this config, field by field.
    pub fn with_overrides(self, overrides: ConfigOverrides) -> Self {
        Self {
            root_dir: overrides.root_dir.unwrap_or(self.root_dir),
            output_dir: overrides.output_dir.unwrap_or(self.output_dir),
            base_name: overrides.base_name.unwrap_or(self.base_name),
            extension: overrides.extension.unwrap_or(self.extension),
            include_hidden: overrides.include_hidden.unwrap_or(self.include_hidden),
        }
    }
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Load the config for a run.
///
/// An explicit path must exist. Without one, `scriptbundle.toml` in `cwd` is
/// used when present and defaults otherwise.
pub fn load_config(explicit: Option<&Path>, cwd: &Path) -> Result<BundleConfig> {
    match explicit {
        Some(path) => {
            if !path.exists() {
                return Err(ScriptBundleError::config(format!(
                    "config file {} does not exist",
                    path.display()
                )));
            }
            load_config_from(path)
        }
        None => {
            let path = cwd.join(CONFIG_FILE_NAME);
            if !path.exists() {
                tracing::debug!(?path, "config file not found, using defaults");
                return Ok(BundleConfig::default());
            }
            load_config_from(&path)
        }
    }
}

/// Load the config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<BundleConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| ScriptBundleError::io(path, e))?;

    let config: BundleConfig = toml::from_str(&content).map_err(|e| {
        ScriptBundleError::config(format!("failed to parse {}: {e}", path.display()))
    })?;
    tracing::debug!(?path, "loaded config file");
    Ok(config)
}
