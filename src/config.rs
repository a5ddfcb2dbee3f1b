//! Report configuration.
//!
//! Handles loading and validating `webreltree.toml`. Every CLI flag has a
//! config-file counterpart so a recurring export can live next to the
//! snapshot it exports; flags override file values, file values override
//! stock defaults.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! database = "tree.json"        # Snapshot file (or directory containing it)
//! output = "webreltree"         # Output directory for persons.js + thumbs/
//! start_person = ""             # Id of the chart's center person
//! link_prefix = ""              # Prefix for personal-page links; empty = no links
//! include_private = false       # Export records marked private
//!
//! [thumbnails]
//! size = 96                     # Longest thumbnail edge in pixels
//! cache_dir = ".webreltree-cache"  # Where generated thumbnails are kept
//! ```
//!
//! Config files are sparse; override just the values you want. Unknown
//! keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Default config filename looked up in the working directory.
pub const CONFIG_FILENAME: &str = "webreltree.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Report configuration loaded from `webreltree.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReportConfig {
    /// Snapshot file, or a directory holding `tree.json`.
    pub database: String,
    /// Output directory for the data file and thumbnails.
    pub output: String,
    /// Center person id, passed through to the chart unresolved.
    pub start_person: String,
    /// Link prefix for personal pages; empty disables links.
    pub link_prefix: String,
    /// Export records marked private.
    pub include_private: bool,
    pub thumbnails: ThumbnailsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThumbnailsConfig {
    /// Longest edge of generated thumbnails, in pixels.
    pub size: u32,
    /// Cache directory for generated thumbnails.
    pub cache_dir: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            database: "tree.json".to_string(),
            output: "webreltree".to_string(),
            start_person: String::new(),
            link_prefix: String::new(),
            include_private: false,
            thumbnails: ThumbnailsConfig::default(),
        }
    }
}

impl Default for ThumbnailsConfig {
    fn default() -> Self {
        Self {
            size: 96,
            cache_dir: ".webreltree-cache".to_string(),
        }
    }
}

impl ReportConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.database.is_empty() {
            return Err(ConfigError::Validation("database must not be empty".into()));
        }
        if self.thumbnails.size == 0 {
            return Err(ConfigError::Validation(
                "thumbnails.size must be non-zero".into(),
            ));
        }
        Ok(())
    }
}

/// Load config from a file, falling back to defaults when it is absent.
pub fn load_config(path: &Path) -> Result<ReportConfig, ConfigError> {
    if !path.exists() {
        return Ok(ReportConfig::default());
    }
    let content = fs::read_to_string(path)?;
    let config: ReportConfig = toml::from_str(&content)?;
    config.validate()?;
    Ok(config)
}

/// A fully documented stock config, printed by `gen-config`.
pub fn stock_config_toml() -> String {
    let defaults = ThumbnailsConfig::default();
    format!(
        r#"# webreltree configuration
# All options are optional - the values below are the defaults.

# Snapshot file (or a directory containing tree.json)
database = "tree.json"

# Output directory for persons.js and the thumbs/ folder
output = "webreltree"

# Id of the person the chart opens centered on
start_person = ""

# Prefix joined onto personal-page links; leave empty for no links
link_prefix = ""

# Export records marked private
include_private = false

[thumbnails]
# Longest thumbnail edge in pixels
size = {}

# Where generated thumbnails are cached between runs
cache_dir = "{}"
"#,
        defaults.size, defaults.cache_dir
    )
}
