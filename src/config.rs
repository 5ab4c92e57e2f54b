//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.scoretally.toml` files.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Name of the configuration file looked up in the current directory.
pub const CONFIG_FILE_NAME: &str = ".scoretally.toml";

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Scanner settings.
    #[serde(default)]
    pub scanner: ScannerConfig,

    /// CSV column names.
    #[serde(default)]
    pub columns: ColumnConfig,
}

/// General application settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Enable verbose logging by default.
    #[serde(default)]
    pub verbose: bool,
}

/// Score file discovery settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScannerConfig {
    /// File name suffix marking a score report.
    #[serde(default = "default_suffix")]
    pub suffix: String,

    /// Descend into and match entries whose names start with a dot.
    #[serde(default)]
    pub include_hidden: bool,

    /// Follow symbolic links while walking.
    #[serde(default)]
    pub follow_links: bool,

    /// Sort entries by name within each directory.
    #[serde(default)]
    pub sort_paths: bool,

    /// Maximum directory depth below the root.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_depth: Option<usize>,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            suffix: default_suffix(),
            include_hidden: false,
            follow_links: false,
            sort_paths: false,
            max_depth: None,
        }
    }
}

fn default_suffix() -> String {
    "-scores.csv".to_string()
}

/// Header names of the required CSV columns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnConfig {
    /// Column holding points earned.
    #[serde(default = "default_score_column")]
    pub score: String,

    /// Column holding points possible.
    #[serde(default = "default_max_column")]
    pub max: String,
}

impl Default for ColumnConfig {
    fn default() -> Self {
        Self {
            score: default_score_column(),
            max: default_max_column(),
        }
    }
}

fn default_score_column() -> String {
    "score".to_string()
}

fn default_max_column() -> String {
    "max".to_string()
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        let default_path = Path::new(CONFIG_FILE_NAME);

        if default_path.exists() {
            Ok(Some(Self::load(default_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// Only values the user actually passed on the command line override
    /// the file.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        if let Some(ref suffix) = args.suffix {
            self.scanner.suffix = suffix.clone();
        }
        if let Some(depth) = args.max_depth {
            self.scanner.max_depth = Some(depth);
        }

        // Flags only ever switch behavior on
        if args.sort {
            self.scanner.sort_paths = true;
        }
        if args.follow_links {
            self.scanner.follow_links = true;
        }
        if args.include_hidden {
            self.scanner.include_hidden = true;
        }
        if args.verbose {
            self.general.verbose = true;
        }

        if let Some(ref column) = args.score_column {
            self.columns.score = column.clone();
        }
        if let Some(ref column) = args.max_column {
            self.columns.max = column.clone();
        }
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}
