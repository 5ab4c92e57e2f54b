//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use clap::Parser;
use std::path::PathBuf;

/// ScoreTally - sum score reports into a course total
///
/// Finds every `*-scores.csv` file under ROOT, takes the last row of each,
/// and prints per-task and total percentages.
///
/// Examples:
///   scoretally
///   scoretally path/to/course
///   scoretally --sort --suffix -grades.csv
///   scoretally --dry-run
///   scoretally --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Directory to scan for score files
    #[arg(value_name = "ROOT", default_value = ".")]
    pub root: PathBuf,

    /// Path to configuration file
    ///
    /// If not specified, looks for .scoretally.toml in the current directory
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// File name suffix of score reports (default: -scores.csv)
    #[arg(long, value_name = "SUFFIX", env = "SCORETALLY_SUFFIX")]
    pub suffix: Option<String>,

    /// Sort entries by name within each directory
    ///
    /// Without this, tasks are listed in file system order.
    #[arg(long)]
    pub sort: bool,

    /// Maximum directory depth below ROOT
    #[arg(long, value_name = "DEPTH")]
    pub max_depth: Option<usize>,

    /// Follow symbolic links while scanning
    #[arg(long)]
    pub follow_links: bool,

    /// Include files and directories whose names start with a dot
    #[arg(long)]
    pub include_hidden: bool,

    /// Header name of the points-earned column (default: score)
    #[arg(long, value_name = "NAME")]
    pub score_column: Option<String>,

    /// Header name of the points-possible column (default: max)
    #[arg(long, value_name = "NAME")]
    pub max_column: Option<String>,

    /// List the score files that would be read and exit
    #[arg(long)]
    pub dry_run: bool,

    /// Generate a default .scoretally.toml configuration file
    #[arg(long)]
    pub init_config: bool,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Only log errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        if self.init_config {
            return Ok(());
        }

        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        if let Some(ref suffix) = self.suffix {
            if suffix.is_empty() {
                return Err("Suffix must not be empty".to_string());
            }
        }

        if self.max_depth == Some(0) {
            return Err("Max depth must be at least 1".to_string());
        }

        for (flag, column) in [
            ("--score-column", &self.score_column),
            ("--max-column", &self.max_column),
        ] {
            if column.as_deref() == Some("") {
                return Err(format!("{} must not be empty", flag));
            }
        }

        if !self.root.exists() {
            return Err(format!(
                "Root directory does not exist: {}",
                self.root.display()
            ));
        }
        if !self.root.is_dir() {
            return Err(format!(
                "Root path is not a directory: {}",
                self.root.display()
            ));
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    ///
    /// `config_verbose` is the `[general] verbose` setting; `--quiet` wins
    /// over both. The default stays at WARN so a normal run writes only
    /// the report.
    pub fn log_level(&self, config_verbose: bool) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose || config_verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::WARN
        }
    }
}
