//! ScoreTally - course score aggregator
//!
//! Scans a directory tree for `*-scores.csv` reports, takes the last
//! recorded row of each, and prints per-task and total percentages.
//!
//! Exit codes:
//!   0 - Success
//!   1 - Any error (bad arguments, unreadable or malformed score file,
//!       zero denominator, no score files found)

mod analysis;
mod cli;
mod config;
mod error;
mod models;
mod parser;
mod report;
mod scanner;

use anyhow::{Context, Result};
use cli::Args;
use config::{Config, CONFIG_FILE_NAME};
use parser::Columns;
use std::io::Write;
use std::path::PathBuf;
use tracing::{debug, info, warn};
use tracing_subscriber::FmtSubscriber;

fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        return handle_init_config();
    }

    // Config is loaded first since `[general] verbose` sets the log level
    let (mut config, source) = match load_config(&args) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    };
    config.merge_with_args(&args);

    init_logging(args.log_level(config.general.verbose));

    info!("ScoreTally v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);
    log_config_source(&source);

    if let Err(e) = run(&args, &config) {
        debug!("Aggregation failed: {:?}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}

/// Handle --init-config: generate a default .scoretally.toml.
fn handle_init_config() -> Result<()> {
    let path = std::path::Path::new(CONFIG_FILE_NAME);

    if path.exists() {
        eprintln!("{} already exists. Remove it first or edit it manually.", CONFIG_FILE_NAME);
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content)
        .with_context(|| format!("Failed to write {}", CONFIG_FILE_NAME))?;

    println!("Created {} with default settings.", CONFIG_FILE_NAME);
    Ok(())
}

/// Initialize logging at the given level.
///
/// Logs go to stderr; stdout carries only the report.
fn init_logging(level: tracing::Level) {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
    }
}

/// Discover score files and print the report.
fn run(args: &Args, config: &Config) -> Result<()> {
    debug!("Effective config: {:?}", config);

    let scan_config = scanner::ScanConfig::from(&config.scanner);
    let file_scanner = scanner::FileScanner::new(args.root.clone(), scan_config);
    let files = file_scanner.discover()?;
    info!("Found {} score files under {}", files.len(), args.root.display());

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    if args.dry_run {
        return handle_dry_run(&files, &mut out);
    }

    let columns = Columns::from(&config.columns);
    let result = analysis::run(&files, &columns, &mut out);
    out.flush().context("Failed to flush report")?;
    result.map(|_| ())
}

/// Handle --dry-run: list discovered files without parsing them.
fn handle_dry_run<W: Write>(files: &[models::ScoreFile], out: &mut W) -> Result<()> {
    if files.is_empty() {
        writeln!(out, "No score files found.")?;
        return Ok(());
    }

    for file in files {
        writeln!(out, "{} (task: {})", file.relative_path.display(), file.task)?;
    }
    writeln!(out, "{} score files", files.len())?;
    Ok(())
}

/// Where the configuration came from, logged once logging is set up.
#[derive(Debug)]
enum ConfigSource {
    Explicit(PathBuf),
    DefaultFile,
    Builtin,
    /// The default file exists but could not be loaded.
    BrokenDefault(anyhow::Error),
}

/// Load configuration from file or use defaults.
///
/// An explicit `--config` path must load; a broken default file falls
/// back to the built-in defaults.
fn load_config(args: &Args) -> Result<(Config, ConfigSource)> {
    // Try explicit config path
    if let Some(ref config_path) = args.config {
        let config = Config::load(config_path)?;
        return Ok((config, ConfigSource::Explicit(config_path.clone())));
    }

    // Try default location
    match Config::load_default() {
        Ok(Some(config)) => Ok((config, ConfigSource::DefaultFile)),
        Ok(None) => Ok((Config::default(), ConfigSource::Builtin)),
        Err(e) => Ok((Config::default(), ConfigSource::BrokenDefault(e))),
    }
}

fn log_config_source(source: &ConfigSource) {
    match source {
        ConfigSource::Explicit(path) => info!("Loaded config from: {}", path.display()),
        ConfigSource::DefaultFile => info!("Loaded default config from {}", CONFIG_FILE_NAME),
        ConfigSource::Builtin => debug!("No config file found, using defaults"),
        ConfigSource::BrokenDefault(e) => warn!("Failed to load config: {:#}", e),
    }
}
