//! TOML analysis file parsing
//!
//! ```toml
//! logs = ["client-0.log", "client-1.log"]
//! duration_sec = 150.0
//! warmup_sec = 60.0
//! window = true
//! workers = 8
//!
//! [tracked_types]
//! follow = 2
//! tweet = 3
//!
//! [output]
//! format = "json"
//! ```

use super::cli::Cli;
use super::cli_convert::{convert_format, convert_input_kind, parse_seconds};
use super::*;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Parse TOML analysis file
pub fn parse_toml_file(path: &Path) -> Result<AnalysisConfig> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    parse_toml_string(&contents)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Parse TOML analysis configuration from string
pub fn parse_toml_string(contents: &str) -> Result<AnalysisConfig> {
    let config: AnalysisConfig = ::toml::from_str(contents)
        .context("Failed to parse TOML configuration")?;

    Ok(config)
}

/// Merge CLI arguments with an analysis configuration (CLI takes precedence)
pub fn merge_cli_with_config(cli: &Cli, mut config: AnalysisConfig) -> Result<AnalysisConfig> {
    if !cli.logs.is_empty() {
        config.logs = cli.logs.clone();
    }

    if let Some(duration) = &cli.duration {
        config.duration_sec = parse_seconds(duration).context("Invalid duration")?;
    }
    if let Some(warmup) = &cli.warmup {
        config.warmup_sec = parse_seconds(warmup).context("Invalid warmup")?;
    }
    if cli.window {
        config.window = true;
    }

    if let Some(workers) = cli.workers {
        config.workers = workers;
    }
    if let Some(kind) = cli.input_kind {
        config.input_kind = convert_input_kind(kind);
    }

    if let Some(follow) = cli.follow_txn_type {
        config.tracked_types.follow = follow;
    }
    if let Some(tweet) = cli.tweet_txn_type {
        config.tracked_types.tweet = tweet;
    }

    if let Some(format) = cli.format {
        config.output.format = convert_format(format);
    }
    if let Some(path) = &cli.output {
        config.output.path = Some(path.clone());
    }

    Ok(config)
}

/// Build the analysis configuration from CLI arguments and an optional analysis file
pub fn build_config(cli: &Cli) -> Result<AnalysisConfig> {
    let base = match &cli.config {
        Some(path) => parse_toml_file(path)?,
        None => AnalysisConfig::default(),
    };
    merge_cli_with_config(cli, base)
}
