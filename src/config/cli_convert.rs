//! CLI to Config conversion utilities

use crate::config::{cli, InputKind, OutputFormat};
use anyhow::{Context, Result};

/// Parse a duration string (e.g., "60", "90s", "2.5m", "500ms", "1h") to seconds
///
/// A bare number is taken as seconds, matching how benchmark drivers pass
/// their measurement windows.
pub fn parse_seconds(s: &str) -> Result<f64> {
    let s = s.trim().to_lowercase();

    let (num_str, multiplier) = if let Some(n) = s.strip_suffix("ms") {
        (n, 0.001)
    } else if let Some(n) = s.strip_suffix("sec").or_else(|| s.strip_suffix('s')) {
        (n, 1.0)
    } else if let Some(n) = s.strip_suffix("min").or_else(|| s.strip_suffix('m')) {
        (n, 60.0)
    } else if let Some(n) = s.strip_suffix("hr").or_else(|| s.strip_suffix('h')) {
        (n, 3600.0)
    } else {
        (s.as_str(), 1.0)
    };

    let num: f64 = num_str
        .trim()
        .parse()
        .with_context(|| format!("Invalid duration format: {}", s))?;

    Ok(num * multiplier)
}

/// Convert CLI FormatType to config OutputFormat
pub fn convert_format(cli_type: cli::FormatType) -> OutputFormat {
    match cli_type {
        cli::FormatType::Json => OutputFormat::Json,
        cli::FormatType::Text => OutputFormat::Text,
        cli::FormatType::Csv => OutputFormat::Csv,
    }
}

/// Convert CLI InputKindType to config InputKind
pub fn convert_input_kind(cli_type: cli::InputKindType) -> InputKind {
    match cli_type {
        cli::InputKindType::Transactions => InputKind::Transactions,
        cli::InputKindType::Microbench => InputKind::Microbench,
    }
}
