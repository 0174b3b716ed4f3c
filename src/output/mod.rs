//! Result documents
//!
//! A finished analysis is rendered completely before anything is written, so
//! a failed run never leaves a partial document behind.

pub mod csv;
pub mod json;
pub mod text;

use crate::config::{OutputConfig, OutputFormat};
use crate::coordinator::TransactionAnalysis;
use crate::stats::histogram::LatencyHistogram;
use crate::txnlog::microbench::MicrobenchResult;
use crate::Result;
use anyhow::Context;
use std::io::Write;

/// Everything an output format may need from one analysis
#[derive(Debug, Clone)]
pub enum Report {
    Transactions {
        analysis: TransactionAnalysis,
        /// Only built for the text report
        histogram: Option<LatencyHistogram>,
    },
    Microbench(MicrobenchResult),
}

/// Render `report` in `format`
pub fn render(report: &Report, format: OutputFormat) -> Result<String> {
    match (format, report) {
        (OutputFormat::Json, Report::Transactions { analysis, .. }) => json::to_json_string(&analysis.result),
        (OutputFormat::Json, Report::Microbench(result)) => json::to_json_string(result),
        (OutputFormat::Csv, Report::Transactions { analysis, .. }) => csv::to_csv_string(&analysis.result),
        (OutputFormat::Csv, Report::Microbench(result)) => csv::to_csv_string(result),
        (OutputFormat::Text, Report::Transactions { analysis, histogram }) => {
            text::format_transactions(analysis, histogram.as_ref())
        }
        (OutputFormat::Text, Report::Microbench(result)) => text::format_microbench(result),
    }
}

/// Render `report` and write it to the configured destination
pub fn write_report(report: &Report, output: &OutputConfig) -> Result<()> {
    let document = render(report, output.format)?;

    match &output.path {
        Some(path) => std::fs::write(path, document.as_bytes())
            .with_context(|| format!("Failed to write result to {}", path.display()))?,
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(document.as_bytes())
                .and_then(|_| stdout.flush())
                .context("Failed to write result to stdout")?;
        }
    }

    Ok(())
}
