//! Coordinator module
//!
//! Drives one analysis: load the client logs, partition the lines, fan the
//! partitions out to parallel workers, merge, and compute the summary.
//!
//! ```text
//! lines -> partition -> W x WorkerAggregator -> merge -> compute -> BenchmarkResult
//! ```
//!
//! A worker count of 1 is the sequential path; every worker count yields the
//! same result.

use crate::config::{AnalysisConfig, InputKind, OutputFormat};
use crate::error::{LogError, LogResult};
use crate::output::Report;
use crate::stats::aggregator::{aggregate_partitions, MergedStats, WorkerAggregator};
use crate::stats::histogram::LatencyHistogram;
use crate::stats::result::{compute, BenchmarkResult};
use crate::stats::window::{earliest_end_time, Window};
use crate::txnlog::partition::partition;
use crate::txnlog::{collect_lines, microbench, LogFile, LogLine};
use crate::Result;
use std::time::Instant;
use tracing::{debug, info};

/// Outcome of a per-transaction log analysis
#[derive(Debug, Clone)]
pub struct TransactionAnalysis {
    pub result: BenchmarkResult,
    /// Sorted groupings the result was computed from
    pub merged: MergedStats,
    /// Window applied to the entries, if windowing was enabled
    pub window: Option<Window>,
}

/// Analyze per-transaction log lines
///
/// # Errors
///
/// - [`LogError::EmptyInput`] if `lines` is empty
/// - [`LogError::MalformedLine`] for the first unparsable line in input order
/// - [`LogError::EmptyResult`] if windowing leaves no transactions
/// - [`LogError::InvalidDuration`] if the configured duration is not positive
/// - [`LogError::SumOverflow`] if an `extra` sum exceeds 64 bits
pub fn analyze_transactions(
    lines: &[LogLine<'_>],
    config: &AnalysisConfig,
) -> LogResult<TransactionAnalysis> {
    if lines.is_empty() {
        return Err(LogError::EmptyInput);
    }

    // Partitions past one per line would all be empty
    let workers = config.workers.clamp(1, lines.len());
    let partitions = partition(lines, workers);

    let window = if config.window {
        let first_end = earliest_end_time(&partitions)?;
        let window = Window::after_warmup(first_end, config.warmup_sec, config.duration_sec);
        debug!(start_sec = window.start_sec, end_sec = window.end_sec, "analysis window");
        Some(window)
    } else {
        None
    };

    let worker = WorkerAggregator::new(config.tracked_types, window);
    let merged = aggregate_partitions(&partitions, &worker)?;
    let result = compute(&merged, config.duration_sec)?;

    Ok(TransactionAnalysis {
        result,
        merged,
        window,
    })
}

/// Load every configured log file, in order
pub fn load_logs(config: &AnalysisConfig) -> LogResult<Vec<LogFile>> {
    config.logs.iter().map(|path| LogFile::open(path)).collect()
}

/// Run the configured analysis end to end
pub fn run(config: &AnalysisConfig) -> Result<Report> {
    let start = Instant::now();
    let files = load_logs(config)?;
    let lines = collect_lines(&files);
    info!(
        files = files.len(),
        lines = lines.len(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "logs loaded"
    );

    let start = Instant::now();
    let report = match config.input_kind {
        InputKind::Transactions => {
            let analysis = analyze_transactions(&lines, config)?;
            let histogram = if config.output.format == OutputFormat::Text {
                Some(LatencyHistogram::from_latencies(&analysis.merged.all)?)
            } else {
                None
            };
            Report::Transactions {
                analysis,
                histogram,
            }
        }
        InputKind::Microbench => Report::Microbench(microbench::summarize(&lines)?),
    };
    info!(
        workers = config.workers,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "analysis complete"
    );

    Ok(report)
}
