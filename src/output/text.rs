//! Human-readable text output

use crate::coordinator::TransactionAnalysis;
use crate::stats::histogram::{LatencyHistogram, REPORT_PERCENTILES};
use crate::stats::LatencySummary;
use crate::txnlog::microbench::MicrobenchResult;
use crate::util::time::{format_micros, format_percent, format_rate, format_unix_seconds};
use crate::Result;
use anyhow::Context;
use std::fmt::{self, Write};

const RULE: &str = "═══════════════════════════════════════════════════════════";

/// Format a per-transaction analysis
///
/// Displays:
/// - Transaction counts and abort rates
/// - Throughput
/// - Latency table per grouping (all, success, failure)
/// - Per-type success averages and extra retries
/// - Histogram distribution (if provided)
pub fn format_transactions(
    analysis: &TransactionAnalysis,
    histogram: Option<&LatencyHistogram>,
) -> Result<String> {
    let mut out = String::new();
    write_transactions(&mut out, analysis, histogram)
        .context("Failed to format text report")?;
    Ok(out)
}

/// Format a combined microbenchmark summary
pub fn format_microbench(result: &MicrobenchResult) -> Result<String> {
    let mut out = String::new();
    write_microbench(&mut out, result).context("Failed to format text report")?;
    Ok(out)
}

fn write_transactions(
    out: &mut impl Write,
    analysis: &TransactionAnalysis,
    histogram: Option<&LatencyHistogram>,
) -> fmt::Result {
    let r = &analysis.result;

    banner(out, "BENCHMARK RESULTS")?;

    if let Some(window) = &analysis.window {
        writeln!(out, "Window:")?;
        writeln!(out, "  Start: {}", format_unix_seconds(window.start_sec))?;
        writeln!(out, "  End:   {}", format_unix_seconds(window.end_sec))?;
        writeln!(out)?;
    }

    writeln!(out, "Transactions:")?;
    writeln!(out, "  Total:            {}", r.num_transactions)?;
    writeln!(out, "  Successful:       {}", r.num_successful_transactions)?;
    writeln!(
        out,
        "  Failed:           {} ({} abort rate)",
        r.num_failed_transactions,
        format_percent(r.abort_rate)
    )?;
    writeln!(
        out,
        "    Write aborts:   {} ({})",
        r.num_failed_write_transactions,
        format_percent(r.write_txn_abort_rate)
    )?;
    writeln!(
        out,
        "    Read-only:      {} ({})",
        r.num_failed_readonly_transactions,
        format_percent(r.readonly_txn_abort_rate)
    )?;
    writeln!(out)?;

    writeln!(out, "Throughput:")?;
    writeln!(out, "  All:     {} txn/s", format_rate(r.throughput_all))?;
    writeln!(out, "  Success: {} txn/s", format_rate(r.throughput_success))?;
    writeln!(out, "  Failure: {} txn/s", format_rate(r.throughput_failure))?;
    writeln!(out)?;

    writeln!(out, "Latency:")?;
    writeln!(
        out,
        "  {:<10} {:>10} {:>10} {:>10} {:>10}",
        "", "mean", "median", "p99", "p99.9"
    )?;
    latency_row(out, "all", &r.latency_all())?;
    latency_row(out, "success", &r.latency_success())?;
    latency_row(out, "failure", &r.latency_failure())?;
    writeln!(out)?;

    writeln!(out, "Success latency by type:")?;
    writeln!(out, "  Follow: {}", format_micros(r.follow_txn_avg_latency_success))?;
    writeln!(out, "  Tweet:  {}", format_micros(r.tweet_txn_avg_latency_success))?;
    writeln!(out)?;

    writeln!(out, "Extra retries:")?;
    writeln!(out, "  All:     {}", r.extra_all)?;
    writeln!(out, "  Success: {}", r.extra_success)?;
    writeln!(out, "  Failure: {}", r.extra_failure)?;

    if let Some(hist) = histogram.filter(|h| !h.is_empty()) {
        writeln!(out)?;
        writeln!(out, "Distribution (all, 3 significant digits):")?;
        writeln!(out, "  Min:    {}", format_micros(hist.min() as f64))?;
        writeln!(out, "  Max:    {}", format_micros(hist.max() as f64))?;
        for &p in &REPORT_PERCENTILES {
            writeln!(out, "  p{:<6} {}", p, format_micros(hist.percentile(p) as f64))?;
        }
    }

    writeln!(out, "{}", RULE)
}

fn write_microbench(out: &mut impl Write, result: &MicrobenchResult) -> fmt::Result {
    banner(out, "MICROBENCHMARK RESULTS")?;
    writeln!(out, "Clients:    {}", result.num_clients)?;
    writeln!(out, "Throughput: {} IOPS", format_rate(result.throughput_all as f64))?;
    writeln!(out)?;
    writeln!(out, "Latency (mean across clients):")?;
    writeln!(out, "  Mean:   {}", format_micros(result.average_latency_all))?;
    writeln!(out, "  Median: {}", format_micros(result.median_latency_all))?;
    writeln!(out, "  p99:    {}", format_micros(result.p99_latency_all))?;
    writeln!(out, "  p99.9:  {}", format_micros(result.p999_latency_all))?;
    writeln!(out, "{}", RULE)
}

fn banner(out: &mut impl Write, title: &str) -> fmt::Result {
    writeln!(out, "{}", RULE)?;
    writeln!(out, "{:^59}", title)?;
    writeln!(out, "{}", RULE)?;
    writeln!(out)
}

fn latency_row(out: &mut impl Write, label: &str, summary: &LatencySummary) -> fmt::Result {
    writeln!(
        out,
        "  {:<10} {:>10} {:>10} {:>10} {:>10}",
        label,
        format_micros(summary.mean),
        format_micros(summary.median as f64),
        format_micros(summary.p99 as f64),
        format_micros(summary.p999 as f64)
    )
}
