//! Microbenchmark client summaries
//!
//! Microbenchmark clients do not log individual transactions. Each client
//! prints a single final line instead:
//!
//! ```text
//! [INFO] [client_main] [1697835459009552] Final statistics: throughput: 515481 IOPS       median latency: 7 us    99% latency: 15 us      99.9% latency: 20 us mean: 9.13735.
//! ```
//!
//! The per-client lines are combined into one [`MicrobenchResult`]: throughputs
//! are summed and latency figures are averaged across clients.

use super::{LogLine, COMMENT_MARKER};
use crate::error::{LogError, LogResult};
use crate::stats::mean;
use serde::{Deserialize, Serialize};

// Token positions within a whitespace-split summary line
const THROUGHPUT_LABEL: usize = 5;
const THROUGHPUT: usize = 6;
const MEDIAN_LABEL: (usize, usize) = (8, 9);
const MEDIAN: usize = 10;
const P99_LABEL: (usize, usize) = (12, 13);
const P99: usize = 14;
const P999_LABEL: (usize, usize) = (16, 17);
const P999: usize = 18;
const MEAN_LABEL: usize = 20;
const MEAN: usize = 21;

/// Final statistics reported by one microbenchmark client
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClientSummary {
    pub throughput: u64,
    pub median_micros: u64,
    pub p99_micros: u64,
    pub p999_micros: u64,
    pub mean_micros: f64,
}

/// Combined microbenchmark summary across all clients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MicrobenchResult {
    pub num_clients: usize,
    pub throughput_all: u64,
    pub average_latency_all: f64,
    pub median_latency_all: f64,
    pub p99_latency_all: f64,
    pub p999_latency_all: f64,
}

/// Parse one client summary line
pub fn parse_summary(line: &LogLine<'_>) -> LogResult<ClientSummary> {
    let text = line.text.trim_end();
    let text = text.strip_suffix('.').unwrap_or(text);
    let tokens: Vec<&str> = text.split_whitespace().collect();

    if tokens.len() <= MEAN {
        return Err(line.malformed(format!(
            "expected at least {} tokens in summary line, found {}",
            MEAN + 1,
            tokens.len()
        )));
    }

    expect_label(line, &tokens, THROUGHPUT_LABEL, "throughput:")?;
    expect_labels(line, &tokens, MEDIAN_LABEL, ("median", "latency:"))?;
    expect_labels(line, &tokens, P99_LABEL, ("99%", "latency:"))?;
    expect_labels(line, &tokens, P999_LABEL, ("99.9%", "latency:"))?;
    expect_label(line, &tokens, MEAN_LABEL, "mean:")?;

    Ok(ClientSummary {
        throughput: parse_token(line, tokens[THROUGHPUT], "throughput")?,
        median_micros: parse_token(line, tokens[MEDIAN], "median latency")?,
        p99_micros: parse_token(line, tokens[P99], "99% latency")?,
        p999_micros: parse_token(line, tokens[P999], "99.9% latency")?,
        mean_micros: parse_token(line, tokens[MEAN], "mean latency")?,
    })
}

fn expect_label(line: &LogLine<'_>, tokens: &[&str], at: usize, label: &str) -> LogResult<()> {
    if tokens[at] == label {
        Ok(())
    } else {
        Err(line.malformed(format!(
            "expected {:?} at token {}, found {:?}",
            label, at, tokens[at]
        )))
    }
}

fn expect_labels(
    line: &LogLine<'_>,
    tokens: &[&str],
    at: (usize, usize),
    labels: (&str, &str),
) -> LogResult<()> {
    expect_label(line, tokens, at.0, labels.0)?;
    expect_label(line, tokens, at.1, labels.1)
}

fn parse_token<T>(line: &LogLine<'_>, raw: &str, name: &str) -> LogResult<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.parse()
        .map_err(|e| line.malformed(format!("invalid {} {:?}: {}", name, raw, e)))
}

/// Combine the summaries of every client
///
/// Lines are expected to be pre-filtered with [`super::is_ignored`]; a
/// stray comment is skipped here as well.
pub fn summarize(lines: &[LogLine<'_>]) -> LogResult<MicrobenchResult> {
    let clients: Vec<&LogLine<'_>> = lines
        .iter()
        .filter(|line| !line.text.starts_with(COMMENT_MARKER))
        .collect();
    let summaries = clients
        .iter()
        .map(|line| parse_summary(line))
        .collect::<LogResult<Vec<_>>>()?;

    if summaries.is_empty() {
        return Err(LogError::EmptyInput);
    }

    let mut throughput_all: u64 = 0;
    for (line, summary) in clients.iter().zip(&summaries) {
        throughput_all = throughput_all
            .checked_add(summary.throughput)
            .ok_or_else(|| line.overflow("throughput_all"))?;
    }

    let medians: Vec<u64> = summaries.iter().map(|s| s.median_micros).collect();
    let p99s: Vec<u64> = summaries.iter().map(|s| s.p99_micros).collect();
    let p999s: Vec<u64> = summaries.iter().map(|s| s.p999_micros).collect();
    let means: Vec<f64> = summaries.iter().map(|s| s.mean_micros).collect();

    Ok(MicrobenchResult {
        num_clients: summaries.len(),
        throughput_all,
        average_latency_all: means.iter().sum::<f64>() / means.len() as f64,
        median_latency_all: mean(&medians),
        p99_latency_all: mean(&p99s),
        p999_latency_all: mean(&p999s),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    const LINE_A: &str = "[INFO] [client_main] [1697835459009552] Final statistics: throughput: 515481 IOPS       median latency: 7 us    99% latency: 15 us      99.9% latency: 20 us mean: 9.13735.";
    const LINE_B: &str = "[INFO] [client_main] [1697835459009999] Final statistics: throughput: 484519 IOPS median latency: 9 us 99% latency: 17 us 99.9% latency: 30 us mean: 10.86265.";

    fn line(number: usize, text: &str) -> LogLine<'_> {
        LogLine {
            path: Path::new("client.log"),
            number,
            text,
        }
    }

    #[test]
    fn test_parse_summary() {
        let summary = parse_summary(&line(1, LINE_A)).unwrap();
        assert_eq!(summary.throughput, 515481);
        assert_eq!(summary.median_micros, 7);
        assert_eq!(summary.p99_micros, 15);
        assert_eq!(summary.p999_micros, 20);
        assert!((summary.mean_micros - 9.13735).abs() < 1e-9);
    }

    #[test]
    fn test_summarize_sums_throughput_and_averages_latency() {
        let lines = [line(1, LINE_A), line(2, LINE_B)];
        let result = summarize(&lines).unwrap();
        assert_eq!(result.num_clients, 2);
        assert_eq!(result.throughput_all, 1_000_000);
        assert_eq!(result.median_latency_all, 8.0);
        assert_eq!(result.p99_latency_all, 16.0);
        assert_eq!(result.p999_latency_all, 25.0);
        assert!((result.average_latency_all - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_wrong_label_is_malformed() {
        let text = LINE_A.replace("99% latency:", "98% latency:");
        let err = parse_summary(&line(3, &text)).unwrap_err();
        match err {
            LogError::MalformedLine { line_number, reason, .. } => {
                assert_eq!(line_number, 3);
                assert!(reason.contains("99%"), "{}", reason);
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_truncated_line_is_malformed() {
        let err = parse_summary(&line(1, "[INFO] [client_main] [1] Final statistics:")).unwrap_err();
        assert!(matches!(err, LogError::MalformedLine { .. }));
    }

    #[test]
    fn test_no_summaries() {
        assert!(matches!(summarize(&[]), Err(LogError::EmptyInput)));
    }

    #[test]
    fn test_throughput_overflow_names_line() {
        let huge = LINE_A.replace("515481", "18446744073709551615");
        let lines = [line(1, &huge), line(2, LINE_B)];
        match summarize(&lines).unwrap_err() {
            LogError::SumOverflow { counter, origin } => {
                assert_eq!(counter, "throughput_all");
                assert_eq!(origin, "line 2 in client.log");
            }
            other => panic!("unexpected error: {}", other),
        }
    }
}
