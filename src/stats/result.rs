//! Benchmark summary computation
//!
//! Turns merged latency groupings into the [`BenchmarkResult`] document.
//! Field names are those consumed by the benchmark orchestration scripts.

use crate::error::{LogError, LogResult};
use crate::stats::aggregator::MergedStats;
use crate::stats::{mean, LatencySummary};
use serde::{Deserialize, Serialize};

/// Summary of one benchmark run
///
/// Computed once from the complete logs; never updated incrementally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkResult {
    // Counts
    pub num_transactions: u64,
    pub num_successful_transactions: u64,
    pub num_failed_transactions: u64,
    pub num_failed_write_transactions: u64,
    pub num_failed_readonly_transactions: u64,
    pub abort_rate: f64,
    pub write_txn_abort_rate: f64,
    pub readonly_txn_abort_rate: f64,

    // Throughputs
    pub throughput_all: f64,
    pub throughput_success: f64,
    pub throughput_failure: f64,

    // Latencies
    pub average_latency_all: f64,
    pub median_latency_all: u64,
    pub p99_latency_all: u64,
    pub p999_latency_all: u64,
    pub average_latency_success: f64,
    pub median_latency_success: u64,
    pub p99_latency_success: u64,
    pub p999_latency_success: u64,
    pub average_latency_failure: f64,
    pub median_latency_failure: u64,
    pub p99_latency_failure: u64,
    pub p999_latency_failure: u64,
    pub follow_txn_avg_latency_success: f64,
    pub tweet_txn_avg_latency_success: f64,

    // Extra retries
    pub extra_all: u64,
    pub extra_success: u64,
    pub extra_failure: u64,
}

impl BenchmarkResult {
    /// Latency summary over every transaction
    pub fn latency_all(&self) -> LatencySummary {
        LatencySummary {
            mean: self.average_latency_all,
            median: self.median_latency_all,
            p99: self.p99_latency_all,
            p999: self.p999_latency_all,
        }
    }

    /// Latency summary over committed transactions
    pub fn latency_success(&self) -> LatencySummary {
        LatencySummary {
            mean: self.average_latency_success,
            median: self.median_latency_success,
            p99: self.p99_latency_success,
            p999: self.p999_latency_success,
        }
    }

    /// Latency summary over aborted transactions
    pub fn latency_failure(&self) -> LatencySummary {
        LatencySummary {
            mean: self.average_latency_failure,
            median: self.median_latency_failure,
            p99: self.p99_latency_failure,
            p999: self.p999_latency_failure,
        }
    }
}

/// Compute the benchmark summary
///
/// `duration_sec` is the measurement window supplied by the caller and is
/// only used as the throughput divisor.
///
/// # Errors
///
/// - [`LogError::InvalidDuration`] if `duration_sec` is not positive and finite
/// - [`LogError::EmptyResult`] if there are no transactions at all
pub fn compute(merged: &MergedStats, duration_sec: f64) -> LogResult<BenchmarkResult> {
    if !(duration_sec.is_finite() && duration_sec > 0.0) {
        return Err(LogError::InvalidDuration(duration_sec));
    }

    let total = merged.all.len() as u64;
    if total == 0 {
        return Err(LogError::EmptyResult { grouping: "all" });
    }

    let successful = merged.success.len() as u64;
    let failed = merged.failure.len() as u64;
    let failed_write = merged.failure_write.len() as u64;
    let failed_readonly = merged.failure_readonly.len() as u64;
    debug_assert_eq!(total, successful + failed);
    debug_assert_eq!(failed, failed_write + failed_readonly);

    let rate = |count: u64| count as f64 / total as f64;
    let throughput = |count: u64| count as f64 / duration_sec;

    let all = LatencySummary::from_sorted(&merged.all);
    let success = LatencySummary::from_sorted(&merged.success);
    let failure = LatencySummary::from_sorted(&merged.failure);

    Ok(BenchmarkResult {
        num_transactions: total,
        num_successful_transactions: successful,
        num_failed_transactions: failed,
        num_failed_write_transactions: failed_write,
        num_failed_readonly_transactions: failed_readonly,
        abort_rate: rate(failed),
        write_txn_abort_rate: rate(failed_write),
        readonly_txn_abort_rate: rate(failed_readonly),

        throughput_all: throughput(total),
        throughput_success: throughput(successful),
        throughput_failure: throughput(failed),

        average_latency_all: all.mean,
        median_latency_all: all.median,
        p99_latency_all: all.p99,
        p999_latency_all: all.p999,
        average_latency_success: success.mean,
        median_latency_success: success.median,
        p99_latency_success: success.p99,
        p999_latency_success: success.p999,
        average_latency_failure: failure.mean,
        median_latency_failure: failure.median,
        p99_latency_failure: failure.p99,
        p999_latency_failure: failure.p999,
        follow_txn_avg_latency_success: mean(merged.follow_success.as_slice()),
        tweet_txn_avg_latency_success: mean(merged.tweet_success.as_slice()),

        extra_all: merged.extra_all,
        extra_success: merged.extra_success,
        extra_failure: merged.extra_failure,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::SortedLatencies;

    fn merged(success: Vec<u64>, write: Vec<u64>, readonly: Vec<u64>) -> MergedStats {
        let failure: Vec<u64> = write.iter().chain(readonly.iter()).copied().collect();
        let all: Vec<u64> = success.iter().chain(failure.iter()).copied().collect();
        MergedStats {
            all: SortedLatencies::from_unsorted(all),
            success: SortedLatencies::from_unsorted(success),
            failure: SortedLatencies::from_unsorted(failure),
            failure_write: SortedLatencies::from_unsorted(write),
            failure_readonly: SortedLatencies::from_unsorted(readonly),
            ..MergedStats::default()
        }
    }

    #[test]
    fn test_counts_and_rates() {
        let result = compute(&merged(vec![10, 20, 30, 40], vec![50, 60], vec![70, 80]), 2.0).unwrap();
        assert_eq!(result.num_transactions, 8);
        assert_eq!(result.num_successful_transactions, 4);
        assert_eq!(result.num_failed_transactions, 4);
        assert_eq!(result.num_failed_write_transactions, 2);
        assert_eq!(result.num_failed_readonly_transactions, 2);
        assert_eq!(result.abort_rate, 0.5);
        assert_eq!(result.write_txn_abort_rate, 0.25);
        assert_eq!(result.readonly_txn_abort_rate, 0.25);
        assert_eq!(result.throughput_all, 4.0);
        assert_eq!(result.throughput_success, 2.0);
        assert_eq!(result.throughput_failure, 2.0);
    }

    #[test]
    fn test_latency_groupings() {
        let result = compute(&merged(vec![10, 20, 30, 40], vec![50, 60], vec![70, 80]), 1.0).unwrap();
        assert_eq!(result.average_latency_all, 45.0);
        assert_eq!(result.median_latency_all, 50);
        assert_eq!(result.p99_latency_all, 80);
        assert_eq!(result.median_latency_success, 30);
        assert_eq!(result.average_latency_failure, 65.0);
        assert_eq!(result.median_latency_failure, 70);
        assert_eq!(result.latency_success().mean, 25.0);
    }

    #[test]
    fn test_empty_failure_grouping_is_zero() {
        let result = compute(&merged(vec![5, 15], vec![], vec![]), 1.0).unwrap();
        assert_eq!(result.num_failed_transactions, 0);
        assert_eq!(result.abort_rate, 0.0);
        assert_eq!(result.latency_failure(), LatencySummary::default());
        assert_eq!(result.follow_txn_avg_latency_success, 0.0);
    }

    #[test]
    fn test_tracked_type_averages() {
        let mut stats = merged(vec![100, 200, 300], vec![], vec![]);
        stats.follow_success = SortedLatencies::from_unsorted(vec![100, 300]);
        stats.tweet_success = SortedLatencies::from_unsorted(vec![200]);
        let result = compute(&stats, 1.0).unwrap();
        assert_eq!(result.follow_txn_avg_latency_success, 200.0);
        assert_eq!(result.tweet_txn_avg_latency_success, 200.0);
    }

    #[test]
    fn test_zero_total_is_an_error() {
        let err = compute(&MergedStats::default(), 1.0).unwrap_err();
        assert!(matches!(err, LogError::EmptyResult { grouping: "all" }));
    }

    #[test]
    fn test_invalid_duration() {
        let stats = merged(vec![1], vec![], vec![]);
        for duration in [0.0, -2.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                compute(&stats, duration),
                Err(LogError::InvalidDuration(_))
            ));
        }
    }
}
