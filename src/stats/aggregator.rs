//! Partition aggregation and merging
//!
//! Each partition of log lines is classified independently by a
//! [`WorkerAggregator`] into a [`PartitionStats`]; partitions share nothing, so
//! they run in parallel without locks. [`merge`] then concatenates the
//! per-partition groupings and sorts each one, which makes the merged result
//! independent of partition count, boundaries, and completion order.
//!
//! # Example
//!
//! ```
//! use txnstat::config::TrackedTypes;
//! use txnstat::stats::aggregator::{aggregate_partitions, WorkerAggregator};
//! use txnstat::txnlog::{partition::partition, LogFile};
//!
//! let file = LogFile::from_string(
//!     "client.log",
//!     "1 0.0 0.001 100 1\n2 0.0 0.002 200 2\n3 0.0 0.001 150 1 2 1\n".to_string(),
//! );
//! let lines: Vec<_> = file.lines().collect();
//!
//! let worker = WorkerAggregator::new(TrackedTypes::default(), None);
//! let merged = aggregate_partitions(&partition(&lines, 3), &worker).unwrap();
//!
//! assert_eq!(merged.all.as_slice(), &[100, 150, 200]);
//! assert_eq!(merged.failure_write.len(), 1);
//! assert_eq!(merged.extra_all, 1);
//! ```

use crate::config::TrackedTypes;
use crate::error::{LogError, LogResult};
use crate::stats::window::Window;
use crate::stats::SortedLatencies;
use crate::txnlog::{parse_line, LogEntry, LogLine, TxnStatus};
use rayon::prelude::*;
use std::time::Instant;
use tracing::debug;

/// Latency groupings of one partition, in input order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartitionStats {
    pub all: Vec<u64>,
    pub success: Vec<u64>,
    pub failure: Vec<u64>,
    pub failure_write: Vec<u64>,
    pub failure_readonly: Vec<u64>,
    /// Successful transactions of the tracked follow type
    pub follow_success: Vec<u64>,
    /// Successful transactions of the tracked tweet type
    pub tweet_success: Vec<u64>,
    pub extra_all: u64,
    pub extra_success: u64,
    pub extra_failure: u64,
}

impl PartitionStats {
    /// Classify one entry into its groupings
    ///
    /// Fails if adding the entry's `extra` overflows a sum; `line` is the
    /// source of `entry` and is named in that error.
    pub fn record(
        &mut self,
        line: &LogLine<'_>,
        entry: &LogEntry,
        tracked: &TrackedTypes,
    ) -> LogResult<()> {
        let latency = entry.latency_micros;
        let add = |sum: u64, counter: &'static str| {
            sum.checked_add(entry.extra)
                .ok_or_else(|| line.overflow(counter))
        };

        self.extra_all = add(self.extra_all, "extra_all")?;
        self.all.push(latency);

        match entry.status {
            TxnStatus::Success => {
                self.extra_success = add(self.extra_success, "extra_success")?;
                self.success.push(latency);
                if entry.txn_type == tracked.follow {
                    self.follow_success.push(latency);
                }
                if entry.txn_type == tracked.tweet {
                    self.tweet_success.push(latency);
                }
            }
            TxnStatus::AbortWrite => {
                self.extra_failure = add(self.extra_failure, "extra_failure")?;
                self.failure.push(latency);
                self.failure_write.push(latency);
            }
            TxnStatus::AbortReadonly => {
                self.extra_failure = add(self.extra_failure, "extra_failure")?;
                self.failure.push(latency);
                self.failure_readonly.push(latency);
            }
        }

        Ok(())
    }

    /// Number of transactions recorded
    pub fn len(&self) -> usize {
        self.all.len()
    }
}

/// Classifies the lines of one partition
///
/// Holds only read-only settings, so one aggregator is shared by every
/// parallel worker.
#[derive(Debug, Clone, Copy)]
pub struct WorkerAggregator {
    tracked: TrackedTypes,
    window: Option<Window>,
}

impl WorkerAggregator {
    /// `window` of `None` keeps every entry
    pub fn new(tracked: TrackedTypes, window: Option<Window>) -> Self {
        Self { tracked, window }
    }

    /// Parse and classify every line of `lines`
    ///
    /// The first malformed line aborts the partition.
    pub fn aggregate(&self, lines: &[LogLine<'_>]) -> LogResult<PartitionStats> {
        let mut stats = PartitionStats::default();

        for line in lines {
            let entry = parse_line(line)?;
            if let Some(window) = &self.window {
                if !window.contains(&entry) {
                    continue;
                }
            }
            stats.record(line, &entry, &self.tracked)?;
        }

        Ok(stats)
    }
}

/// Globally merged groupings, each sorted ascending
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergedStats {
    pub all: SortedLatencies,
    pub success: SortedLatencies,
    pub failure: SortedLatencies,
    pub failure_write: SortedLatencies,
    pub failure_readonly: SortedLatencies,
    pub follow_success: SortedLatencies,
    pub tweet_success: SortedLatencies,
    pub extra_all: u64,
    pub extra_success: u64,
    pub extra_failure: u64,
}

/// Concatenate same-named groupings of every partition and sort each
///
/// Fails with [`LogError::SumOverflow`] if an `extra` sum across partitions
/// does not fit in 64 bits.
pub fn merge(partitions: Vec<PartitionStats>) -> LogResult<MergedStats> {
    let mut combined = PartitionStats::default();

    for part in partitions {
        combined.all.extend(part.all);
        combined.success.extend(part.success);
        combined.failure.extend(part.failure);
        combined.failure_write.extend(part.failure_write);
        combined.failure_readonly.extend(part.failure_readonly);
        combined.follow_success.extend(part.follow_success);
        combined.tweet_success.extend(part.tweet_success);
        combined.extra_all = merge_sum(combined.extra_all, part.extra_all, "extra_all")?;
        combined.extra_success =
            merge_sum(combined.extra_success, part.extra_success, "extra_success")?;
        combined.extra_failure =
            merge_sum(combined.extra_failure, part.extra_failure, "extra_failure")?;
    }

    Ok(MergedStats {
        all: SortedLatencies::from_unsorted(combined.all),
        success: SortedLatencies::from_unsorted(combined.success),
        failure: SortedLatencies::from_unsorted(combined.failure),
        failure_write: SortedLatencies::from_unsorted(combined.failure_write),
        failure_readonly: SortedLatencies::from_unsorted(combined.failure_readonly),
        follow_success: SortedLatencies::from_unsorted(combined.follow_success),
        tweet_success: SortedLatencies::from_unsorted(combined.tweet_success),
        extra_all: combined.extra_all,
        extra_success: combined.extra_success,
        extra_failure: combined.extra_failure,
    })
}

fn merge_sum(total: u64, part: u64, counter: &'static str) -> LogResult<u64> {
    total.checked_add(part).ok_or_else(|| LogError::SumOverflow {
        counter,
        origin: "partition merge".to_string(),
    })
}

/// Aggregate every partition in parallel and merge the results
///
/// Blocks until all partitions are done. If any partition fails, the error of
/// the earliest failing partition is returned so diagnostics name the first
/// malformed line in input order.
pub fn aggregate_partitions(
    partitions: &[&[LogLine<'_>]],
    worker: &WorkerAggregator,
) -> LogResult<MergedStats> {
    let start = Instant::now();

    let results: Vec<LogResult<PartitionStats>> = partitions
        .par_iter()
        .enumerate()
        .map(|(index, lines)| {
            let stats = worker.aggregate(lines);
            if let Ok(stats) = &stats {
                debug!(partition = index, lines = lines.len(), kept = stats.len(), "partition aggregated");
            }
            stats
        })
        .collect();

    let partition_stats = results.into_iter().collect::<LogResult<Vec<_>>>()?;
    debug!(
        partitions = partitions.len(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "all partitions aggregated"
    );

    let start = Instant::now();
    let merged = merge(partition_stats)?;
    debug!(
        transactions = merged.all.len(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "partitions merged"
    );

    Ok(merged)
}
