//! Latency statistics
//!
//! Nearest-rank statistics over ascending latency sequences, plus the
//! per-partition aggregation, merging, and result computation built on them.
//!
//! - **Nearest-rank percentiles**: `median`, `p99`, and `p999` index directly
//!   into the sorted sequence, no interpolation
//! - **Empty-safe**: every statistic of an empty sequence is zero
//! - **Sorted by construction**: percentiles only accept [`SortedLatencies`]
//!
//! # Example
//!
//! ```
//! use txnstat::stats::{LatencySummary, SortedLatencies};
//!
//! let latencies = SortedLatencies::from_unsorted(vec![200, 100, 150]);
//! let summary = LatencySummary::from_sorted(&latencies);
//!
//! assert_eq!(summary.median, 150);
//! assert_eq!(summary.p99, 200);
//! assert_eq!(summary.p999, 200);
//! assert_eq!(summary.mean, 150.0);
//! ```

pub mod aggregator;
pub mod histogram;
pub mod result;
pub mod window;

use serde::{Deserialize, Serialize};

/// Latencies in microseconds, sorted ascending
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortedLatencies(Vec<u64>);

impl SortedLatencies {
    /// Sort `latencies` ascending and wrap them
    pub fn from_unsorted(mut latencies: Vec<u64>) -> Self {
        latencies.sort_unstable();
        Self(latencies)
    }

    pub fn as_slice(&self) -> &[u64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Element at index `floor(len * numerator / denominator)`, 0 if empty
    ///
    /// `numerator < denominator` keeps the index in bounds for any non-empty
    /// sequence.
    #[inline]
    pub fn nearest_rank(&self, numerator: usize, denominator: usize) -> u64 {
        debug_assert!(numerator < denominator);
        if self.0.is_empty() {
            return 0;
        }
        self.0[self.0.len() * numerator / denominator]
    }
}

/// Arithmetic mean, 0 for an empty slice
pub fn mean(xs: &[u64]) -> f64 {
    if xs.is_empty() {
        0.0
    } else {
        xs.iter().map(|&x| x as f64).sum::<f64>() / xs.len() as f64
    }
}

/// Element at `floor(len / 2)`; the upper middle for even lengths
pub fn median(xs: &SortedLatencies) -> u64 {
    xs.nearest_rank(1, 2)
}

/// Element at `floor(99 * len / 100)`
pub fn p99(xs: &SortedLatencies) -> u64 {
    xs.nearest_rank(99, 100)
}

/// Element at `floor(999 * len / 1000)`
pub fn p999(xs: &SortedLatencies) -> u64 {
    xs.nearest_rank(999, 1000)
}

/// Mean, median, p99, and p99.9 of one latency grouping
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LatencySummary {
    pub mean: f64,
    pub median: u64,
    pub p99: u64,
    pub p999: u64,
}

impl LatencySummary {
    pub fn from_sorted(xs: &SortedLatencies) -> Self {
        Self {
            mean: mean(xs.as_slice()),
            median: median(xs),
            p99: p99(xs),
            p999: p999(xs),
        }
    }
}
