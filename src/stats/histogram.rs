//! Latency histogram using HdrHistogram
//!
//! Gives the text report a wider view of the latency distribution (p90,
//! p95, p99.99, min, max) than the nearest-rank figures of the summary.
//! Values are accurate to 3 significant digits; the JSON and CSV documents
//! never use them.
//!
//! # Example
//!
//! ```
//! use txnstat::stats::histogram::LatencyHistogram;
//! use txnstat::stats::SortedLatencies;
//!
//! let latencies = SortedLatencies::from_unsorted(vec![100, 150, 200]);
//! let hist = LatencyHistogram::from_latencies(&latencies).unwrap();
//!
//! assert_eq!(hist.len(), 3);
//! assert_eq!(hist.min(), 100);
//! ```

use crate::stats::SortedLatencies;
use crate::Result;
use anyhow::Context;
use hdrhistogram::Histogram;

/// Significant digits kept by the histogram
const SIGNIFICANT_DIGITS: u8 = 3;

/// Percentiles printed by the text report
pub const REPORT_PERCENTILES: [f64; 6] = [50.0, 90.0, 95.0, 99.0, 99.9, 99.99];

/// Latency histogram wrapper (microseconds)
#[derive(Debug, Clone)]
pub struct LatencyHistogram {
    histogram: Histogram<u64>,
}

impl LatencyHistogram {
    /// Build a histogram over every latency of `latencies`
    ///
    /// The histogram auto-resizes, so arbitrarily large latencies are kept.
    pub fn from_latencies(latencies: &SortedLatencies) -> Result<Self> {
        let mut histogram = Histogram::<u64>::new(SIGNIFICANT_DIGITS)
            .context("Failed to create latency histogram")?;

        for &latency in latencies.as_slice() {
            histogram
                .record(latency)
                .with_context(|| format!("Failed to record latency {}us", latency))?;
        }

        Ok(Self { histogram })
    }

    pub fn len(&self) -> u64 {
        self.histogram.len()
    }

    pub fn is_empty(&self) -> bool {
        self.histogram.len() == 0
    }

    pub fn min(&self) -> u64 {
        self.histogram.min()
    }

    pub fn max(&self) -> u64 {
        self.histogram.max()
    }

    /// Latency at `percentile` (0.0 - 100.0), equivalent within histogram precision
    pub fn percentile(&self, percentile: f64) -> u64 {
        self.histogram.value_at_percentile(percentile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_histogram() {
        let hist = LatencyHistogram::from_latencies(&SortedLatencies::default()).unwrap();
        assert!(hist.is_empty());
        assert_eq!(hist.len(), 0);
    }

    #[test]
    fn test_percentiles_within_precision() {
        let latencies = SortedLatencies::from_unsorted((1..=10_000).collect());
        let hist = LatencyHistogram::from_latencies(&latencies).unwrap();
        assert_eq!(hist.len(), 10_000);
        assert_eq!(hist.min(), 1);

        let p50 = hist.percentile(50.0) as f64;
        assert!((p50 - 5_000.0).abs() / 5_000.0 < 0.01, "p50 = {}", p50);

        let p99 = hist.percentile(99.0) as f64;
        assert!((p99 - 9_900.0).abs() / 9_900.0 < 0.01, "p99 = {}", p99);
    }

    #[test]
    fn test_records_zero_and_large_latencies() {
        let latencies = SortedLatencies::from_unsorted(vec![0, 5, 3_600_000_000]);
        let hist = LatencyHistogram::from_latencies(&latencies).unwrap();
        assert_eq!(hist.len(), 3);
        assert_eq!(hist.min(), 0);
        assert!(hist.max() >= 3_596_000_000);
    }
}
