//! txnstat - Transaction benchmark log aggregation
//!
//! txnstat summarizes the per-transaction logs written by benchmark clients
//! of a distributed transaction-processing system into throughput, abort-rate,
//! and latency-percentile statistics.
//!
//! # Architecture
//!
//! - **Log parsing**: 5- and 7-field transaction lines, typed parse errors
//! - **Partitioning**: contiguous slices processed by parallel workers
//! - **Deterministic merge**: per-partition groupings concatenated and sorted
//! - **Nearest-rank statistics**: mean, median, p99, p99.9 per grouping
//! - **Output**: JSON (default), CSV, or a human-readable report

pub mod config;
pub mod coordinator;
pub mod error;
pub mod output;
pub mod stats;
pub mod txnlog;
pub mod util;

// Re-export commonly used types
pub use config::AnalysisConfig;
pub use error::{LogError, LogResult};
pub use stats::result::BenchmarkResult;

/// Result type used throughout txnstat
pub type Result<T> = anyhow::Result<T>;
