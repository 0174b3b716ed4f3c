//! Configuration module
//!
//! Handles CLI argument parsing, TOML analysis files, and validation.

pub mod cli;
pub mod cli_convert;
pub mod toml;
pub mod validator;

use crate::txnlog::partition::DEFAULT_WORKERS;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Warmup applied when neither the CLI nor the analysis file sets one
pub const DEFAULT_WARMUP_SEC: f64 = 10.0;

/// Retwis "follow" transaction code
pub const FOLLOW_TXN_TYPE: i64 = 2;

/// Retwis "post tweet" transaction code
pub const TWEET_TXN_TYPE: i64 = 3;

/// Complete analysis configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Client log files, analyzed as their concatenation
    #[serde(default)]
    pub logs: Vec<PathBuf>,
    /// Measurement window length used as the throughput divisor
    #[serde(default)]
    pub duration_sec: f64,
    /// Initial seconds to skip when windowing is enabled
    #[serde(default = "default_warmup_sec")]
    pub warmup_sec: f64,
    /// Filter entries by end timestamp (off keeps every entry)
    #[serde(default)]
    pub window: bool,
    /// Number of partitions processed in parallel
    #[serde(default = "default_workers")]
    pub workers: usize,
    /// What kind of log the files contain
    #[serde(default)]
    pub input_kind: InputKind,
    /// Workload codes with a dedicated success-latency average
    #[serde(default)]
    pub tracked_types: TrackedTypes,
    #[serde(default)]
    pub output: OutputConfig,
}

fn default_warmup_sec() -> f64 {
    DEFAULT_WARMUP_SEC
}

fn default_workers() -> usize {
    DEFAULT_WORKERS
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            logs: Vec::new(),
            duration_sec: 0.0,
            warmup_sec: DEFAULT_WARMUP_SEC,
            window: false,
            workers: DEFAULT_WORKERS,
            input_kind: InputKind::default(),
            tracked_types: TrackedTypes::default(),
            output: OutputConfig::default(),
        }
    }
}

/// Kind of client log being analyzed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputKind {
    /// One line per transaction
    #[default]
    Transactions,
    /// One final-statistics line per microbenchmark client
    Microbench,
}

/// Workload type codes whose successful transactions get their own average latency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackedTypes {
    #[serde(default = "default_follow")]
    pub follow: i64,
    #[serde(default = "default_tweet")]
    pub tweet: i64,
}

fn default_follow() -> i64 {
    FOLLOW_TXN_TYPE
}

fn default_tweet() -> i64 {
    TWEET_TXN_TYPE
}

impl Default for TrackedTypes {
    fn default() -> Self {
        Self {
            follow: FOLLOW_TXN_TYPE,
            tweet: TWEET_TXN_TYPE,
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
    /// Write the document here instead of stdout
    pub path: Option<PathBuf>,
}

/// Result document format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    Text,
    Csv,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Csv => write!(f, "csv"),
        }
    }
}

impl fmt::Display for InputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputKind::Transactions => write!(f, "transactions"),
            InputKind::Microbench => write!(f, "microbench"),
        }
    }
}
