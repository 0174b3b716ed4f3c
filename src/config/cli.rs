//! CLI argument parsing using clap

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Result document format
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatType {
    /// Field-labeled JSON document (default)
    Json,
    /// Human-readable report
    Text,
    /// Header row plus one value row
    Csv,
}

/// Kind of log being analyzed
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum InputKindType {
    /// One line per transaction (default)
    Transactions,
    /// One final-statistics line per microbenchmark client
    Microbench,
}

/// txnstat - Summarize transaction benchmark client logs
#[derive(Parser, Debug)]
#[command(name = "txnstat")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Client log file(s); several files are analyzed as their concatenation
    #[arg(value_name = "LOG")]
    pub logs: Vec<PathBuf>,

    /// Measurement window length used for throughput (e.g., 60, 90s, 2.5m)
    #[arg(short = 'd', long)]
    pub duration: Option<String>,

    /// Initial warmup to skip when --window is set (default: 10s)
    #[arg(long)]
    pub warmup: Option<String>,

    /// Only analyze transactions that end inside the warmup/duration window
    #[arg(long)]
    pub window: bool,

    /// Number of partitions aggregated in parallel (default: 8)
    #[arg(short = 'w', long, env = "TXNSTAT_WORKERS")]
    pub workers: Option<usize>,

    /// Kind of log being analyzed
    #[arg(long, value_enum)]
    pub input_kind: Option<InputKindType>,

    /// Output format
    #[arg(short = 'f', long, value_enum)]
    pub format: Option<FormatType>,

    /// Write the result document to this file instead of stdout
    #[arg(short = 'o', long)]
    pub output: Option<PathBuf>,

    /// Workload code of follow transactions (default: 2)
    #[arg(long, allow_hyphen_values = true)]
    pub follow_txn_type: Option<i64>,

    /// Workload code of post-tweet transactions (default: 3)
    #[arg(long, allow_hyphen_values = true)]
    pub tweet_txn_type: Option<i64>,

    /// TOML analysis file; command-line options take precedence
    #[arg(short = 'c', long)]
    pub config: Option<PathBuf>,

    /// Enable debug diagnostics on stderr
    #[arg(long)]
    pub debug: bool,
}

impl Cli {
    /// Parse CLI arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate CLI arguments that do not depend on the analysis file
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.workers == Some(0) {
            anyhow::bail!("workers must be at least 1");
        }

        if self.logs.is_empty() && self.config.is_none() {
            anyhow::bail!("at least one log file is required");
        }

        Ok(())
    }
}
