//! Error kinds raised while aggregating transaction logs
//!
//! Every variant is fatal to the run: the caller reports it and no result
//! document is produced.

use std::path::PathBuf;
use thiserror::Error;

/// Errors produced by the log aggregation pipeline
#[derive(Debug, Error)]
pub enum LogError {
    /// A non-comment, non-blank line could not be parsed
    #[error("malformed line {line_number} in {}: {reason}: {line:?}", path.display())]
    MalformedLine {
        path: PathBuf,
        line_number: usize,
        line: String,
        reason: String,
    },

    /// No entries remained after dropping comments and blank lines
    #[error("zero transactions logged")]
    EmptyInput,

    /// A grouping used as a rate denominator has no members
    #[error("zero completed transactions in grouping `{grouping}`")]
    EmptyResult { grouping: &'static str },

    /// A summed counter no longer fits in 64 bits
    #[error("`{counter}` overflows a 64-bit counter at {origin}")]
    SumOverflow {
        counter: &'static str,
        /// Line that pushed the sum over, or the partition merge
        origin: String,
    },

    /// The throughput divisor must be a positive, finite number of seconds
    #[error("duration must be a positive number of seconds, got {0}")]
    InvalidDuration(f64),

    /// A log file could not be read
    #[error("failed to read log file {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type of the aggregation pipeline
pub type LogResult<T> = std::result::Result<T, LogError>;
