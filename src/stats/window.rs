//! Warmup/measurement window
//!
//! When enabled, only transactions whose `end_time_sec` falls within
//! `[first_end + warmup, first_end + warmup + duration]` are analyzed, where
//! `first_end` is the earliest end time in the whole input. Windowing is off
//! unless explicitly requested.

use crate::error::{LogError, LogResult};
use crate::txnlog::{parse_line, LogEntry, LogLine};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Inclusive range of accepted end timestamps
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Window {
    pub start_sec: f64,
    pub end_sec: f64,
}

impl Window {
    /// Window starting `warmup_sec` after `first_end_sec` and lasting `duration_sec`
    pub fn after_warmup(first_end_sec: f64, warmup_sec: f64, duration_sec: f64) -> Self {
        let start_sec = first_end_sec + warmup_sec;
        Self {
            start_sec,
            end_sec: start_sec + duration_sec,
        }
    }

    #[inline]
    pub fn contains(&self, entry: &LogEntry) -> bool {
        entry.end_time_sec >= self.start_sec && entry.end_time_sec <= self.end_sec
    }
}

/// Earliest end timestamp across all partitions
///
/// Parses every line; a malformed line fails here exactly as it would during
/// aggregation. Returns [`LogError::EmptyInput`] when there are no lines.
pub fn earliest_end_time(partitions: &[&[LogLine<'_>]]) -> LogResult<f64> {
    let minima = partitions
        .par_iter()
        .map(|lines| {
            lines.iter().try_fold(None, |min: Option<f64>, line| -> LogResult<Option<f64>> {
                let end = parse_line(line)?.end_time_sec;
                Ok(Some(min.map_or(end, |m| m.min(end))))
            })
        })
        .collect::<Vec<LogResult<Option<f64>>>>();

    let mut earliest: Option<f64> = None;
    for min in minima {
        if let Some(end) = min? {
            earliest = Some(earliest.map_or(end, |e| e.min(end)));
        }
    }
    earliest.ok_or(LogError::EmptyInput)
}
