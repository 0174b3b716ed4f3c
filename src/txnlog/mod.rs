//! Transaction log records
//!
//! A benchmark client writes one line per finished transaction:
//!
//! ```text
//! <txn_id> <start_time_sec> <end_time_sec> <latency_micros> <status> [<txn_type> <extra>]
//! ```
//!
//! Lines starting with `#` and whitespace-only lines are ignored. Every other
//! line must have exactly 5 or 7 fields; anything else is a [`LogError::MalformedLine`]
//! and aborts the whole analysis.
//!
//! # Example
//!
//! ```
//! use txnstat::txnlog::{LogFile, TxnStatus, parse_line};
//!
//! let file = LogFile::from_string("client-0.log", "# header\n1 0.0 0.001 100 1\n".to_string());
//! let lines: Vec<_> = file.lines().collect();
//! assert_eq!(lines.len(), 1);
//!
//! let entry = parse_line(&lines[0]).unwrap();
//! assert_eq!(entry.latency_micros, 100);
//! assert_eq!(entry.status, TxnStatus::Success);
//! ```

pub mod microbench;
pub mod partition;

use crate::error::{LogError, LogResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::string::FromUtf8Error;

/// Marker that starts a comment line
pub const COMMENT_MARKER: char = '#';

/// `txn_type` of a 5-field (untagged) line
pub const UNTAGGED_TXN_TYPE: i64 = -1;

/// Field count of an untagged line
const UNTAGGED_FIELDS: usize = 5;

/// Field count of a line carrying `txn_type` and `extra`
const TAGGED_FIELDS: usize = 7;

/// Outcome of a transaction as recorded by the client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TxnStatus {
    /// Committed (status code 1)
    Success,
    /// Aborted read-write transaction (status code 2)
    AbortWrite,
    /// Aborted read-only transaction (status code 3)
    AbortReadonly,
}

impl TxnStatus {
    /// Map a status code from the log to a status
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(TxnStatus::Success),
            2 => Some(TxnStatus::AbortWrite),
            3 => Some(TxnStatus::AbortReadonly),
            _ => None,
        }
    }
}

/// One observed transaction
///
/// Created once per parsed line and never mutated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogEntry {
    /// Per-client sequence number
    pub txn_id: u64,
    /// Unix timestamp at which the transaction started
    pub start_time_sec: f64,
    /// Unix timestamp at which the transaction finished
    pub end_time_sec: f64,
    /// End-to-end latency measured by the client
    pub latency_micros: u64,
    pub status: TxnStatus,
    /// Workload tag, [`UNTAGGED_TXN_TYPE`] for 5-field lines
    pub txn_type: i64,
    /// Additional retries attributed to this transaction
    pub extra: u64,
}

/// A raw, non-ignored line together with where it came from
#[derive(Debug, Clone, Copy)]
pub struct LogLine<'a> {
    pub path: &'a Path,
    /// 1-based line number within `path`
    pub number: usize,
    pub text: &'a str,
}

impl<'a> LogLine<'a> {
    /// Build the error reported for this line
    pub fn malformed(&self, reason: impl Into<String>) -> LogError {
        LogError::MalformedLine {
            path: self.path.to_path_buf(),
            line_number: self.number,
            line: self.text.to_string(),
            reason: reason.into(),
        }
    }

    /// Build the error reported when adding this line's value overflows `counter`
    pub fn overflow(&self, counter: &'static str) -> LogError {
        LogError::SumOverflow {
            counter,
            origin: format!("line {} in {}", self.number, self.path.display()),
        }
    }
}

/// Whether a line is skipped before parsing (comment or blank)
#[inline]
pub fn is_ignored(text: &str) -> bool {
    text.starts_with(COMMENT_MARKER) || text.trim().is_empty()
}

/// Parse one log line into a [`LogEntry`]
pub fn parse_line(line: &LogLine<'_>) -> LogResult<LogEntry> {
    let mut fields = [""; TAGGED_FIELDS];
    let mut count = 0;
    for field in line.text.split_whitespace() {
        if count < TAGGED_FIELDS {
            fields[count] = field;
        }
        count += 1;
    }

    let (txn_type, extra) = match count {
        UNTAGGED_FIELDS => (UNTAGGED_TXN_TYPE, 0),
        TAGGED_FIELDS => (
            parse_field(line, fields[5], "txn_type")?,
            parse_field(line, fields[6], "extra")?,
        ),
        n => return Err(line.malformed(format!("expected 5 or 7 fields, found {}", n))),
    };

    let code: u8 = parse_field(line, fields[4], "status")?;
    let status = TxnStatus::from_code(code)
        .ok_or_else(|| line.malformed(format!("unknown status code {}", code)))?;

    Ok(LogEntry {
        txn_id: parse_field(line, fields[0], "txn_id")?,
        start_time_sec: parse_field(line, fields[1], "start_time")?,
        end_time_sec: parse_field(line, fields[2], "end_time")?,
        latency_micros: parse_field(line, fields[3], "latency")?,
        status,
        txn_type,
        extra,
    })
}

fn parse_field<T>(line: &LogLine<'_>, raw: &str, name: &str) -> LogResult<T>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    raw.parse()
        .map_err(|e| line.malformed(format!("invalid {} {:?}: {}", name, raw, e)))
}

/// Contents of one client log file
#[derive(Debug, Clone)]
pub struct LogFile {
    path: PathBuf,
    contents: String,
}

impl LogFile {
    /// Read a log file into memory
    ///
    /// A line that is not valid UTF-8 is reported as malformed.
    pub fn open(path: &Path) -> LogResult<Self> {
        let bytes = std::fs::read(path).map_err(|source| LogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let contents = String::from_utf8(bytes).map_err(|err| invalid_utf8(path, &err))?;
        Ok(Self {
            path: path.to_path_buf(),
            contents,
        })
    }

    /// Wrap already-loaded contents, `path` is only used in diagnostics
    pub fn from_string(path: impl Into<PathBuf>, contents: String) -> Self {
        Self {
            path: path.into(),
            contents,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Non-ignored lines in file order
    pub fn lines(&self) -> impl Iterator<Item = LogLine<'_>> {
        self.contents
            .lines()
            .enumerate()
            .filter(|(_, text)| !is_ignored(text))
            .map(move |(index, text)| LogLine {
                path: &self.path,
                number: index + 1,
                text,
            })
    }
}

/// Malformed-line error for the line holding the first invalid UTF-8 byte
fn invalid_utf8(path: &Path, err: &FromUtf8Error) -> LogError {
    let bytes = err.as_bytes();
    let at = err.utf8_error().valid_up_to();
    let start = bytes[..at]
        .iter()
        .rposition(|&b| b == b'\n')
        .map_or(0, |i| i + 1);
    let end = bytes[at..]
        .iter()
        .position(|&b| b == b'\n')
        .map_or(bytes.len(), |i| at + i);
    let text = String::from_utf8_lossy(&bytes[start..end]);

    LogError::MalformedLine {
        path: path.to_path_buf(),
        line_number: bytes[..at].iter().filter(|&&b| b == b'\n').count() + 1,
        line: text.trim_end_matches('\r').to_string(),
        reason: err.utf8_error().to_string(),
    }
}

/// Concatenate the non-ignored lines of several files, in argument order
pub fn collect_lines(files: &[LogFile]) -> Vec<LogLine<'_>> {
    files.iter().flat_map(LogFile::lines).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(text: &str) -> LogLine<'_> {
        LogLine {
            path: Path::new("test.log"),
            number: 1,
            text,
        }
    }

    #[test]
    fn test_parse_untagged_line() {
        let entry = parse_line(&line("1 1540674576.757905 1540674576.758526 621 1")).unwrap();
        assert_eq!(entry.txn_id, 1);
        assert_eq!(entry.start_time_sec, 1540674576.757905);
        assert_eq!(entry.end_time_sec, 1540674576.758526);
        assert_eq!(entry.latency_micros, 621);
        assert_eq!(entry.status, TxnStatus::Success);
        assert_eq!(entry.txn_type, UNTAGGED_TXN_TYPE);
        assert_eq!(entry.extra, 0);
    }

    #[test]
    fn test_parse_tagged_line() {
        let entry = parse_line(&line("4 1540674576.759851 1540674576.760529 678 2 2 4")).unwrap();
        assert_eq!(entry.status, TxnStatus::AbortWrite);
        assert_eq!(entry.txn_type, 2);
        assert_eq!(entry.extra, 4);
    }

    #[test]
    fn test_parse_tolerates_mixed_whitespace() {
        let entry = parse_line(&line("  7\t0.5   0.75 30 3  ")).unwrap();
        assert_eq!(entry.txn_id, 7);
        assert_eq!(entry.status, TxnStatus::AbortReadonly);
    }

    #[test]
    fn test_wrong_field_count() {
        for text in ["1 0.0 0.1 5", "1 0.0 0.1 5 1 2", "1 0.0 0.1 5 1 2 3 4"] {
            let err = parse_line(&line(text)).unwrap_err();
            match err {
                LogError::MalformedLine { reason, line, .. } => {
                    assert!(reason.contains("expected 5 or 7 fields"), "{}", reason);
                    assert_eq!(line, text);
                }
                other => panic!("unexpected error: {}", other),
            }
        }
    }

    #[test]
    fn test_non_numeric_fields() {
        assert!(matches!(
            parse_line(&line("x 0.0 0.1 5 1")),
            Err(LogError::MalformedLine { .. })
        ));
        assert!(matches!(
            parse_line(&line("1 zero 0.1 5 1")),
            Err(LogError::MalformedLine { .. })
        ));
        assert!(matches!(
            parse_line(&line("1 0.0 0.1 -5 1")),
            Err(LogError::MalformedLine { .. })
        ));
        assert!(matches!(
            parse_line(&line("1 0.0 0.1 5 1 two 0")),
            Err(LogError::MalformedLine { .. })
        ));
    }

    #[test]
    fn test_unknown_status_is_malformed() {
        let err = parse_line(&line("1 0.0 0.1 5 4")).unwrap_err();
        assert!(err.to_string().contains("unknown status code 4"));
        assert!(parse_line(&line("1 0.0 0.1 5 0")).is_err());
    }

    #[test]
    fn test_is_ignored() {
        assert!(is_ignored("# Commit_Ratio: 0.98"));
        assert!(is_ignored(""));
        assert!(is_ignored("   \t"));
        assert!(!is_ignored("1 0.0 0.1 5 1"));
    }

    #[test]
    fn test_indented_comment_is_data() {
        assert!(!is_ignored("  # Commit_Ratio: 0.98"));
        assert!(!is_ignored("\t#"));
        assert!(matches!(
            parse_line(&line("  # Commit_Ratio: 0.98")),
            Err(LogError::MalformedLine { .. })
        ));
    }

    #[test]
    fn test_lines_keep_original_numbers() {
        let file = LogFile::from_string(
            "client.log",
            "# start\n1 0.0 0.1 5 1\n\n2 0.0 0.1 6 2\r\n# Overall_Latency: 5.5\n".to_string(),
        );
        let lines: Vec<_> = file.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].number, 2);
        assert_eq!(lines[1].number, 4);
        assert_eq!(lines[1].text, "2 0.0 0.1 6 2");
    }

    #[test]
    fn test_error_names_file_and_line() {
        let file = LogFile::from_string("client-3.log", "1 0.0 0.1 5 1\nbogus\n".to_string());
        let lines = collect_lines(std::slice::from_ref(&file));
        let err = parse_line(&lines[1]).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("client-3.log"), "{}", msg);
        assert!(msg.contains("line 2"), "{}", msg);
    }

    #[test]
    fn test_open_missing_file() {
        let err = LogFile::open(Path::new("/nonexistent/txnstat/client.log")).unwrap_err();
        assert!(matches!(err, LogError::Io { .. }));
    }

    #[test]
    fn test_open_reads_file() {
        use std::io::Write;

        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        writeln!(tmp, "1 0.0 0.001 100 1").unwrap();
        writeln!(tmp, "# trailer").unwrap();
        let file = LogFile::open(tmp.path()).unwrap();
        assert_eq!(file.lines().count(), 1);
        assert_eq!(file.path(), tmp.path());
    }

    #[test]
    fn test_open_invalid_utf8_names_line() {
        use std::io::Write;

        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        tmp.write_all(b"# header\n1 0.0 0.1 5 1\n2 0.0 0.1 \xff\xfe 1\r\n3 0.0 0.1 7 1\n")
            .unwrap();
        match LogFile::open(tmp.path()).unwrap_err() {
            LogError::MalformedLine {
                path,
                line_number,
                line,
                ..
            } => {
                assert_eq!(path, tmp.path());
                assert_eq!(line_number, 3);
                assert_eq!(line, "2 0.0 0.1 \u{fffd}\u{fffd} 1");
            }
            other => panic!("unexpected error: {}", other),
        }
    }
}
