//! Time and rate formatting helpers for the text report

use chrono::{DateTime, SecondsFormat};

/// Format a latency given in microseconds
///
/// # Examples
///
/// ```
/// use txnstat::util::time::format_micros;
///
/// assert_eq!(format_micros(621.0), "621us");
/// assert_eq!(format_micros(9.13735), "9.14us");
/// assert_eq!(format_micros(2500.0), "2.50ms");
/// assert_eq!(format_micros(5_000_000.0), "5.00s");
/// ```
pub fn format_micros(micros: f64) -> String {
    if micros < 1_000.0 {
        if micros.fract() == 0.0 {
            format!("{:.0}us", micros)
        } else {
            format!("{:.2}us", micros)
        }
    } else if micros < 1_000_000.0 {
        format!("{:.2}ms", micros / 1_000.0)
    } else {
        format!("{:.2}s", micros / 1_000_000.0)
    }
}

/// Format a rate (transactions per second)
///
/// # Examples
///
/// ```
/// use txnstat::util::time::format_rate;
///
/// assert_eq!(format_rate(500.0), "500");
/// assert_eq!(format_rate(1500.0), "1.50K");
/// assert_eq!(format_rate(2_500_000.0), "2.50M");
/// ```
pub fn format_rate(rate: f64) -> String {
    if rate < 1_000.0 {
        format!("{:.0}", rate)
    } else if rate < 1_000_000.0 {
        format!("{:.2}K", rate / 1_000.0)
    } else if rate < 1_000_000_000.0 {
        format!("{:.2}M", rate / 1_000_000.0)
    } else {
        format!("{:.2}G", rate / 1_000_000_000.0)
    }
}

/// Format a fraction as a percentage with two decimals
pub fn format_percent(fraction: f64) -> String {
    format!("{:.2}%", fraction * 100.0)
}

/// Format a Unix timestamp in seconds as RFC 3339 UTC
///
/// Timestamps outside chrono's range fall back to the raw number.
///
/// # Examples
///
/// ```
/// use txnstat::util::time::format_unix_seconds;
///
/// assert_eq!(format_unix_seconds(1540674576.5), "2018-10-27T21:09:36.500000Z");
/// ```
pub fn format_unix_seconds(seconds: f64) -> String {
    let secs = seconds.floor();
    let nanos = ((seconds - secs) * 1e9).round() as u32;
    match DateTime::from_timestamp(secs as i64, nanos.min(999_999_999)) {
        Some(dt) => dt.to_rfc3339_opts(SecondsFormat::Micros, true),
        None => format!("{:.6}", seconds),
    }
}
