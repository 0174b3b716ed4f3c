//! JSON output formatting
//!
//! Results are written as a flat, field-labeled object with four-space
//! indentation, one key per summary field, in declaration order.

use crate::Result;
use anyhow::Context;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;

/// Serialize `value` as pretty-printed JSON followed by a newline
pub fn to_json_string<T: Serialize>(value: &T) -> Result<String> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value
        .serialize(&mut serializer)
        .context("Failed to serialize result to JSON")?;
    buf.push(b'\n');

    String::from_utf8(buf).context("JSON output is not valid UTF-8")
}
