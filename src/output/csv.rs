//! CSV output formatting
//!
//! One header row with the summary field names and one value row, so
//! orchestration scripts can append runs to a single spreadsheet.

use crate::Result;
use anyhow::Context;
use serde::Serialize;
use serde_json::Value;

/// Render `value` (a flat struct) as a header row plus a value row
pub fn to_csv_string<T: Serialize>(value: &T) -> Result<String> {
    let object = match serde_json::to_value(value).context("Failed to serialize result")? {
        Value::Object(object) => object,
        other => anyhow::bail!("CSV output needs a flat record, got {}", other),
    };

    let header: Vec<&str> = object.keys().map(String::as_str).collect();
    let row = object
        .values()
        .map(format_value)
        .collect::<Result<Vec<_>>>()?;

    Ok(format!("{}\n{}\n", header.join(","), row.join(",")))
}

fn format_value(value: &Value) -> Result<String> {
    match value {
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Null => Ok(String::new()),
        Value::String(s) => Ok(escape(s)),
        Value::Array(_) | Value::Object(_) => {
            anyhow::bail!("CSV output cannot hold nested value {}", value)
        }
    }
}

fn escape(s: &str) -> String {
    if s.contains([',', '"', '\n']) {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}
