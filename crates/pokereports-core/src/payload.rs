//! Shaping of the report list payload.
//!
//! `GET /api/request` has answered with a bare array, `{"results": [...]}`
//! and `{"data": [...]}` across backend versions. Anything else is treated
//! as an empty list rather than an error.

use serde_json::Value;
use tracing::warn;

use crate::error::CoreError;
use crate::models::report::Report;
use crate::record::RawRecord;

/// Pull the raw record objects out of a list response body.
pub fn report_records(body: Value) -> Vec<RawRecord> {
    let items = match body {
        Value::Array(items) => items,
        Value::Object(mut obj) => match take_array(&mut obj, "results") {
            Some(items) => items,
            None => take_array(&mut obj, "data").unwrap_or_default(),
        },
        _ => Vec::new(),
    };

    items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| match item {
            Value::Object(record) => Some(record),
            other => {
                warn!(index, kind = json_kind(&other), "skipping non-object report record");
                None
            }
        })
        .collect()
}

/// Decode a list response body and normalize every record.
pub fn parse_report_list(body: &[u8]) -> Result<Vec<Report>, CoreError> {
    let value: Value = serde_json::from_slice(body)?;
    Ok(report_records(value).iter().map(Report::from_raw).collect())
}

fn take_array(obj: &mut serde_json::Map<String, Value>, key: &str) -> Option<Vec<Value>> {
    match obj.remove(key) {
        Some(Value::Array(items)) => Some(items),
        _ => None,
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
