//! Field access on raw report records as they come off the wire.
//!
//! The report API is not consistent about key casing: the same record may
//! carry `reportId`, `ReportId` or `reportid` depending on which backend
//! path produced it. Lookups here try the exact key first and then fall
//! back to the first key that matches ignoring ASCII case.

use std::sync::LazyLock;

use serde_json::{Map, Value};

/// A raw report record: one JSON object from the list payload.
pub type RawRecord = Map<String, Value>;

/// Display sentinel for a field that the record does not carry at all.
pub const NOT_AVAILABLE: &str = "N/A";

static NOT_AVAILABLE_VALUE: LazyLock<Value> =
    LazyLock::new(|| Value::String(NOT_AVAILABLE.to_string()));

/// Look up `name` on a record. Returns `None` only when no key matches,
/// not when the value is `null`.
pub fn lookup<'a>(record: &'a RawRecord, name: &str) -> Option<&'a Value> {
    if let Some(value) = record.get(name) {
        return Some(value);
    }

    record
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(name))
        .map(|(_, value)| value)
}

/// Like [`lookup`], but yields the `"N/A"` sentinel for a missing key.
pub fn get_field<'a>(record: &'a RawRecord, name: &str) -> &'a Value {
    lookup(record, name).unwrap_or(&NOT_AVAILABLE_VALUE)
}

/// True iff the record's `status` is `completed`, in any casing.
pub fn is_completed(record: &RawRecord) -> bool {
    get_field(record, "status")
        .as_str()
        .is_some_and(|status| status.eq_ignore_ascii_case("completed"))
}

/// Render a field value as display text.
///
/// Strings are taken as-is, numbers and booleans are formatted. `null`,
/// empty strings, the sentinel itself, and nested values yield `None`.
pub fn field_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if s.is_empty() || s == NOT_AVAILABLE => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}
