use std::fmt;

use jiff::Timestamp;
use jiff::civil;
use jiff::fmt::strtime;
use jiff::tz::TimeZone;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use ts_rs::TS;

use crate::record::{self, NOT_AVAILABLE, RawRecord};

/// Identifier the report API assigns to a report job.
///
/// Older backend builds send numeric ids, newer ones send strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(untagged)]
#[ts(export)]
pub enum ReportId {
    Number(i64),
    Text(String),
}

impl ReportId {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => Some(match n.as_i64() {
                Some(i) => ReportId::Number(i),
                None => ReportId::Text(n.to_string()),
            }),
            other => record::field_text(other).map(ReportId::Text),
        }
    }
}

impl fmt::Display for ReportId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportId::Number(n) => write!(f, "{n}"),
            ReportId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for ReportId {
    fn from(n: i64) -> Self {
        ReportId::Number(n)
    }
}

impl From<&str> for ReportId {
    fn from(s: &str) -> Self {
        ReportId::Text(s.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum ReportStatus {
    Completed,
    Pending,
    Other,
}

impl ReportStatus {
    /// Case-insensitive parse; anything unrecognised is `Other`.
    pub fn parse(label: &str) -> Self {
        if label.eq_ignore_ascii_case("completed") {
            ReportStatus::Completed
        } else if label.eq_ignore_ascii_case("pending") {
            ReportStatus::Pending
        } else {
            ReportStatus::Other
        }
    }
}

/// One generated report job, normalized from a raw API record.
///
/// Built once at the API boundary by [`Report::from_raw`]; everything
/// downstream works on this type instead of re-probing JSON keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Report {
    pub id: Option<ReportId>,
    pub status: ReportStatus,
    /// Status text as the API sent it, or `"N/A"`.
    pub status_label: String,
    pub pokemon_type: Option<String>,
    pub created: Option<String>,
    pub updated: Option<String>,
    /// `updated`, parsed. `None` when absent or not a recognisable date.
    pub updated_at: Option<Timestamp>,
    pub url: Option<String>,
}

impl Report {
    pub fn from_raw(raw: &RawRecord) -> Self {
        let status_value = record::get_field(raw, "status");
        let status_label = match status_value {
            Value::String(s) => s.clone(),
            other => record::field_text(other).unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        };
        let updated_value = record::lookup(raw, "updated");

        Report {
            id: record::lookup(raw, "reportId").and_then(ReportId::from_value),
            status: ReportStatus::parse(&status_label),
            status_label,
            pokemon_type: record::lookup(raw, "pokemonType").and_then(record::field_text),
            created: record::lookup(raw, "created").and_then(record::field_text),
            updated: updated_value.and_then(record::field_text),
            updated_at: updated_value.and_then(parse_timestamp),
            url: record::lookup(raw, "url").and_then(record::field_text),
        }
    }

    pub fn is_completed(&self) -> bool {
        self.status == ReportStatus::Completed
    }

    pub fn display_id(&self) -> String {
        self.id
            .as_ref()
            .map_or_else(|| NOT_AVAILABLE.to_string(), ToString::to_string)
    }

    /// Pokémon type with each word capitalized, e.g. `"FIRE"` → `"Fire"`.
    pub fn display_type(&self) -> String {
        self.pokemon_type
            .as_deref()
            .map_or_else(|| NOT_AVAILABLE.to_string(), capitalize_words)
    }

    pub fn display_created(&self) -> &str {
        self.created.as_deref().unwrap_or(NOT_AVAILABLE)
    }

    pub fn display_updated(&self) -> &str {
        self.updated.as_deref().unwrap_or(NOT_AVAILABLE)
    }
}

/// `Date.prototype.toString()` output, after any `" (zone name)"` suffix
/// is dropped.
const ZONED_FORMATS: &[&str] = &["%a %b %d %Y %H:%M:%S GMT%z"];

/// Slashed and month-name forms, taken as UTC.
const DATETIME_FORMATS: &[&str] = &[
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%b %d, %Y %H:%M:%S",
    "%B %d, %Y %H:%M:%S",
];
const DATE_FORMATS: &[&str] = &["%Y/%m/%d", "%b %d, %Y", "%B %d, %Y", "%d %b %Y"];

/// Parse a timestamp-like JSON value the way the dashboard accepts dates.
///
/// Numbers are epoch milliseconds. Strings may be RFC 3339 instants,
/// offset-less ISO date-times or dates, RFC 2822, `Date.toString()` output,
/// `2024/01/31` (optionally with a time) or `Jan 31, 2024`. Forms without
/// an offset are taken as UTC. Other free-form text a browser might still
/// guess at (`"31 January"`, `"next friday"`) is rejected.
pub fn parse_timestamp(value: &Value) -> Option<Timestamp> {
    match value {
        Value::Number(n) => {
            let millis = n.as_i64().or_else(|| n.as_f64().map(|f| f as i64))?;
            Timestamp::from_millisecond(millis).ok()
        }
        Value::String(s) => parse_timestamp_str(s),
        _ => None,
    }
}

fn parse_timestamp_str(input: &str) -> Option<Timestamp> {
    let s = input.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(ts) = s.parse::<Timestamp>() {
        return Some(ts);
    }
    if let Ok(dt) = s.parse::<civil::DateTime>() {
        return utc(dt);
    }
    if let Ok(date) = s.parse::<civil::Date>() {
        return utc(date.at(0, 0, 0, 0));
    }
    if let Ok(zoned) = jiff::fmt::rfc2822::parse(s) {
        return Some(zoned.timestamp());
    }

    let without_zone_name = s.split(" (").next().unwrap_or(s);
    ZONED_FORMATS
        .iter()
        .find_map(|f| strtime::parse(f, without_zone_name).ok()?.to_timestamp().ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|f| strtime::parse(f, s).ok()?.to_datetime().ok())
                .and_then(utc)
        })
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|f| strtime::parse(f, s).ok()?.to_date().ok())
                .and_then(|date| utc(date.at(0, 0, 0, 0)))
        })
}

fn utc(dt: civil::DateTime) -> Option<Timestamp> {
    dt.to_zoned(TimeZone::UTC).ok().map(|z| z.timestamp())
}

fn capitalize_words(text: &str) -> String {
    text.split(' ')
        .map(|word| {
            let lower = word.to_lowercase();
            let mut chars = lower.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
