//! Loose ISO-8601 timestamp parsing and the two display formats.
//!
//! Catalog timestamps come in several shapes: with or without seconds, with
//! fractional seconds of varying width, with a `+00:00` offset or a bare
//! trailing `Z`. [`DateValue::parse`] accepts all of them and degrades to
//! [`DateValue::Unparseable`] on anything else — parse failure is never an
//! error here, the call sites fall back to raw text.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Display placeholder for absent values across the whole pipeline.
pub const PLACEHOLDER: &str = "N/A";

/// Result of loose timestamp parsing. `Unparseable` is an ordinary value,
/// not an error; comparison and formatting call sites each define their own
/// fallback for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateValue {
    Parsed(NaiveDateTime),
    Unparseable,
}

/// Naive formats tried after any offset has been ruled out. Order matters:
/// the seconds-bearing format also consumes fractional digits.
const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

/// Offset-bearing variants of the same shapes.
const OFFSET_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f%:z", "%Y-%m-%dT%H:%M%:z"];

impl DateValue {
    /// Parse a loosely ISO-8601 string. A trailing `Z` is treated as
    /// `+00:00`; offsets are normalized to UTC and dropped so every parsed
    /// value compares on the same clock.
    pub fn parse(raw: &str) -> DateValue {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return DateValue::Unparseable;
        }

        let candidate = match trimmed.strip_suffix('Z') {
            Some(stripped) => format!("{stripped}+00:00"),
            None => trimmed.to_string(),
        };

        for format in OFFSET_FORMATS {
            if let Ok(dt) = DateTime::parse_from_str(&candidate, format) {
                return DateValue::Parsed(dt.naive_utc());
            }
        }
        for format in NAIVE_FORMATS {
            if let Ok(dt) = NaiveDateTime::parse_from_str(&candidate, format) {
                return DateValue::Parsed(dt);
            }
        }
        // Date-only values (e.g. a bare signature date) parse as midnight.
        if let Ok(date) = NaiveDate::parse_from_str(&candidate, "%Y-%m-%d") {
            if let Some(dt) = date.and_hms_opt(0, 0, 0) {
                return DateValue::Parsed(dt);
            }
        }

        DateValue::Unparseable
    }

    pub fn as_parsed(&self) -> Option<NaiveDateTime> {
        match self {
            DateValue::Parsed(dt) => Some(*dt),
            DateValue::Unparseable => None,
        }
    }
}

/// Legacy display format, `DD/MM/YYYY HH:MM`. Empty input renders the
/// placeholder; a malformed non-empty string comes back unchanged.
pub fn format_long(raw: &str) -> String {
    if raw.trim().is_empty() {
        return PLACEHOLDER.to_string();
    }
    match DateValue::parse(raw) {
        DateValue::Parsed(dt) => dt.format("%d/%m/%Y %H:%M").to_string(),
        DateValue::Unparseable => raw.to_string(),
    }
}

/// List/table display format, `YYYY-MM-DD HH:MM`. Unparseable input renders
/// as the empty string.
pub fn format_short(raw: &str) -> String {
    match DateValue::parse(raw) {
        DateValue::Parsed(dt) => dt.format("%Y-%m-%d %H:%M").to_string(),
        DateValue::Unparseable => String::new(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
