//! Embedded sample fixture.
//!
//! Three real-shaped catalog records, used by `--sample` for offline
//! demonstration and by the integration harnesses as a known corpus.

use licita_core::{records_from_value, Record};

const SAMPLE_JSON: &str = include_str!("sample_records.json");

pub fn sample_records() -> Vec<Record> {
    let value = serde_json::from_str(SAMPLE_JSON)
        .expect("embedded sample data must be valid JSON");
    records_from_value(value).expect("embedded sample data must be a record array")
}
