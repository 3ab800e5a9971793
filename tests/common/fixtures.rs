//! Known corpora used across harnesses.

use licita_core::{records_from_value, Record};

/// The catalog API response envelope: an object with an `items` array.
pub const ITEMS_ENVELOPE: &str = r#"{
  "items": [
    {"uf": "PR", "title": "Edital A", "ano": "2025"},
    {"uf": "SP", "title": "Edital B", "ano": "2024"}
  ]
}"#;

/// A bare array is also a valid top-level shape.
pub const BARE_ARRAY: &str = r#"[
  {"uf": "PR", "title": "Edital A", "ano": "2025"},
  {"uf": "SP", "title": "Edital B", "ano": "2024"}
]"#;

pub fn envelope_records() -> Vec<Record> {
    let value = serde_json::from_str(ITEMS_ENVELOPE).expect("fixture must be valid JSON");
    records_from_value(value).expect("fixture must have a valid shape")
}

/// The three embedded sample notices (Mandirituba corpus).
pub fn sample_corpus() -> Vec<Record> {
    licita_sources::sample_records()
}
