//! JSON file loader.
//!
//! Reads a saved catalog response (or any record array) from disk. The
//! top-level shape check is the same one the API client uses, so a file and
//! a live response are interchangeable inputs to the pipeline.

use std::path::Path;

use anyhow::Context;
use serde_json::Value;

use licita_core::{records_from_value, Record};

pub fn load_records(path: impl AsRef<Path>) -> anyhow::Result<Vec<Record>> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    let value: Value = serde_json::from_str(&text)
        .with_context(|| format!("{} is not valid JSON", path.display()))?;
    records_from_value(value).with_context(|| format!("loading records from {}", path.display()))
}
