//! Core record type and input-shape handling.
//!
//! A [`Record`] is one procurement notice as the catalog serves it: an
//! ordered mapping from field name to JSON value. No field is guaranteed
//! present, so every consumer goes through the optional accessors here and
//! treats "missing" as empty rather than as an error.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::Error;

/// One procurement notice. Field order is preserved so JSON export
/// round-trips the catalog's own layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record(Map<String, Value>);

impl Record {
    pub fn new(fields: Map<String, Value>) -> Self {
        Record(fields)
    }

    /// Raw value for `field`, if present.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// String form of `field`. Missing and `null` both yield `""`; strings
    /// come back verbatim; numbers and booleans use their JSON display form.
    pub fn text(&self, field: &str) -> String {
        match self.0.get(field) {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        }
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }
}

/// Extract the record sequence from a raw top-level JSON value.
///
/// Accepts either a bare array of records or an object carrying an `items`
/// array (the catalog API's response envelope). Anything else is the fatal
/// input-shape error.
pub fn records_from_value(value: Value) -> Result<Vec<Record>, Error> {
    let items = match value {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove("items") {
            Some(Value::Array(items)) => items,
            _ => return Err(Error::InvalidShape),
        },
        _ => return Err(Error::InvalidShape),
    };

    items
        .into_iter()
        .map(|item| match item {
            Value::Object(fields) => Ok(Record::new(fields)),
            _ => Err(Error::InvalidShape),
        })
        .collect()
}
