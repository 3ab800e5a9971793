//! Sort engine — date-aware, stable, direction- and limit-capable ordering.
//!
//! The comparison key for a record is its parsed date-time when the sort
//! field is a known timestamp field (or the value looks date-like), falling
//! back to the raw string form otherwise. Mixed parsed/unparsed comparisons
//! also fall back to raw strings, so unparseable values — typically empty —
//! interleave by string order and land before real dates. That quirk is kept
//! deliberately; see DESIGN.md.

use std::cmp::Ordering;

use chrono::NaiveDateTime;

use crate::dates::DateValue;
use crate::types::Record;

/// Catalog fields that always carry ISO timestamps.
pub const ISO_DATE_FIELDS: [&str; 5] = [
    "data_publicacao_pncp",
    "data_atualizacao_pncp",
    "data_assinatura",
    "data_inicio_vigencia",
    "data_fim_vigencia",
];

/// Field to order by, direction, and an optional result cap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    pub field: String,
    pub descending: bool,
    /// Maximum number of records to keep after sorting; 0 means unlimited.
    pub limit: usize,
}

impl Default for SortSpec {
    fn default() -> Self {
        SortSpec {
            field: "data_publicacao_pncp".to_string(),
            descending: false,
            limit: 0,
        }
    }
}

/// Sort in place, stably, then apply the limit.
///
/// `descending` flips the comparator rather than reversing the output, so
/// records with equal keys keep their original relative order in both
/// directions.
pub fn sort(records: &mut Vec<Record>, spec: &SortSpec) {
    let mut keyed: Vec<(SortKey, Record)> = records
        .drain(..)
        .map(|record| (SortKey::for_record(&record, &spec.field), record))
        .collect();

    if spec.descending {
        keyed.sort_by(|(a, _), (b, _)| b.cmp(a));
    } else {
        keyed.sort_by(|(a, _), (b, _)| a.cmp(b));
    }

    records.extend(keyed.into_iter().map(|(_, record)| record));

    if spec.limit > 0 {
        records.truncate(spec.limit);
    }
}

/// Comparison key: parsed date-time when available, raw string otherwise.
#[derive(Debug, Clone)]
pub struct SortKey {
    date: Option<NaiveDateTime>,
    raw: String,
}

impl SortKey {
    fn for_record(record: &Record, field: &str) -> SortKey {
        let raw = record.text(field);
        let date_like = ISO_DATE_FIELDS.contains(&field) || raw.contains('T');
        let date = if date_like {
            DateValue::parse(&raw).as_parsed()
        } else {
            None
        };
        SortKey { date, raw }
    }
}

impl Ord for SortKey {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.date, other.date) {
            (Some(a), Some(b)) => a.cmp(&b),
            _ => self.raw.cmp(&other.raw),
        }
    }
}

impl PartialOrd for SortKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for SortKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SortKey {}
