//! Error taxonomy for the core pipeline.
//!
//! Only two conditions are fatal: malformed top-level input and an unknown
//! output format. Field absence and date-parse failure are recovered
//! silently by the consumers that hit them.

/// Fatal core errors. Everything else degrades to placeholder values.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Raw input was neither a record array nor an object with an `items`
    /// array of records.
    #[error("invalid input: expected a record array or an object with an \"items\" array")]
    InvalidShape,

    /// Output format name not recognized. Checked before any rendering runs.
    #[error("unsupported output format {0:?} (expected list, table, json, or csv)")]
    UnsupportedFormat(String),

    #[error("write failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV write failed: {0}")]
    Csv(#[from] csv::Error),
}
