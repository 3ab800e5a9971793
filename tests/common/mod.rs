//! Shared test utilities for licita integration harnesses.
//!
//! Import everything you need via `mod common; use common::*;` at the top of
//! each harness file. Builders construct records the way the catalog shapes
//! them; fixtures hold known corpora.

pub mod builders;
pub mod fixtures;

pub use builders::*;
pub use fixtures::*;

/// Assert that a record sequence carries exactly these titles, in order.
#[macro_export]
macro_rules! assert_titles {
    ($records:expr, $expected:expr) => {{
        let actual: Vec<String> = $records.iter().map(|r| r.text("title")).collect();
        let expected: Vec<String> = $expected.iter().map(|t: &&str| t.to_string()).collect();
        ::pretty_assertions::assert_eq!(actual, expected, "record title sequence mismatch");
    }};
}
