//! licita-core — record pipeline for PNCP procurement notices.
//!
//! This crate holds the part of the system with actual invariants: turning
//! heterogeneous catalog records into a canonical display shape, filtering
//! and sorting them, and rendering the result.
//!
//! # Architecture
//!
//! ```text
//! Sources ──► Records ──► Filter ──► Sort ──► Render
//!                │
//!                └──► Normalize (display summary)
//! ```
//!
//! Everything here is synchronous and pure: sources hand over a fully
//! materialized batch of [`Record`] values, the pipeline only reads them.
//! Network fetch and file I/O live in `licita-sources` and the binary.

pub mod config;
pub mod dates;
pub mod error;
pub mod filter;
pub mod normalize;
pub mod render;
pub mod sort;
pub mod types;

pub use error::Error;
pub use types::{records_from_value, Record};
