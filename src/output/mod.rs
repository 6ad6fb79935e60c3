//! Rendering of [`BenchSummary`](crate::BenchSummary) values.
//!
//! - [`json`]: compact and pretty JSON via `serde_json`
//! - [`terminal`]: colored human-readable summary

pub mod json;
pub mod terminal;

pub use json::{to_json, to_json_pretty};
pub use terminal::format_summary;
