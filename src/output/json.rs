//! JSON serialization for benchmark summaries.

use crate::result::BenchSummary;

/// Serialize a BenchSummary to a compact JSON string.
///
/// # Errors
///
/// Returns an error if serialization fails. Non-finite statistics (from an
/// inner-loop count of zero) serialize as `null`.
pub fn to_json(summary: &BenchSummary) -> Result<String, serde_json::Error> {
    serde_json::to_string(summary)
}

/// Serialize a BenchSummary to a pretty-printed JSON string.
///
/// # Errors
///
/// Same as [`to_json`].
pub fn to_json_pretty(summary: &BenchSummary) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(summary)
}
