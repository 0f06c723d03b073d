//! File size text for the document table.
//!
//! The list view shows `-` for a missing or zero size and calls
//! [`format_file_size_in_mb`] otherwise.

const BYTES_PER_MB: f64 = 1_048_576.0;

/// Render `bytes` as megabytes with two decimals, e.g. `"2.00 MB"`.
#[must_use]
#[expect(
    clippy::cast_precision_loss,
    clippy::float_arithmetic,
    reason = "display only; sub-byte precision is irrelevant"
)]
pub fn format_file_size_in_mb(bytes: u64) -> String {
    format!("{:.2} MB", bytes as f64 / BYTES_PER_MB)
}
