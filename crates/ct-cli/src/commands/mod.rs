//! CLI subcommand implementations.

pub mod factors;
pub mod forecast;
pub mod trend;

use chrono::{DateTime, Utc};
use ct_core::Granularity;

/// Formats a bucket start time for table output.
///
/// Daily buckets render as a date, monthly buckets as year-month.
pub fn format_bucket(time: DateTime<Utc>, granularity: Granularity) -> String {
    match granularity {
        Granularity::Daily => time.format("%Y-%m-%d").to_string(),
        Granularity::Monthly => time.format("%Y-%m").to_string(),
    }
}
