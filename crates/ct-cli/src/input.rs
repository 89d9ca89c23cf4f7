//! Activity record input loading.

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use anyhow::{Context, Result};
use ct_core::ActivityRecord;

/// Reads a JSON array of activity records from a file, or stdin when the
/// path is `-`.
///
/// A record with a category outside the closed set fails the whole load;
/// dropping it silently would understate the aggregated totals.
pub fn read_records(path: &Path) -> Result<Vec<ActivityRecord>> {
    let mut raw = String::new();
    if path.as_os_str() == "-" {
        io::stdin()
            .read_to_string(&mut raw)
            .context("failed to read records from stdin")?;
    } else {
        File::open(path)
            .with_context(|| format!("failed to open records file: {}", path.display()))?
            .read_to_string(&mut raw)
            .with_context(|| format!("failed to read records file: {}", path.display()))?;
    }

    let records: Vec<ActivityRecord> =
        serde_json::from_str(&raw).context("failed to parse activity records")?;
    tracing::debug!(records = records.len(), "loaded activity records");
    Ok(records)
}
