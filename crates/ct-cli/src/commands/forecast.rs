//! Forecast command: project net emissions past the observed trend.

use std::fmt::Write;
use std::path::Path;

use anyhow::{Context, Result};
use ct_core::{EmissionFactors, FORECAST_HORIZON, ForecastPoint, Granularity, aggregate};

use super::format_bucket;
use crate::input::read_records;

/// Runs `ct forecast`.
pub fn run(
    input: &Path,
    factors: &EmissionFactors,
    granularity: Granularity,
    json: bool,
) -> Result<()> {
    let records = read_records(input)?;
    let trend =
        aggregate(&records, factors, granularity).context("failed to aggregate records")?;
    let projected = ct_core::forecast(&trend, granularity);

    if json {
        println!("{}", serde_json::to_string_pretty(&projected)?);
    } else {
        print!("{}", format_forecast(&projected, granularity));
    }

    Ok(())
}

/// Formats the human-readable forecast table.
pub fn format_forecast(projected: &[ForecastPoint], granularity: Granularity) -> String {
    let mut output = String::new();
    writeln!(
        output,
        "CARBON FORECAST ({granularity} buckets, {FORECAST_HORIZON} ahead)"
    )
    .unwrap();
    writeln!(output).unwrap();

    if projected.is_empty() {
        writeln!(output, "No activity records in the input.").unwrap();
        return output;
    }

    writeln!(output, "{:<12}{:>13}", "BUCKET", "PROJECTED NET").unwrap();
    for point in projected {
        writeln!(
            output,
            "{:<12}{:>13.2}",
            format_bucket(point.time, granularity),
            point.net
        )
        .unwrap();
    }

    output
}
