//! Trend command: aggregate activity records into the emission trend.

use std::fmt::Write;
use std::path::Path;

use anyhow::{Context, Result};
use ct_core::{EmissionFactors, Granularity, TrendPoint, aggregate};

use super::format_bucket;
use crate::input::read_records;

/// Runs `ct trend`.
pub fn run(
    input: &Path,
    factors: &EmissionFactors,
    granularity: Granularity,
    json: bool,
) -> Result<()> {
    let records = read_records(input)?;
    let trend =
        aggregate(&records, factors, granularity).context("failed to aggregate records")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&trend)?);
    } else {
        print!("{}", format_trend(&trend, granularity));
    }

    Ok(())
}

/// Formats the human-readable trend table.
pub fn format_trend(trend: &[TrendPoint], granularity: Granularity) -> String {
    let mut output = String::new();
    writeln!(output, "CARBON TREND ({granularity} buckets)").unwrap();
    writeln!(output).unwrap();

    if trend.is_empty() {
        writeln!(output, "No activity records in the input.").unwrap();
        return output;
    }

    writeln!(
        output,
        "{:<12}{:>12}{:>12}{:>12}",
        "BUCKET", "EMISSIONS", "SAVINGS", "NET"
    )
    .unwrap();

    for point in trend {
        writeln!(
            output,
            "{:<12}{:>12.2}{:>12.2}{:>12.2}",
            format_bucket(point.time, granularity),
            point.emissions,
            point.savings,
            point.net
        )
        .unwrap();
    }

    let total_emissions: f64 = trend.iter().map(|p| p.emissions).sum();
    let total_savings: f64 = trend.iter().map(|p| p.savings).sum();
    writeln!(output).unwrap();
    writeln!(
        output,
        "{:<12}{:>12.2}{:>12.2}{:>12.2}",
        "TOTAL",
        total_emissions,
        total_savings,
        total_emissions - total_savings
    )
    .unwrap();

    output
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use ct_core::{ActivityCategory, ActivityRecord};
    use insta::assert_snapshot;

    use super::*;

    fn ts(day: u32) -> chrono::DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, day, 9, 0, 0)
            .single()
            .expect("valid test timestamp")
    }

    #[test]
    fn trend_table_renders_buckets_and_totals() {
        let records = [
            ActivityRecord::new(ActivityCategory::Energy, 100.0, ts(1)),
            ActivityRecord::new(ActivityCategory::Renewable, 50.0, ts(1)),
            ActivityRecord::new(ActivityCategory::Waste, 10.0, ts(2)),
        ];
        let trend = aggregate(&records, &EmissionFactors::default(), Granularity::Daily).unwrap();
        let output = format_trend(&trend, Granularity::Daily);

        assert_snapshot!(output.trim_end(), @r"
        CARBON TREND (daily buckets)

        BUCKET         EMISSIONS     SAVINGS         NET
        2025-03-01         43.00       21.50       21.50
        2025-03-02         19.00        0.00       19.00

        TOTAL              62.00       21.50       40.50
        ");
    }

    #[test]
    fn empty_trend_renders_hint() {
        let output = format_trend(&[], Granularity::Daily);
        assert_snapshot!(output.trim_end(), @r"
        CARBON TREND (daily buckets)

        No activity records in the input.
        ");
    }

    #[test]
    fn monthly_buckets_render_year_month() {
        let records = [ActivityRecord::new(ActivityCategory::Water, 8.0, ts(1))];
        let trend =
            aggregate(&records, &EmissionFactors::default(), Granularity::Monthly).unwrap();
        let output = format_trend(&trend, Granularity::Monthly);

        assert!(output.contains("CARBON TREND (monthly buckets)"));
        assert!(output.contains("2025-03"));
        assert!(output.contains("2.72"));
    }
}
