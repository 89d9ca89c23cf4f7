//! Activity aggregation into a time-ordered emission trend.
//!
//! Turns a batch of [`ActivityRecord`]s into per-bucket emitted and saved
//! kg CO2e totals. Each invocation is a pure function of its inputs; the
//! only shared input is the read-only factor table.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, Duration, Months, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::activity::{ActivityCategory, ActivityRecord};
use crate::factors::EmissionFactors;

/// Time bucket width for aggregation and forecast stepping.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    #[default]
    Daily,
    Monthly,
}

impl Granularity {
    /// Truncates a timestamp to the start of its bucket (UTC).
    pub fn bucket_start(self, t: DateTime<Utc>) -> DateTime<Utc> {
        let date = match self {
            Self::Daily => t.date_naive(),
            // Day 1 always exists for a valid year/month
            Self::Monthly => t.date_naive().with_day(1).unwrap(),
        };
        date.and_time(NaiveTime::MIN).and_utc()
    }

    /// Steps a timestamp forward by one bucket width.
    ///
    /// Saturates at the upper end of the representable datetime range.
    pub fn step(self, t: DateTime<Utc>) -> DateTime<Utc> {
        match self {
            Self::Daily => t
                .checked_add_signed(Duration::days(1))
                .unwrap_or(DateTime::<Utc>::MAX_UTC),
            Self::Monthly => t
                .checked_add_months(Months::new(1))
                .unwrap_or(DateTime::<Utc>::MAX_UTC),
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Daily => "daily",
            Self::Monthly => "monthly",
        };
        write!(f, "{s}")
    }
}

impl FromStr for Granularity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "daily" | "day" => Ok(Self::Daily),
            "monthly" | "month" => Ok(Self::Monthly),
            _ => Err(format!("unknown granularity: {s} (expected daily|monthly)")),
        }
    }
}

/// One aggregated time bucket, ordered ascending by `time`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    /// Bucket start time.
    pub time: DateTime<Utc>,

    /// Total emitted kg CO2e in this bucket.
    pub emissions: f64,

    /// Total avoided kg CO2e in this bucket.
    pub savings: f64,

    /// `emissions - savings`.
    pub net: f64,
}

/// Errors surfaced by [`aggregate`].
///
/// A bad record aborts the whole batch: skipping it would silently
/// understate totals.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum AggregateError {
    /// A record carried a negative or non-finite quantity.
    #[error("record {index} has invalid value {value}: quantities must be finite and non-negative")]
    InvalidValue { index: usize, value: f64 },
}

/// Aggregates activity records into a trend series ordered ascending by time.
///
/// Per record, the effective emission factor is the record's own measured
/// factor when present, otherwise the table default for its category and
/// fuel qualifier. Emitting categories add `value * factor` to the bucket's
/// emissions; saving categories add it to the bucket's savings. Empty input
/// yields an empty series.
pub fn aggregate(
    records: &[ActivityRecord],
    factors: &EmissionFactors,
    granularity: Granularity,
) -> Result<Vec<TrendPoint>, AggregateError> {
    let mut buckets: BTreeMap<DateTime<Utc>, (f64, f64)> = BTreeMap::new();

    for (index, record) in records.iter().enumerate() {
        if !record.value.is_finite() || record.value < 0.0 {
            return Err(AggregateError::InvalidValue {
                index,
                value: record.value,
            });
        }

        let (emitted, saved) = contribution(record, factors);
        let entry = buckets
            .entry(granularity.bucket_start(record.timestamp))
            .or_insert((0.0, 0.0));
        entry.0 += emitted;
        entry.1 += saved;
    }

    tracing::debug!(
        records = records.len(),
        buckets = buckets.len(),
        %granularity,
        "aggregated activity records"
    );

    Ok(buckets
        .into_iter()
        .map(|(time, (emissions, savings))| TrendPoint {
            time,
            emissions,
            savings,
            net: emissions - savings,
        })
        .collect())
}

/// Splits one record into its (emitted, saved) kg CO2e contribution.
///
/// Material polarity is decided per record: a material record carrying a
/// sustainable emission factor books its contribution as a saving at that
/// factor; otherwise it emits at the standard factor.
fn contribution(record: &ActivityRecord, factors: &EmissionFactors) -> (f64, f64) {
    if record.category.is_saving() {
        let factor = record
            .sustainable_ef
            .unwrap_or_else(|| factors.factor_for(record.category, record.fuel_type));
        return (0.0, record.value * factor);
    }

    if record.category == ActivityCategory::Material {
        if let Some(ef) = record.sustainable_ef {
            return (0.0, record.value * ef);
        }
    }

    let factor = record
        .standard_ef
        .unwrap_or_else(|| factors.factor_for(record.category, record.fuel_type));
    (record.value * factor, 0.0)
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::activity::FuelType;

    fn ts(day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, day, hour, 0, 0)
            .single()
            .expect("valid test timestamp")
    }

    fn approx(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-9, "expected {b}, got {a}");
    }

    #[test]
    fn empty_input_yields_empty_trend() {
        let trend = aggregate(&[], &EmissionFactors::default(), Granularity::Daily)
            .expect("empty input is not an error");
        assert!(trend.is_empty());
    }

    #[test]
    fn single_energy_record_uses_grid_factor() {
        let records = [ActivityRecord::new(
            ActivityCategory::Energy,
            100.0,
            ts(1, 9),
        )];
        let trend = aggregate(&records, &EmissionFactors::default(), Granularity::Daily).unwrap();

        assert_eq!(trend.len(), 1);
        approx(trend[0].emissions, 43.0);
        approx(trend[0].savings, 0.0);
        approx(trend[0].net, 43.0);
    }

    #[test]
    fn single_renewable_record_saves_at_grid_baseline() {
        let records = [ActivityRecord::new(
            ActivityCategory::Renewable,
            50.0,
            ts(1, 9),
        )];
        let trend = aggregate(&records, &EmissionFactors::default(), Granularity::Daily).unwrap();

        assert_eq!(trend.len(), 1);
        approx(trend[0].emissions, 0.0);
        approx(trend[0].savings, 21.5);
        approx(trend[0].net, -21.5);
    }

    #[test]
    fn record_ef_override_wins_over_table() {
        let records = [
            ActivityRecord::new(ActivityCategory::Energy, 100.0, ts(1, 9)).with_standard_ef(0.2),
        ];
        let trend = aggregate(&records, &EmissionFactors::default(), Granularity::Daily).unwrap();
        approx(trend[0].emissions, 20.0);
    }

    #[test]
    fn machinery_fuel_type_selects_factor() {
        let records = [
            ActivityRecord::new(ActivityCategory::Machinery, 10.0, ts(1, 9))
                .with_fuel(FuelType::Petrol),
        ];
        let trend = aggregate(&records, &EmissionFactors::default(), Granularity::Daily).unwrap();
        approx(trend[0].emissions, 23.1);
    }

    #[test]
    fn material_polarity_follows_sustainable_ef() {
        let factors = EmissionFactors::default();
        let standard = [ActivityRecord::new(ActivityCategory::Material, 2.0, ts(1, 9))];
        let sustainable = [ActivityRecord::new(ActivityCategory::Material, 2.0, ts(1, 9))
            .with_sustainable_ef(factors.sustainable_material)];

        let trend = aggregate(&standard, &factors, Granularity::Daily).unwrap();
        approx(trend[0].emissions, 1600.0);
        approx(trend[0].savings, 0.0);

        let trend = aggregate(&sustainable, &factors, Granularity::Daily).unwrap();
        approx(trend[0].emissions, 0.0);
        approx(trend[0].savings, 700.0);
    }

    #[test]
    fn records_bucket_by_day_and_sort_ascending() {
        // Deliberately out of order
        let records = [
            ActivityRecord::new(ActivityCategory::Waste, 10.0, ts(3, 16)),
            ActivityRecord::new(ActivityCategory::Energy, 100.0, ts(1, 9)),
            ActivityRecord::new(ActivityCategory::Energy, 50.0, ts(1, 17)),
            ActivityRecord::new(ActivityCategory::Renewable, 20.0, ts(2, 12)),
        ];
        let trend = aggregate(&records, &EmissionFactors::default(), Granularity::Daily).unwrap();

        assert_eq!(trend.len(), 3);
        assert!(trend.windows(2).all(|w| w[0].time < w[1].time));
        assert_eq!(trend[0].time, ts(1, 0));

        // Day 1: two energy records accumulate
        approx(trend[0].emissions, 64.5);
        // Every point satisfies the net identity
        for point in &trend {
            approx(point.net, point.emissions - point.savings);
        }
    }

    #[test]
    fn monthly_granularity_merges_days() {
        let records = [
            ActivityRecord::new(ActivityCategory::Energy, 100.0, ts(1, 9)),
            ActivityRecord::new(ActivityCategory::Energy, 100.0, ts(28, 9)),
        ];
        let trend = aggregate(&records, &EmissionFactors::default(), Granularity::Monthly).unwrap();

        assert_eq!(trend.len(), 1);
        assert_eq!(trend[0].time, ts(1, 0));
        approx(trend[0].emissions, 86.0);
    }

    #[test]
    fn negative_value_aborts_the_batch() {
        let records = [
            ActivityRecord::new(ActivityCategory::Energy, 100.0, ts(1, 9)),
            ActivityRecord::new(ActivityCategory::Water, -5.0, ts(1, 10)),
        ];
        let err = aggregate(&records, &EmissionFactors::default(), Granularity::Daily)
            .expect_err("negative value must be rejected");
        assert_eq!(err, AggregateError::InvalidValue { index: 1, value: -5.0 });
    }

    #[test]
    fn aggregation_is_idempotent() {
        let records = [
            ActivityRecord::new(ActivityCategory::Energy, 100.0, ts(1, 9)),
            ActivityRecord::new(ActivityCategory::Recycling, 40.0, ts(2, 9)),
        ];
        let factors = EmissionFactors::default();
        let first = aggregate(&records, &factors, Granularity::Daily).unwrap();
        let second = aggregate(&records, &factors, Granularity::Daily).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn granularity_step_daily_and_monthly() {
        assert_eq!(Granularity::Daily.step(ts(1, 0)), ts(2, 0));
        assert_eq!(
            Granularity::Monthly.step(ts(1, 0)),
            Utc.with_ymd_and_hms(2025, 4, 1, 0, 0, 0).single().unwrap()
        );
    }

    #[test]
    fn granularity_parses_from_str() {
        assert_eq!("daily".parse::<Granularity>().unwrap(), Granularity::Daily);
        assert_eq!(
            "monthly".parse::<Granularity>().unwrap(),
            Granularity::Monthly
        );
        assert!("weekly".parse::<Granularity>().is_err());
    }
}
