//! Net-emission forecasting via ordinary least-squares regression.
//!
//! Projects the aggregated trend forward by a fixed horizon. The fit is a
//! single-variable linear regression over bucket indices with plain
//! left-to-right accumulation, so identical inputs reproduce identical
//! outputs bit for bit.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::aggregate::{Granularity, TrendPoint};

/// Number of future buckets projected beyond the observed trend.
pub const FORECAST_HORIZON: usize = 6;

/// One projected future bucket.
///
/// `net` and `emissions` are clamped to be non-negative; `savings` is
/// always zero (forecasting savings is an explicit non-goal).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    /// Projected bucket start time.
    pub time: DateTime<Utc>,

    /// Projected emissions, equal to `net`.
    pub emissions: f64,

    /// Always 0.0.
    pub savings: f64,

    /// Projected net emissions, clamped at zero.
    pub net: f64,
}

/// Projects the trend's `net` series forward by [`FORECAST_HORIZON`] buckets.
///
/// The input is resorted ascending defensively in case the caller did not
/// come through the aggregator. With fewer than two points the slope is
/// defined as zero rather than failing on the degenerate series; an empty
/// input yields an empty forecast. This function never fails for finite
/// numeric input.
#[expect(
    clippy::cast_precision_loss,
    reason = "bucket counts are far below f64's integer range"
)]
pub fn forecast(trend: &[TrendPoint], granularity: Granularity) -> Vec<ForecastPoint> {
    if trend.is_empty() {
        return Vec::new();
    }

    let mut points: Vec<&TrendPoint> = trend.iter().collect();
    points.sort_by_key(|p| p.time);

    // Index in sorted order is the independent variable, net the dependent.
    let mut sum_x = 0.0;
    let mut sum_y = 0.0;
    let mut sum_xy = 0.0;
    let mut sum_xx = 0.0;
    for (i, point) in points.iter().enumerate() {
        let x = i as f64;
        sum_x += x;
        sum_y += point.net;
        sum_xy += x * point.net;
        sum_xx += x * x;
    }

    let n = points.len() as f64;
    let denominator = n * sum_xx - sum_x * sum_x;
    // Zero denominator means fewer than 2 distinct indices; flat projection.
    let slope = if denominator == 0.0 {
        0.0
    } else {
        (n * sum_xy - sum_x * sum_y) / denominator
    };
    let intercept = (sum_y - slope * sum_x) / n;

    tracing::debug!(points = points.len(), slope, intercept, "fitted trend line");

    let last_time = points[points.len() - 1].time;
    let mut time = last_time;
    (1..=FORECAST_HORIZON)
        .map(|i| {
            time = granularity.step(time);
            let net = (slope * (n + i as f64) + intercept).max(0.0);
            ForecastPoint {
                time,
                emissions: net,
                savings: 0.0,
                net,
            }
        })
        .collect()
}
