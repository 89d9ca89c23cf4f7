//! Core carbon-accounting logic for the site tracker.
//!
//! This crate contains the fundamental types and logic for:
//! - Activity model: the closed category set and logged records
//! - Factors: the default emission-factor table (injectable configuration)
//! - Aggregation: bucketed emission/saving totals forming the net trend
//! - Forecasting: least-squares projection of net emissions
//!
//! Everything here is pure, synchronous computation over in-memory data;
//! persistence and presentation live with the callers.

pub mod activity;
pub mod aggregate;
pub mod factors;
pub mod forecast;

pub use activity::{ActivityCategory, ActivityRecord, FuelType, UnknownCategory};
pub use aggregate::{AggregateError, Granularity, TrendPoint, aggregate};
pub use factors::EmissionFactors;
pub use forecast::{FORECAST_HORIZON, ForecastPoint, forecast};
