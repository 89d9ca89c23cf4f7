//! Activity records and the closed category set.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Canonical activity categories for site carbon accounting.
///
/// This enum is the single source of truth for category strings. Records
/// referencing anything outside this set are rejected at the parse boundary
/// rather than silently dropped, since a skipped record would understate
/// totals without anyone noticing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActivityCategory {
    /// Purchased electricity, in kWh.
    Energy,
    /// On-site renewable generation, in kWh (avoided grid draw).
    Renewable,
    /// Freight transport, in ton-km.
    Transport,
    /// Plant and machinery fuel, in liters.
    Machinery,
    /// Construction material, in tons.
    Material,
    /// Waste to landfill, in kg.
    Waste,
    /// Waste diverted to recycling, in kg (avoided landfill).
    Recycling,
    /// Mains water, in m³.
    Water,
    /// Reused/greywater, in m³ (avoided mains draw).
    WaterReuse,
}

impl ActivityCategory {
    /// Returns true for categories that represent avoided emissions.
    ///
    /// Material is not listed here: a material record's polarity depends on
    /// whether it carries a sustainable emission factor (see the aggregator).
    pub const fn is_saving(self) -> bool {
        matches!(self, Self::Renewable | Self::Recycling | Self::WaterReuse)
    }
}

impl fmt::Display for ActivityCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Energy => "energy",
            Self::Renewable => "renewable",
            Self::Transport => "transport",
            Self::Machinery => "machinery",
            Self::Material => "material",
            Self::Waste => "waste",
            Self::Recycling => "recycling",
            Self::Water => "water",
            Self::WaterReuse => "water-reuse",
        };
        write!(f, "{s}")
    }
}

impl FromStr for ActivityCategory {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "energy" => Ok(Self::Energy),
            "renewable" => Ok(Self::Renewable),
            "transport" => Ok(Self::Transport),
            "machinery" => Ok(Self::Machinery),
            "material" => Ok(Self::Material),
            "waste" => Ok(Self::Waste),
            "recycling" => Ok(Self::Recycling),
            "water" => Ok(Self::Water),
            "water-reuse" | "water_reuse" => Ok(Self::WaterReuse),
            _ => Err(UnknownCategory(s.to_string())),
        }
    }
}

impl Serialize for ActivityCategory {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for ActivityCategory {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Error type for category strings outside the closed set.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown activity category: {0}")]
pub struct UnknownCategory(String);

/// Fuel qualifier narrowing which default emission factor applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FuelType {
    Diesel,
    Petrol,
    Hybrid,
    Electric,
    Grid,
}

impl FuelType {
    /// String representation for display and config keys.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Diesel => "diesel",
            Self::Petrol => "petrol",
            Self::Hybrid => "hybrid",
            Self::Electric => "electric",
            Self::Grid => "grid",
        }
    }
}

impl fmt::Display for FuelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One logged sustainability-relevant event.
///
/// Records are immutable once created; an edit is a replacement, never a
/// partial mutation. `value` is the physical quantity in the unit implied
/// by the category (kWh, liters, ton-km, tons, kg, m³).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityRecord {
    /// Which category this record belongs to.
    #[serde(rename = "type")]
    pub category: ActivityCategory,

    /// Physical quantity, non-negative.
    pub value: f64,

    /// Measured emission factor for the sustainable alternative,
    /// overriding the table default.
    #[serde(
        rename = "sustainableEF",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub sustainable_ef: Option<f64>,

    /// Measured standard emission factor, overriding the table default.
    #[serde(
        rename = "standardEF",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub standard_ef: Option<f64>,

    /// Fuel qualifier for energy and machinery records.
    #[serde(rename = "fuelType", default, skip_serializing_if = "Option::is_none")]
    pub fuel_type: Option<FuelType>,

    /// When the activity occurred.
    pub timestamp: DateTime<Utc>,
}

impl ActivityRecord {
    /// Creates a record with no factor overrides and no fuel qualifier.
    pub const fn new(category: ActivityCategory, value: f64, timestamp: DateTime<Utc>) -> Self {
        Self {
            category,
            value,
            sustainable_ef: None,
            standard_ef: None,
            fuel_type: None,
            timestamp,
        }
    }

    /// Sets the fuel qualifier.
    #[must_use]
    pub const fn with_fuel(mut self, fuel: FuelType) -> Self {
        self.fuel_type = Some(fuel);
        self
    }

    /// Sets a measured standard emission factor.
    #[must_use]
    pub const fn with_standard_ef(mut self, ef: f64) -> Self {
        self.standard_ef = Some(ef);
        self
    }

    /// Sets a measured sustainable emission factor.
    #[must_use]
    pub const fn with_sustainable_ef(mut self, ef: f64) -> Self {
        self.sustainable_ef = Some(ef);
        self
    }
}
