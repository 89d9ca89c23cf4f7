//! Default emission factor table.
//!
//! The table is configuration, not logic: callers may deserialize an
//! alternate factor set (e.g., a regional grid mix) and pass it into the
//! aggregator. The defaults below are the golden values the rest of the
//! system is calibrated against.

use serde::{Deserialize, Serialize};

use crate::activity::{ActivityCategory, FuelType};

/// Conversion constants from physical quantities to kg CO2e.
///
/// Initialized once and read-only thereafter; resolving a factor has no
/// side effects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmissionFactors {
    /// Grid electricity, kg CO2e per kWh.
    pub grid_energy: f64,

    /// Diesel fuel, kg CO2e per liter.
    pub diesel: f64,

    /// Petrol fuel, kg CO2e per liter.
    pub petrol: f64,

    /// Hybrid plant fuel blend, kg CO2e per liter.
    pub hybrid: f64,

    /// Freight transport, kg CO2e per ton-km.
    pub transport: f64,

    /// Waste to landfill, kg CO2e per kg.
    pub landfill_waste: f64,

    /// Mains water, kg CO2e per m³.
    pub water: f64,

    /// Standard construction material, kg CO2e per ton.
    pub standard_material: f64,

    /// Sustainable construction material, kg CO2e per ton.
    pub sustainable_material: f64,
}

impl Default for EmissionFactors {
    fn default() -> Self {
        Self {
            grid_energy: 0.43,
            diesel: 2.68,
            petrol: 2.31,
            hybrid: 1.61,
            transport: 0.12,
            landfill_waste: 1.90,
            water: 0.34,
            standard_material: 800.0,
            sustainable_material: 350.0,
        }
    }
}

impl EmissionFactors {
    /// Resolves the default factor for a category.
    ///
    /// Saving categories (renewable, recycling, water-reuse) resolve to the
    /// paired standard factor: the avoided baseline is what the grid draw,
    /// landfill load, or mains draw would have emitted. The optional fuel
    /// qualifier narrows energy and machinery factors; other categories
    /// ignore it because their unit does not match any fuel.
    pub fn factor_for(&self, category: ActivityCategory, fuel: Option<FuelType>) -> f64 {
        match category {
            ActivityCategory::Energy | ActivityCategory::Renewable => {
                self.fuel_factor(fuel.unwrap_or(FuelType::Grid))
            }
            ActivityCategory::Machinery => self.fuel_factor(fuel.unwrap_or(FuelType::Diesel)),
            ActivityCategory::Transport => self.transport,
            ActivityCategory::Material => self.standard_material,
            ActivityCategory::Waste | ActivityCategory::Recycling => self.landfill_waste,
            ActivityCategory::Water | ActivityCategory::WaterReuse => self.water,
        }
    }

    /// Per-liter (or per-kWh for electric/grid) factor for a fuel qualifier.
    const fn fuel_factor(&self, fuel: FuelType) -> f64 {
        match fuel {
            FuelType::Diesel => self.diesel,
            FuelType::Petrol => self.petrol,
            FuelType::Hybrid => self.hybrid,
            FuelType::Electric | FuelType::Grid => self.grid_energy,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[expect(clippy::float_cmp, reason = "golden constants must match exactly")]
    fn golden_default_values() {
        let factors = EmissionFactors::default();
        assert_eq!(factors.grid_energy, 0.43);
        assert_eq!(factors.diesel, 2.68);
        assert_eq!(factors.transport, 0.12);
        assert_eq!(factors.landfill_waste, 1.90);
        assert_eq!(factors.water, 0.34);
        assert_eq!(factors.standard_material, 800.0);
        assert_eq!(factors.sustainable_material, 350.0);
    }

    #[test]
    #[expect(clippy::float_cmp, reason = "factor resolution is exact")]
    fn saving_categories_reuse_paired_baseline() {
        let factors = EmissionFactors::default();
        assert_eq!(
            factors.factor_for(ActivityCategory::Renewable, None),
            factors.grid_energy
        );
        assert_eq!(
            factors.factor_for(ActivityCategory::Recycling, None),
            factors.landfill_waste
        );
        assert_eq!(
            factors.factor_for(ActivityCategory::WaterReuse, None),
            factors.water
        );
    }

    #[test]
    #[expect(clippy::float_cmp, reason = "factor resolution is exact")]
    fn fuel_type_narrows_machinery_factor() {
        let factors = EmissionFactors::default();
        assert_eq!(
            factors.factor_for(ActivityCategory::Machinery, None),
            factors.diesel
        );
        assert_eq!(
            factors.factor_for(ActivityCategory::Machinery, Some(FuelType::Petrol)),
            factors.petrol
        );
        assert_eq!(
            factors.factor_for(ActivityCategory::Machinery, Some(FuelType::Electric)),
            factors.grid_energy
        );
    }

    #[test]
    #[expect(clippy::float_cmp, reason = "factor resolution is exact")]
    fn energy_defaults_to_grid() {
        let factors = EmissionFactors::default();
        assert_eq!(
            factors.factor_for(ActivityCategory::Energy, None),
            factors.grid_energy
        );
        assert_eq!(
            factors.factor_for(ActivityCategory::Energy, Some(FuelType::Diesel)),
            factors.diesel
        );
    }

    #[test]
    #[expect(clippy::float_cmp, reason = "deserialized overrides are exact")]
    fn partial_config_overrides_merge_with_defaults() {
        let factors: EmissionFactors =
            serde_json::from_str(r#"{"grid_energy": 0.19}"#).expect("should deserialize");
        assert_eq!(factors.grid_energy, 0.19);
        assert_eq!(factors.diesel, 2.68);
    }
}
