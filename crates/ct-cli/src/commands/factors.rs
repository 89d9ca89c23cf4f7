//! Factors command: show the effective emission-factor table.

use std::fmt::Write;

use anyhow::Result;
use ct_core::EmissionFactors;

/// Runs `ct factors`.
pub fn run(factors: &EmissionFactors, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(factors)?);
    } else {
        print!("{}", format_factors(factors));
    }
    Ok(())
}

/// Formats the factor table with the unit each factor converts from.
pub fn format_factors(factors: &EmissionFactors) -> String {
    let rows = [
        ("grid_energy", factors.grid_energy, "kg CO2e/kWh"),
        ("diesel", factors.diesel, "kg CO2e/L"),
        ("petrol", factors.petrol, "kg CO2e/L"),
        ("hybrid", factors.hybrid, "kg CO2e/L"),
        ("transport", factors.transport, "kg CO2e/ton-km"),
        ("landfill_waste", factors.landfill_waste, "kg CO2e/kg"),
        ("water", factors.water, "kg CO2e/m³"),
        ("standard_material", factors.standard_material, "kg CO2e/ton"),
        (
            "sustainable_material",
            factors.sustainable_material,
            "kg CO2e/ton",
        ),
    ];

    let mut output = String::new();
    writeln!(output, "EMISSION FACTORS").unwrap();
    writeln!(output).unwrap();
    for (name, value, unit) in rows {
        writeln!(output, "{name:<22}{value:>8.2}  {unit}").unwrap();
    }
    output
}
