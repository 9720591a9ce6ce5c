//! Flat tabular export of a calculation.
//!
//! The header row and column order are part of the contract: same entries
//! in, byte-identical text out, so exports are diffable across runs.

use itertools::Itertools;

use crate::engine::{line_emissions, validate_entry};
use crate::format::{format_kg, format_quantity};
use crate::models::{CalculationData, Scope, ScopeTotals};

/// Fixed header row.
pub const CSV_HEADER: &str =
    "Scope,Category,Source,Activity Data,Unit,Emission Factor,Emissions (kg CO2e)";

/// Render the tabular export: one row per valid entry in scope order
/// (1, 2, 3), a blank separator, then the four aggregate rows with only the
/// emissions column populated. Entries failing the validation gate are
/// skipped; they never abort their siblings.
pub fn render_csv(data: &CalculationData, totals: &ScopeTotals) -> String {
    let mut out = String::new();
    out.push_str(CSV_HEADER);
    out.push('\n');

    for scope in Scope::ALL {
        for entry in data.entries(scope) {
            if !validate_entry(entry).is_valid {
                continue;
            }
            let emissions = line_emissions(entry.activity_data, entry.emission_factor);
            let row = [
                scope.label().to_string(),
                entry.category.clone(),
                entry.source.clone(),
                entry.activity_data.map(format_quantity).unwrap_or_default(),
                entry.unit.clone(),
                entry.emission_factor.map(format_quantity).unwrap_or_default(),
                format_kg(emissions),
            ];
            out.push_str(&row.iter().map(|f| csv_field(f)).join(","));
            out.push('\n');
        }
    }

    out.push('\n');
    for (label, value) in [
        ("Scope 1 Total", totals.scope1),
        ("Scope 2 Total", totals.scope2),
        ("Scope 3 Total", totals.scope3),
        ("Grand Total", totals.total),
    ] {
        out.push_str(&format!("{},,,,,,{}\n", csv_field(label), format_kg(value)));
    }

    out
}

/// Double-quote a field when it would otherwise break the row structure.
fn csv_field(field: &str) -> String {
    if field.contains([',', '"', '\n']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
