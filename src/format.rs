//! Render-time number formatting. Presentation only: nothing here mutates
//! the underlying totals.

/// Totals at or above this many kg are shown in tonnes.
pub const TONNES_THRESHOLD_KG: f64 = 1000.0;

/// Human-facing emissions figure: kg below the threshold, tonnes at or
/// above, two decimal places either way.
pub fn format_emissions(kg: f64) -> String {
    if kg.abs() >= TONNES_THRESHOLD_KG {
        format!("{:.2} tonnes CO2e", kg / 1000.0)
    } else {
        format!("{kg:.2} kg CO2e")
    }
}

/// Bare emissions number with two-decimal rounding, for table cells.
pub fn format_kg(kg: f64) -> String {
    format!("{kg:.2}")
}

/// Natural representation for activity quantities and factors: `100`, not
/// `100.00`; `2.01` stays `2.01`.
pub fn format_quantity(value: f64) -> String {
    value.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn switches_to_tonnes_at_the_threshold() {
        assert_eq!(format_emissions(999.994), "999.99 kg CO2e");
        assert_eq!(format_emissions(1000.0), "1.00 tonnes CO2e");
        assert_eq!(format_emissions(1234.5), "1.23 tonnes CO2e");
        assert_eq!(format_emissions(201.0), "201.00 kg CO2e");
    }

    #[test]
    fn quantities_keep_their_natural_representation() {
        assert_eq!(format_quantity(100.0), "100");
        assert_eq!(format_quantity(2.01), "2.01");
        assert_eq!(format_quantity(0.035), "0.035");
    }

    #[test]
    fn table_cells_round_to_two_decimals() {
        assert_eq!(format_kg(201.0), "201.00");
        assert_eq!(format_kg(0.125), "0.13");
    }
}
