//! Translation of a CO2e total into plain-language comparisons.

use crate::models::{Equivalencies, EquivalencyFactors};

/// Convert a total (kg CO2e) into the five equivalency categories.
///
/// Discrete quantities (trees, smartphone charges, flight miles) round up,
/// since a fraction of a tree is not a usable comparison; cars and homes
/// stay fractional for render-time formatting.
///
/// Degrades to an all-zero result when the total is missing/non-positive or
/// the factors are absent: equivalencies are a derived convenience and must
/// never block report generation.
pub fn equivalencies(total_kg: f64, factors: Option<&EquivalencyFactors>) -> Equivalencies {
    let Some(factors) = factors else {
        return Equivalencies::default();
    };
    if !total_kg.is_finite() || total_kg <= 0.0 {
        return Equivalencies::default();
    }

    Equivalencies {
        cars: total_kg * factors.passenger_vehicles_per_year.factor,
        trees: whole_units(total_kg * factors.trees_needed.factor),
        homes: total_kg * factors.homes_energy_use.factor,
        smartphones: whole_units(total_kg * factors.smartphone_charges.factor),
        flight_miles: whole_units(total_kg * factors.miles_on_flight.factor),
    }
}

/// Ceiling to the next whole unit. Saturating f64-to-u64 cast keeps a
/// pathological factor from wrapping.
fn whole_units(value: f64) -> u64 {
    value.ceil() as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EquivalencyFactor;

    fn factors() -> EquivalencyFactors {
        EquivalencyFactors {
            passenger_vehicles_per_year: EquivalencyFactor { factor: 0.000217 },
            trees_needed: EquivalencyFactor { factor: 0.0165 },
            homes_energy_use: EquivalencyFactor { factor: 0.000133 },
            smartphone_charges: EquivalencyFactor { factor: 121.643 },
            miles_on_flight: EquivalencyFactor { factor: 3.92 },
        }
    }

    #[test]
    fn trees_scenario_rounds_up_to_17() {
        let f = EquivalencyFactors {
            trees_needed: EquivalencyFactor { factor: 0.0165 },
            ..Default::default()
        };
        let eq = equivalencies(1000.0, Some(&f));
        assert_eq!(eq.trees, 17); // ceil(1000 * 0.0165) = ceil(16.5)
        assert_eq!(eq.cars, 0.0);
        assert_eq!(eq.smartphones, 0);
    }

    #[test]
    fn zero_or_missing_inputs_yield_a_zero_result() {
        assert_eq!(equivalencies(1000.0, None), Equivalencies::default());
        assert_eq!(equivalencies(0.0, Some(&factors())), Equivalencies::default());
        assert_eq!(equivalencies(-5.0, Some(&factors())), Equivalencies::default());
        assert_eq!(equivalencies(f64::NAN, Some(&factors())), Equivalencies::default());
    }

    #[test]
    fn all_fields_scale_with_the_total() {
        let f = factors();
        let eq = equivalencies(10_000.0, Some(&f));
        assert!((eq.cars - 2.17).abs() < 1e-12);
        assert_eq!(eq.trees, 165);
        assert!((eq.homes - 1.33).abs() < 1e-12);
        assert_eq!(eq.smartphones, 1_216_430);
        assert_eq!(eq.flight_miles, 39_200);
    }

    #[test]
    fn equivalencies_are_monotonic_in_total_mass() {
        let f = factors();
        let small = equivalencies(123.4, Some(&f));
        let large = equivalencies(5678.9, Some(&f));
        assert!(small.cars <= large.cars);
        assert!(small.trees <= large.trees);
        assert!(small.homes <= large.homes);
        assert!(small.smartphones <= large.smartphones);
        assert!(small.flight_miles <= large.flight_miles);
    }
}
