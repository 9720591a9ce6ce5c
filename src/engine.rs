//! Pure calculation core: line emissions, per-scope totals, grand total,
//! and the entry validation gate.
//!
//! All arithmetic is f64 in kg CO2e with no intermediate rounding; any
//! rounding or unit conversion (kg vs tonnes) is a render-time concern.

use crate::models::{CalculationData, CalculationEntry, ScopeTotals};

/// Emissions for a single line item: `activity_data * emission_factor`.
///
/// Missing or non-finite inputs yield zero rather than failing. Draft
/// entries being edited interactively pass through here before they are
/// complete, and an incomplete line must not corrupt totals.
pub fn line_emissions(activity_data: Option<f64>, emission_factor: Option<f64>) -> f64 {
    match (activity_data, emission_factor) {
        (Some(a), Some(f)) if a.is_finite() && f.is_finite() => a * f,
        _ => 0.0,
    }
}

/// Sum of line emissions over a scope's entry list. Empty list is zero.
pub fn scope_total(entries: &[CalculationEntry]) -> f64 {
    entries
        .iter()
        .map(|e| line_emissions(e.activity_data, e.emission_factor))
        .sum()
}

/// Per-scope totals and the exact grand total.
pub fn totals(data: &CalculationData) -> ScopeTotals {
    let scope1 = scope_total(&data.scope1);
    let scope2 = scope_total(&data.scope2);
    let scope3 = scope_total(&data.scope3);
    ScopeTotals {
        scope1,
        scope2,
        scope3,
        total: scope1 + scope2 + scope3,
    }
}

/// Outcome of the entry validation gate. Advisory: the engine never drops
/// entries itself, the caller rejects invalid ones before insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryValidation {
    pub is_valid: bool,
    pub error: Option<String>,
}

impl EntryValidation {
    fn ok() -> Self {
        Self { is_valid: true, error: None }
    }

    fn fail(message: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            error: Some(message.into()),
        }
    }
}

/// The single gate applied before an entry is accepted into a scope list.
pub fn validate_entry(entry: &CalculationEntry) -> EntryValidation {
    match entry.activity_data {
        None => return EntryValidation::fail("activity data is required"),
        Some(a) if !a.is_finite() => {
            return EntryValidation::fail("activity data must be a finite number")
        }
        Some(a) if a <= 0.0 => {
            return EntryValidation::fail("activity data must be greater than zero")
        }
        Some(_) => {}
    }
    match entry.emission_factor {
        None => EntryValidation::fail("emission factor is missing"),
        Some(f) if !f.is_finite() => {
            EntryValidation::fail("emission factor must be a finite number")
        }
        Some(_) => EntryValidation::ok(),
    }
}
