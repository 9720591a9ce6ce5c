use serde::{Deserialize, Serialize};
use std::fmt;

/// GHG Protocol emission scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Scope {
    #[serde(rename = "scope1")]
    Scope1,
    #[serde(rename = "scope2")]
    Scope2,
    #[serde(rename = "scope3")]
    Scope3,
}

impl Scope {
    /// All scopes in reporting order (1, 2, 3).
    pub const ALL: [Scope; 3] = [Scope::Scope1, Scope::Scope2, Scope::Scope3];

    /// Identifier used in the catalog resource and persisted records.
    pub fn key(self) -> &'static str {
        match self {
            Scope::Scope1 => "scope1",
            Scope::Scope2 => "scope2",
            Scope::Scope3 => "scope3",
        }
    }

    /// Short display label, e.g. "Scope 1".
    pub fn label(self) -> &'static str {
        match self {
            Scope::Scope1 => "Scope 1",
            Scope::Scope2 => "Scope 2",
            Scope::Scope3 => "Scope 3",
        }
    }

    /// Longer display label used in report summaries.
    pub fn summary_label(self) -> &'static str {
        match self {
            Scope::Scope1 => "Scope 1 (Direct)",
            Scope::Scope2 => "Scope 2 (Purchased Energy)",
            Scope::Scope3 => "Scope 3 (Value Chain)",
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// One factor record from the catalog resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactorRecord {
    pub factor: f64, // kg CO2e per unit of activity
    pub unit: String, // e.g. "kg CO2e/m3"
    pub description: String,
}

/// Category descriptor: stable id + display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
}

/// A single named equivalency multiplier (per kg CO2e).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EquivalencyFactor {
    pub factor: f64,
}

/// The five equivalency multipliers. Any factor missing from the resource
/// defaults to zero, which zeroes the corresponding output field.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EquivalencyFactors {
    #[serde(default)]
    pub passenger_vehicles_per_year: EquivalencyFactor,
    #[serde(default)]
    pub trees_needed: EquivalencyFactor,
    #[serde(default)]
    pub homes_energy_use: EquivalencyFactor,
    #[serde(default)]
    pub smartphone_charges: EquivalencyFactor,
    #[serde(default)]
    pub miles_on_flight: EquivalencyFactor,
}

/// One line item of activity data.
///
/// `activity_data` and `emission_factor` are optional because entries exist
/// in a draft state during interactive editing; `validate_entry` is the gate
/// before an entry is accepted into a scope list. The factor is captured at
/// entry-creation time, never re-looked-up, so historical records stay
/// reproducible after catalog updates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationEntry {
    pub scope: Scope,
    pub category: String,
    pub source: String,
    pub activity_data: Option<f64>, // physical quantity consumed, must be > 0
    pub unit: String, // informational, display only
    pub emission_factor: Option<f64>, // kg CO2e per unit, captured from the catalog
}

/// Entry lists for all three scopes. Missing arrays deserialize as empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CalculationData {
    #[serde(default)]
    pub scope1: Vec<CalculationEntry>,
    #[serde(default)]
    pub scope2: Vec<CalculationEntry>,
    #[serde(default)]
    pub scope3: Vec<CalculationEntry>,
}

impl CalculationData {
    pub fn entries(&self, scope: Scope) -> &[CalculationEntry] {
        match scope {
            Scope::Scope1 => &self.scope1,
            Scope::Scope2 => &self.scope2,
            Scope::Scope3 => &self.scope3,
        }
    }

    pub fn entries_mut(&mut self, scope: Scope) -> &mut Vec<CalculationEntry> {
        match scope {
            Scope::Scope1 => &mut self.scope1,
            Scope::Scope2 => &mut self.scope2,
            Scope::Scope3 => &mut self.scope3,
        }
    }

    pub fn is_empty(&self) -> bool {
        Scope::ALL.iter().all(|&s| self.entries(s).is_empty())
    }
}

/// Per-scope and grand totals in kg CO2e. `total` is the exact sum of the
/// three scope totals; no rounding happens before summation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScopeTotals {
    pub scope1: f64,
    pub scope2: f64,
    pub scope3: f64,
    pub total: f64,
}

impl ScopeTotals {
    pub fn scope(&self, scope: Scope) -> f64 {
        match scope {
            Scope::Scope1 => self.scope1,
            Scope::Scope2 => self.scope2,
            Scope::Scope3 => self.scope3,
        }
    }
}

/// Plain-language translation of a total. Discrete fields (trees,
/// smartphone charges, flight miles) are rounded up; cars and homes stay
/// fractional and are formatted at render time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Equivalencies {
    pub cars: f64,
    pub trees: u64,
    pub homes: f64,
    pub smartphones: u64,
    pub flight_miles: u64,
}

/// A persisted snapshot of a finalized calculation. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationRecord {
    pub id: String,
    pub date: String, // ISO-8601
    pub data: CalculationData,
}
