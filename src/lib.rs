//! Multi-scope greenhouse-gas emissions calculation and reporting engine.
//!
//! Pure computation plus serialization: a layered emission-factor catalog,
//! a calculation engine over scope-tagged activity data, plain-language
//! equivalency conversion, deterministic tabular and paginated report
//! renderers, and a bounded history of past calculations. Host concerns
//! (UI, transport, auth) stay outside; everything here takes and returns
//! plain data.

pub mod catalog;
pub mod engine;
pub mod equivalency;
pub mod error;
pub mod export;
pub mod format;
pub mod history;
pub mod models;
pub mod pipeline;
pub mod report;

pub use catalog::{Catalog, CatalogLoader, EmbeddedCatalogLoader, FileCatalogLoader};
pub use engine::{line_emissions, scope_total, totals, validate_entry, EntryValidation};
pub use equivalency::equivalencies;
pub use error::{LoadError, LookupError, PersistenceError};
pub use export::render_csv;
pub use history::{
    generate_id, new_record, FileHistoryStorage, HistoryStorage, HistoryStore,
    MemoryHistoryStorage,
};
pub use models::{
    CalculationData, CalculationEntry, CalculationRecord, Category, Equivalencies,
    EquivalencyFactor, EquivalencyFactors, FactorRecord, Scope, ScopeTotals,
};
pub use report::{build_report, Report, ReportRenderer, ReportSection, TextRenderer};
