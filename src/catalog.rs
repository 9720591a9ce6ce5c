use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::{LoadError, LookupError};
use crate::models::{Category, EquivalencyFactors, FactorRecord, Scope};

/// The bundled reference dataset, compiled into the binary so hosts without
/// filesystem access still get a working catalog.
const EMBEDDED_CATALOG: &str = include_str!("../data/catalog.json");

/// Read-only emission factor catalog: (scope, category, source) -> factor
/// record, ordered category lists per scope, and the equivalency multipliers.
///
/// Loaded once before any calculation and immutable for the lifetime of a
/// calculation session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Catalog {
    emission_factors: BTreeMap<Scope, BTreeMap<String, BTreeMap<String, FactorRecord>>>,
    categories: BTreeMap<Scope, Vec<Category>>,
    equivalency_factors: EquivalencyFactors,
}

impl Catalog {
    /// Resolve a (scope, category, source) triple to its factor record.
    ///
    /// This is the only validation boundary between user-entered selections
    /// and the numeric engine: any absent key is a `LookupError` and the
    /// entry must be rejected before it enters a scope list.
    pub fn factor(
        &self,
        scope: Scope,
        category: &str,
        source: &str,
    ) -> Result<&FactorRecord, LookupError> {
        let sources = self
            .emission_factors
            .get(&scope)
            .and_then(|cats| cats.get(category))
            .ok_or_else(|| LookupError::UnknownCategory {
                scope,
                category: category.to_string(),
            })?;
        sources.get(source).ok_or_else(|| LookupError::UnknownSource {
            scope,
            category: category.to_string(),
            source: source.to_string(),
        })
    }

    /// Ordered category descriptors for a scope. Total: an unknown scope
    /// yields an empty slice, since "no options" is a valid selection state.
    pub fn categories(&self, scope: Scope) -> &[Category] {
        self.categories.get(&scope).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Source ids under a scope/category, in stable sorted order. Total:
    /// empty when the scope or category is unknown.
    pub fn sources(&self, scope: Scope, category: &str) -> Vec<&str> {
        self.emission_factors
            .get(&scope)
            .and_then(|cats| cats.get(category))
            .map(|sources| sources.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    pub fn equivalency_factors(&self) -> &EquivalencyFactors {
        &self.equivalency_factors
    }

    fn factor_count(&self) -> usize {
        self.emission_factors
            .values()
            .flat_map(|cats| cats.values())
            .map(|sources| sources.len())
            .sum()
    }
}

/// Host-specific catalog loading. The engine stays host-agnostic: one
/// implementation per host (bundled file, embedded constant, remote fetch).
pub trait CatalogLoader {
    fn load(&self) -> Result<Catalog, LoadError>;
}

/// Loads the catalog from a JSON file on disk.
#[derive(Debug, Clone)]
pub struct FileCatalogLoader {
    path: PathBuf,
}

impl FileCatalogLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CatalogLoader for FileCatalogLoader {
    fn load(&self) -> Result<Catalog, LoadError> {
        let start = std::time::Instant::now();
        debug!("Loading catalog resource - path={}", self.path.display());

        let raw = std::fs::read_to_string(&self.path).map_err(|source| LoadError::Io {
            path: self.path.display().to_string(),
            source,
        })?;
        let catalog: Catalog = serde_json::from_str(&raw)?;

        info!(
            "Catalog loaded - path={}, factors={}, duration={:.2}ms",
            self.path.display(),
            catalog.factor_count(),
            start.elapsed().as_secs_f32() * 1000.0
        );
        Ok(catalog)
    }
}

/// Parses the compile-time bundled copy of the reference dataset.
#[derive(Debug, Clone, Default)]
pub struct EmbeddedCatalogLoader;

impl CatalogLoader for EmbeddedCatalogLoader {
    fn load(&self) -> Result<Catalog, LoadError> {
        let catalog: Catalog = serde_json::from_str(EMBEDDED_CATALOG)?;
        debug!("Catalog loaded from embedded dataset - factors={}", catalog.factor_count());
        Ok(catalog)
    }
}

/// Convenience used by the CLI: explicit path wins, embedded copy otherwise.
pub fn load_catalog(path: Option<&Path>) -> Result<Catalog, LoadError> {
    match path {
        Some(p) => FileCatalogLoader::new(p).load(),
        None => EmbeddedCatalogLoader.load(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Catalog {
        EmbeddedCatalogLoader.load().expect("embedded catalog parses")
    }

    #[test]
    fn embedded_catalog_loads_and_is_nonempty() {
        let c = catalog();
        assert!(c.factor_count() > 0);
        for scope in Scope::ALL {
            assert!(!c.categories(scope).is_empty());
        }
    }

    #[test]
    fn factor_lookup_resolves_a_known_triple() {
        let c = catalog();
        let rec = c
            .factor(Scope::Scope1, "stationaryCombustion", "naturalGas")
            .unwrap();
        assert_eq!(rec.factor, 2.01);
        assert_eq!(rec.unit, "kg CO2e/m3");
    }

    #[test]
    fn factor_lookup_fails_for_unknown_keys() {
        let c = catalog();
        assert_eq!(
            c.factor(Scope::Scope1, "teleportation", "naturalGas"),
            Err(LookupError::UnknownCategory {
                scope: Scope::Scope1,
                category: "teleportation".into(),
            })
        );
        assert_eq!(
            c.factor(Scope::Scope1, "stationaryCombustion", "unicornDust"),
            Err(LookupError::UnknownSource {
                scope: Scope::Scope1,
                category: "stationaryCombustion".into(),
                source: "unicornDust".into(),
            })
        );
    }

    #[test]
    fn listing_accessors_are_total() {
        let c = catalog();
        assert!(c.sources(Scope::Scope2, "noSuchCategory").is_empty());

        let ids: Vec<&str> = c.categories(Scope::Scope1).iter().map(|c| c.id.as_str()).collect();
        assert_eq!(
            ids,
            vec!["stationaryCombustion", "mobileCombustion", "fugitiveEmissions"]
        );
    }

    #[test]
    fn file_loader_surfaces_missing_and_corrupt_resources() {
        let missing = FileCatalogLoader::new("/no/such/catalog.json");
        assert!(matches!(missing.load(), Err(LoadError::Io { .. })));

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            FileCatalogLoader::new(&path).load(),
            Err(LoadError::Parse(_))
        ));
    }

    #[test]
    fn file_loader_reads_the_same_dataset_as_the_embedded_copy() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        std::fs::write(&path, EMBEDDED_CATALOG).unwrap();
        assert_eq!(FileCatalogLoader::new(&path).load().unwrap(), catalog());
    }
}
