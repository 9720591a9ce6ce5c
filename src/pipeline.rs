//! End-to-end run: screen entries, compute, render, write artifacts,
//! append history.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::catalog::Catalog;
use crate::engine::{totals, validate_entry};
use crate::equivalency::equivalencies;
use crate::export::render_csv;
use crate::history::{new_record, HistoryStorage, HistoryStore};
use crate::models::{CalculationData, Equivalencies, Scope, ScopeTotals};
use crate::report::{build_report, ReportRenderer, TextRenderer};

/// Results of one pipeline run.
#[derive(Debug)]
pub struct RunOutput {
    pub totals: ScopeTotals,
    pub equivalencies: Equivalencies,
    pub csv_path: PathBuf,
    pub report_path: PathBuf,
    /// Id of the persisted history record, when a store was supplied and
    /// the save succeeded.
    pub record_id: Option<String>,
    /// Entries rejected by the catalog lookup or the validation gate.
    pub rejected: usize,
}

/// Reject entries that reference unknown catalog keys or fail validation.
/// Rejection is local: the invalid entry is logged and excluded, its
/// siblings proceed.
pub fn screen_entries(catalog: &Catalog, data: &CalculationData) -> (CalculationData, usize) {
    let mut accepted = CalculationData::default();
    let mut rejected = 0usize;

    for scope in Scope::ALL {
        for entry in data.entries(scope) {
            if entry.scope != scope {
                warn!(
                    "Entry rejected - filed under {} but tagged {}: {}/{}",
                    scope, entry.scope, entry.category, entry.source
                );
                rejected += 1;
                continue;
            }
            if let Err(e) = catalog.factor(scope, &entry.category, &entry.source) {
                warn!("Entry rejected - {}", e);
                rejected += 1;
                continue;
            }
            let validation = validate_entry(entry);
            if !validation.is_valid {
                warn!(
                    "Entry rejected - {}/{}/{}: {}",
                    scope,
                    entry.category,
                    entry.source,
                    validation.error.as_deref().unwrap_or("invalid")
                );
                rejected += 1;
                continue;
            }
            accepted.entries_mut(scope).push(entry.clone());
        }
    }

    (accepted, rejected)
}

/// Run a full calculation: screen, total, convert, render both artifacts
/// into `out_dir`, and append a history record when a store is supplied.
/// A persistence failure is logged and reported in the output, never fatal:
/// the rendered artifacts are already on disk at that point.
pub fn run_report<S: HistoryStorage>(
    catalog: &Catalog,
    data: &CalculationData,
    organization: &str,
    generated_on: &str,
    out_dir: &Path,
    history: Option<&HistoryStore<S>>,
) -> Result<RunOutput> {
    let pipeline_start = std::time::Instant::now();
    info!("Calculation started - organization={}", organization);

    let (accepted, rejected) = screen_entries(catalog, data);
    if rejected > 0 {
        info!("Entry screening - rejected={}, accepted entries proceed", rejected);
    }

    let t = totals(&accepted);
    let eq = equivalencies(t.total, Some(catalog.equivalency_factors()));
    debug!(
        "Totals computed - scope1={:.2}, scope2={:.2}, scope3={:.2}, total={:.2} kg CO2e",
        t.scope1, t.scope2, t.scope3, t.total
    );

    let csv = render_csv(&accepted, &t);
    let report = build_report(&accepted, &t, &eq, organization, generated_on);
    let rendered = TextRenderer::default().render(&report);

    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("create output directory {}", out_dir.display()))?;

    let csv_path = out_dir.join("emissions.csv");
    std::fs::write(&csv_path, &csv)
        .with_context(|| format!("write {}", csv_path.display()))?;
    debug!("Wrote emissions.csv");

    let report_path = out_dir.join("report.txt");
    std::fs::write(&report_path, &rendered)
        .with_context(|| format!("write {}", report_path.display()))?;
    debug!("Wrote report.txt");

    let record_id = match history {
        Some(store) => {
            let record = new_record(accepted);
            let id = record.id.clone();
            match store.save_record(record) {
                Ok(()) => {
                    debug!("History record saved - id={}", id);
                    Some(id)
                }
                Err(e) => {
                    // results are already written; history is best-effort
                    warn!("History persistence failed - {}", e);
                    None
                }
            }
        }
        None => None,
    };

    info!(
        "Calculation completed - total={:.2} kg CO2e, rejected_entries={}, duration={:.2}s",
        t.total,
        rejected,
        pipeline_start.elapsed().as_secs_f32()
    );

    Ok(RunOutput {
        totals: t,
        equivalencies: eq,
        csv_path,
        report_path,
        record_id,
        rejected,
    })
}
