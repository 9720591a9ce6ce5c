use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use std::path::PathBuf;
use tracing::{debug, info};

use ghgcalc::catalog::{load_catalog, Catalog};
use ghgcalc::history::{FileHistoryStorage, HistoryStore};
use ghgcalc::models::{CalculationData, Scope};
use ghgcalc::pipeline::run_report;

/// Multi-scope GHG emissions calculator and report generator
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Activity data to calculate (CalculationData JSON)
    #[arg(short, long)]
    entries: Option<PathBuf>,

    /// Organization name shown on the report
    #[arg(short = 'g', long, default_value = "Unnamed Organization")]
    organization: String,

    /// Output directory for generated artifacts (default: "out")
    #[arg(short, long, default_value = "out")]
    output_dir: PathBuf,

    /// Catalog resource path (default: the bundled dataset)
    #[arg(short, long)]
    catalog: Option<PathBuf>,

    /// Directory for calculation history; persistence is disabled when omitted
    #[arg(long)]
    history_dir: Option<PathBuf>,

    /// Print the catalog's scopes, categories and sources, then exit
    #[arg(long)]
    list_catalog: bool,
}

fn print_catalog(catalog: &Catalog) {
    for scope in Scope::ALL {
        println!("{}", scope.label());
        for category in catalog.categories(scope) {
            println!("  {} ({})", category.name, category.id);
            for source in catalog.sources(scope, &category.id) {
                // factor is known to resolve: the id came from the catalog itself
                if let Ok(rec) = catalog.factor(scope, &category.id, source) {
                    println!("    {:<24}{} {}", source, rec.factor, rec.unit);
                }
            }
        }
    }
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_thread_ids(false)
        .with_line_number(true)
        .init();

    let args = Args::parse();
    info!("Starting ghgcalc");

    let catalog = load_catalog(args.catalog.as_deref())?;

    if args.list_catalog {
        print_catalog(&catalog);
        return Ok(());
    }

    let entries_path = args.entries.ok_or_else(|| {
        anyhow::anyhow!(
            "no activity data supplied\n\
             Use --entries to point at a CalculationData JSON file, e.g.:\n\
             {{\"scope1\": [{{\"scope\": \"scope1\", \"category\": \"stationaryCombustion\",\n\
             \"source\": \"naturalGas\", \"activityData\": 100, \"unit\": \"m3\",\n\
             \"emissionFactor\": 2.01}}]}}\n\
             Or use --list-catalog to browse available categories and sources."
        )
    })?;

    // Friendlier error if missing
    if !entries_path.exists() {
        return Err(anyhow::anyhow!(
            "entries file not found at {}",
            entries_path.display()
        ));
    }

    let raw = std::fs::read_to_string(&entries_path)
        .with_context(|| format!("read {}", entries_path.display()))?;
    let data: CalculationData = serde_json::from_str(&raw)
        .with_context(|| format!("decode {}", entries_path.display()))?;
    debug!(
        "Entries loaded - scope1={}, scope2={}, scope3={}",
        data.scope1.len(),
        data.scope2.len(),
        data.scope3.len()
    );

    let generated_on = Utc::now().format("%Y-%m-%d").to_string();

    let history = args
        .history_dir
        .map(|dir| HistoryStore::new(FileHistoryStorage::new(dir)));

    let result = run_report(
        &catalog,
        &data,
        &args.organization,
        &generated_on,
        &args.output_dir,
        history.as_ref(),
    )?;

    info!(
        "Artifacts written - csv={}, report={}",
        result.csv_path.display(),
        result.report_path.display()
    );
    if let Some(id) = &result.record_id {
        info!("History record - id={}", id);
    }
    Ok(())
}
