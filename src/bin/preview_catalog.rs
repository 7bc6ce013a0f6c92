//! Catalog preview binary - resolves the locale catalog and dry-runs the
//! fetch and dedup phases, showing what a build would emit without writing
//! any artifacts
//!
//! Usage:
//!   cargo run --bin preview                  # Slots + dedup survival table
//!   cargo run --bin preview -- --fallbacks   # Also show each slot's fallback
//!
//! Optional environment variables:
//! - LOCALES_FILE (defaults to data/locales.txt)
//! - SOURCE_FILE (defaults to data/source.json)
//! - MEASURE_FILE (defaults to data/measure_patterns.txt)
//! - FETCH_TIMEOUT_SECS (defaults to 10)

use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use locale_datagen::config::Config;
use locale_datagen::dedup::FallbackDeduper;
use locale_datagen::emit::locale_order;
use locale_datagen::fetch::FetchOrchestrator;
use locale_datagen::locale::{Category, LocaleCatalog};
use locale_datagen::measure::MeasureTable;
use locale_datagen::pool::IdentifierPool;
use locale_datagen::source::{DataSource, JsonSource};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("locale_datagen=info".parse()?),
        )
        .init();

    // Load environment from .env file
    dotenvy::dotenv().ok();

    // Parse CLI arguments
    let args: Vec<String> = std::env::args().collect();
    let show_fallbacks = args.iter().any(|arg| arg == "--fallbacks");

    info!("Loading configuration...");
    let config = Config::from_env();

    let source = JsonSource::load(&config.source_file)?;
    let measures = MeasureTable::load(&config.measure_file)?;
    let available = source.available_locales();
    let catalog = LocaleCatalog::load(&config.locales_file, &available)?;

    println!();
    println!("╔══════════════════════════════════════════════════════════════════╗");
    println!("║                      LOCALE CATALOG PREVIEW                      ║");
    println!("╠══════════════════════════════════════════════════════════════════╣");
    println!(
        "║ Catalog file:      {:<45} ║",
        config.locales_file.display().to_string()
    );
    println!(
        "║ Source file:       {:<45} ║",
        config.source_file.display().to_string()
    );
    println!(
        "║ Measure file:      {:<45} ║",
        config.measure_file.display().to_string()
    );
    println!("║ Available locales: {:<45} ║", available.len());
    println!("║ Resolved slots:    {:<45} ║", catalog.len());
    println!("╚══════════════════════════════════════════════════════════════════╝");
    println!();

    println!("--- Slots (fetch order) ---");
    println!();
    for (slot, tag) in catalog.slots().iter().enumerate() {
        if show_fallbacks {
            let fallback = catalog
                .fallback_slot(tag)
                .map(|j| catalog.slots()[j].to_string())
                .unwrap_or_else(|| "(root)".to_string());
            println!("{:>4}  {:<16} -> {}", slot, tag.to_string(), fallback);
        } else {
            println!("{:>4}  {}", slot, tag);
        }
    }
    println!();

    // Dry-run the fetch and dedup phases. Artifacts are never written.
    let pool = Arc::new(IdentifierPool::new());
    let orchestrator = FetchOrchestrator::new(
        Arc::new(source),
        Arc::new(measures),
        Arc::clone(&pool),
        config.fetch_timeout(),
    );
    let fetched = orchestrator.run(&catalog).await;
    let outcome = FallbackDeduper::new(&catalog, &pool).run(fetched.records);

    let mut order: Vec<usize> = (0..outcome.records.len()).collect();
    order.sort_by(|&a, &b| locale_order(outcome.records[a].tag(), outcome.records[b].tag()));

    println!("--- Survival (emission order) ---");
    println!();
    for slot in order {
        let record = &outcome.records[slot];
        if record.is_included() {
            println!(
                "  ✓ {:<16} {:>2}/{} categories survive",
                record.tag().to_string(),
                record.reserved_count(),
                Category::COUNT
            );
        } else {
            println!(
                "  ✗ {:<16} excluded (identical to fallback)",
                record.tag().to_string()
            );
        }
    }
    println!();
    println!(
        "{} locales, {} excluded, {} surviving entries, {} distinct values",
        outcome.records.len(),
        outcome.excluded_locales,
        outcome.survived_entries,
        pool.len()
    );
    println!();
    println!("(Dry run only - no artifacts were written)");
    if !show_fallbacks {
        println!("(Use --fallbacks to see each slot's resolved fallback)");
    }
    println!();

    Ok(())
}
