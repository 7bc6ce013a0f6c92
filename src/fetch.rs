//! Concurrent per-locale fetch phase.
//!
//! One blocking task per catalog slot pulls every category value for its
//! locale, writes them into the slot's record, and interns non-empty values
//! into the shared pool. The orchestrator waits for all tasks or for a
//! global wall-clock timeout, whichever comes first. Tasks running past the
//! timeout are abandoned; whatever they wrote before the snapshot is kept
//! and the rest of their categories stay empty.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use futures::future::join_all;
use tracing::{info, warn};

use crate::locale::{Category, LocaleCatalog, LocaleTag};
use crate::measure::MeasureTable;
use crate::pool::IdentifierPool;
use crate::record::LocaleRecord;
use crate::source::DataSource;

/// Runs the fetch phase for a resolved catalog.
pub struct FetchOrchestrator {
    source: Arc<dyn DataSource>,
    measures: Arc<MeasureTable>,
    pool: Arc<IdentifierPool>,
    timeout: Duration,
}

/// What the fetch phase produced.
///
/// `records` is a snapshot taken at the barrier (or at the timeout): one
/// record per catalog slot, in slot order. Later phases treat it as
/// immutable; abandoned tasks may keep writing to their own slots but never
/// to this copy.
pub struct FetchOutcome {
    pub records: Vec<LocaleRecord>,
    pub completed: usize,
    pub panicked: usize,
    pub abandoned: usize,
    pub category_failures: usize,
}

impl FetchOrchestrator {
    pub fn new(
        source: Arc<dyn DataSource>,
        measures: Arc<MeasureTable>,
        pool: Arc<IdentifierPool>,
        timeout: Duration,
    ) -> Self {
        FetchOrchestrator {
            source,
            measures,
            pool,
            timeout,
        }
    }

    /// Fetches every catalog locale concurrently and returns the snapshot.
    pub async fn run(&self, catalog: &LocaleCatalog) -> FetchOutcome {
        let total = catalog.len();
        info!(
            "Fetching {} locales across {} categories (timeout {}s)",
            total,
            Category::COUNT,
            self.timeout.as_secs()
        );

        let slots: Vec<Arc<Mutex<LocaleRecord>>> = catalog
            .slots()
            .iter()
            .map(|tag| Arc::new(Mutex::new(LocaleRecord::new(tag.clone()))))
            .collect();

        let finished = Arc::new(AtomicUsize::new(0));
        let mut handles = Vec::with_capacity(total);
        for (tag, slot) in catalog.slots().iter().zip(&slots) {
            let tag = tag.clone();
            let source = Arc::clone(&self.source);
            let measures = Arc::clone(&self.measures);
            let pool = Arc::clone(&self.pool);
            let slot = Arc::clone(slot);
            let finished = Arc::clone(&finished);

            handles.push(tokio::task::spawn_blocking(move || {
                let failures = fetch_locale(&tag, source.as_ref(), &measures, &pool, &slot);
                finished.fetch_add(1, Ordering::SeqCst);
                failures
            }));
        }

        let mut completed = 0;
        let mut panicked = 0;
        let mut abandoned = 0;
        let mut category_failures = 0;

        match tokio::time::timeout(self.timeout, join_all(handles)).await {
            Ok(results) => {
                for result in results {
                    match result {
                        Ok(failures) => {
                            completed += 1;
                            category_failures += failures;
                        }
                        Err(e) => {
                            panicked += 1;
                            warn!("✗ Fetch task panicked: {}", e);
                        }
                    }
                }
            }
            Err(_) => {
                completed = finished.load(Ordering::SeqCst);
                abandoned = total - completed;
                warn!(
                    "Fetch timed out after {}s: abandoning {} of {} locales, keeping partial data",
                    self.timeout.as_secs(),
                    abandoned,
                    total
                );
            }
        }

        // Snapshot the slots; this copy is the only view later phases see.
        let records: Vec<LocaleRecord> = slots
            .iter()
            .map(|slot| slot.lock().unwrap().clone())
            .collect();

        info!(
            "Fetch complete: {} ok, {} panicked, {} abandoned, {} category errors",
            completed, panicked, abandoned, category_failures
        );

        FetchOutcome {
            records,
            completed,
            panicked,
            abandoned,
            category_failures,
        }
    }
}

/// Fetches all categories for one locale into its record slot.
///
/// A failing category is logged, left empty, and does not stop the
/// remaining categories. The record lock is never held across a source
/// call, so a panicking source cannot poison the slot.
fn fetch_locale(
    tag: &LocaleTag,
    source: &dyn DataSource,
    measures: &MeasureTable,
    pool: &IdentifierPool,
    slot: &Mutex<LocaleRecord>,
) -> usize {
    let mut failures = 0;

    for category in Category::ALL {
        let value = if category == Category::MeasureFormatPatterns {
            measures.value_for(tag)
        } else {
            match source.fetch(tag, category) {
                Ok(value) => value,
                Err(e) => {
                    failures += 1;
                    warn!("✗ {} / {}: {}", tag, category.name(), e);
                    String::new()
                }
            }
        };

        if !value.is_empty() {
            pool.intern(&value);
        }
        slot.lock().unwrap().set_value(category, value);
    }

    failures
}
