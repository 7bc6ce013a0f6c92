//! Fallback-based deduplication.
//!
//! Runs once, single-threaded, after the fetch barrier. For every locale it
//! resolves the nearest catalog-present fallback by truncating the tag, then
//! drops each category value equal to the fallback's value for that
//! category. A record identical to its fallback across all categories is
//! excluded from output entirely.
//!
//! Decisions only read the fetched snapshot, never other dedup decisions, so
//! the result does not depend on processing order and an excluded fallback
//! still contributes its original values to comparisons.

use tracing::{debug, info};

use crate::locale::{Category, LocaleCatalog};
use crate::pool::IdentifierPool;
use crate::record::LocaleRecord;

/// One surviving (locale, category) pair, ready for emission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigEntry {
    pub category: &'static str,
    pub category_index: usize,
    pub identifier: u32,
}

/// Records with dedup flags applied, plus the per-slot surviving entries.
pub struct DedupOutcome {
    pub records: Vec<LocaleRecord>,
    pub entries: Vec<Vec<ConfigEntry>>,
    pub survived_entries: usize,
    pub excluded_locales: usize,
}

/// Applies fallback dedup to a fetched snapshot.
pub struct FallbackDeduper<'a> {
    catalog: &'a LocaleCatalog,
    pool: &'a IdentifierPool,
}

impl<'a> FallbackDeduper<'a> {
    pub fn new(catalog: &'a LocaleCatalog, pool: &'a IdentifierPool) -> Self {
        FallbackDeduper { catalog, pool }
    }

    /// Runs dedup over every record, in slot order.
    pub fn run(&self, mut records: Vec<LocaleRecord>) -> DedupOutcome {
        debug_assert_eq!(records.len(), self.catalog.len());

        let mut entries: Vec<Vec<ConfigEntry>> = Vec::with_capacity(records.len());
        let mut survived_entries = 0;
        let mut excluded_locales = 0;

        for i in 0..records.len() {
            // Snapshot of the fallback's original values. Taken before any
            // flag lands on this record, and unaffected by whether the
            // fallback itself ends up excluded.
            let fallback_values: Option<Vec<String>> = self
                .catalog
                .fallback_slot(records[i].tag())
                .map(|j| records[j].values().to_vec());

            let record = &mut records[i];

            if let Some(values) = &fallback_values {
                if record.same_values(values) {
                    record.exclude();
                    excluded_locales += 1;
                    entries.push(Vec::new());
                    debug!("Excluding {}: identical to its fallback", record.tag());
                    continue;
                }
            }

            let mut survivors = Vec::new();
            for category in Category::ALL {
                let own = record.value(category);
                let inherited = fallback_values
                    .as_ref()
                    .map(|values| values[category.index()].as_str())
                    .unwrap_or("");

                if own != inherited {
                    survivors.push(ConfigEntry {
                        category: category.name(),
                        category_index: category.index(),
                        identifier: self.pool.intern(own),
                    });
                    record.reserve(category);
                }
            }

            survived_entries += survivors.len();
            entries.push(survivors);
        }

        info!(
            "Dedup complete: {} entries survived, {} locales excluded",
            survived_entries, excluded_locales
        );

        DedupOutcome {
            records,
            entries,
            survived_entries,
            excluded_locales,
        }
    }
}
