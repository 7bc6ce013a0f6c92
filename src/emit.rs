//! Artifact emission.
//!
//! Writes one JSON artifact per category plus the sorted locale list and the
//! nested measure table. Inputs are the dedup outcome and the identifier
//! pool; every emitted byte traces back to a surviving config entry.
//!
//! Emission is best-effort across artifacts: a failed write is logged and
//! counted, and the remaining artifacts are still attempted. The caller
//! turns a non-zero failure count into the process exit status.

use std::cmp::Ordering;
use std::fs;
use std::path::Path;

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{error, info, warn};

use crate::dedup::ConfigEntry;
use crate::locale::{Category, LocaleTag, FIELD_SEP};
use crate::measure::MeasureFormat;
use crate::pool::IdentifierPool;
use crate::record::LocaleRecord;

/// Script subtags with a fixed sort priority, after the empty script.
/// Scripts not listed here sort after all of these.
const SCRIPT_PRIORITY: [&str; 7] = ["Hans", "Hant", "Latn", "Cyrl", "Arab", "Deva", "Qaag"];

/// Name of the locale list artifact.
const LOCALE_LIST_ARTIFACT: &str = "locales";

/// Writes the final artifacts for one build.
pub struct Emitter<'a> {
    pool: &'a IdentifierPool,
    out_dir: &'a Path,
}

/// Counts of what emission managed to write.
#[derive(Debug)]
pub struct EmitReport {
    pub locales: usize,
    pub artifacts_written: usize,
    pub failed_writes: usize,
}

#[derive(Serialize)]
struct LocaleList {
    locales: Vec<String>,
}

impl<'a> Emitter<'a> {
    pub fn new(pool: &'a IdentifierPool, out_dir: &'a Path) -> Self {
        Emitter { pool, out_dir }
    }

    /// Emits every artifact for the deduped records.
    ///
    /// `records` and `entries` are parallel, in slot order. Only records
    /// still marked included contribute output; their order in the artifacts
    /// follows the total locale order, not slot order.
    pub fn emit(&self, records: &[LocaleRecord], entries: &[Vec<ConfigEntry>]) -> EmitReport {
        if let Err(e) = fs::create_dir_all(self.out_dir) {
            error!(
                "✗ Cannot create output directory {}: {}",
                self.out_dir.display(),
                e
            );
            return EmitReport {
                locales: 0,
                artifacts_written: 0,
                failed_writes: 1,
            };
        }

        let order = sorted_included(records);
        let mut written = 0;
        let mut failed = 0;

        let list = LocaleList {
            locales: order
                .iter()
                .map(|&slot| records[slot].tag().to_string())
                .collect(),
        };
        self.write_artifact(LOCALE_LIST_ARTIFACT, &list, &mut written, &mut failed);

        for category in Category::ALL {
            if category == Category::MeasureFormatPatterns {
                continue;
            }
            let artifact = self.category_artifact(category, records, entries, &order);
            self.write_artifact(category.name(), &artifact, &mut written, &mut failed);
        }

        let measures = self.measure_artifact(records, entries, &order);
        self.write_artifact(
            Category::MeasureFormatPatterns.name(),
            &measures,
            &mut written,
            &mut failed,
        );

        info!(
            "Emitted {} artifacts to {} ({} locales, {} failed writes)",
            written,
            self.out_dir.display(),
            order.len(),
            failed
        );

        EmitReport {
            locales: order.len(),
            artifacts_written: written,
            failed_writes: failed,
        }
    }

    /// Flat artifact for one category: locale tag to split field list.
    fn category_artifact(
        &self,
        category: Category,
        records: &[LocaleRecord],
        entries: &[Vec<ConfigEntry>],
        order: &[usize],
    ) -> Value {
        let mut artifact = Map::new();
        for &slot in order {
            let value = match self.entry_value(&entries[slot], category) {
                Some(value) => value,
                None => continue,
            };
            let fields: Vec<Value> = value
                .split(FIELD_SEP)
                .map(|field| Value::String(field.to_string()))
                .collect();
            artifact.insert(records[slot].tag().to_string(), Value::Array(fields));
        }
        Value::Object(artifact)
    }

    /// Nested artifact for the measure category.
    fn measure_artifact(
        &self,
        records: &[LocaleRecord],
        entries: &[Vec<ConfigEntry>],
        order: &[usize],
    ) -> Value {
        let mut artifact = Map::new();
        for &slot in order {
            let value = match self.entry_value(&entries[slot], Category::MeasureFormatPatterns) {
                Some(value) => value,
                None => continue,
            };
            let tag = records[slot].tag();
            match MeasureFormat::parse(&value) {
                Some(format) => {
                    artifact.insert(tag.to_string(), format.to_json());
                }
                None => {
                    warn!("Skipping malformed measure value for {}", tag);
                }
            }
        }
        Value::Object(artifact)
    }

    /// The surviving non-empty value of `category` in one slot's entry list.
    fn entry_value(&self, entries: &[ConfigEntry], category: Category) -> Option<String> {
        let entry = entries
            .iter()
            .find(|entry| entry.category_index == category.index())?;
        let value = self.pool.lookup(entry.identifier)?;
        if value.is_empty() {
            return None;
        }
        Some(value)
    }

    fn write_artifact<T: Serialize>(
        &self,
        name: &str,
        value: &T,
        written: &mut usize,
        failed: &mut usize,
    ) {
        let path = self.out_dir.join(format!("{name}.json"));
        let mut body = match serde_json::to_string_pretty(value) {
            Ok(body) => body,
            Err(e) => {
                error!("✗ Cannot render artifact {}: {}", name, e);
                *failed += 1;
                return;
            }
        };
        body.push('\n');

        match fs::write(&path, body) {
            Ok(()) => *written += 1,
            Err(e) => {
                error!("✗ Failed to write {}: {}", path.display(), e);
                *failed += 1;
            }
        }
    }
}

/// Slot indices of included records, in the total locale order.
fn sorted_included(records: &[LocaleRecord]) -> Vec<usize> {
    let mut order: Vec<usize> = records
        .iter()
        .enumerate()
        .filter(|(_, record)| record.is_included())
        .map(|(slot, _)| slot)
        .collect();
    order.sort_by(|&a, &b| locale_order(records[a].tag(), records[b].tag()));
    order
}

/// Total order over locale tags used for all emitted locale sequences.
///
/// Languages compare lexicographically. Equal languages compare scripts by
/// the fixed priority table, the empty script first and unlisted scripts
/// last (lexicographically among themselves). Equal scripts compare regions
/// lexicographically.
pub fn locale_order(a: &LocaleTag, b: &LocaleTag) -> Ordering {
    a.language()
        .cmp(b.language())
        .then_with(|| script_rank(a.script()).cmp(&script_rank(b.script())))
        .then_with(|| a.script().cmp(b.script()))
        .then_with(|| a.region().cmp(b.region()))
}

fn script_rank(script: &str) -> usize {
    if script.is_empty() {
        return 0;
    }
    SCRIPT_PRIORITY
        .iter()
        .position(|known| *known == script)
        .map(|position| position + 1)
        .unwrap_or(SCRIPT_PRIORITY.len() + 1)
}
