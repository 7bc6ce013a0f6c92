//! Locale data sources.
//!
//! A [`DataSource`] is anything that can enumerate locales and serve raw
//! category values for them. The build talks to the trait only, so fetch
//! orchestration and tests do not care whether values come from a local JSON
//! snapshot or something slower.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::Result;
use tracing::{debug, warn};

use crate::error::BuildError;
use crate::locale::{Category, LocaleTag};

/// Provider of raw locale-formatting values.
///
/// Implementations must be shareable across the per-locale fetch tasks, so
/// the trait requires `Send + Sync` and takes `&self` everywhere.
pub trait DataSource: Send + Sync {
    /// Locale tags this source has data for, used to expand catalog wildcards.
    fn available_locales(&self) -> Vec<String>;

    /// Fetches the raw value of one category for one locale.
    ///
    /// Absent data is the empty string, not an error. An `Err` means the
    /// source itself failed for this lookup; the caller decides whether that
    /// is fatal.
    fn fetch(&self, tag: &LocaleTag, category: Category) -> Result<String>;
}

/// A [`DataSource`] backed by a JSON snapshot file.
///
/// The file maps locale tags to objects mapping category names to raw string
/// values:
///
/// ```json
/// {
///   "en-US": { "am_pm_markers": "AM_PM", "default_hour": "12" },
///   "zh-Hans": { "am_pm_markers": "上午_下午" }
/// }
/// ```
///
/// Keys are normalized at load time, so `en_us` in the file and `en-US` in
/// the catalog refer to the same entry.
pub struct JsonSource {
    entries: BTreeMap<String, BTreeMap<String, String>>,
}

impl JsonSource {
    /// Reads and parses a snapshot file.
    ///
    /// Both I/O and parse failures are fatal: without source data there is
    /// nothing to build.
    pub fn load(path: &Path) -> Result<Self, BuildError> {
        let raw = fs::read_to_string(path).map_err(|source| BuildError::SourceRead {
            path: path.to_path_buf(),
            source,
        })?;

        let source = Self::from_json(&raw).map_err(|source| BuildError::SourceParse {
            path: path.to_path_buf(),
            source,
        })?;

        debug!(
            "Loaded locale data source: {} locales from {}",
            source.entries.len(),
            path.display()
        );

        Ok(source)
    }

    /// Parses snapshot JSON from a string.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        let parsed: BTreeMap<String, BTreeMap<String, String>> = serde_json::from_str(raw)?;

        let mut entries = BTreeMap::new();
        for (key, values) in parsed {
            match LocaleTag::parse(&key) {
                Ok(tag) => {
                    entries.insert(tag.to_string(), values);
                }
                Err(_) => {
                    warn!("Data source contains a malformed locale key: '{}'", key);
                    entries.insert(key, values);
                }
            }
        }

        Ok(JsonSource { entries })
    }
}

impl DataSource for JsonSource {
    fn available_locales(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }

    fn fetch(&self, tag: &LocaleTag, category: Category) -> Result<String> {
        let value = self
            .entries
            .get(&tag.to_string())
            .and_then(|values| values.get(category.name()))
            .cloned()
            .unwrap_or_default();
        Ok(value)
    }
}
