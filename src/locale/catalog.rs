//! Catalog of requested locales, resolved from a line-oriented config file.
//!
//! Each line of the catalog file is a literal tag (`en-US`), the global
//! wildcard `*`, or a language wildcard (`zh-*`). Wildcards expand against
//! the set of locales the data source reports. The resolved catalog is an
//! ordered, duplicate-free list of slots; slot order is first appearance and
//! is the record order for the whole build.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

use tracing::{debug, warn};

use crate::error::BuildError;
use crate::locale::tag::LocaleTag;

/// The resolved, ordered set of locales a build will produce data for.
#[derive(Debug, Clone)]
pub struct LocaleCatalog {
    slots: Vec<LocaleTag>,
    index: HashMap<String, usize>,
}

impl LocaleCatalog {
    /// Reads a catalog file and resolves it against `available`.
    ///
    /// Blank lines and lines starting with `#` are skipped. Any other line
    /// must be a valid entry; an invalid one aborts the build.
    ///
    /// # Arguments
    /// * `path` - Path to the catalog file
    /// * `available` - Locale tags the data source can serve, used to expand
    ///   wildcard entries
    pub fn load(path: &Path, available: &[String]) -> Result<Self, BuildError> {
        let raw = fs::read_to_string(path).map_err(|source| BuildError::CatalogRead {
            path: path.to_path_buf(),
            source,
        })?;

        let entries: Vec<String> = raw
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(str::to_string)
            .collect();

        Self::resolve(&entries, available)
    }

    /// Resolves catalog entries into an ordered, duplicate-free slot list.
    ///
    /// `*` expands to every available locale. `<lang>-*` expands to every
    /// available locale whose language subtag is `<lang>`, the bare language
    /// itself included. Literal entries are kept whether or not the source
    /// lists them; their data is simply fetched as empty later. Duplicates
    /// keep their first position.
    pub fn resolve(entries: &[String], available: &[String]) -> Result<Self, BuildError> {
        let available_tags = parse_available(available);

        let mut slots: Vec<LocaleTag> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();
        let mut seen: HashSet<String> = HashSet::new();

        let mut push =
            |tag: LocaleTag, slots: &mut Vec<LocaleTag>, index: &mut HashMap<String, usize>| {
                let key = tag.to_string();
                if seen.insert(key.clone()) {
                    index.insert(key, slots.len());
                    slots.push(tag);
                }
            };

        for entry in entries {
            let entry = entry.trim();
            if entry.is_empty() {
                continue;
            }

            if entry == "*" {
                for tag in &available_tags {
                    push(tag.clone(), &mut slots, &mut index);
                }
                continue;
            }

            if let Some(prefix) = entry.strip_suffix("-*").or_else(|| entry.strip_suffix("_*")) {
                let language = prefix.to_lowercase();
                if !crate::locale::tag::is_language_subtag(&language) {
                    return Err(BuildError::InvalidTag {
                        tag: entry.to_string(),
                    });
                }
                for tag in &available_tags {
                    if tag.language() == language {
                        push(tag.clone(), &mut slots, &mut index);
                    }
                }
                continue;
            }

            if entry.contains('*') {
                return Err(BuildError::InvalidTag {
                    tag: entry.to_string(),
                });
            }

            let tag = LocaleTag::parse(entry)?;
            push(tag, &mut slots, &mut index);
        }

        debug!(
            "Resolved locale catalog: {} slots from {} entries",
            slots.len(),
            entries.len()
        );

        Ok(LocaleCatalog { slots, index })
    }

    /// The resolved locales, in slot order.
    pub fn slots(&self) -> &[LocaleTag] {
        &self.slots
    }

    /// Slot index of `tag`, if the catalog contains it.
    pub fn position(&self, tag: &LocaleTag) -> Option<usize> {
        self.index.get(&tag.to_string()).copied()
    }

    /// Slot index of the nearest catalog-present fallback of `tag`.
    ///
    /// Walks the truncation chain (drop region, then script) and returns the
    /// first tag the catalog contains. A bare language has no fallback.
    pub fn fallback_slot(&self, tag: &LocaleTag) -> Option<usize> {
        tag.fallback_candidates()
            .iter()
            .find_map(|candidate| self.position(candidate))
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

/// Parses the source's advertised locales, dropping any it cannot parse.
///
/// The advertised list is data, not config, so a malformed tag in it is
/// logged and skipped rather than failing the build.
fn parse_available(available: &[String]) -> Vec<LocaleTag> {
    let mut tags = Vec::with_capacity(available.len());
    for raw in available {
        match LocaleTag::parse(raw) {
            Ok(tag) => tags.push(tag),
            Err(_) => {
                warn!("Skipping malformed locale advertised by source: '{}'", raw);
            }
        }
    }
    tags
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn resolve(entries: &[&str], available: &[&str]) -> LocaleCatalog {
        LocaleCatalog::resolve(&strings(entries), &strings(available))
            .expect("catalog should resolve")
    }

    // ==================== Literal Entry Tests ====================

    #[test]
    fn test_literal_entries_keep_order() {
        let catalog = resolve(&["en-US", "zh-Hans", "fr"], &[]);
        let slots: Vec<String> = catalog.slots().iter().map(|t| t.to_string()).collect();
        assert_eq!(slots, vec!["en-US", "zh-Hans", "fr"]);
    }

    #[test]
    fn test_literal_not_in_available_is_kept() {
        let catalog = resolve(&["qa-QA"], &["en"]);
        assert_eq!(catalog.len(), 1);
        assert!(catalog.position(&LocaleTag::parse("qa-QA").unwrap()).is_some());
    }

    #[test]
    fn test_duplicates_keep_first_position() {
        let catalog = resolve(&["en-US", "fr", "en-US"], &[]);
        assert_eq!(catalog.len(), 2);
        assert_eq!(
            catalog.position(&LocaleTag::parse("en-US").unwrap()),
            Some(0)
        );
    }

    #[test]
    fn test_underscore_and_case_variants_dedupe() {
        let catalog = resolve(&["en_us", "EN-US"], &[]);
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.slots()[0].to_string(), "en-US");
    }

    #[test]
    fn test_invalid_literal_aborts() {
        let result = LocaleCatalog::resolve(&strings(&["en-US", "not a tag"]), &[]);
        assert!(matches!(result, Err(BuildError::InvalidTag { .. })));
    }

    // ==================== Wildcard Tests ====================

    #[test]
    fn test_global_wildcard_expands_to_all_available() {
        let catalog = resolve(&["*"], &["en", "en-US", "zh-Hans-CN"]);
        let slots: Vec<String> = catalog.slots().iter().map(|t| t.to_string()).collect();
        assert_eq!(slots, vec!["en", "en-US", "zh-Hans-CN"]);
    }

    #[test]
    fn test_language_wildcard_matches_language_subtag() {
        let catalog = resolve(&["en-*"], &["en", "en-US", "en-GB", "zh-Hans", "fr"]);
        let slots: Vec<String> = catalog.slots().iter().map(|t| t.to_string()).collect();
        assert_eq!(slots, vec!["en", "en-US", "en-GB"]);
    }

    #[test]
    fn test_language_wildcard_is_case_insensitive() {
        let catalog = resolve(&["EN-*"], &["en-US"]);
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_wildcard_overlap_with_literal_dedupes() {
        let catalog = resolve(&["en-GB", "en-*"], &["en-US", "en-GB"]);
        let slots: Vec<String> = catalog.slots().iter().map(|t| t.to_string()).collect();
        assert_eq!(slots, vec!["en-GB", "en-US"]);
    }

    #[test]
    fn test_wildcard_with_invalid_language_aborts() {
        let result = LocaleCatalog::resolve(&strings(&["toolong-*"]), &strings(&["en"]));
        assert!(matches!(result, Err(BuildError::InvalidTag { .. })));
    }

    #[test]
    fn test_stray_wildcard_aborts() {
        let result = LocaleCatalog::resolve(&strings(&["en-*-US"]), &strings(&["en"]));
        assert!(matches!(result, Err(BuildError::InvalidTag { .. })));
    }

    #[test]
    fn test_malformed_available_entry_is_skipped() {
        let catalog = resolve(&["*"], &["en", "###", "fr"]);
        assert_eq!(catalog.len(), 2);
    }

    // ==================== Fallback Resolution Tests ====================

    #[test]
    fn test_fallback_slot_prefers_nearest_ancestor() {
        let catalog = resolve(&["zh", "zh-Hans", "zh-Hans-CN"], &[]);
        let tag = LocaleTag::parse("zh-Hans-CN").unwrap();
        let expected = catalog.position(&LocaleTag::parse("zh-Hans").unwrap());
        assert_eq!(catalog.fallback_slot(&tag), expected);
    }

    #[test]
    fn test_fallback_slot_walks_past_missing_ancestor() {
        let catalog = resolve(&["zh", "zh-Hans-CN"], &[]);
        let tag = LocaleTag::parse("zh-Hans-CN").unwrap();
        let expected = catalog.position(&LocaleTag::parse("zh").unwrap());
        assert_eq!(catalog.fallback_slot(&tag), expected);
    }

    #[test]
    fn test_bare_language_has_no_fallback_slot() {
        let catalog = resolve(&["en"], &[]);
        assert_eq!(
            catalog.fallback_slot(&LocaleTag::parse("en").unwrap()),
            None
        );
    }

    // ==================== File Loading Tests ====================

    #[test]
    fn test_load_skips_comments_and_blanks() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("locales.txt");
        std::fs::write(&path, "# header\n\nen-US\n  # indented comment\nzh-*\n").unwrap();

        let catalog = LocaleCatalog::load(&path, &strings(&["zh-Hans", "en-US"])).unwrap();
        let slots: Vec<String> = catalog.slots().iter().map(|t| t.to_string()).collect();
        assert_eq!(slots, vec!["en-US", "zh-Hans"]);
    }

    #[test]
    fn test_load_missing_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.txt");
        let result = LocaleCatalog::load(&path, &[]);
        assert!(matches!(result, Err(BuildError::CatalogRead { .. })));
    }
}
