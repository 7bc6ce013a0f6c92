//! End-to-end build pipeline.
//!
//! A [`BuildContext`] owns the catalog, data source, measure table, and
//! identifier pool for exactly one run. Construction loads and validates all
//! inputs, so every fatal condition fires before any fetching starts and no
//! partial output is produced for a bad config. [`BuildContext::run`]
//! consumes the context; nothing persists between runs.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tracing::info;

use crate::config::Config;
use crate::dedup::FallbackDeduper;
use crate::emit::Emitter;
use crate::fetch::FetchOrchestrator;
use crate::locale::LocaleCatalog;
use crate::measure::MeasureTable;
use crate::pool::IdentifierPool;
use crate::source::{DataSource, JsonSource};

/// Everything one build run needs, loaded and validated up front.
pub struct BuildContext {
    catalog: LocaleCatalog,
    source: Arc<dyn DataSource>,
    measures: Arc<MeasureTable>,
    pool: Arc<IdentifierPool>,
    timeout: Duration,
    output_dir: PathBuf,
}

/// What a finished run did, for logging and the exit status.
#[derive(Debug)]
pub struct BuildSummary {
    pub locales_requested: usize,
    pub locales_emitted: usize,
    pub excluded_locales: usize,
    pub survived_entries: usize,
    pub distinct_values: usize,
    pub abandoned_fetches: usize,
    pub category_failures: usize,
    pub artifacts_written: usize,
    pub failed_writes: usize,
}

impl BuildSummary {
    /// A run succeeds when every artifact landed on disk.
    pub fn succeeded(&self) -> bool {
        self.failed_writes == 0
    }
}

impl BuildContext {
    /// Loads all inputs named by `config`.
    ///
    /// Any missing or malformed input file, and any invalid literal tag in
    /// the catalog, fails here and aborts the build before fetch.
    pub fn from_config(config: &Config) -> Result<Self> {
        let source = JsonSource::load(&config.source_file)?;
        let measures = MeasureTable::load(&config.measure_file)?;

        let available = source.available_locales();
        let catalog = LocaleCatalog::load(&config.locales_file, &available)?;

        Ok(Self::new(
            catalog,
            Arc::new(source),
            Arc::new(measures),
            config.fetch_timeout(),
            config.output_dir.clone(),
        ))
    }

    /// Builds a context around an already-resolved catalog and source.
    pub fn new(
        catalog: LocaleCatalog,
        source: Arc<dyn DataSource>,
        measures: Arc<MeasureTable>,
        timeout: Duration,
        output_dir: PathBuf,
    ) -> Self {
        BuildContext {
            catalog,
            source,
            measures,
            pool: Arc::new(IdentifierPool::new()),
            timeout,
            output_dir,
        }
    }

    /// Runs fetch, dedup, and emission, in that order.
    pub async fn run(self) -> BuildSummary {
        let locales_requested = self.catalog.len();

        let orchestrator = FetchOrchestrator::new(
            Arc::clone(&self.source),
            Arc::clone(&self.measures),
            Arc::clone(&self.pool),
            self.timeout,
        );
        let fetched = orchestrator.run(&self.catalog).await;
        let abandoned_fetches = fetched.abandoned + fetched.panicked;
        let category_failures = fetched.category_failures;

        let outcome = FallbackDeduper::new(&self.catalog, &self.pool).run(fetched.records);

        let report =
            Emitter::new(&self.pool, &self.output_dir).emit(&outcome.records, &outcome.entries);

        let summary = BuildSummary {
            locales_requested,
            locales_emitted: report.locales,
            excluded_locales: outcome.excluded_locales,
            survived_entries: outcome.survived_entries,
            distinct_values: self.pool.len(),
            abandoned_fetches,
            category_failures,
            artifacts_written: report.artifacts_written,
            failed_writes: report.failed_writes,
        };

        info!(
            "Build finished: {} locales requested, {} emitted, {} excluded, {} entries over {} distinct values, {} artifacts",
            summary.locales_requested,
            summary.locales_emitted,
            summary.excluded_locales,
            summary.survived_entries,
            summary.distinct_values,
            summary.artifacts_written
        );

        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BuildError;

    /// Lays out a minimal input tree and returns a config pointing at it.
    fn fixture(locales: &str, source: &str, measures: &str) -> (tempfile::TempDir, Config) {
        let dir = tempfile::tempdir().unwrap();
        let locales_file = dir.path().join("locales.txt");
        let source_file = dir.path().join("source.json");
        let measure_file = dir.path().join("measure_patterns.txt");
        std::fs::write(&locales_file, locales).unwrap();
        std::fs::write(&source_file, source).unwrap();
        std::fs::write(&measure_file, measures).unwrap();

        let config = Config {
            locales_file,
            source_file,
            measure_file,
            output_dir: dir.path().join("out"),
            fetch_timeout_secs: 5,
        };
        (dir, config)
    }

    #[test]
    fn test_from_config_rejects_invalid_literal_tag() {
        let (_dir, config) = fixture("en\nnot a tag\n", "{}", "");
        let error = BuildContext::from_config(&config).err().expect("load should fail");
        assert!(matches!(
            error.downcast_ref::<BuildError>(),
            Some(BuildError::InvalidTag { .. })
        ));
    }

    #[test]
    fn test_from_config_rejects_missing_catalog_file() {
        let (dir, mut config) = fixture("", "{}", "");
        config.locales_file = dir.path().join("absent.txt");
        let error = BuildContext::from_config(&config).err().expect("load should fail");
        assert!(matches!(
            error.downcast_ref::<BuildError>(),
            Some(BuildError::CatalogRead { .. })
        ));
    }

    #[test]
    fn test_from_config_rejects_malformed_source() {
        let (_dir, config) = fixture("en\n", "not json", "");
        let error = BuildContext::from_config(&config).err().expect("load should fail");
        assert!(matches!(
            error.downcast_ref::<BuildError>(),
            Some(BuildError::SourceParse { .. })
        ));
    }

    #[tokio::test]
    async fn test_run_produces_artifacts_and_summary() {
        let (_dir, config) = fixture(
            "*\n",
            r#"{
                "en": { "am_pm_markers": "AM_PM" },
                "en-US": { "am_pm_markers": "AM_PM" }
            }"#,
            "en [\"dummy\"]\n",
        );

        let context = BuildContext::from_config(&config).unwrap();
        let summary = context.run().await;

        assert!(summary.succeeded());
        assert_eq!(summary.locales_requested, 2);
        // en-US matches en everywhere except the measure value only en has,
        // so it escapes whole-record exclusion.
        assert_eq!(summary.locales_emitted, 2);
        // "AM_PM" and "dummy" from fetch, "" interned by dedup for the
        // measure difference.
        assert_eq!(summary.distinct_values, 3);
        assert!(config.output_dir.join("locales.json").exists());
        assert!(config.output_dir.join("am_pm_markers.json").exists());
    }
}
