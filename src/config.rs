use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    // Inputs
    pub locales_file: PathBuf,
    pub source_file: PathBuf,
    pub measure_file: PathBuf,

    // Output
    pub output_dir: PathBuf,

    // Fetch
    pub fetch_timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            // Inputs
            locales_file: std::env::var("LOCALES_FILE")
                .unwrap_or_else(|_| "data/locales.txt".to_string())
                .into(),
            source_file: std::env::var("SOURCE_FILE")
                .unwrap_or_else(|_| "data/source.json".to_string())
                .into(),
            measure_file: std::env::var("MEASURE_FILE")
                .unwrap_or_else(|_| "data/measure_patterns.txt".to_string())
                .into(),

            // Output
            output_dir: std::env::var("OUTPUT_DIR")
                .unwrap_or_else(|_| "out".to_string())
                .into(),

            // Fetch
            fetch_timeout_secs: std::env::var("FETCH_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
        }
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }
}
