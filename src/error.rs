use std::path::PathBuf;
use thiserror::Error;

/// Fatal configuration errors that abort the build before any fetch starts.
///
/// Everything here is terminal for the run and produces no partial output.
/// Fetch-task failures and artifact write failures are handled downstream as
/// non-fatal, degraded-output conditions.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("invalid locale tag '{tag}' in catalog")]
    InvalidTag { tag: String },

    #[error("failed to read locale catalog {}", path.display())]
    CatalogRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read locale data source {}", path.display())]
    SourceRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse locale data source {}", path.display())]
    SourceParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to read measure pattern file {}", path.display())]
    MeasureRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed measure pattern entry at {}:{line}", path.display())]
    MeasureParse { path: PathBuf, line: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_tag_message_names_the_tag() {
        let err = BuildError::InvalidTag {
            tag: "en-US-x-priv".to_string(),
        };
        assert!(err.to_string().contains("en-US-x-priv"));
    }

    #[test]
    fn test_measure_parse_message_names_the_line() {
        let err = BuildError::MeasureParse {
            path: PathBuf::from("data/measure_patterns.txt"),
            line: 7,
        };
        let msg = err.to_string();
        assert!(msg.contains("measure_patterns.txt"));
        assert!(msg.contains(":7"));
    }
}
