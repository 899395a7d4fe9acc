//! Artifact loading
//!
//! Reconstructs one timestamped metrics record per `.json` artifact in a
//! flat directory. Enumeration order is filesystem-defined; chronological
//! ordering is the aggregator's job, not this module's.

use std::path::Path;
use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use sitepulse_common::{
    Error, LighthouseReport, Result, TimestampedMetrics, ARTIFACT_EXTENSION,
};

static DIGIT_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").unwrap());

/// Load every artifact in `dir`.
///
/// A single unparsable artifact aborts the whole load; there is no
/// partial-results mode.
pub fn load_all(dir: &Path) -> Result<Vec<TimestampedMetrics>> {
    if !dir.is_dir() {
        return Err(Error::DirectoryNotFound(dir.to_path_buf()));
    }

    let mut entries = Vec::new();

    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();

        if !path
            .extension()
            .map(|e| e == ARTIFACT_EXTENSION)
            .unwrap_or(false)
        {
            continue;
        }

        let body = std::fs::read_to_string(&path)?;
        let report = LighthouseReport::from_json(&body).map_err(|source| {
            Error::MalformedArtifact {
                path: path.clone(),
                source,
            }
        })?;

        let name = entry.file_name().to_string_lossy().to_string();
        let date = timestamp_from_name(&name).unwrap_or_else(Utc::now);
        debug!("Loaded artifact {} dated {}", name, date);

        entries.push(TimestampedMetrics {
            date,
            metrics: report.to_metrics(report.requested_url()),
        });
    }

    Ok(entries)
}

/// First contiguous decimal digit run in the filename, read as a
/// millisecond epoch. Filenames without one fall back to the load time,
/// so two such artifacts are not reproducibly ordered relative to each
/// other.
fn timestamp_from_name(name: &str) -> Option<DateTime<Utc>> {
    let digits = DIGIT_RUN.find(name)?.as_str();
    let ms = digits.parse::<i64>().ok()?;
    DateTime::from_timestamp_millis(ms)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamp_from_conventional_name() {
        let date = timestamp_from_name("lighthouse-1753361882000.json").unwrap();
        assert_eq!(date.timestamp_millis(), 1753361882000);
    }

    #[test]
    fn test_timestamp_takes_first_digit_run() {
        // Only the first run counts, even when a later one looks more
        // like a timestamp.
        let date = timestamp_from_name("v2-run-1753361882000.json").unwrap();
        assert_eq!(date.timestamp_millis(), 2);
    }

    #[test]
    fn test_no_digits_means_no_timestamp() {
        assert!(timestamp_from_name("report.json").is_none());
    }

    #[test]
    fn test_small_epoch_values_parse() {
        let date = timestamp_from_name("run-1000.json").unwrap();
        assert_eq!(date.timestamp_millis(), 1000);
    }
}
