//! JSON report output.
//!
//! Reports are grouped in one directory per date, one file per run:
//! ```text
//! json_output_dir/
//! └── 2025-05-06/
//!     └── 07-00-00.json
//! ```

use crate::models::ScrapeReport;
use std::error::Error;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{error, info, instrument};

/// Path of the report file for `report` below `json_output_dir`.
pub fn report_path(report: &ScrapeReport, json_output_dir: &Path) -> PathBuf {
    json_output_dir
        .join(&report.local_date)
        .join(format!("{}.json", report.local_time.replace(':', "-")))
}

/// Write a [`ScrapeReport`] as pretty JSON, creating the date directory.
///
/// # Returns
///
/// The path written to, or an error if the directory or file could not be
/// written.
#[instrument(level = "info", skip_all, fields(json_output_dir = %json_output_dir.display()))]
pub async fn write_report(
    report: &ScrapeReport,
    json_output_dir: &Path,
) -> Result<PathBuf, Box<dyn Error>> {
    let json = serde_json::to_string_pretty(report)?;
    let path = report_path(report, json_output_dir);

    if let Some(dir) = path.parent() {
        info!(dir = %dir.display(), "Ensuring JSON directory exists");
        if let Err(e) = fs::create_dir_all(dir).await {
            error!(dir = %dir.display(), error = %e, "Failed to create JSON dir");
            return Err(e.into());
        }
    }

    fs::write(&path, json).await?;
    info!(path = %path.display(), results = report.results.len(), "Wrote JSON report");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ScrapeOutcome;

    fn report() -> ScrapeReport {
        ScrapeReport {
            local_date: "2025-05-06".to_string(),
            local_time: "19:30:05".to_string(),
            results: vec![ScrapeOutcome {
                website: "wiki".to_string(),
                url: "https://en.wikipedia.org/wiki/Wikipedia".to_string(),
                content: Some("Wikipedia".to_string()),
                error: None,
            }],
        }
    }

    #[test]
    fn test_report_path() {
        let path = report_path(&report(), Path::new("/out"));
        assert_eq!(path, Path::new("/out/2025-05-06/19-30-05.json"));
    }

    #[tokio::test]
    async fn test_write_report_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_report(&report(), dir.path()).await.unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        let parsed: ScrapeReport = serde_json::from_str(&written).unwrap();
        assert_eq!(parsed, report());
    }
}
