//! Loading website specifications from JSON or YAML documents.
//!
//! A document holds either a single [`Website`] or a list of them. The
//! format is picked from the file extension: `.json`, `.yaml` or `.yml`.

use crate::error::ConfigError;
use crate::models::Website;
use std::path::Path;
use tracing::{info, instrument};

/// Supported configuration formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Yaml,
}

impl ConfigFormat {
    /// Format for `path`, judged by its extension.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("json") => Ok(ConfigFormat::Json),
            Some("yaml") | Some("yml") => Ok(ConfigFormat::Yaml),
            _ => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// Parse websites from a document already in memory.
///
/// A top-level list is read as many websites, anything else as one, so a
/// schema error points at the offending field instead of at the document.
pub fn parse_websites(text: &str, format: ConfigFormat) -> Result<Vec<Website>, ConfigError> {
    let websites = match format {
        ConfigFormat::Json => {
            let value: serde_json::Value = serde_json::from_str(text)?;
            if value.is_array() {
                serde_json::from_value(value)?
            } else {
                vec![serde_json::from_value(value)?]
            }
        }
        ConfigFormat::Yaml => {
            let value: serde_yaml::Value = serde_yaml::from_str(text)?;
            if value.is_sequence() {
                serde_yaml::from_value(value)?
            } else {
                vec![serde_yaml::from_value(value)?]
            }
        }
    };
    Ok(websites)
}

/// Read and parse the websites in the config file at `path`.
///
/// # Errors
///
/// Returns an error if the extension is unsupported, the file cannot be
/// read, or the document does not match the website schema.
#[instrument(level = "info", skip_all, fields(path = %path.as_ref().display()))]
pub async fn load_websites(path: impl AsRef<Path>) -> Result<Vec<Website>, ConfigError> {
    let path = path.as_ref();
    let format = ConfigFormat::from_path(path)?;
    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
    let websites = parse_websites(&text, format)?;
    info!(count = websites.len(), ?format, "Loaded website specifications");
    Ok(websites)
}
