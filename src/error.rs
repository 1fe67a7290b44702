//! Error types for scraping, configuration loading and template registration.
//!
//! The core never logs or retries on its own; every failure is returned to
//! the caller of [`crate::scrape::Scraper::scrape`] (or of the lower level
//! functions) which decides whether to skip, retry or report.

use thiserror::Error;

/// Errors raised while scraping a [`crate::models::Website`].
#[derive(Debug, Error)]
pub enum ScrapeError {
    /// The selector matched zero element nodes.
    #[error("missing <{tag}> in the node tree")]
    MissingElement { tag: String },

    /// The requested match index does not reference a real match.
    #[error("element index {index} out of range ({found} matches for <{tag}>)")]
    IndexOutOfRange {
        tag: String,
        index: usize,
        found: usize,
    },

    /// Transport failure or non-success HTTP status.
    #[error("failed to fetch {url}: {reason}")]
    Fetch { url: String, reason: String },

    /// The fetched document could not be turned into a node tree.
    #[error("failed to parse document from {url}: {reason}")]
    Parse { url: String, reason: String },

    /// Following nested websites went deeper than the configured limit.
    #[error("follow depth {depth} exceeds limit while following {url}")]
    RecursionLimitExceeded { depth: usize, url: String },

    /// A follow link points back to a website already on the current chain.
    #[error("follow cycle detected at {url}")]
    FollowCycle { url: String },
}

impl ScrapeError {
    pub(crate) fn fetch(url: &str, reason: impl ToString) -> Self {
        ScrapeError::Fetch {
            url: url.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// Errors raised while loading a scrape configuration document.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid YAML config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The file extension is neither JSON nor YAML.
    #[error("unsupported config format: {0}")]
    UnsupportedFormat(String),
}

/// Errors raised while building a substitution registry.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemplateError {
    /// Placeholder keys must not contain one another or overlap end to
    /// start, otherwise the result would depend on registry iteration order.
    #[error("placeholder {new} overlaps registered placeholder {existing}")]
    OverlappingPlaceholder { new: String, existing: String },

    #[error("placeholder key must not be empty")]
    EmptyPlaceholder,
}
