//! Data models for declarative scrape specifications.
//!
//! This module defines the configuration types deserialized from a JSON or
//! YAML document:
//! - [`Website`]: a URL, a separator and the lookups to run against it
//! - [`LookupSpec`]: one unit of extraction work
//! - [`ElementSelector`] / [`AttributeConstraint`]: how nodes are found
//! - [`FormatRules`] / [`Replacement`]: how extracted text is transformed
//! - [`ScrapeWindow`]: optional local hours during which a website is scraped
//! - [`ScrapeReport`] / [`ScrapeOutcome`]: what a run produced, for JSON output
//!
//! Field names are camelCase on the wire and unknown fields are rejected.
//! Every collection and string defaults to empty when absent, so minimal
//! documents stay minimal:
//!
//! ```json
//! {
//!   "url": "https://en.wikipedia.org/wiki/{{PAGE}}",
//!   "separator": ", ",
//!   "lookups": [
//!     { "selector": { "tag": "h1", "attributes": [{ "name": "id", "value": "firstHeading" }] } }
//!   ]
//! }
//! ```

use chrono::{Duration, NaiveTime};
use serde::{Deserialize, Serialize};

/// A required `name="value"` attribute on a matched element.
///
/// Both parts are compared as exact strings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AttributeConstraint {
    pub name: String,
    pub value: String,
}

impl AttributeConstraint {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Tag name plus a conjunction of attribute constraints.
///
/// A node matches when its tag equals `tag` and every constraint is
/// satisfied by one of its attributes. Extra attributes on the node are
/// ignored, as is attribute order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct ElementSelector {
    pub tag: String,
    pub attributes: Vec<AttributeConstraint>,
}

impl ElementSelector {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: Vec::new(),
        }
    }

    /// Adds a required attribute.
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push(AttributeConstraint::new(name, value));
        self
    }
}

/// Literal substring replacement, applied to every occurrence.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Replacement {
    pub from: String,
    pub to: String,
}

/// Ordered text transformations applied to extracted text.
///
/// See [`FormatRules::apply`] for the order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct FormatRules {
    pub replacements: Vec<Replacement>,
    /// Each entry is a set of characters stripped from both ends.
    pub trim: Vec<String>,
    pub prefix: String,
    pub suffix: String,
}

/// One element lookup on a page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct LookupSpec {
    pub selector: ElementSelector,
    pub format: FormatRules,
    /// Zero-based position among all matches, in document order.
    pub index: usize,
    /// Only read the matched node's own text children.
    pub shallow: bool,
    /// When set, the formatted text is used as this website's URL and the
    /// nested scrape result replaces the text.
    pub follow: Option<Box<Website>>,
}

impl LookupSpec {
    pub fn new(selector: ElementSelector) -> Self {
        Self {
            selector,
            ..Self::default()
        }
    }
}

/// A page to scrape and the lookups to run against it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct Website {
    /// Optional label used in logs and output.
    pub name: Option<String>,
    /// May contain placeholders such as `{{DATE}}`.
    pub url: String,
    /// Inserted strictly between lookup results.
    pub separator: String,
    pub lookups: Vec<LookupSpec>,
    pub window: Option<ScrapeWindow>,
}

impl Website {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    /// Name when configured, the URL otherwise.
    pub fn label(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.url)
    }
}

/// Local hours `[start_hour, stop_hour)` during which a website is scraped.
///
/// A window with `start_hour > stop_hour` wraps around midnight. Equal hours,
/// or hours outside `0..24`, leave the window always open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ScrapeWindow {
    pub start_hour: u32,
    pub stop_hour: u32,
}

impl ScrapeWindow {
    /// Whether `now` falls inside the window.
    pub fn contains(&self, now: NaiveTime) -> bool {
        use chrono::Timelike;

        if self.start_hour == self.stop_hour || self.start_hour > 23 || self.stop_hour > 24 {
            return true;
        }
        let hour = now.hour();
        if self.start_hour < self.stop_hour {
            hour >= self.start_hour && hour < self.stop_hour
        } else {
            hour >= self.start_hour || hour < self.stop_hour
        }
    }

    /// Time to wait from `now` until the window opens; zero inside it.
    pub fn until_open(&self, now: NaiveTime) -> Duration {
        if self.contains(now) {
            return Duration::zero();
        }
        let Some(start) = NaiveTime::from_hms_opt(self.start_hour, 0, 0) else {
            return Duration::zero();
        };
        let wait = start - now;
        if wait < Duration::zero() {
            wait + Duration::days(1)
        } else {
            wait
        }
    }
}

/// Result of one website in a run.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ScrapeOutcome {
    /// [`Website::label`] of the scraped website.
    pub website: String,
    pub url: String,
    pub content: Option<String>,
    pub error: Option<String>,
}

/// All outcomes of one run, written by [`crate::outputs::json::write_report`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ScrapeReport {
    /// The date of the run in `YYYY-MM-DD` format.
    pub local_date: String,
    /// The local time of the run in `HH:MM:SS` format.
    pub local_time: String,
    pub results: Vec<ScrapeOutcome>,
}

impl ScrapeReport {
    pub fn failures(&self) -> usize {
        self.results.iter().filter(|r| r.error.is_some()).count()
    }
}
