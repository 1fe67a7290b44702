//! Parser adapter between decoded response text and the `scraper` node tree.
//!
//! The extraction code only ever reads the tree produced here; it never
//! mutates it.

use crate::error::ScrapeError;
use scraper::{ElementRef, Html};

/// Parse a decoded document into an HTML tree.
///
/// `html5ever` recovers from malformed markup on its own, so the only
/// failure is a body with nothing but whitespace in it.
///
/// # Arguments
///
/// * `url` - Where the text came from (for diagnostics only)
/// * `text` - The document, already decoded by the [`Fetch`](crate::fetch::Fetch) implementation
pub fn parse_document(url: &str, text: &str) -> Result<Html, ScrapeError> {
    if text.trim().is_empty() {
        return Err(ScrapeError::Parse {
            url: url.to_string(),
            reason: "empty document".to_string(),
        });
    }
    let document = Html::parse_document(text);
    if !document.errors.is_empty() {
        tracing::debug!(
            %url,
            count = document.errors.len(),
            "Parser recovered from malformed markup"
        );
    }
    Ok(document)
}

/// Render an element back to HTML, used when logging matches.
pub fn render_node(element: ElementRef<'_>) -> String {
    element.html()
}
