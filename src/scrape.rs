//! Scrape orchestration for one [`Website`].
//!
//! [`Scraper::scrape`] is the single entry point: substitute placeholders on
//! a private copy of the website, fetch and parse the page, run every lookup
//! in order and join the results with the website's separator. A lookup with
//! a `follow` website turns its text into that website's URL and is replaced
//! by the nested scrape's result.
//!
//! Any failing lookup fails the whole website. Callers wanting partial
//! results scrape websites one by one and filter errors themselves.
//!
//! Follow chains are bounded: going deeper than
//! [`Scraper::with_max_depth`] fails with
//! [`ScrapeError::RecursionLimitExceeded`], and following a URL already on
//! the current chain fails with [`ScrapeError::FollowCycle`].

use crate::error::ScrapeError;
use crate::extract::extract_lookup;
use crate::fetch::Fetch;
use crate::html::parse_document;
use crate::models::Website;
use crate::template::{SubstitutionContext, SubstitutionRegistry, substitute_website};
use tracing::{debug, instrument};
use url::Url;

/// Default limit on nested follow websites.
pub const DEFAULT_MAX_DEPTH: usize = 8;

/// Runs [`Website`] specifications against documents from a [`Fetch`].
#[derive(Debug, Clone)]
pub struct Scraper<F> {
    fetcher: F,
    max_depth: usize,
}

impl<F: Fetch> Scraper<F> {
    pub fn new(fetcher: F) -> Self {
        Self {
            fetcher,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Allow at most `max_depth` nested follow websites below the top level.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Scrape `website` and return the joined lookup results.
    ///
    /// When a `registry` is given its placeholders are substituted into the
    /// website's URL and separator first. `website` itself is never
    /// modified, and nested follow websites are not substituted.
    ///
    /// # Errors
    ///
    /// The first error raised by any fetch, parse or lookup, including
    /// those of nested follow websites.
    #[instrument(level = "info", skip_all, fields(website = %website.label()))]
    pub async fn scrape(
        &self,
        website: &Website,
        registry: Option<&SubstitutionRegistry>,
        ctx: &SubstitutionContext,
    ) -> Result<String, ScrapeError> {
        let parsed = match registry {
            Some(registry) if !registry.is_empty() => substitute_website(website, registry, ctx),
            _ => website.clone(),
        };
        let mut chain = Vec::new();
        self.scrape_at(&parsed, 0, &mut chain).await
    }

    async fn scrape_at(
        &self,
        website: &Website,
        depth: usize,
        chain: &mut Vec<String>,
    ) -> Result<String, ScrapeError> {
        if depth > self.max_depth {
            return Err(ScrapeError::RecursionLimitExceeded {
                depth,
                url: website.url.clone(),
            });
        }
        if chain.contains(&website.url) {
            return Err(ScrapeError::FollowCycle {
                url: website.url.clone(),
            });
        }

        debug!(url = %website.url, depth, "Scraping website");
        let body = self.fetcher.fetch(&website.url).await?;
        let document = parse_document(&website.url, &body)?;
        debug!(url = %website.url, lookups = website.lookups.len(), "Parsed document");

        chain.push(website.url.clone());
        let mut fragments = Vec::with_capacity(website.lookups.len());
        for lookup in &website.lookups {
            let text = extract_lookup(&document, lookup)?;
            match &lookup.follow {
                Some(follow) => {
                    let mut nested = (**follow).clone();
                    nested.url = resolve_follow_url(&website.url, &text);
                    debug!(from = %website.url, to = %nested.url, "Following extracted URL");
                    let content = Box::pin(self.scrape_at(&nested, depth + 1, chain)).await?;
                    fragments.push(content);
                }
                None => fragments.push(text),
            }
        }
        chain.pop();

        Ok(fragments.join(&website.separator))
    }
}

/// URL for a follow website: absolute text is used as is, relative text is
/// resolved against the page it was extracted from.
fn resolve_follow_url(base: &str, extracted: &str) -> String {
    if Url::parse(extracted).is_ok() {
        return extracted.to_string();
    }
    Url::parse(base)
        .and_then(|base| base.join(extracted))
        .map(|url| url.to_string())
        .unwrap_or_else(|_| extracted.to_string())
}
