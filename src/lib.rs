//! # Lookup Scraper
//!
//! Extract text from web pages with declarative lookups. A [`Website`]
//! names a URL and a list of [`LookupSpec`]s; each lookup finds elements by
//! tag and attributes, picks one by index, flattens it to text and runs the
//! text through ordered [`FormatRules`]. A lookup may `follow` its text as
//! the URL of a nested website, whose result takes its place.
//!
//! ## Pipeline
//!
//! 1. **Templates**: placeholders such as `{{DATE}}` in the URL and separator
//!    are substituted on a private copy ([`template`])
//! 2. **Fetching**: the page is downloaded through a [`fetch::Fetch`] impl
//! 3. **Extraction**: match, select, extract and format each lookup ([`extract`])
//! 4. **Joining**: lookup results are joined with the website's separator
//!
//! ```ignore
//! let scraper = Scraper::new(HttpFetcher::new(&FetchOptions::default())?);
//! let text = scraper
//!     .scrape(&website, Some(&SubstitutionRegistry::with_builtins()), &SubstitutionContext::now())
//!     .await?;
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod html;
pub mod models;
pub mod outputs;
pub mod scrape;
pub mod template;
pub mod utils;

pub use error::{ConfigError, ScrapeError, TemplateError};
pub use fetch::{Fetch, FetchOptions, HttpFetcher};
pub use models::{AttributeConstraint, ElementSelector, FormatRules, LookupSpec, Replacement, Website};
pub use scrape::Scraper;
pub use template::{SubstitutionContext, SubstitutionRegistry};
