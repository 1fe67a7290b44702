//! Command-line interface definitions for Lookup Scraper.
//!
//! This module defines the CLI arguments and options using the `clap` crate.
//! The config path can also be provided through an environment variable.

use crate::scrape::DEFAULT_MAX_DEPTH;
use crate::utils::parse_var;
use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments for the Lookup Scraper application.
///
/// # Examples
///
/// ```sh
/// # Scrape every website in a config file
/// lookup_scraper -c sites.json
///
/// # Only the "wiki" website, filling in {{PAGE}}
/// lookup_scraper -c sites.yaml -s wiki -v PAGE=Rust_(programming_language)
///
/// # Also write a dated JSON report
/// lookup_scraper -c sites.json -j ./reports
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Website specification file (.json, .yaml or .yml)
    #[arg(short, long, env = "LOOKUP_SCRAPER_CONFIG")]
    pub config: PathBuf,

    /// Only scrape websites with this name (repeatable)
    #[arg(short, long = "site")]
    pub sites: Vec<String>,

    /// Template variable substituted for {{NAME}} (repeatable)
    #[arg(short, long = "var", value_name = "NAME=VALUE", value_parser = parse_var)]
    pub vars: Vec<(String, String)>,

    /// Maximum number of nested follow websites
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    pub max_depth: usize,

    /// HTTP request timeout in seconds
    #[arg(long, default_value_t = 30)]
    pub timeout_secs: u64,

    /// User-Agent header for HTTP requests
    #[arg(long)]
    pub user_agent: Option<String>,

    /// Wait for each website's scrape window to open instead of scraping right away
    #[arg(long)]
    pub respect_window: bool,

    /// Output directory for the JSON report
    #[arg(short, long)]
    pub json_output_dir: Option<PathBuf>,
}
