//! # Lookup Scraper
//!
//! Command-line runner: loads website specifications from a config file,
//! scrapes them one after another and prints one line per website.
//!
//! ## Usage
//!
//! ```sh
//! lookup_scraper -c sites.json -v PAGE=Wikipedia -j ./reports
//! ```
//!
//! A failing website is logged and skipped; the remaining websites are
//! still scraped and the process exits with an error at the end.

use chrono::Local;
use clap::Parser;
use lookup_scraper::cli::Cli;
use lookup_scraper::config::load_websites;
use lookup_scraper::fetch::{DEFAULT_USER_AGENT, FetchOptions, HttpFetcher};
use lookup_scraper::models::{ScrapeOutcome, ScrapeReport, Website};
use lookup_scraper::outputs::{json, text};
use lookup_scraper::template::{SubstitutionContext, SubstitutionRegistry};
use lookup_scraper::utils::{ensure_writable_dir, truncate_for_log};
use lookup_scraper::Scraper;
use std::error::Error;
use std::time::Duration;
use tracing::{debug, error, info, instrument, warn};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("lookup_scraper starting up");

    let args = Cli::parse();
    debug!(?args.config, ?args.json_output_dir, "Parsed CLI arguments");

    if let Some(dir) = &args.json_output_dir {
        if let Err(e) = ensure_writable_dir(dir).await {
            error!(
                path = %dir.display(),
                error = %e,
                "JSON output directory is not writable (fix perms or choose a different path)"
            );
            return Err(e);
        }
    }

    let websites = select_websites(load_websites(&args.config).await?, &args.sites);
    if websites.is_empty() {
        warn!(filter = ?args.sites, "No websites to scrape");
        return Ok(());
    }

    let mut registry = SubstitutionRegistry::with_builtins();
    for (name, value) in &args.vars {
        registry.register_variable(name, value.clone())?;
    }
    info!(placeholders = registry.len(), "Substitution registry ready");

    let options = FetchOptions {
        timeout: Duration::from_secs(args.timeout_secs),
        user_agent: args
            .user_agent
            .clone()
            .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
    };
    let scraper = Scraper::new(HttpFetcher::new(&options)?).with_max_depth(args.max_depth);
    info!(
        websites = websites.len(),
        max_depth = scraper.max_depth(),
        timeout_secs = args.timeout_secs,
        "Scraping websites"
    );

    let mut results = Vec::with_capacity(websites.len());
    for website in &websites {
        if args.respect_window {
            wait_for_window(website).await;
        }

        let ctx = SubstitutionContext::now();
        let outcome = match scraper.scrape(website, Some(&registry), &ctx).await {
            Ok(content) => {
                info!(
                    website = %website.label(),
                    content = %truncate_for_log(&content, 120),
                    "Scraped website"
                );
                ScrapeOutcome {
                    website: website.label().to_string(),
                    url: website.url.clone(),
                    content: Some(content),
                    error: None,
                }
            }
            Err(e) => {
                error!(website = %website.label(), error = %e, "Scrape failed; skipping website");
                ScrapeOutcome {
                    website: website.label().to_string(),
                    url: website.url.clone(),
                    content: None,
                    error: Some(e.to_string()),
                }
            }
        };
        results.push(outcome);
    }

    let now = Local::now();
    let report = ScrapeReport {
        local_date: now.date_naive().to_string(),
        local_time: now.time().format("%H:%M:%S").to_string(),
        results,
    };
    print!("{}", text::render_lines(&report));

    if let Some(dir) = &args.json_output_dir {
        if let Err(e) = json::write_report(&report, dir).await {
            error!(error = %e, "Failed to write JSON report");
        }
    }

    let failed = report.failures();
    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        total = report.results.len(),
        failed,
        "Execution complete"
    );

    if failed > 0 {
        return Err(format!("{failed} of {} websites failed", report.results.len()).into());
    }
    Ok(())
}

/// Keep websites whose name is in `names`; all of them when `names` is empty.
fn select_websites(websites: Vec<Website>, names: &[String]) -> Vec<Website> {
    if names.is_empty() {
        return websites;
    }
    for name in names {
        if !websites.iter().any(|w| w.name.as_deref() == Some(name.as_str())) {
            warn!(%name, "No website with this name in config");
        }
    }
    websites
        .into_iter()
        .filter(|w| w.name.as_ref().is_some_and(|n| names.contains(n)))
        .collect()
}

/// Sleep until `website`'s scrape window opens, if it has one.
async fn wait_for_window(website: &Website) {
    let Some(window) = website.window else {
        return;
    };
    let wait = window.until_open(Local::now().time());
    if let Ok(wait) = wait.to_std() {
        if !wait.is_zero() {
            info!(
                website = %website.label(),
                minutes = wait.as_secs() / 60,
                "Waiting for scrape window"
            );
            tokio::time::sleep(wait).await;
        }
    }
}
