//! Crawler module for page fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - The deduplicating, prioritized frontier
//! - HTTP fetching
//! - The crawl session and its stop conditions
//! - Batched crawl coordination

mod coordinator;
mod fetcher;
mod frontier;
mod session;

pub use coordinator::{Coordinator, CrawlOutcome, CrawlSettings};
pub use fetcher::{build_http_client, fetch_url, FetchResult};
pub use frontier::{Admission, Frontier, Priority};
pub use session::CrawlSession;

use crate::catalog::FormCatalog;
use crate::config::Config;
use crate::output::write_report_csv;
use crate::ScoutError;
use std::path::Path;

/// Runs a complete crawl operation
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Build the catalog and HTTP client from the configuration
/// 2. Crawl the site until a stop condition is met
/// 3. Write the CSV report (skipped when no forms were found)
///
/// # Arguments
///
/// * `config` - The crawler configuration
/// * `base_url` - The crawl root
///
/// # Returns
///
/// * `Ok(CrawlOutcome)` - The crawl finished and the report was written
/// * `Err(ScoutError)` - Setup failed or the report could not be written
///
/// # Example
///
/// ```no_run
/// use form_scout::config::Config;
/// use form_scout::crawler::run_crawl;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let outcome = run_crawl(&Config::default(), "https://example.com/").await?;
/// println!("Found {} forms", outcome.session.report().len());
/// # Ok(())
/// # }
/// ```
pub async fn run_crawl(config: &Config, base_url: &str) -> Result<CrawlOutcome, ScoutError> {
    let catalog = FormCatalog::from_entries(&config.form_rules);
    let coordinator = Coordinator::new(CrawlSettings::from_config(config), catalog, base_url)?;

    let outcome = coordinator.run().await;

    let output_path = Path::new(&config.output.csv_path);
    if let Err(e) = write_report_csv(outcome.session.report(), output_path) {
        tracing::error!("Failed to write report to {}: {}", output_path.display(), e);
        return Err(e.into());
    }

    Ok(outcome)
}
