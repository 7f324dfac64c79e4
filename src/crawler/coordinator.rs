//! Crawler coordinator - main crawl orchestration logic
//!
//! This module contains the main crawl loop that coordinates:
//! - Evaluating stop conditions before every batch
//! - Pulling batches from the frontier
//! - Fetching, parsing and extracting a batch concurrently
//! - Folding batch results back into the session in dispatch order

use crate::catalog::FormCatalog;
use crate::config::Config;
use crate::crawler::fetcher::{build_http_client, fetch_url, FetchResult};
use crate::crawler::session::CrawlSession;
use crate::extract::{Extractor, PageExtraction};
use crate::state::CrawlState;
use crate::url::{normalize_parsed, parse_base_url, NormalizedUrl};
use crate::{ScoutError, UrlError};
use futures::future::join_all;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Tunables for one crawl
#[derive(Debug, Clone)]
pub struct CrawlSettings {
    /// Pages fetched concurrently per batch
    pub batch_size: usize,

    /// Page budget
    pub max_pages: usize,

    /// Wall-clock budget for the whole crawl
    pub crawl_timeout: Duration,

    /// Timeout for a single request
    pub request_timeout: Duration,

    /// User-Agent header value
    pub user_agent: String,
}

impl CrawlSettings {
    /// Derives crawl settings from the loaded configuration
    pub fn from_config(config: &Config) -> Self {
        Self {
            batch_size: config.crawler.batch_size,
            max_pages: config.crawler.max_pages,
            crawl_timeout: Duration::from_secs(config.crawler.timeout_minutes.saturating_mul(60)),
            request_timeout: Duration::from_secs(config.crawler.request_timeout_secs),
            user_agent: config.user_agent.value.clone(),
        }
    }
}

impl Default for CrawlSettings {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

/// Result of a finished crawl
#[derive(Debug)]
pub struct CrawlOutcome {
    /// Terminal state the crawl ended in
    pub state: CrawlState,

    /// Everything the crawl accumulated
    pub session: CrawlSession,

    /// Time spent crawling
    pub elapsed: Duration,
}

/// Main crawler coordinator structure
pub struct Coordinator {
    settings: CrawlSettings,
    catalog: Arc<FormCatalog>,
    extractor: Extractor,
    client: Client,
    base: NormalizedUrl,
}

impl Coordinator {
    /// Creates a new coordinator instance
    ///
    /// # Arguments
    ///
    /// * `settings` - Batch size, budgets and transport settings
    /// * `catalog` - The form rules applied to every page
    /// * `base_url` - The crawl root
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Successfully created coordinator
    /// * `Err(ScoutError)` - The base URL is invalid or the HTTP client could not be built
    pub fn new(
        settings: CrawlSettings,
        catalog: FormCatalog,
        base_url: &str,
    ) -> Result<Self, ScoutError> {
        let base_url = parse_base_url(base_url)?;
        let base = normalize_parsed(&base_url);
        let client = build_http_client(&settings.user_agent, settings.request_timeout)?;
        let catalog = Arc::new(catalog);
        let extractor = Extractor::new(Arc::clone(&catalog), base.clone());

        Ok(Self {
            settings,
            catalog,
            extractor,
            client,
            base,
        })
    }

    /// The normalized crawl root
    pub fn base(&self) -> &NormalizedUrl {
        &self.base
    }

    /// Runs the main crawl loop
    ///
    /// Each iteration:
    /// 1. Evaluates the stop conditions (page budget, time budget, empty frontier)
    /// 2. Pops a batch of up to `batch_size` URLs
    /// 3. Fetches and extracts the whole batch concurrently, waiting for all of it
    /// 4. Applies the results in dispatch order
    ///
    /// Per-page failures are logged and never end the crawl.
    pub async fn run(&self) -> CrawlOutcome {
        tracing::info!("Starting crawl of {}", self.base);

        let mut session = CrawlSession::new(self.base.clone());
        session.start();

        let state = loop {
            if let Some(stop) =
                session.check_stop(self.settings.max_pages, self.settings.crawl_timeout)
            {
                break stop;
            }

            let batch = session.next_batch(self.settings.batch_size, self.settings.max_pages);
            tracing::debug!("Dispatching batch of {} URLs", batch.len());

            let results = join_all(batch.iter().map(|url| self.process_url(url))).await;

            for (url, result) in batch.iter().zip(results) {
                session.apply_result(url, result, &self.catalog);
            }

            tracing::info!(
                "Processed {} pages, {} remaining",
                session.frontier().visited_count(),
                session.frontier().len()
            );
        };

        session.finish(state);
        let elapsed = session.elapsed();

        tracing::info!(
            "Crawl {}. Found {} forms across {} pages",
            state,
            session.report().len(),
            session.frontier().visited_count()
        );
        if state.is_budget_stop() && !session.frontier().is_empty() {
            tracing::info!(
                "Stopped with {} URLs still queued",
                session.frontier().len()
            );
        }

        CrawlOutcome {
            state,
            session,
            elapsed,
        }
    }

    /// Fetches, parses and extracts a single URL
    async fn process_url(&self, url: &NormalizedUrl) -> Result<PageExtraction, ScoutError> {
        let href = url.href();

        match fetch_url(&self.client, &href).await {
            FetchResult::Success {
                final_url, body, ..
            } => {
                tracing::debug!("Got HTML response for {} (length: {})", href, body.len());
                let resolve_base = Url::parse(&final_url)
                    .map_err(|e| ScoutError::UrlError(UrlError::Parse(e.to_string())))?;

                self.extractor
                    .extract_html(url, &resolve_base, &body)
                    .map_err(|source| ScoutError::Extract { url: href, source })
            }
            FetchResult::HttpError { status_code } => Err(ScoutError::HttpStatus {
                url: href,
                status: status_code,
            }),
            FetchResult::NetworkError { error } => Err(ScoutError::Network {
                url: href,
                message: error,
            }),
        }
    }
}
