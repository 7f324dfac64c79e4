//! Crawl session state
//!
//! `CrawlSession` owns everything a crawl accumulates: the frontier, the form
//! report, counters and the crawl state. Only the coordinator mutates it, and
//! only between batches, so no locking is needed.

use crate::catalog::FormCatalog;
use crate::crawler::frontier::{Admission, Frontier, Priority};
use crate::extract::PageExtraction;
use crate::output::FormReport;
use crate::state::CrawlState;
use crate::url::{normalize_url, NormalizedUrl};
use crate::ScoutError;
use chrono::{DateTime, Utc};
use std::time::{Duration, Instant};

/// Accumulated state of one crawl
#[derive(Debug)]
pub struct CrawlSession {
    frontier: Frontier,
    report: FormReport,
    state: CrawlState,
    started: Instant,
    started_at: DateTime<Utc>,
    pages_failed: usize,
}

impl CrawlSession {
    /// Creates an idle session for a crawl rooted at `base`
    pub fn new(base: NormalizedUrl) -> Self {
        Self {
            frontier: Frontier::new(base),
            report: FormReport::new(),
            state: CrawlState::Idle,
            started: Instant::now(),
            started_at: Utc::now(),
            pages_failed: 0,
        }
    }

    /// `Idle → Running`: seeds the frontier with the root and starts the clock
    pub fn start(&mut self) {
        if self.state != CrawlState::Idle {
            tracing::debug!("Session already started ({})", self.state);
            return;
        }

        self.frontier.seed();
        self.started = Instant::now();
        self.started_at = Utc::now();
        self.state = CrawlState::Running;
    }

    /// Evaluates the stop conditions in precedence order
    ///
    /// 1. page budget (`visited >= max_pages`)
    /// 2. time budget (`elapsed >= timeout`)
    /// 3. empty frontier
    pub fn check_stop(&self, max_pages: usize, timeout: Duration) -> Option<CrawlState> {
        if self.frontier.visited_count() >= max_pages {
            tracing::info!("Reached maximum pages limit: {}", max_pages);
            return Some(CrawlState::PageLimitReached);
        }

        let elapsed = self.elapsed();
        if elapsed >= timeout {
            tracing::info!(
                "Reached timeout after {:.1} minutes",
                elapsed.as_secs_f64() / 60.0
            );
            return Some(CrawlState::TimedOut);
        }

        if self.frontier.is_empty() {
            tracing::info!("Frontier is empty, crawl complete");
            return Some(CrawlState::Completed);
        }

        None
    }

    /// Pops the next batch, never exceeding the remaining page budget
    pub fn next_batch(&mut self, batch_size: usize, max_pages: usize) -> Vec<NormalizedUrl> {
        let remaining = max_pages.saturating_sub(self.frontier.visited_count());
        self.frontier.dequeue_batch(batch_size.min(remaining))
    }

    /// Folds one fetched page back into the session
    ///
    /// The URL is marked visited whatever the outcome. On success, new forms
    /// go into the report and discovered links are offered to the frontier.
    pub fn apply_result(
        &mut self,
        url: &NormalizedUrl,
        result: Result<PageExtraction, ScoutError>,
        catalog: &FormCatalog,
    ) {
        self.frontier.mark_visited(url);

        let extraction = match result {
            Ok(extraction) => extraction,
            Err(e) => {
                tracing::warn!("Error processing {}: {}", url, e);
                self.pages_failed += 1;
                return;
            }
        };

        for form in extraction.forms {
            self.report.push(form);
        }

        let mut admitted = 0;
        for link in &extraction.links {
            let priority = if catalog.is_priority_path(normalize_url(link).path()) {
                Priority::High
            } else {
                Priority::Normal
            };

            match self.frontier.enqueue(link, priority) {
                Admission::Admitted(_) => admitted += 1,
                rejected => tracing::trace!("Not queueing {}: {:?}", link, rejected),
            }
        }

        tracing::debug!(
            "{}: {} links found, {} new URLs queued",
            url,
            extraction.links.len(),
            admitted
        );
    }

    /// Moves the session into a terminal state
    pub fn finish(&mut self, state: CrawlState) {
        debug_assert!(state.is_terminal());
        self.state = state;
    }

    pub fn state(&self) -> CrawlState {
        self.state
    }

    pub fn frontier(&self) -> &Frontier {
        &self.frontier
    }

    pub fn report(&self) -> &FormReport {
        &self.report
    }

    /// Consumes the session, keeping only the report
    pub fn into_report(self) -> FormReport {
        self.report
    }

    pub fn pages_failed(&self) -> usize {
        self.pages_failed
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Time since the session started running
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }
}
