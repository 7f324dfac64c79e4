//! End-of-run crawl statistics
//!
//! This module summarizes a finished crawl session and prints it.

use crate::crawler::CrawlOutcome;
use crate::state::CrawlState;
use chrono::{DateTime, Utc};
use std::time::Duration;

/// Crawl statistics summary
#[derive(Debug, Clone)]
pub struct CrawlStatistics {
    /// How the crawl ended
    pub state: CrawlState,

    /// Wall-clock start of the crawl
    pub started_at: DateTime<Utc>,

    /// Time spent crawling
    pub elapsed: Duration,

    /// Pages fetched (successfully or not)
    pub pages_visited: usize,

    /// Pages whose fetch or extraction failed
    pub pages_failed: usize,

    /// Distinct same-site URLs admitted to the frontier
    pub urls_discovered: usize,

    /// URLs still queued when the crawl stopped
    pub urls_remaining: usize,

    /// Forms retained in the report
    pub forms_found: usize,
}

impl CrawlStatistics {
    /// Builds statistics from a finished crawl
    pub fn from_outcome(outcome: &CrawlOutcome) -> Self {
        let session = &outcome.session;
        Self {
            state: outcome.state,
            started_at: session.started_at(),
            elapsed: outcome.elapsed,
            pages_visited: session.frontier().visited_count(),
            pages_failed: session.pages_failed(),
            urls_discovered: session.frontier().known_count(),
            urls_remaining: session.frontier().len(),
            forms_found: session.report().len(),
        }
    }

    /// Share of visited pages that were fetched and extracted successfully
    pub fn success_rate(&self) -> f64 {
        if self.pages_visited == 0 {
            return 0.0;
        }
        let succeeded = self.pages_visited.saturating_sub(self.pages_failed);
        (succeeded as f64 / self.pages_visited as f64) * 100.0
    }
}

/// Prints statistics to stdout in a formatted manner
pub fn print_statistics(stats: &CrawlStatistics) {
    println!("=== Crawl Statistics ===\n");

    println!("Overview:");
    println!("  Outcome: {}", stats.state);
    println!("  Started: {}", stats.started_at.to_rfc3339());
    println!(
        "  Duration: {:.1} seconds ({:.2} minutes)",
        stats.elapsed.as_secs_f64(),
        stats.elapsed.as_secs_f64() / 60.0
    );
    println!();

    println!("Pages:");
    println!("  Visited: {}", stats.pages_visited);
    println!("  Failed: {}", stats.pages_failed);
    println!("  URLs discovered: {}", stats.urls_discovered);
    println!("  Still queued: {}", stats.urls_remaining);
    println!();

    println!("Forms found: {}", stats.forms_found);
    println!(
        "Success Rate: {:.1}% ({} / {} pages successfully processed)",
        stats.success_rate(),
        stats.pages_visited.saturating_sub(stats.pages_failed),
        stats.pages_visited
    );
}
