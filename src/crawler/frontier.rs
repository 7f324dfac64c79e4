//! Frontier for managing the crawl queue
//!
//! This module handles:
//! - Deduplication of normalized URLs over the whole crawl
//! - The same-site restriction and the URL denylist
//! - Two FIFO lanes so form-relevant URLs are fetched first
//! - The visited set used for the page budget

use crate::url::{is_same_site, normalize_url, should_crawl, NormalizedUrl};
use std::collections::{HashSet, VecDeque};

/// Queue lane a URL is admitted into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Priority {
    /// The path contains a catalog path fragment
    High,
    /// Any other same-site page
    Normal,
}

/// Result of offering a URL to the frontier
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Admission {
    /// The URL was new and is now queued
    Admitted(NormalizedUrl),
    /// The URL hit the extension or pattern denylist
    Filtered,
    /// The URL lies outside the crawl root
    OffSite,
    /// The URL's key was already seen during this crawl
    Duplicate,
}

impl Admission {
    pub fn is_admitted(&self) -> bool {
        matches!(self, Self::Admitted(_))
    }
}

/// Deduplicated, priority-ordered work queue of normalized URLs
///
/// A key enters `all_urls` the moment it is admitted and never leaves, so a
/// URL is queued at most once per crawl even if its fetch fails.
#[derive(Debug, Clone)]
pub struct Frontier {
    /// Normalized crawl root
    base: NormalizedUrl,

    /// Form-relevant URLs, fetched before anything in `normal`
    priority: VecDeque<NormalizedUrl>,

    /// Every other admitted URL
    normal: VecDeque<NormalizedUrl>,

    /// Every key ever admitted
    all_urls: HashSet<NormalizedUrl>,

    /// Keys that were actually fetched (successfully or not)
    visited: HashSet<NormalizedUrl>,
}

impl Frontier {
    /// Creates an empty frontier for a crawl rooted at `base`
    pub fn new(base: NormalizedUrl) -> Self {
        Self {
            base,
            priority: VecDeque::new(),
            normal: VecDeque::new(),
            all_urls: HashSet::new(),
            visited: HashSet::new(),
        }
    }

    /// Queues the crawl root
    ///
    /// The root bypasses the denylist; it is still recorded in `all_urls`.
    pub fn seed(&mut self) -> bool {
        if !self.all_urls.insert(self.base.clone()) {
            return false;
        }
        self.normal.push_back(self.base.clone());
        true
    }

    /// Offers an absolute URL to the frontier
    ///
    /// The URL is admitted only if it passes the denylist, normalizes to a key
    /// under the crawl root, and that key has not been seen before.
    pub fn enqueue(&mut self, url: &str, priority: Priority) -> Admission {
        if !should_crawl(url) {
            return Admission::Filtered;
        }

        let key = normalize_url(url);
        if !is_same_site(&key, &self.base) {
            return Admission::OffSite;
        }

        if !self.all_urls.insert(key.clone()) {
            return Admission::Duplicate;
        }

        match priority {
            Priority::High => {
                tracing::debug!("Found potential form page: {}", key);
                self.priority.push_back(key.clone());
            }
            Priority::Normal => self.normal.push_back(key.clone()),
        }

        Admission::Admitted(key)
    }

    /// Removes up to `n` URLs from the front of the queue
    ///
    /// The priority lane is drained first; each lane is FIFO.
    pub fn dequeue_batch(&mut self, n: usize) -> Vec<NormalizedUrl> {
        let mut batch = Vec::with_capacity(n.min(self.len()));

        while batch.len() < n {
            match self.priority.pop_front().or_else(|| self.normal.pop_front()) {
                Some(url) => batch.push(url),
                None => break,
            }
        }

        batch
    }

    /// Records that a URL was fetched
    pub fn mark_visited(&mut self, url: &NormalizedUrl) {
        self.visited.insert(url.clone());
    }

    /// Number of URLs waiting to be fetched
    pub fn len(&self) -> usize {
        self.priority.len() + self.normal.len()
    }

    /// Returns whether nothing is waiting to be fetched
    pub fn is_empty(&self) -> bool {
        self.priority.is_empty() && self.normal.is_empty()
    }

    /// Number of pages fetched so far
    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    /// Number of distinct URLs admitted so far
    pub fn known_count(&self) -> usize {
        self.all_urls.len()
    }

    pub fn is_visited(&self, url: &NormalizedUrl) -> bool {
        self.visited.contains(url)
    }
}
