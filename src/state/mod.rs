//! State module for tracking crawl progress
//!
//! `CrawlState` is the crawl-level state machine: `Idle → Running → {Completed,
//! TimedOut, PageLimitReached}`.

mod crawl_state;

pub use crawl_state::CrawlState;
