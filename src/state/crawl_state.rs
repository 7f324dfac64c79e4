/// Crawl state definitions
///
/// A crawl moves from `Idle` to `Running` and ends in exactly one of the
/// three terminal states, all of which lead to the report being written.
use std::fmt;

/// Represents the lifecycle state of a crawl
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CrawlState {
    /// Crawl has not started yet
    Idle,

    /// Crawl loop is fetching batches
    Running,

    // ===== Terminal States =====
    /// The frontier ran dry
    Completed,

    /// The wall-clock budget ran out
    TimedOut,

    /// The page budget was reached
    PageLimitReached,
}

impl CrawlState {
    /// Returns true if the crawl has stopped
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::Completed | Self::TimedOut | Self::PageLimitReached
        )
    }

    /// Returns true if the crawl stopped on a budget rather than running out of work
    pub fn is_budget_stop(&self) -> bool {
        matches!(self, Self::TimedOut | Self::PageLimitReached)
    }

    /// Short machine-friendly name of the state
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Running => "running",
            Self::Completed => "completed",
            Self::TimedOut => "timed_out",
            Self::PageLimitReached => "page_limit_reached",
        }
    }
}

impl fmt::Display for CrawlState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_terminal() {
        assert!(!CrawlState::Idle.is_terminal());
        assert!(!CrawlState::Running.is_terminal());

        assert!(CrawlState::Completed.is_terminal());
        assert!(CrawlState::TimedOut.is_terminal());
        assert!(CrawlState::PageLimitReached.is_terminal());
    }

    #[test]
    fn test_is_budget_stop() {
        assert!(CrawlState::TimedOut.is_budget_stop());
        assert!(CrawlState::PageLimitReached.is_budget_stop());
        assert!(!CrawlState::Completed.is_budget_stop());
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", CrawlState::Completed), "completed");
        assert_eq!(format!("{}", CrawlState::PageLimitReached), "page_limit_reached");
    }
}
