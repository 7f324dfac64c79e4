use serde::Deserialize;

/// User agent sent with every request unless configured otherwise
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// Default report file name
pub const DEFAULT_CSV_PATH: &str = "form_specs.csv";

/// Main configuration structure for Form-Scout
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent", default)]
    pub user_agent: UserAgentConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(rename = "form-rule", default)]
    pub form_rules: Vec<FormRuleEntry>,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Number of pages fetched concurrently per batch
    #[serde(rename = "batch-size", default = "default_batch_size")]
    pub batch_size: usize,

    /// Page budget for the whole crawl
    #[serde(rename = "max-pages", default = "default_max_pages")]
    pub max_pages: usize,

    /// Wall-clock budget for the whole crawl (minutes)
    #[serde(rename = "timeout-minutes", default = "default_timeout_minutes")]
    pub timeout_minutes: u64,

    /// Timeout for a single request (seconds)
    #[serde(rename = "request-timeout-secs", default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            batch_size: default_batch_size(),
            max_pages: default_max_pages(),
            timeout_minutes: default_timeout_minutes(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Full User-Agent header value
    #[serde(default = "default_user_agent")]
    pub value: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            value: default_user_agent(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Path to the CSV report
    #[serde(rename = "csv-path", default = "default_csv_path")]
    pub csv_path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            csv_path: default_csv_path(),
        }
    }
}

/// A form rule as written in the configuration file
#[derive(Debug, Clone, Deserialize)]
pub struct FormRuleEntry {
    /// Path fragment, or "/" for the crawl root
    pub path: String,

    /// Display name of the form type
    pub name: String,

    /// CSS selectors tried in order
    pub selectors: Vec<String>,
}

fn default_batch_size() -> usize {
    5
}

fn default_max_pages() -> usize {
    500
}

fn default_timeout_minutes() -> u64 {
    30
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

fn default_csv_path() -> String {
    DEFAULT_CSV_PATH.to_string()
}
