//! URL handling module for Form-Scout
//!
//! This module provides URL normalization, the crawl denylist, the same-site
//! restriction and validation of the crawl root.

mod filter;
mod normalize;

use crate::UrlError;
use url::Url;

// Re-export main functions
pub use filter::{is_same_site, should_crawl};
pub use normalize::{normalize_parsed, normalize_url, NormalizedUrl};

/// Parses and validates the crawl root
///
/// The base URL must be absolute, use HTTP or HTTPS, and carry a host.
///
/// # Examples
///
/// ```
/// use form_scout::url::parse_base_url;
///
/// assert!(parse_base_url("https://example.com/").is_ok());
/// assert!(parse_base_url("ftp://example.com/").is_err());
/// assert!(parse_base_url("/relative").is_err());
/// ```
pub fn parse_base_url(raw: &str) -> Result<Url, UrlError> {
    let url = Url::parse(raw.trim()).map_err(|e| UrlError::Parse(format!("{}: {}", raw, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS schemes are supported, got: {}",
            url.scheme()
        )));
    }

    if url.host_str().is_none() {
        return Err(UrlError::MissingHost);
    }

    Ok(url)
}
