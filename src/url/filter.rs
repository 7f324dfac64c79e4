use crate::url::NormalizedUrl;
use url::Url;

/// File extensions that never hold an HTML page
const SKIPPED_EXTENSIONS: &[&str] = &[
    ".jpg", ".jpeg", ".png", ".gif", ".pdf", ".zip", ".css", ".js", ".ico", ".xml", ".txt",
    ".doc", ".docx", ".xls", ".xlsx",
];

/// Feed, API, print and pagination patterns that only duplicate content
const SKIPPED_PATTERNS: &[&str] = &[
    "/feed/",
    "/rss/",
    "/atom/",
    "/api/",
    "/print/",
    "/trackback/",
    "offset=",
    "limit=",
    "start=",
];

/// Decides whether a URL is worth fetching at all
///
/// The lowercased path and query are checked against a fixed denylist of
/// non-HTML extensions and duplicate-content patterns. This check is
/// independent of deduplication and of the same-site restriction.
///
/// # Examples
///
/// ```
/// use form_scout::url::should_crawl;
///
/// assert!(should_crawl("https://example.com/contact-us"));
/// assert!(!should_crawl("https://example.com/brochure.pdf"));
/// assert!(!should_crawl("https://example.com/blog/feed/"));
/// ```
pub fn should_crawl(url: &str) -> bool {
    let haystack = match Url::parse(url) {
        Ok(parsed) => {
            let mut target = parsed.path().to_lowercase();
            if let Some(query) = parsed.query() {
                target.push('?');
                target.push_str(&query.to_lowercase());
            }
            target
        }
        Err(_) => url.to_lowercase(),
    };

    if SKIPPED_EXTENSIONS.iter().any(|ext| haystack.contains(ext)) {
        tracing::trace!("Skipping non-HTML resource: {}", url);
        return false;
    }

    if SKIPPED_PATTERNS.iter().any(|pattern| haystack.contains(pattern)) {
        tracing::trace!("Skipping duplicate-content URL: {}", url);
        return false;
    }

    true
}

/// Checks whether a normalized URL lives under the crawl root
///
/// The key must start with the normalized base, and the remainder must be
/// empty or begin a new path segment, so `http://site.test.evil.com` does not
/// pass for a base of `http://site.test`.
pub fn is_same_site(candidate: &NormalizedUrl, base: &NormalizedUrl) -> bool {
    match candidate.as_str().strip_prefix(base.as_str()) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::url::normalize_url;

    #[test]
    fn test_accepts_plain_paths() {
        assert!(should_crawl("http://site.test/"));
        assert!(should_crawl("http://site.test/vendor-profile-page-software/acme"));
        assert!(should_crawl("http://site.test/about"));
    }

    #[test]
    fn test_rejects_extensions() {
        assert!(!should_crawl("http://site.test/files/report.pdf"));
        assert!(!should_crawl("http://site.test/static/site.css"));
        assert!(!should_crawl("http://site.test/img/LOGO.PNG"));
        assert!(!should_crawl("http://site.test/sitemap.xml"));
    }

    #[test]
    fn test_rejects_patterns() {
        assert!(!should_crawl("http://site.test/blog/feed/"));
        assert!(!should_crawl("http://site.test/api/v1/items"));
        assert!(!should_crawl("http://site.test/print/article-1"));
    }

    #[test]
    fn test_rejects_pagination_in_query() {
        assert!(!should_crawl("http://site.test/list?offset=20"));
        assert!(!should_crawl("http://site.test/list?page=2&limit=10"));
        assert!(!should_crawl("http://site.test/list/offset=20"));
    }

    #[test]
    fn test_same_site_accepts_subpaths() {
        let base = normalize_url("http://site.test/");
        assert!(is_same_site(&normalize_url("http://site.test/"), &base));
        assert!(is_same_site(&normalize_url("http://SITE.test/a/b"), &base));
    }

    #[test]
    fn test_same_site_rejects_other_hosts() {
        let base = normalize_url("http://site.test/");
        assert!(!is_same_site(&normalize_url("http://other.test/a"), &base));
        assert!(!is_same_site(&normalize_url("http://site.test.evil.com/a"), &base));
        assert!(!is_same_site(&normalize_url("http://site.test:9000/a"), &base));
    }

    #[test]
    fn test_same_site_with_path_base() {
        let base = normalize_url("http://site.test/blog/");
        assert!(is_same_site(&normalize_url("http://site.test/blog/post-1"), &base));
        assert!(!is_same_site(&normalize_url("http://site.test/blogger"), &base));
        assert!(!is_same_site(&normalize_url("http://site.test/about"), &base));
    }
}
