use crate::extract::document::HtmlQuery;
use crate::extract::ExtractError;
use url::Url;

/// Collects absolute link targets from every anchor on a page
///
/// # Link Extraction Rules
///
/// **Skip:**
/// - empty hrefs
/// - fragment-only hrefs (`#section`)
/// - `mailto:`, `javascript:` and `tel:` links
/// - hrefs that cannot be resolved against the page URL (logged)
/// - targets that are not HTTP(S) after resolution
///
/// Order follows the document; duplicates are left for the frontier to drop.
pub fn extract_links<D: HtmlQuery>(document: &D, base_url: &Url) -> Result<Vec<String>, ExtractError> {
    Ok(document
        .find_anchor_hrefs()?
        .iter()
        .filter_map(|href| resolve_link(href, base_url))
        .collect())
}

/// Resolves a single href to an absolute URL, or `None` if it should be skipped
pub fn resolve_link(href: &str, base_url: &Url) -> Option<String> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    let lower = href.to_lowercase();
    if lower.starts_with("mailto:") || lower.starts_with("javascript:") || lower.starts_with("tel:")
    {
        return None;
    }

    match base_url.join(href) {
        Ok(absolute) if absolute.scheme() == "http" || absolute.scheme() == "https" => {
            Some(absolute.to_string())
        }
        Ok(_) => None,
        Err(e) => {
            tracing::warn!("Error processing link {}: {}", href, e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::document::ScraperDocument;

    fn base_url() -> Url {
        Url::parse("http://site.test/category-page/crm").unwrap()
    }

    fn links_for(body: &str) -> Vec<String> {
        let html = format!("<html><body>{}</body></html>", body);
        extract_links(&ScraperDocument::parse(&html), &base_url()).unwrap()
    }

    #[test]
    fn test_relative_and_absolute_links() {
        let links = links_for(
            r#"<a href="/contact-us">C</a><a href="pricing">P</a><a href="https://other.test/x">O</a>"#,
        );
        assert_eq!(
            links,
            vec![
                "http://site.test/contact-us",
                "http://site.test/category-page/pricing",
                "https://other.test/x",
            ]
        );
    }

    #[test]
    fn test_skipped_hrefs() {
        let links = links_for(
            r##"<a href="">E</a><a href="#top">F</a><a href="mailto:hi@site.test">M</a>
            <a href="javascript:void(0)">J</a><a href="tel:+100">T</a><a href="/kept">K</a>"##,
        );
        assert_eq!(links, vec!["http://site.test/kept"]);
    }

    #[test]
    fn test_malformed_link_is_skipped() {
        let links = links_for(r#"<a href="http://[broken">B</a><a href="/ok">OK</a>"#);
        assert_eq!(links, vec!["http://site.test/ok"]);
    }

    #[test]
    fn test_non_http_scheme_is_skipped() {
        let links = links_for(r#"<a href="ftp://site.test/file">F</a>"#);
        assert!(links.is_empty());
    }
}
