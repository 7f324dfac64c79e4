use crate::extract::document::{HtmlQuery, NodeRef};
use crate::extract::ExtractError;

/// SEO metadata for a single page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetaInfo {
    /// True only when a description tag exists with non-empty content
    pub has_meta_description: bool,

    /// Trimmed description content (empty when missing or blank)
    pub meta_description: String,

    /// True only when a keywords tag exists with non-empty content
    pub has_meta_keywords: bool,

    /// Trimmed keywords content (empty when missing or blank)
    pub meta_keywords: String,

    /// Issues in description-then-keywords order
    pub seo_issues: Vec<String>,
}

/// Outcome of inspecting one named meta tag
enum MetaTag {
    Missing,
    Empty,
    Present(String),
}

/// Extracts the description and keywords meta tags from a document
pub fn extract_meta_info<D: HtmlQuery>(document: &D) -> Result<MetaInfo, ExtractError> {
    let mut meta = MetaInfo::default();

    match inspect(document, "description")? {
        MetaTag::Present(content) => {
            meta.has_meta_description = true;
            meta.meta_description = content;
        }
        MetaTag::Empty => meta.seo_issues.push("Empty meta description".to_string()),
        MetaTag::Missing => meta.seo_issues.push("Missing meta description".to_string()),
    }

    match inspect(document, "keywords")? {
        MetaTag::Present(content) => {
            meta.has_meta_keywords = true;
            meta.meta_keywords = content;
        }
        MetaTag::Empty => meta.seo_issues.push("Empty meta keywords".to_string()),
        MetaTag::Missing => meta.seo_issues.push("Missing meta keywords".to_string()),
    }

    Ok(meta)
}

fn inspect<D: HtmlQuery>(document: &D, name: &str) -> Result<MetaTag, ExtractError> {
    let tag = match document.find_meta_by_name(name)? {
        Some(tag) => tag,
        None => return Ok(MetaTag::Missing),
    };

    let content = tag.attr("content").unwrap_or("").trim();
    if content.is_empty() {
        Ok(MetaTag::Empty)
    } else {
        Ok(MetaTag::Present(content.to_string()))
    }
}
