//! Page extraction
//!
//! Turns a parsed page into its SEO metadata, the catalog forms it contains,
//! and the absolute links it points to:
//! - `document`: the narrow HTML query capability and its `scraper` adapter
//! - `meta`: description/keywords meta tags and derived SEO issues
//! - `forms`: catalog-driven form and field extraction
//! - `links`: anchor discovery and resolution

mod document;
mod forms;
mod links;
mod meta;

pub use document::{parse_selector, HtmlQuery, NodeRef, ScraperDocument};
pub use forms::{derive_form_id, extract_fields, extract_forms, FieldRecord, FormRecord};
pub use links::{extract_links, resolve_link};
pub use meta::{extract_meta_info, MetaInfo};

use crate::catalog::FormCatalog;
use crate::url::NormalizedUrl;
use std::sync::Arc;
use thiserror::Error;
use url::Url;

/// Errors raised while querying a parsed page
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("invalid selector '{selector}': {message}")]
    InvalidSelector { selector: String, message: String },
}

/// Everything extracted from one page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageExtraction {
    pub meta: MetaInfo,
    pub forms: Vec<FormRecord>,
    pub links: Vec<String>,
}

/// Applies the form catalog to pages of one crawl
#[derive(Debug, Clone)]
pub struct Extractor {
    catalog: Arc<FormCatalog>,
    root: NormalizedUrl,
}

impl Extractor {
    /// Creates an extractor for a crawl rooted at `root`
    pub fn new(catalog: Arc<FormCatalog>, root: NormalizedUrl) -> Self {
        Self { catalog, root }
    }

    /// Extracts metadata, forms and links from a parsed page
    ///
    /// # Arguments
    ///
    /// * `page` - The normalized URL the page was crawled under
    /// * `resolve_base` - The URL relative links resolve against (the final response URL)
    /// * `document` - The parsed page
    pub fn extract_page<D: HtmlQuery>(
        &self,
        page: &NormalizedUrl,
        resolve_base: &Url,
        document: &D,
    ) -> Result<PageExtraction, ExtractError> {
        let meta = extract_meta_info(document)?;

        tracing::debug!(
            "Meta analysis for {}: description present: {}, keywords present: {}",
            page,
            meta.has_meta_description,
            meta.has_meta_keywords
        );
        if !meta.seo_issues.is_empty() {
            tracing::warn!(
                "SEO issues found on {}: {}",
                page,
                meta.seo_issues.join(", ")
            );
        }

        let is_root = *page == self.root;
        let forms = extract_forms(
            document,
            page.as_str(),
            page.path(),
            is_root,
            &self.catalog,
            &meta,
        )?;
        let links = extract_links(document, resolve_base)?;

        Ok(PageExtraction { meta, forms, links })
    }

    /// Parses raw HTML and extracts it
    pub fn extract_html(
        &self,
        page: &NormalizedUrl,
        resolve_base: &Url,
        html: &str,
    ) -> Result<PageExtraction, ExtractError> {
        let document = ScraperDocument::parse(html);
        self.extract_page(page, resolve_base, &document)
    }
}
