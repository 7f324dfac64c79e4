//! HTML query capability
//!
//! The extractor only needs to select elements by CSS selector, read
//! attributes, and list descendants by tag name. `HtmlQuery` and `NodeRef`
//! capture exactly that, and `ScraperDocument` implements them on top of the
//! `scraper` crate.

use crate::extract::ExtractError;
use scraper::{ElementRef, Html, Selector};

/// An element handle inside a parsed document
pub trait NodeRef: Sized {
    /// Lowercase tag name of the element
    fn tag_name(&self) -> &str;

    /// Value of an attribute, if present
    fn attr(&self, name: &str) -> Option<&str>;

    /// Returns true if the attribute is present (with or without a value)
    fn has_attr(&self, name: &str) -> bool {
        self.attr(name).is_some()
    }

    /// All descendants with one of the given tag names, in document order
    fn find_all(&self, tags: &[&str]) -> Result<Vec<Self>, ExtractError>;
}

/// A parsed document that can be queried by selector
pub trait HtmlQuery {
    type Node<'a>: NodeRef
    where
        Self: 'a;

    /// First element matching the selector
    fn select_one(&self, selector: &str) -> Result<Option<Self::Node<'_>>, ExtractError>;

    /// Every element matching the selector, in document order
    fn select_all(&self, selector: &str) -> Result<Vec<Self::Node<'_>>, ExtractError>;

    /// The `<meta>` tag with the given `name` attribute
    fn find_meta_by_name(&self, name: &str) -> Result<Option<Self::Node<'_>>, ExtractError> {
        self.select_one(&format!("meta[name=\"{}\"]", name))
    }

    /// The raw `href` value of every anchor element
    fn find_anchor_hrefs(&self) -> Result<Vec<String>, ExtractError> {
        Ok(self
            .select_all("a[href]")?
            .iter()
            .filter_map(|anchor| anchor.attr("href").map(str::to_string))
            .collect())
    }
}

/// Parses a selector, mapping failures into `ExtractError`
pub fn parse_selector(selector: &str) -> Result<Selector, ExtractError> {
    Selector::parse(selector).map_err(|e| ExtractError::InvalidSelector {
        selector: selector.to_string(),
        message: format!("{:?}", e),
    })
}

/// A document parsed with `scraper`
pub struct ScraperDocument {
    html: Html,
}

impl ScraperDocument {
    /// Parses an HTML document
    ///
    /// Parsing is lenient: malformed markup is repaired, never rejected.
    pub fn parse(html: &str) -> Self {
        Self {
            html: Html::parse_document(html),
        }
    }
}

impl HtmlQuery for ScraperDocument {
    type Node<'a> = ElementRef<'a>;

    fn select_one(&self, selector: &str) -> Result<Option<ElementRef<'_>>, ExtractError> {
        let selector = parse_selector(selector)?;
        Ok(self.html.select(&selector).next())
    }

    fn select_all(&self, selector: &str) -> Result<Vec<ElementRef<'_>>, ExtractError> {
        let selector = parse_selector(selector)?;
        Ok(self.html.select(&selector).collect())
    }
}

impl<'a> NodeRef for ElementRef<'a> {
    fn tag_name(&self) -> &str {
        self.value().name()
    }

    fn attr(&self, name: &str) -> Option<&str> {
        self.value().attr(name)
    }

    fn find_all(&self, tags: &[&str]) -> Result<Vec<Self>, ExtractError> {
        let selector = parse_selector(&tags.join(", "))?;
        Ok(self.select(&selector).collect())
    }
}
