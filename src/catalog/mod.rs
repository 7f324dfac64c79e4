//! Form rule catalog
//!
//! The catalog maps URL path fragments to the forms expected on matching
//! pages. It is built once before a crawl starts and never changes afterwards.

use crate::config::FormRuleEntry;

/// Path fragment that stands for the crawl root in configuration files
pub const ROOT_SENTINEL: &str = "/";

/// Which pages a rule applies to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathMatch {
    /// Only the crawl root
    Root,
    /// Any page whose path contains the fragment (case-insensitive)
    Fragment(String),
}

impl PathMatch {
    /// Builds a path match from its configuration spelling
    pub fn from_config(path: &str) -> Self {
        if path == ROOT_SENTINEL {
            Self::Root
        } else {
            Self::Fragment(path.to_lowercase())
        }
    }

    /// Returns true if a page with this path (and root-ness) is covered
    pub fn matches(&self, path: &str, is_root: bool) -> bool {
        match self {
            Self::Root => is_root,
            Self::Fragment(fragment) => path.to_lowercase().contains(fragment.as_str()),
        }
    }
}

/// A single catalog entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormRule {
    /// Pages this rule applies to
    pub path: PathMatch,

    /// Display name of the form type
    pub form_type: String,

    /// Selectors tried in order; each one may yield its own form
    pub selectors: Vec<String>,
}

impl FormRule {
    fn new(path: PathMatch, form_type: &str, selectors: &[&str]) -> Self {
        Self {
            path,
            form_type: form_type.to_string(),
            selectors: selectors.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn fragment(fragment: &str, form_type: &str, selectors: &[&str]) -> Self {
        Self::new(PathMatch::Fragment(fragment.to_string()), form_type, selectors)
    }
}

/// The immutable set of form rules for a crawl
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormCatalog {
    rules: Vec<FormRule>,
}

impl FormCatalog {
    /// Creates a catalog from explicit rules
    pub fn new(rules: Vec<FormRule>) -> Self {
        Self { rules }
    }

    /// The built-in catalog of lead-capture forms
    pub fn builtin() -> Self {
        Self::new(vec![
            FormRule::new(
                PathMatch::Root,
                "Get Free Recommendations",
                &["form#home-recommendations"],
            ),
            FormRule::fragment(
                "vendor-profile-page-software",
                "Software Profile Forms",
                &[
                    "form.get-pricing-form",
                    "form.compare-pricing-form",
                    "form.watch-demo-form",
                    "form.write-review-form",
                    "form.fit-check-form",
                ],
            ),
            FormRule::fragment(
                "vendor-profile-page-services",
                "Services Profile Forms",
                &["form.get-quote-form", "form.download-portfolio-form"],
            ),
            FormRule::fragment(
                "lead-generation-page",
                "Get Started Form",
                &["form.vendor-signup-form"],
            ),
            FormRule::fragment(
                "subcategory-page",
                "Subcategory Forms",
                &["form.pricing-guide-form", "form.download-list-form"],
            ),
            FormRule::fragment(
                "vendor-comparison-page",
                "Comparison Form",
                &["form.comparison-form"],
            ),
            FormRule::fragment(
                "whitepaper-article-page",
                "Whitepaper Form",
                &["form.whitepaper-form"],
            ),
            FormRule::fragment("register-now", "Webinar Registration", &["form.webinar-form"]),
            FormRule::fragment(
                "watch-now-webinar",
                "Watch Webinar",
                &["form.watch-webinar-form"],
            ),
            FormRule::fragment(
                "category-page",
                "Category Page Forms",
                &["form.advice-form", "form.help-form"],
            ),
            FormRule::fragment(
                "get-free-advice",
                "Advice Forms",
                &["form.deciding-help-form", "form.software-search-form"],
            ),
            FormRule::fragment("contact-us", "Contact Form", &["form.contact-form"]),
        ])
    }

    /// Builds the catalog from configuration, falling back to the built-in rules
    pub fn from_entries(entries: &[FormRuleEntry]) -> Self {
        if entries.is_empty() {
            return Self::builtin();
        }

        Self::new(
            entries
                .iter()
                .map(|entry| FormRule {
                    path: PathMatch::from_config(&entry.path),
                    form_type: entry.name.clone(),
                    selectors: entry.selectors.clone(),
                })
                .collect(),
        )
    }

    /// All rules, in catalog order
    pub fn rules(&self) -> &[FormRule] {
        &self.rules
    }

    /// Rules that apply to a page
    pub fn rules_for<'a>(
        &'a self,
        path: &'a str,
        is_root: bool,
    ) -> impl Iterator<Item = &'a FormRule> + 'a {
        self.rules
            .iter()
            .filter(move |rule| rule.path.matches(path, is_root))
    }

    /// Returns true if a path contains one of the catalog's path fragments
    ///
    /// The root rule never makes a URL a priority URL.
    pub fn is_priority_path(&self, path: &str) -> bool {
        self.rules
            .iter()
            .any(|rule| matches!(rule.path, PathMatch::Fragment(_)) && rule.path.matches(path, false))
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Default for FormCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}
