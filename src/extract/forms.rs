use crate::catalog::FormCatalog;
use crate::extract::document::{HtmlQuery, NodeRef};
use crate::extract::meta::MetaInfo;
use crate::extract::ExtractError;
use std::fmt;

/// Tags that count as form fields
const FIELD_TAGS: &[&str] = &["input", "textarea", "select"];

/// Field types that are never reported
const EXCLUDED_TYPES: &[&str] = &["hidden", "submit"];

/// A visible field inside a matched form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldRecord {
    /// Synthesized selector, e.g. `input[name='email']`
    pub selector: String,

    /// Input type attribute, or the tag name for textarea/select
    pub field_type: String,

    /// True if `required` or `data-required` is present
    pub required: bool,
}

impl fmt::Display for FieldRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}|{}|{}",
            self.selector,
            self.field_type,
            if self.required { "required" } else { "optional" }
        )
    }
}

/// A matched form with at least one visible field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormRecord {
    pub url: String,
    pub form_id: String,
    pub form_selector: String,
    pub form_type: String,
    pub fields: Vec<FieldRecord>,
    pub meta_info: MetaInfo,
}

/// Applies the catalog rules that cover a page and returns the forms found
///
/// Every selector of every applicable rule is tried; the first element each
/// selector matches becomes a candidate. Candidates without visible fields are
/// dropped. A selector the engine rejects is skipped with a warning.
pub fn extract_forms<D: HtmlQuery>(
    document: &D,
    page_url: &str,
    path: &str,
    is_root: bool,
    catalog: &FormCatalog,
    meta: &MetaInfo,
) -> Result<Vec<FormRecord>, ExtractError> {
    let mut forms = Vec::new();

    for rule in catalog.rules_for(path, is_root) {
        tracing::debug!("Checking for {} forms at {}", rule.form_type, page_url);

        for selector in &rule.selectors {
            let form = match document.select_one(selector) {
                Ok(Some(form)) => form,
                Ok(None) => continue,
                Err(e) => {
                    tracing::warn!("Skipping selector for {}: {}", rule.form_type, e);
                    continue;
                }
            };

            tracing::info!(
                "Found {} form using selector: {}",
                rule.form_type,
                selector
            );

            let fields = extract_fields(&form)?;
            if fields.is_empty() {
                tracing::debug!("Discarding {} on {}: no visible fields", selector, page_url);
                continue;
            }

            let form_id = derive_form_id(form.attr("id"), selector);
            tracing::info!(
                "Added form data for {} with {} fields",
                form_id,
                fields.len()
            );

            forms.push(FormRecord {
                url: page_url.to_string(),
                form_id,
                form_selector: selector.clone(),
                form_type: rule.form_type.clone(),
                fields,
                meta_info: meta.clone(),
            });
        }
    }

    Ok(forms)
}

/// Collects the visible fields of a form element
pub fn extract_fields<N: NodeRef>(form: &N) -> Result<Vec<FieldRecord>, ExtractError> {
    let mut fields = Vec::new();

    for field in form.find_all(FIELD_TAGS)? {
        let tag = field.tag_name().to_string();
        let field_type = if tag == "input" {
            field.attr("type").unwrap_or("text").trim().to_lowercase()
        } else {
            tag.clone()
        };

        if EXCLUDED_TYPES.contains(&field_type.as_str()) {
            continue;
        }

        let name = field.attr("name").unwrap_or("");
        fields.push(FieldRecord {
            selector: format!("{}[name='{}']", tag, name),
            field_type,
            required: field.has_attr("required") || field.has_attr("data-required"),
        });
    }

    Ok(fields)
}

/// Uses the element id when present, otherwise a name derived from the selector
///
/// The fallback removes every occurrence of `form` from the selector and trims
/// `.` and `#` from both ends: `form.contact-form` becomes `contact-`.
pub fn derive_form_id(id: Option<&str>, selector: &str) -> String {
    match id {
        Some(id) if !id.is_empty() => id.to_string(),
        _ => selector
            .replace("form", "")
            .trim_matches(|c| c == '.' || c == '#')
            .to_string(),
    }
}
