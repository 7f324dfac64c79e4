//! Report sink for discovered forms
//!
//! Forms are kept in the order they were first found. Rendering produces one
//! row per form behind a fixed header row.

use crate::extract::FormRecord;
use crate::output::traits::{OutputResult, RenderOutcome, RowSink};

/// Column headers of the report, in order
pub const REPORT_HEADERS: [&str; 11] = [
    "Form ID",
    "URL",
    "Form Selector",
    "Success Message Selector",
    "Fields",
    "Form Type",
    "Has Meta Description",
    "Meta Description",
    "Has Meta Keywords",
    "Meta Keywords",
    "SEO Issues",
];

/// Placeholder selector written for every form
pub const SUCCESS_MESSAGE_SELECTOR: &str = ".success-message";

/// Meta description and keywords are cut to this many characters
pub const META_TRUNCATE_CHARS: usize = 200;

/// Append-only, structurally deduplicated collection of forms
#[derive(Debug, Clone, Default)]
pub struct FormReport {
    forms: Vec<FormRecord>,
}

impl FormReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a form unless an equal record is already present
    ///
    /// Returns true if the form was added.
    pub fn push(&mut self, form: FormRecord) -> bool {
        if self.forms.contains(&form) {
            tracing::debug!("Form {} on {} already recorded", form.form_id, form.url);
            return false;
        }
        self.forms.push(form);
        true
    }

    /// Forms in discovery order
    pub fn forms(&self) -> &[FormRecord] {
        &self.forms
    }

    pub fn len(&self) -> usize {
        self.forms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forms.is_empty()
    }

    /// Writes the header and one row per form into `sink`
    ///
    /// An empty report writes nothing and returns `RenderOutcome::NoForms`.
    pub fn render<S: RowSink + ?Sized>(&self, sink: &mut S) -> OutputResult<RenderOutcome> {
        if self.forms.is_empty() {
            return Ok(RenderOutcome::NoForms);
        }

        let header: Vec<String> = REPORT_HEADERS.iter().map(|h| h.to_string()).collect();
        sink.write_row(&header)?;

        for form in &self.forms {
            sink.write_row(&form_row(form))?;
        }
        sink.finish()?;

        Ok(RenderOutcome::Written(self.forms.len()))
    }
}

/// Renders a single form as a report row
pub fn form_row(form: &FormRecord) -> Vec<String> {
    let fields = form
        .fields
        .iter()
        .map(|field| field.to_string())
        .collect::<Vec<_>>()
        .join(";");
    let meta = &form.meta_info;

    vec![
        form.form_id.clone(),
        form.url.clone(),
        form.form_selector.clone(),
        SUCCESS_MESSAGE_SELECTOR.to_string(),
        fields,
        form.form_type.clone(),
        bool_cell(meta.has_meta_description),
        truncate_chars(&meta.meta_description, META_TRUNCATE_CHARS),
        bool_cell(meta.has_meta_keywords),
        truncate_chars(&meta.meta_keywords, META_TRUNCATE_CHARS),
        meta.seo_issues.join("; "),
    ]
}

/// Renders a flag as `True` or `False`
fn bool_cell(value: bool) -> String {
    if value {
        "True".to_string()
    } else {
        "False".to_string()
    }
}

/// Keeps at most `max` characters of `value`
fn truncate_chars(value: &str, max: usize) -> String {
    value.chars().take(max).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::{FieldRecord, MetaInfo};

    fn form(url: &str, selector: &str) -> FormRecord {
        FormRecord {
            url: url.to_string(),
            form_id: "contact-".to_string(),
            form_selector: selector.to_string(),
            form_type: "Contact Form".to_string(),
            fields: vec![
                FieldRecord {
                    selector: "input[name='email']".to_string(),
                    field_type: "email".to_string(),
                    required: true,
                },
                FieldRecord {
                    selector: "textarea[name='message']".to_string(),
                    field_type: "textarea".to_string(),
                    required: false,
                },
            ],
            meta_info: MetaInfo {
                has_meta_description: true,
                meta_description: "Contact us".to_string(),
                has_meta_keywords: false,
                meta_keywords: String::new(),
                seo_issues: vec!["Missing meta keywords".to_string()],
            },
        }
    }

    #[test]
    fn test_structural_dedup() {
        let mut report = FormReport::new();
        assert!(report.push(form("http://site.test/contact-us", "form.contact-form")));
        assert!(!report.push(form("http://site.test/contact-us", "form.contact-form")));
        assert!(report.push(form("http://site.test/contact-us/sales", "form.contact-form")));
        assert_eq!(report.len(), 2);
    }

    #[test]
    fn test_render_rows() {
        let mut report = FormReport::new();
        report.push(form("http://site.test/contact-us", "form.contact-form"));

        let mut rows: Vec<Vec<String>> = Vec::new();
        let outcome = report.render(&mut rows).unwrap();

        assert_eq!(outcome, RenderOutcome::Written(1));
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].len(), 11);
        assert_eq!(rows[0][0], "Form ID");
        assert_eq!(
            rows[1],
            vec![
                "contact-",
                "http://site.test/contact-us",
                "form.contact-form",
                ".success-message",
                "input[name='email']|email|required;textarea[name='message']|textarea|optional",
                "Contact Form",
                "True",
                "Contact us",
                "False",
                "",
                "Missing meta keywords",
            ]
        );
    }

    #[test]
    fn test_render_empty_is_noop() {
        let report = FormReport::new();
        let mut rows: Vec<Vec<String>> = Vec::new();
        assert_eq!(report.render(&mut rows).unwrap(), RenderOutcome::NoForms);
        assert!(rows.is_empty());
    }

    #[test]
    fn test_meta_truncation() {
        let mut record = form("http://site.test/contact-us", "form.contact-form");
        record.meta_info.meta_description = "d".repeat(500);
        record.meta_info.meta_keywords = "é".repeat(300);

        let row = form_row(&record);
        assert_eq!(row[7].chars().count(), 200);
        assert_eq!(row[9].chars().count(), 200);
    }

    #[test]
    fn test_issues_joined() {
        let mut record = form("http://site.test/contact-us", "form.contact-form");
        record.meta_info.seo_issues = vec![
            "Empty meta description".to_string(),
            "Missing meta keywords".to_string(),
        ];
        assert_eq!(
            form_row(&record)[10],
            "Empty meta description; Missing meta keywords"
        );
    }
}
