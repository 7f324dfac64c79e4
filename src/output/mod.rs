//! Output module for the form report
//!
//! This module handles:
//! - Accumulating discovered forms in discovery order
//! - Rendering them as rows through a `RowSink`
//! - Writing the CSV report file
//! - Summarizing crawl statistics

mod csv_output;
mod report;
pub mod stats;
mod traits;

pub use csv_output::{write_report_csv, CsvSink};
pub use report::{
    form_row, FormReport, META_TRUNCATE_CHARS, REPORT_HEADERS, SUCCESS_MESSAGE_SELECTOR,
};
pub use stats::{print_statistics, CrawlStatistics};
pub use traits::{OutputError, OutputResult, RenderOutcome, RowSink};
