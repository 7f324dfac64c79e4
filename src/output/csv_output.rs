//! CSV report output

use crate::output::report::FormReport;
use crate::output::traits::{OutputResult, RenderOutcome, RowSink};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Row sink backed by a `csv::Writer`
pub struct CsvSink<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> CsvSink<W> {
    pub fn new(inner: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(inner),
        }
    }

    /// Flushes and returns the underlying writer
    pub fn into_inner(self) -> OutputResult<W> {
        self.writer
            .into_inner()
            .map_err(|e| std::io::Error::new(e.error().kind(), e.error().to_string()).into())
    }
}

impl<W: Write> RowSink for CsvSink<W> {
    fn write_row(&mut self, fields: &[String]) -> OutputResult<()> {
        self.writer.write_record(fields)?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        self.writer.flush()?;
        Ok(())
    }
}

/// Writes the report as a UTF-8 CSV file
///
/// When the report is empty no file is created.
///
/// # Arguments
///
/// * `report` - The forms collected during the crawl
/// * `output_path` - Where the CSV file should be written
pub fn write_report_csv(report: &FormReport, output_path: &Path) -> OutputResult<RenderOutcome> {
    if report.is_empty() {
        tracing::info!("No forms found, skipping report");
        return Ok(RenderOutcome::NoForms);
    }

    let mut sink = CsvSink::new(File::create(output_path)?);
    let outcome = report.render(&mut sink)?;

    tracing::info!(
        "Saved {} forms to {}",
        report.len(),
        output_path.display()
    );

    Ok(outcome)
}
