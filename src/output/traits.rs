//! Output handler traits and types
//!
//! This module defines the row-writer interface the report renders through
//! and the errors output can raise.

use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to write CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// What rendering a report did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderOutcome {
    /// Header plus this many data rows were written
    Written(usize),
    /// There was nothing to write; the sink was not touched
    NoForms,
}

/// A destination for report rows
pub trait RowSink {
    /// Appends one row of string fields
    fn write_row(&mut self, fields: &[String]) -> OutputResult<()>;

    /// Flushes buffered rows
    fn finish(&mut self) -> OutputResult<()> {
        Ok(())
    }
}

/// In-memory sink, mostly useful for inspecting rendered rows
impl RowSink for Vec<Vec<String>> {
    fn write_row(&mut self, fields: &[String]) -> OutputResult<()> {
        self.push(fields.to_vec());
        Ok(())
    }
}
