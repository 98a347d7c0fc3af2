//! Export functionality
//!
//! Provides exporters for an inferred schema:
//! - SQL (`CREATE TABLE` + batched `INSERT` per dialect)
//! - CSV (one file per table)

pub mod csv;
pub mod sql;

use crate::dialect::DialectError;

/// Rows written per table in an `.sql` export
pub const EXPORT_ROW_LIMIT: usize = 5000;
/// Rows written per table when executing against a live database
pub const LIVE_ROW_LIMIT: usize = 100;

/// Result of an export operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportResult {
    /// Exported content
    pub content: String,
    /// Format identifier
    pub format: String,
}

/// How many rows of each table an `INSERT` statement carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportMode {
    /// File export, first 5000 rows
    #[default]
    Export,
    /// Live execution, first 100 rows
    Live,
    /// Custom cap
    Limit(usize),
}

impl ExportMode {
    pub fn row_limit(&self) -> usize {
        match self {
            ExportMode::Export => EXPORT_ROW_LIMIT,
            ExportMode::Live => LIVE_ROW_LIMIT,
            ExportMode::Limit(n) => *n,
        }
    }
}

/// Error during export
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error(transparent)]
    Dialect(#[from] DialectError),
    #[error("Validation error: {0}")]
    ValidationError(String),
    #[error("IO error: {0}")]
    IoError(String),
}

impl From<std::io::Error> for ExportError {
    fn from(err: std::io::Error) -> Self {
        ExportError::IoError(err.to_string())
    }
}

pub use csv::CsvExporter;
pub use sql::{RenderedSql, SQLExporter, render};
