//! CSV exporter: one file per table

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::info;

use crate::dialect::format_number;
use crate::export::{ExportError, ExportResult};
use crate::models::{Schema, Table};

/// Exporter for CSV text.
pub struct CsvExporter;

impl CsvExporter {
    /// Header row of column names, then one line per row in column order.
    ///
    /// # Example
    ///
    /// ```rust
    /// use json2sql::export::CsvExporter;
    /// use json2sql::inference::infer_schema;
    /// use serde_json::json;
    ///
    /// let schema = infer_schema(&json!([{"id": 1, "note": "a,b"}]));
    /// let csv = CsvExporter::export_table(&schema.tables[0]);
    /// assert_eq!(csv, "id,note\n1,\"a,b\"");
    /// ```
    pub fn export_table(table: &Table) -> String {
        let mut lines = Vec::with_capacity(table.rows.len() + 1);
        lines.push(
            table
                .columns
                .iter()
                .map(|c| escape_field(&c.name))
                .collect::<Vec<_>>()
                .join(","),
        );
        for row in &table.rows {
            lines.push(
                table
                    .columns
                    .iter()
                    .map(|c| field_text(row.get(&c.name)))
                    .collect::<Vec<_>>()
                    .join(","),
            );
        }
        lines.join("\n")
    }

    /// Export one table wrapped in an [`ExportResult`]
    pub fn export(table: &Table) -> ExportResult {
        ExportResult {
            content: Self::export_table(table),
            format: "csv".to_string(),
        }
    }

    /// Write `<table>.csv` for every table into `dir`, creating it if needed.
    /// Returns the written paths in schema order.
    pub fn export_schema_to_dir(schema: &Schema, dir: &Path) -> Result<Vec<PathBuf>, ExportError> {
        fs::create_dir_all(dir)?;
        let mut written = Vec::with_capacity(schema.tables.len());
        for table in &schema.tables {
            let path = dir.join(format!("{}.csv", table.name));
            fs::write(&path, Self::export_table(table))?;
            written.push(path);
        }
        info!("Wrote {} CSV files to {}", written.len(), dir.display());
        Ok(written)
    }
}

fn field_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => escape_field(s),
        Some(Value::Number(n)) => format_number(n),
        Some(other) => escape_field(&other.to_string()),
    }
}

/// Double embedded quotes, then wrap the field only when it contains a
/// comma or a newline
fn escape_field(text: &str) -> String {
    let escaped = text.replace('"', "\"\"");
    if escaped.contains([',', '\n']) {
        format!("\"{}\"", escaped)
    } else {
        escaped
    }
}
