//! Output formatting for CLI

use serde_json::Value;

use crate::database::ExecutionReport;
use crate::models::{Schema, SchemaSummary, Table};

/// Rows shown per table in a preview
pub const PREVIEW_ROWS: usize = 500;
/// Characters shown per cell before truncation
pub const PREVIEW_CELL_WIDTH: usize = 120;

/// Headline counts, one per line
pub fn format_summary(summary: &SchemaSummary) -> String {
    format!(
        "Tables: {}\nColumns: {}\nRows: {}\nRelationships: {}\n",
        summary.tables, summary.columns, summary.rows, summary.relationships
    )
}

/// One cell of a preview. `NULL` for absent/null, long text truncated.
pub fn format_cell(value: Option<&Value>) -> String {
    let text = match value {
        None | Some(Value::Null) => return "NULL".to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    };
    if text.chars().count() > PREVIEW_CELL_WIDTH {
        let head: String = text.chars().take(PREVIEW_CELL_WIDTH).collect();
        format!("{}...", head)
    } else {
        text
    }
}

/// Header and the first `max_rows` rows of a table, `|` separated
pub fn format_table_preview(table: &Table, max_rows: usize) -> String {
    let mut output = format!("\n{} ({} rows)\n", table.name, table.row_count());

    let header: Vec<String> = table
        .columns
        .iter()
        .map(|c| format!("{} ({})", c.name, c.column_type))
        .collect();
    output.push_str(&header.join(" | "));
    output.push('\n');

    for row in table.rows.iter().take(max_rows) {
        let cells: Vec<String> = table
            .columns
            .iter()
            .map(|c| format_cell(row.get(&c.name)))
            .collect();
        output.push_str(&cells.join(" | "));
        output.push('\n');
    }

    if table.row_count() > max_rows {
        output.push_str(&format!("... {} more rows\n", table.row_count() - max_rows));
    }
    output
}

/// Summary followed by a preview of every table
pub fn format_schema(schema: &Schema, preview: bool) -> String {
    let mut output = format_summary(&schema.summary());
    for table in &schema.tables {
        if preview {
            output.push_str(&format_table_preview(table, PREVIEW_ROWS));
        } else {
            let columns: Vec<String> = table
                .columns
                .iter()
                .map(|c| format!("{}:{}", c.name, c.column_type))
                .collect();
            output.push_str(&format!(
                "\n{} ({} rows): {}",
                table.name,
                table.row_count(),
                columns.join(", ")
            ));
        }
    }
    output.push('\n');
    output
}

/// Per-table lines for a live write
pub fn format_report(report: &ExecutionReport) -> String {
    let mut output = String::new();
    for table in &report.tables {
        match &table.error {
            None => output.push_str(&format!(
                "  ok      {} ({} statements, {} rows)\n",
                table.table, table.statements_executed, table.rows_inserted
            )),
            Some(err) => output.push_str(&format!("  failed  {}: {}\n", table.table, err)),
        }
    }
    output
}
