//! SQL exporter for generating CREATE TABLE and INSERT statements from an
//! inferred schema.
//!
//! # Security
//!
//! Identifiers are quoted per dialect with embedded quote characters
//! doubled. String literals only get their single quotes doubled, see
//! [`crate::dialect`]. Treat the output as display/export text.

use sqlparser::dialect::{
    Dialect as ParserDialect, MsSqlDialect, MySqlDialect, PostgreSqlDialect, SQLiteDialect,
};
use sqlparser::parser::Parser;
use tracing::info;

use crate::dialect::{Dialect, DialectError};
use crate::export::{ExportError, ExportMode, ExportResult};
use crate::models::{Schema, Table};

/// Rendered SQL text for a whole schema
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RenderedSql {
    /// One `CREATE TABLE IF NOT EXISTS` statement per table, newline separated
    pub create_statements: String,
    /// One batched `INSERT` per table with rows, newline separated
    pub insert_statements: String,
}

impl RenderedSql {
    /// Full script: DDL, a blank line, then DML
    pub fn script(&self) -> String {
        if self.insert_statements.is_empty() {
            return self.create_statements.clone();
        }
        format!("{}\n\n{}", self.create_statements, self.insert_statements)
    }
}

/// Exporter for SQL DDL/DML text.
#[derive(Debug, Clone, Copy)]
pub struct SQLExporter {
    dialect: Dialect,
    mode: ExportMode,
}

impl SQLExporter {
    /// Create an exporter for a dialect in file-export mode
    pub fn new(dialect: Dialect) -> Self {
        Self {
            dialect,
            mode: ExportMode::Export,
        }
    }

    /// Create an exporter from a dialect name such as `"postgres"` or `"mysql"`
    pub fn for_dialect(name: &str) -> Result<Self, DialectError> {
        Ok(Self::new(name.parse()?))
    }

    /// Set the row cap mode
    pub fn with_mode(mut self, mode: ExportMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    pub fn mode(&self) -> ExportMode {
        self.mode
    }

    /// `CREATE TABLE IF NOT EXISTS` statement for one table.
    ///
    /// # Example
    ///
    /// ```rust
    /// use json2sql::dialect::Dialect;
    /// use json2sql::export::SQLExporter;
    /// use json2sql::models::{AbstractType, Table};
    ///
    /// let mut table = Table::new("items");
    /// table.register_column("id", AbstractType::Integer);
    ///
    /// let sql = SQLExporter::new(Dialect::MySql).create_table_statement(&table);
    /// assert_eq!(sql, "CREATE TABLE IF NOT EXISTS `items` (`id` INT);");
    /// ```
    pub fn create_table_statement(&self, table: &Table) -> String {
        format!(
            "CREATE TABLE IF NOT EXISTS {} ({});",
            self.dialect.quote_identifier(&table.name),
            self.column_definitions(table)
        )
    }

    /// `"name" TYPE` pairs joined by `, `, in column order
    pub fn column_definitions(&self, table: &Table) -> String {
        table
            .columns
            .iter()
            .map(|c| {
                format!(
                    "{} {}",
                    self.dialect.quote_identifier(&c.name),
                    self.dialect.map_type(c.column_type)
                )
            })
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Quoted column list for an `INSERT`, in column order
    pub fn column_list(&self, table: &Table) -> String {
        table
            .columns
            .iter()
            .map(|c| self.dialect.quote_identifier(&c.name))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// One parenthesised tuple per row, values in column order.
    /// Missing values become `NULL`.
    pub fn value_tuples(&self, table: &Table, limit: usize) -> Vec<String> {
        table
            .rows
            .iter()
            .take(limit)
            .map(|row| {
                let values: Vec<String> = table
                    .columns
                    .iter()
                    .map(|c| self.dialect.format_literal(row.get(&c.name)))
                    .collect();
                format!("({})", values.join(", "))
            })
            .collect()
    }

    /// Batched `INSERT` for a table, capped by the export mode.
    ///
    /// `None` when the table has no rows. A table without columns still
    /// gets `INSERT INTO t () VALUES ()` tuples, one per row.
    pub fn insert_statement(&self, table: &Table) -> Option<String> {
        if table.rows.is_empty() {
            return None;
        }
        let tuples = self.value_tuples(table, self.mode.row_limit());
        if tuples.is_empty() {
            return None;
        }
        Some(format!(
            "INSERT INTO {} ({}) VALUES {};",
            self.dialect.quote_identifier(&table.name),
            self.column_list(table),
            tuples.join(", ")
        ))
    }

    /// Render every table of the schema in schema order
    pub fn render(&self, schema: &Schema) -> RenderedSql {
        let create: Vec<String> = schema
            .tables
            .iter()
            .map(|t| self.create_table_statement(t))
            .collect();
        let insert: Vec<String> = schema
            .tables
            .iter()
            .filter_map(|t| self.insert_statement(t))
            .collect();

        info!(
            "Rendered {} CREATE and {} INSERT statements for {}",
            create.len(),
            insert.len(),
            self.dialect
        );

        RenderedSql {
            create_statements: create.join("\n"),
            insert_statements: insert.join("\n"),
        }
    }

    /// DDL and DML as one script, separated by a blank line
    pub fn export_script(&self, schema: &Schema) -> String {
        self.render(schema).script()
    }

    /// Export a schema as a single `.sql` script
    pub fn export(&self, schema: &Schema) -> Result<ExportResult, ExportError> {
        Ok(ExportResult {
            content: self.export_script(schema),
            format: "sql".to_string(),
        })
    }

    /// Parse SQL text with this exporter's dialect and return the number of
    /// statements found.
    pub fn validate(&self, sql: &str) -> Result<usize, ExportError> {
        let dialect = parser_dialect(self.dialect);
        let statements = Parser::parse_sql(dialect.as_ref(), sql)
            .map_err(|e| ExportError::ValidationError(format!("SQL validation failed: {}", e)))?;
        Ok(statements.len())
    }
}

/// Render a schema for a dialect given by name.
///
/// An unknown dialect fails before any text is produced.
pub fn render(schema: &Schema, dialect: &str) -> Result<RenderedSql, DialectError> {
    Ok(SQLExporter::for_dialect(dialect)?.render(schema))
}

fn parser_dialect(dialect: Dialect) -> Box<dyn ParserDialect> {
    match dialect {
        Dialect::PostgreSql => Box::new(PostgreSqlDialect {}),
        Dialect::MySql => Box::new(MySqlDialect {}),
        Dialect::MsSql => Box::new(MsSqlDialect {}),
        Dialect::Sqlite => Box::new(SQLiteDialect {}),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inference::infer_schema;
    use serde_json::json;

    fn items_schema() -> Schema {
        infer_schema(&json!([{"id": 1, "name": "Ann"}, {"id": 2, "name": "Bo"}]))
    }

    #[test]
    fn test_mysql_items() {
        let rendered = SQLExporter::new(Dialect::MySql).render(&items_schema());
        assert_eq!(
            rendered.create_statements,
            "CREATE TABLE IF NOT EXISTS `items` (`id` INT, `name` VARCHAR(50));"
        );
        assert_eq!(
            rendered.insert_statements,
            "INSERT INTO `items` (`id`, `name`) VALUES (1, 'Ann'), (2, 'Bo');"
        );
    }

    #[test]
    fn test_postgres_items() {
        let rendered = SQLExporter::new(Dialect::PostgreSql).render(&items_schema());
        assert_eq!(
            rendered.create_statements,
            "CREATE TABLE IF NOT EXISTS \"items\" (\"id\" INTEGER, \"name\" VARCHAR(50));"
        );
    }

    #[test]
    fn test_missing_values_render_as_null() {
        let schema = infer_schema(&json!([{"a": 1}, {"b": true}]));
        let rendered = SQLExporter::new(Dialect::Sqlite).render(&schema);
        assert_eq!(
            rendered.insert_statements,
            "INSERT INTO \"items\" (\"a\", \"b\") VALUES (1, NULL), (NULL, TRUE);"
        );
    }

    #[test]
    fn test_no_insert_for_empty_tables() {
        let schema = infer_schema(&json!({"a": [], "b": [1]}));
        let rendered = SQLExporter::new(Dialect::PostgreSql).render(&schema);
        assert_eq!(rendered.create_statements.lines().count(), 2);
        assert_eq!(rendered.insert_statements.lines().count(), 1);
        assert!(rendered.insert_statements.starts_with("INSERT INTO \"b\""));
    }

    #[test]
    fn test_rows_without_columns_are_inserted() {
        let schema = infer_schema(&json!([{"tags": ["a"]}]));
        let rendered = SQLExporter::new(Dialect::MySql).render(&schema);
        assert_eq!(
            rendered.insert_statements,
            "INSERT INTO `items` () VALUES ();\nINSERT INTO `items_tags` (`value`) VALUES ('a');"
        );
    }

    #[test]
    fn test_row_cap() {
        let rows: Vec<_> = (0..150).map(|i| json!({"n": i})).collect();
        let schema = infer_schema(&json!(rows));

        let live = SQLExporter::new(Dialect::PostgreSql).with_mode(ExportMode::Live);
        let insert = live.insert_statement(&schema.tables[0]).unwrap();
        assert_eq!(insert.matches('(').count(), 1 + 100);

        let export = SQLExporter::new(Dialect::PostgreSql);
        let insert = export.insert_statement(&schema.tables[0]).unwrap();
        assert_eq!(insert.matches('(').count(), 1 + 150);
    }

    #[test]
    fn test_render_is_idempotent() {
        let schema = infer_schema(&json!({"users": [{"id": 1, "tags": ["a", "b"]}], "page": 2}));
        for dialect in Dialect::ALL {
            let exporter = SQLExporter::new(dialect);
            assert_eq!(exporter.render(&schema), exporter.render(&schema));
        }
    }

    #[test]
    fn test_unknown_dialect_produces_nothing() {
        let err = render(&items_schema(), "oracle").unwrap_err();
        assert_eq!(err, DialectError::Unsupported("oracle".to_string()));
    }

    #[test]
    fn test_script_and_export() {
        let exporter = SQLExporter::new(Dialect::MySql);
        let result = exporter.export(&items_schema()).unwrap();
        assert_eq!(result.format, "sql");
        assert!(result.content.contains(";\n\nINSERT INTO"));

        let empty = Schema::new();
        assert_eq!(exporter.render(&empty).script(), "");
    }

    #[test]
    fn test_validate_rendered_sql() {
        let schema = infer_schema(&json!([
            {"id": 1, "price": 9.99, "ok": true, "at": "2024-01-15T10:00:00Z", "note": "it's"}
        ]));
        for dialect in [Dialect::PostgreSql, Dialect::MySql] {
            let exporter = SQLExporter::new(dialect);
            let script = exporter.render(&schema).script();
            assert_eq!(exporter.validate(&script).unwrap(), 2);
        }

        let exporter = SQLExporter::new(Dialect::PostgreSql);
        assert!(exporter.validate("CREATE TABLE (").is_err());
    }
}
