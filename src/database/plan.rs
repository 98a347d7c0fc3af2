//! Statement plans for live execution
//!
//! Live writes differ from the `.sql` export in three ways: only the first
//! 100 rows of each table are inserted, MySQL tables are created with
//! `ENGINE=InnoDB`, and SQL Server gets a `sysobjects` existence guard,
//! bracket quoting and one `INSERT` per row.

use serde::Serialize;

use crate::dialect::Dialect;
use crate::export::{ExportMode, SQLExporter};
use crate::models::{Schema, Table};

/// One statement and the number of rows it inserts
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlannedStatement {
    pub sql: String,
    pub rows: usize,
}

impl PlannedStatement {
    fn ddl(sql: String) -> Self {
        Self { sql, rows: 0 }
    }
}

/// Statements for one table, run in order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TablePlan {
    pub table: String,
    pub statements: Vec<PlannedStatement>,
}

/// Ordered statements for every table of a schema
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionPlan {
    pub dialect: Dialect,
    pub tables: Vec<TablePlan>,
}

impl ExecutionPlan {
    /// Plan with the live row cap
    pub fn build(schema: &Schema, dialect: Dialect) -> Self {
        Self::with_mode(schema, dialect, ExportMode::Live)
    }

    pub fn with_mode(schema: &Schema, dialect: Dialect, mode: ExportMode) -> Self {
        let exporter = SQLExporter::new(dialect).with_mode(mode);
        let tables = schema
            .tables
            .iter()
            .map(|table| TablePlan {
                table: table.name.clone(),
                statements: match dialect {
                    Dialect::MsSql => mssql_statements(&exporter, table),
                    Dialect::MySql => mysql_statements(&exporter, table),
                    Dialect::PostgreSql | Dialect::Sqlite => {
                        batched_statements(&exporter, table, exporter.create_table_statement(table))
                    }
                },
            })
            .collect();
        Self { dialect, tables }
    }

    pub fn statement_count(&self) -> usize {
        self.tables.iter().map(|t| t.statements.len()).sum()
    }

    /// All statements in execution order
    pub fn statements(&self) -> impl Iterator<Item = &str> {
        self.tables
            .iter()
            .flat_map(|t| t.statements.iter().map(|s| s.sql.as_str()))
    }
}

fn batched_statements(exporter: &SQLExporter, table: &Table, create: String) -> Vec<PlannedStatement> {
    let mut statements = vec![PlannedStatement::ddl(create)];
    if let Some(insert) = exporter.insert_statement(table) {
        statements.push(PlannedStatement {
            sql: insert,
            rows: table.rows.len().min(exporter.mode().row_limit()),
        });
    }
    statements
}

fn mysql_statements(exporter: &SQLExporter, table: &Table) -> Vec<PlannedStatement> {
    let create = exporter.create_table_statement(table);
    let create = match create.strip_suffix(';') {
        Some(body) => format!("{} ENGINE=InnoDB;", body),
        None => create,
    };
    batched_statements(exporter, table, create)
}

/// `[name]` with `]` doubled
fn bracket_quote(name: &str) -> String {
    format!("[{}]", name.replace(']', "]]"))
}

fn mssql_statements(exporter: &SQLExporter, table: &Table) -> Vec<PlannedStatement> {
    let dialect = exporter.dialect();
    let quoted_table = bracket_quote(&table.name);
    let column_defs = table
        .columns
        .iter()
        .map(|c| format!("{} {}", bracket_quote(&c.name), dialect.map_type(c.column_type)))
        .collect::<Vec<_>>()
        .join(", ");

    let mut statements = vec![PlannedStatement::ddl(format!(
        "IF NOT EXISTS (SELECT * FROM sysobjects WHERE name='{}' AND xtype='U') CREATE TABLE {} ({});",
        table.name.replace('\'', "''"),
        quoted_table,
        column_defs
    ))];

    let column_list = table
        .columns
        .iter()
        .map(|c| bracket_quote(&c.name))
        .collect::<Vec<_>>()
        .join(", ");

    for tuple in exporter.value_tuples(table, exporter.mode().row_limit()) {
        statements.push(PlannedStatement {
            sql: format!("INSERT INTO {} ({}) VALUES {};", quoted_table, column_list, tuple),
            rows: 1,
        });
    }
    statements
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inference::infer_schema;
    use serde_json::json;

    fn items() -> Schema {
        infer_schema(&json!([{"id": 1, "name": "Ann"}, {"id": 2, "name": "Bo"}]))
    }

    #[test]
    fn test_postgres_plan() {
        let plan = ExecutionPlan::build(&items(), Dialect::PostgreSql);
        let statements: Vec<&str> = plan.statements().collect();
        assert_eq!(
            statements,
            vec![
                "CREATE TABLE IF NOT EXISTS \"items\" (\"id\" INTEGER, \"name\" VARCHAR(50));",
                "INSERT INTO \"items\" (\"id\", \"name\") VALUES (1, 'Ann'), (2, 'Bo');",
            ]
        );
        assert_eq!(plan.tables[0].statements[1].rows, 2);
    }

    #[test]
    fn test_mysql_plan_uses_innodb() {
        let plan = ExecutionPlan::build(&items(), Dialect::MySql);
        assert_eq!(
            plan.tables[0].statements[0].sql,
            "CREATE TABLE IF NOT EXISTS `items` (`id` INT, `name` VARCHAR(50)) ENGINE=InnoDB;"
        );
        assert_eq!(plan.statement_count(), 2);
    }

    #[test]
    fn test_mssql_plan() {
        let plan = ExecutionPlan::build(&items(), Dialect::MsSql);
        let statements: Vec<&str> = plan.statements().collect();
        assert_eq!(
            statements,
            vec![
                "IF NOT EXISTS (SELECT * FROM sysobjects WHERE name='items' AND xtype='U') CREATE TABLE [items] ([id] INTEGER, [name] VARCHAR(50));",
                "INSERT INTO [items] ([id], [name]) VALUES (1, 'Ann');",
                "INSERT INTO [items] ([id], [name]) VALUES (2, 'Bo');",
            ]
        );
    }

    #[test]
    fn test_live_cap_is_100_rows() {
        let rows: Vec<_> = (0..250).map(|i| json!({"n": i})).collect();
        let schema = infer_schema(&json!(rows));

        let plan = ExecutionPlan::build(&schema, Dialect::Sqlite);
        assert_eq!(plan.tables[0].statements[1].rows, 100);

        let plan = ExecutionPlan::build(&schema, Dialect::MsSql);
        assert_eq!(plan.statement_count(), 1 + 100);
    }

    #[test]
    fn test_tables_without_rows_only_create() {
        let schema = infer_schema(&json!({"a": [1], "b": []}));
        let plan = ExecutionPlan::build(&schema, Dialect::MsSql);
        assert_eq!(plan.tables[1].table, "b");
        assert_eq!(plan.tables[1].statements.len(), 1);
    }

    #[test]
    fn test_mssql_rows_without_columns() {
        let schema = infer_schema(&json!([{"tags": ["a"]}, {"tags": []}]));
        let plan = ExecutionPlan::build(&schema, Dialect::MsSql);
        let statements: Vec<&str> = plan.tables[0].statements.iter().map(|s| s.sql.as_str()).collect();
        assert_eq!(
            statements,
            vec![
                "IF NOT EXISTS (SELECT * FROM sysobjects WHERE name='items' AND xtype='U') CREATE TABLE [items] ();",
                "INSERT INTO [items] () VALUES ();",
                "INSERT INTO [items] () VALUES ();",
            ]
        );
    }

    #[test]
    fn test_bracket_quote() {
        assert_eq!(bracket_quote("a]b"), "[a]]b]");
    }
}
