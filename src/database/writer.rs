//! Schema writer: runs an [`ExecutionPlan`] and reports per-table outcomes

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::error::ExecutionError;
use super::executor::SqlExecutor;
use super::plan::ExecutionPlan;
use crate::dialect::Dialect;
use crate::export::ExportMode;
use crate::models::{AbstractType, Column, Row, Schema, Table};

/// What happened to one table during a live write
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableOutcome {
    pub table: String,
    pub statements_executed: usize,
    pub rows_inserted: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl TableOutcome {
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// Per-table result of writing a schema. Partial success is kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionReport {
    pub dialect: Dialect,
    pub tables: Vec<TableOutcome>,
}

impl ExecutionReport {
    /// True when no table failed
    pub fn is_success(&self) -> bool {
        self.tables.iter().all(TableOutcome::is_success)
    }

    pub fn failed_tables(&self) -> impl Iterator<Item = &TableOutcome> {
        self.tables.iter().filter(|t| !t.is_success())
    }

    pub fn rows_inserted(&self) -> usize {
        self.tables.iter().map(|t| t.rows_inserted).sum()
    }
}

/// Rows destined for one table, with an optional explicit column list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertOperation {
    pub table: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub columns: Option<Vec<Column>>,
    #[serde(default)]
    pub rows: Vec<Row>,
}

impl InsertOperation {
    /// Without explicit columns, the keys of the first row are used, all typed TEXT
    pub fn into_table(self) -> Table {
        let columns = match self.columns {
            Some(columns) => columns,
            None => self
                .rows
                .first()
                .map(|row| {
                    row.keys()
                        .map(|k| Column::new(k.as_str(), AbstractType::Text))
                        .collect()
                })
                .unwrap_or_default(),
        };
        Table {
            name: self.table,
            columns,
            rows: self.rows,
        }
    }
}

/// Build a schema from insert operations, one table per operation
pub fn operations_to_schema(operations: Vec<InsertOperation>) -> Schema {
    let mut schema = Schema::new();
    schema.tables = operations.into_iter().map(InsertOperation::into_table).collect();
    schema
}

/// Writes schemas through a [`SqlExecutor`]
pub struct SchemaWriter<'e> {
    executor: &'e dyn SqlExecutor,
    mode: ExportMode,
}

impl<'e> SchemaWriter<'e> {
    pub fn new(executor: &'e dyn SqlExecutor) -> Self {
        Self {
            executor,
            mode: ExportMode::Live,
        }
    }

    pub fn with_mode(mut self, mode: ExportMode) -> Self {
        self.mode = mode;
        self
    }

    /// Create every table and insert its first rows.
    ///
    /// A connection failure aborts before any statement runs. After that, the
    /// first failing statement stops its own table only; later tables still
    /// run and the report keeps what succeeded.
    pub async fn write(&self, schema: &Schema) -> Result<ExecutionReport, ExecutionError> {
        self.executor.test_connection().await?;

        let dialect = self.executor.dialect();
        let plan = ExecutionPlan::with_mode(schema, dialect, self.mode);
        let mut outcomes = Vec::with_capacity(plan.tables.len());

        for table_plan in &plan.tables {
            let mut outcome = TableOutcome {
                table: table_plan.table.clone(),
                statements_executed: 0,
                rows_inserted: 0,
                error: None,
            };

            for statement in &table_plan.statements {
                if let Err(e) = self.executor.execute(&statement.sql).await {
                    let err = ExecutionError::Statement {
                        table: table_plan.table.clone(),
                        message: e.to_string(),
                    };
                    warn!("{}", err);
                    outcome.error = Some(err.to_string());
                    break;
                }
                outcome.statements_executed += 1;
                outcome.rows_inserted += statement.rows;
            }

            outcomes.push(outcome);
        }

        let report = ExecutionReport {
            dialect,
            tables: outcomes,
        };
        info!(
            "Wrote {} tables to {} ({} rows, {} failed)",
            report.tables.len(),
            dialect,
            report.rows_inserted(),
            report.failed_tables().count()
        );
        Ok(report)
    }

    /// Create the target tables if needed, then insert the given rows
    pub async fn insert_rows(
        &self,
        operations: Vec<InsertOperation>,
    ) -> Result<ExecutionReport, ExecutionError> {
        self.write(&operations_to_schema(operations)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inference::infer_schema;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Mutex;

    struct Recording {
        dialect: Dialect,
        connect_fails: bool,
        fail_on: Option<&'static str>,
        executed: Mutex<Vec<String>>,
    }

    impl Recording {
        fn new(dialect: Dialect) -> Self {
            Self {
                dialect,
                connect_fails: false,
                fail_on: None,
                executed: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl SqlExecutor for Recording {
        fn dialect(&self) -> Dialect {
            self.dialect
        }

        async fn test_connection(&self) -> Result<(), ExecutionError> {
            if self.connect_fails {
                return Err(ExecutionError::Connection("refused".to_string()));
            }
            Ok(())
        }

        async fn execute(&self, sql: &str) -> Result<(), ExecutionError> {
            if self.fail_on.is_some_and(|needle| sql.contains(needle)) {
                return Err(ExecutionError::Query("boom".to_string()));
            }
            self.executed.lock().unwrap().push(sql.to_string());
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_write_all_tables() {
        let executor = Recording::new(Dialect::Sqlite);
        let schema = infer_schema(&json!({"users": [{"id": 1, "tags": ["a", "b"]}]}));

        let report = SchemaWriter::new(&executor).write(&schema).await.unwrap();
        assert!(report.is_success());
        assert_eq!(report.rows_inserted(), 3);
        assert_eq!(executor.executed.lock().unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_failed_table_keeps_partial_success() {
        let mut executor = Recording::new(Dialect::PostgreSql);
        executor.fail_on = Some("INSERT INTO \"users_tags\"");
        let schema = infer_schema(&json!({"users": [{"id": 1, "tags": ["a"]}], "page": 1}));

        let report = SchemaWriter::new(&executor).write(&schema).await.unwrap();
        assert!(!report.is_success());

        let names: Vec<&str> = report.tables.iter().map(|t| t.table.as_str()).collect();
        assert_eq!(names, vec!["users", "users_tags", "metadata"]);

        assert!(report.tables[0].is_success());
        assert_eq!(report.tables[1].statements_executed, 1);
        assert_eq!(report.tables[1].rows_inserted, 0);
        assert!(report.tables[1].error.as_deref().unwrap().contains("users_tags"));
        assert!(report.tables[2].is_success());
        assert_eq!(report.tables[2].rows_inserted, 1);
    }

    #[tokio::test]
    async fn test_connection_failure_is_hard_error() {
        let mut executor = Recording::new(Dialect::MySql);
        executor.connect_fails = true;

        let result = SchemaWriter::new(&executor).write(&Schema::new()).await;
        assert_eq!(result, Err(ExecutionError::Connection("refused".to_string())));
    }

    #[tokio::test]
    async fn test_insert_rows_defaults_columns_to_text() {
        let executor = Recording::new(Dialect::PostgreSql);
        let operations: Vec<InsertOperation> = serde_json::from_value(json!([
            {"table": "events", "rows": [{"kind": "click", "at": 5}, {"kind": "view"}]}
        ]))
        .unwrap();

        let report = SchemaWriter::new(&executor).insert_rows(operations).await.unwrap();
        assert_eq!(report.rows_inserted(), 2);

        let executed = executor.executed.lock().unwrap();
        assert_eq!(
            executed[0],
            "CREATE TABLE IF NOT EXISTS \"events\" (\"kind\" TEXT, \"at\" TEXT);"
        );
        assert_eq!(
            executed[1],
            "INSERT INTO \"events\" (\"kind\", \"at\") VALUES ('click', 5), ('view', NULL);"
        );
    }

    #[test]
    fn test_explicit_columns_are_kept() {
        let op: InsertOperation = serde_json::from_value(json!({
            "table": "t",
            "columns": [{"name": "n", "type": "INTEGER"}],
            "rows": [{"n": 1, "extra": true}]
        }))
        .unwrap();
        let table = op.into_table();
        assert_eq!(table.column_names(), vec!["n"]);
        assert_eq!(table.columns[0].column_type, AbstractType::Integer);
    }
}
