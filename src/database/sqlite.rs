//! SQLite backend (sqlx)

use std::str::FromStr;

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tracing::debug;

use super::config::{ConnectionConfig, SQLITE_MEMORY};
use super::error::{ExecutionError, map_sqlx_error};
use super::executor::SqlExecutor;
use crate::dialect::Dialect;

/// How a SQLite file is opened
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SqliteAccess {
    /// Existing file only, no writes
    ReadOnly,
    /// Read-write, creating the file when missing
    ReadWriteCreate,
}

/// SQLite database file or in-memory database.
///
/// The pool holds a single connection so an in-memory database survives
/// between statements.
pub struct SqliteExecutor {
    pool: SqlitePool,
}

impl SqliteExecutor {
    /// Open read-write, creating the file when missing
    pub async fn connect(config: &ConnectionConfig) -> Result<Self, ExecutionError> {
        Self::open(config, SqliteAccess::ReadWriteCreate).await
    }

    pub async fn open(config: &ConnectionConfig, access: SqliteAccess) -> Result<Self, ExecutionError> {
        if config.dialect != Dialect::Sqlite {
            return Err(ExecutionError::Config(format!(
                "SQLite backend cannot open a {} connection",
                config.dialect
            )));
        }

        let path = config.database_name();
        let options = if path == SQLITE_MEMORY {
            SqliteConnectOptions::from_str("sqlite::memory:")
                .map_err(|e| ExecutionError::Config(e.to_string()))?
        } else {
            SqliteConnectOptions::new()
                .filename(path)
                .read_only(access == SqliteAccess::ReadOnly)
                .create_if_missing(access == SqliteAccess::ReadWriteCreate)
        };

        debug!(path, ?access, "Opening SQLite database");
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .map_err(|e| ExecutionError::Connection(e.to_string()))?;

        Ok(Self { pool })
    }
}

#[async_trait]
impl SqlExecutor for SqliteExecutor {
    fn dialect(&self) -> Dialect {
        Dialect::Sqlite
    }

    async fn test_connection(&self) -> Result<(), ExecutionError> {
        sqlx::raw_sql("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| ExecutionError::Connection(e.to_string()))?;
        Ok(())
    }

    async fn execute(&self, sql: &str) -> Result<(), ExecutionError> {
        sqlx::raw_sql(sql)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::SchemaWriter;
    use crate::inference::infer_schema;
    use serde_json::json;

    #[tokio::test]
    async fn test_store_into_memory_database() {
        let executor = SqliteExecutor::connect(&ConnectionConfig::new(Dialect::Sqlite))
            .await
            .unwrap();
        let schema = infer_schema(&json!({"users": [{"id": 1, "tags": ["a", "b"]}, {"id": 2}]}));

        let report = SchemaWriter::new(&executor).write(&schema).await.unwrap();
        assert!(report.is_success());
        assert_eq!(report.rows_inserted(), 4);

        // second run hits CREATE TABLE IF NOT EXISTS and appends
        let report = SchemaWriter::new(&executor).write(&schema).await.unwrap();
        assert!(report.is_success());
    }

    #[tokio::test]
    async fn test_read_only_open_needs_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = ConnectionConfig::new(Dialect::Sqlite)
            .with_database(dir.path().join("missing.db").to_string_lossy());

        let err = SqliteExecutor::open(&config, SqliteAccess::ReadOnly)
            .await
            .err()
            .unwrap();
        assert!(matches!(err, ExecutionError::Connection(_)));
        assert!(!dir.path().join("missing.db").exists());

        let created = SqliteExecutor::connect(&config).await.unwrap();
        created.test_connection().await.unwrap();
        let reopened = SqliteExecutor::open(&config, SqliteAccess::ReadOnly).await.unwrap();
        reopened.test_connection().await.unwrap();
    }

    #[tokio::test]
    async fn test_failed_statement_is_query_error() {
        let executor = SqliteExecutor::connect(&ConnectionConfig::new(Dialect::Sqlite))
            .await
            .unwrap();
        let err = executor.execute("INSERT INTO nowhere VALUES (1);").await.unwrap_err();
        assert!(matches!(err, ExecutionError::Query(_)));
    }
}
