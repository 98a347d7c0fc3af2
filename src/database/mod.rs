//! Live database execution
//!
//! Turns a schema into per-dialect statements ([`ExecutionPlan`]) and runs
//! them through a [`SqlExecutor`]. [`SchemaWriter`] reports success or
//! failure per table.
//!
//! ## Backends
//!
//! - PostgreSQL via `tokio-postgres` (requires `postgres-backend` feature)
//! - MySQL via `sqlx` (requires `mysql-backend` feature)
//! - SQLite via `sqlx` (requires `sqlite-backend` feature)
//!
//! MSSQL statements can be executed by implementing [`SqlExecutor`].

pub mod config;
pub mod error;
pub mod executor;
#[cfg(feature = "mysql-backend")]
pub mod mysql;
pub mod plan;
#[cfg(feature = "postgres-backend")]
pub mod postgres;
#[cfg(feature = "sqlite-backend")]
pub mod sqlite;
pub mod writer;

pub use config::ConnectionConfig;
pub use error::ExecutionError;
pub use executor::SqlExecutor;
pub use plan::{ExecutionPlan, PlannedStatement, TablePlan};
#[cfg(feature = "mysql-backend")]
pub use mysql::MySqlExecutor;
#[cfg(feature = "postgres-backend")]
pub use postgres::PostgresExecutor;
#[cfg(feature = "sqlite-backend")]
pub use sqlite::{SqliteAccess, SqliteExecutor};
pub use writer::{
    ExecutionReport, InsertOperation, SchemaWriter, TableOutcome, operations_to_schema,
};

use crate::models::Schema;

/// Open a connection with the backend compiled in for the config's dialect
pub async fn connect(config: &ConnectionConfig) -> Result<Box<dyn SqlExecutor>, ExecutionError> {
    config.validate()?;
    match config.dialect {
        #[cfg(feature = "postgres-backend")]
        crate::dialect::Dialect::PostgreSql => Ok(Box::new(PostgresExecutor::connect(config).await?)),
        #[cfg(feature = "mysql-backend")]
        crate::dialect::Dialect::MySql => Ok(Box::new(MySqlExecutor::connect(config).await?)),
        #[cfg(feature = "sqlite-backend")]
        crate::dialect::Dialect::Sqlite => Ok(Box::new(SqliteExecutor::connect(config).await?)),
        dialect => Err(ExecutionError::NotSupported(dialect)),
    }
}

/// Connect and run a trivial query. SQLite files are opened read-only, so
/// a missing file fails instead of being created.
pub async fn test_connection(config: &ConnectionConfig) -> Result<(), ExecutionError> {
    #[cfg(feature = "sqlite-backend")]
    if config.dialect == crate::dialect::Dialect::Sqlite {
        return SqliteExecutor::open(config, SqliteAccess::ReadOnly)
            .await?
            .test_connection()
            .await;
    }
    connect(config).await?.test_connection().await
}

/// Connect, then create and fill every table of the schema
pub async fn store_schema(
    config: &ConnectionConfig,
    schema: &Schema,
) -> Result<ExecutionReport, ExecutionError> {
    let executor = connect(config).await?;
    SchemaWriter::new(executor.as_ref()).write(schema).await
}

/// Connect, then run insert operations
pub async fn insert_rows(
    config: &ConnectionConfig,
    operations: Vec<InsertOperation>,
) -> Result<ExecutionReport, ExecutionError> {
    let executor = connect(config).await?;
    SchemaWriter::new(executor.as_ref())
        .insert_rows(operations)
        .await
}
