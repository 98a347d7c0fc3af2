//! json2sql - Infer a relational schema from arbitrary JSON and render SQL
//!
//! Provides:
//! - Schema inference (tables, typed columns, rows) from one JSON document
//! - Dialect mapping for PostgreSQL, MySQL, SQL Server and SQLite
//! - SQL and CSV export
//! - Live execution against a database with per-table reporting
//! - Transport boundary types with structured error payloads
//!
//! ```rust
//! use json2sql::{Dialect, SQLExporter, infer_schema};
//! use serde_json::json;
//!
//! let schema = infer_schema(&json!([{"id": 1, "name": "Ann"}, {"id": 2, "name": "Bo"}]));
//! let sql = SQLExporter::new(Dialect::MySql).render(&schema);
//! assert_eq!(
//!     sql.create_statements,
//!     "CREATE TABLE IF NOT EXISTS `items` (`id` INT, `name` VARCHAR(50));"
//! );
//! ```

pub mod api;
pub mod cli;
pub mod database;
pub mod dialect;
pub mod export;
pub mod inference;
pub mod models;
pub mod source;

// Re-export commonly used types
pub use dialect::{Dialect, DialectError};
pub use export::{CsvExporter, ExportError, ExportMode, ExportResult, RenderedSql, SQLExporter};
pub use inference::{InferenceConfig, InferenceError, SchemaBuilder, infer_schema, infer_type};
pub use models::{AbstractType, Column, Relationship, Row, Schema, SchemaSummary, Table};

pub use database::{
    ConnectionConfig, ExecutionError, ExecutionPlan, ExecutionReport, SchemaWriter, SqlExecutor,
    TableOutcome,
};
#[cfg(feature = "mysql-backend")]
pub use database::MySqlExecutor;
#[cfg(feature = "postgres-backend")]
pub use database::PostgresExecutor;
#[cfg(feature = "sqlite-backend")]
pub use database::SqliteExecutor;
