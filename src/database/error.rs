//! Error types for live database execution

use thiserror::Error;

use crate::dialect::{Dialect, DialectError};

/// Errors that can occur while writing a schema to a database
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExecutionError {
    /// Could not connect or authenticate
    #[error("Connection error: {0}")]
    Connection(String),

    /// A statement failed on the database side
    #[error("Query error: {0}")]
    Query(String),

    /// A statement for a specific table failed
    #[error("Statement for table '{table}' failed: {message}")]
    Statement { table: String, message: String },

    /// Invalid connection configuration
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Unknown dialect name
    #[error(transparent)]
    Dialect(#[from] DialectError),

    /// No execution backend is compiled in for this dialect
    #[error("No database backend available for {0}")]
    NotSupported(Dialect),
}

impl ExecutionError {
    /// Get a user-friendly error message for CLI output
    pub fn user_message(&self) -> String {
        match self {
            ExecutionError::Connection(msg) => {
                format!(
                    "Could not connect to the database: {msg}\n\n\
                    Hint: Check host, port, credentials and that the server is reachable."
                )
            }
            ExecutionError::Config(msg) => {
                format!("Invalid configuration: {msg}\n\nHint: Check your connection file.")
            }
            ExecutionError::NotSupported(Dialect::PostgreSql) => {
                "PostgreSQL support not enabled.\n\nHint: Build with --features postgres-backend."
                    .to_string()
            }
            ExecutionError::NotSupported(Dialect::MySql) => {
                "MySQL support not enabled.\n\nHint: Build with --features mysql-backend."
                    .to_string()
            }
            ExecutionError::NotSupported(Dialect::Sqlite) => {
                "SQLite support not enabled.\n\nHint: Build with --features sqlite-backend."
                    .to_string()
            }
            ExecutionError::NotSupported(dialect) => {
                format!(
                    "No live backend for {dialect}.\n\n\
                    Hint: Use 'json2sql generate --dialect {dialect}' and run the script with your database client."
                )
            }
            _ => self.to_string(),
        }
    }
}

/// Server-side failures become `Query`; transport and pool failures `Connection`
#[cfg(any(feature = "mysql-backend", feature = "sqlite-backend"))]
pub(crate) fn map_sqlx_error(error: sqlx::Error) -> ExecutionError {
    match error {
        sqlx::Error::Database(db_error) => ExecutionError::Query(db_error.message().to_string()),
        other @ (sqlx::Error::Io(_) | sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed) => {
            ExecutionError::Connection(other.to_string())
        }
        other => ExecutionError::Query(other.to_string()),
    }
}
