//! Execution backend abstraction

use async_trait::async_trait;

use super::error::ExecutionError;
use crate::dialect::Dialect;

/// Runs SQL text against one open connection.
///
/// Implementations report failures as [`ExecutionError::Query`]; the writer
/// attaches the table name.
#[async_trait]
pub trait SqlExecutor: Send + Sync {
    /// Dialect the connection speaks
    fn dialect(&self) -> Dialect;

    /// Round-trip a trivial query
    async fn test_connection(&self) -> Result<(), ExecutionError>;

    /// Execute one statement
    async fn execute(&self, sql: &str) -> Result<(), ExecutionError>;
}
