//! MySQL backend (sqlx)

use async_trait::async_trait;
use sqlx::mysql::{MySqlConnectOptions, MySqlPool, MySqlPoolOptions};
use tracing::debug;

use super::config::ConnectionConfig;
use super::error::{ExecutionError, map_sqlx_error};
use super::executor::SqlExecutor;
use crate::dialect::Dialect;

/// Pooled MySQL connection
pub struct MySqlExecutor {
    pool: MySqlPool,
}

impl MySqlExecutor {
    pub async fn connect(config: &ConnectionConfig) -> Result<Self, ExecutionError> {
        if config.dialect != Dialect::MySql {
            return Err(ExecutionError::Config(format!(
                "MySQL backend cannot open a {} connection",
                config.dialect
            )));
        }
        config.validate()?;

        let mut options = MySqlConnectOptions::new()
            .host(&config.host)
            .port(config.effective_port().unwrap_or(3306))
            .database(config.database_name());
        if let Some(user) = &config.user {
            options = options.username(user);
        }
        if let Some(password) = &config.password {
            options = options.password(password);
        }

        debug!(?config, "Connecting to MySQL");
        let pool = MySqlPoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .map_err(|e| ExecutionError::Connection(e.to_string()))?;

        Ok(Self { pool })
    }
}

#[async_trait]
impl SqlExecutor for MySqlExecutor {
    fn dialect(&self) -> Dialect {
        Dialect::MySql
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
