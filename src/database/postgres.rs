//! PostgreSQL backend (tokio-postgres)

use async_trait::async_trait;
use tokio_postgres::{Client, NoTls};
use tracing::{debug, error};

use super::config::ConnectionConfig;
use super::error::ExecutionError;
use super::executor::SqlExecutor;
use crate::dialect::Dialect;

/// Open PostgreSQL connection
pub struct PostgresExecutor {
    client: Client,
}

impl PostgresExecutor {
    /// Connect using a [`ConnectionConfig`]; the password is never logged
    pub async fn connect(config: &ConnectionConfig) -> Result<Self, ExecutionError> {
        if config.dialect != Dialect::PostgreSql {
            return Err(ExecutionError::Config(format!(
                "PostgreSQL backend cannot open a {} connection",
                config.dialect
            )));
        }
        config.validate()?;

        let mut pg = tokio_postgres::Config::new();
        pg.host(&config.host)
            .port(config.effective_port().unwrap_or(5432))
            .dbname(config.database_name());
        if let Some(user) = &config.user {
            pg.user(user.as_str());
        }
        if let Some(password) = &config.password {
            pg.password(password);
        }

        debug!(?config, "Connecting to PostgreSQL");
        let (client, connection) = pg
            .connect(NoTls)
            .await
            .map_err(|e| ExecutionError::Connection(e.to_string()))?;

        // Spawn connection handler
        tokio::spawn(async move {
            if let Err(e) = connection.await {
                error!("PostgreSQL connection error: {}", e);
            }
        });

        Ok(Self { client })
    }
}

#[async_trait]
impl SqlExecutor for PostgresExecutor {
    fn dialect(&self) -> Dialect {
        Dialect::PostgreSql
    }

    async fn test_connection(&self) -> Result<(), ExecutionError> {
        self.client
            .simple_query("SELECT 1")
            .await
            .map_err(|e| ExecutionError::Connection(e.to_string()))?;
        Ok(())
    }

    async fn execute(&self, sql: &str) -> Result<(), ExecutionError> {
        self.client
            .batch_execute(sql)
            .await
            .map_err(|e| ExecutionError::Query(e.to_string()))
    }
}
