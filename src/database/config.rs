//! Connection configuration

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

use super::error::ExecutionError;
use crate::dialect::Dialect;

/// Database opened when a SQLite connection names no file
pub const SQLITE_MEMORY: &str = ":memory:";

fn default_host() -> String {
    "localhost".to_string()
}

/// Where and how to connect for live execution.
///
/// Loadable from TOML:
///
/// ```toml
/// dialect = "postgresql"
/// host = "db.internal"
/// database = "analytics"
/// user = "loader"
/// ```
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionConfig {
    pub dialect: Dialect,
    #[serde(default = "default_host")]
    pub host: String,
    /// Falls back to the dialect's default port
    #[serde(default)]
    pub port: Option<u16>,
    /// Database name, or the file path for SQLite
    #[serde(default)]
    pub database: Option<String>,
    #[serde(default)]
    pub user: Option<String>,
    #[serde(default, skip_serializing)]
    pub password: Option<String>,
}

impl ConnectionConfig {
    pub fn new(dialect: Dialect) -> Self {
        Self {
            dialect,
            host: default_host(),
            port: None,
            database: None,
            user: None,
            password: None,
        }
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    pub fn with_database(mut self, database: impl Into<String>) -> Self {
        self.database = Some(database.into());
        self
    }

    pub fn with_user(mut self, user: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self
    }

    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Explicit port, else the dialect default. `None` for SQLite.
    pub fn effective_port(&self) -> Option<u16> {
        match self.dialect {
            Dialect::Sqlite => None,
            _ => self.port.or(self.dialect.default_port()),
        }
    }

    /// Database name; SQLite defaults to an in-memory database
    pub fn database_name(&self) -> &str {
        match (&self.database, self.dialect) {
            (Some(db), _) if !db.is_empty() => db.as_str(),
            (_, Dialect::Sqlite) => SQLITE_MEMORY,
            _ => "",
        }
    }

    /// Check that the fields a server connection needs are present
    pub fn validate(&self) -> Result<(), ExecutionError> {
        if self.dialect == Dialect::Sqlite {
            return Ok(());
        }
        if self.host.trim().is_empty() {
            return Err(ExecutionError::Config("host must not be empty".to_string()));
        }
        if self.database_name().is_empty() {
            return Err(ExecutionError::Config(format!(
                "database is required for {}",
                self.dialect
            )));
        }
        Ok(())
    }

    /// Parse a TOML document
    pub fn from_toml_str(text: &str) -> Result<Self, ExecutionError> {
        toml::from_str(text).map_err(|e| ExecutionError::Config(e.to_string()))
    }

    /// Load a TOML connection file
    pub fn from_file(path: &Path) -> Result<Self, ExecutionError> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            ExecutionError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&text)
    }
}

impl fmt::Debug for ConnectionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionConfig")
            .field("dialect", &self.dialect)
            .field("host", &self.host)
            .field("port", &self.effective_port())
            .field("database", &self.database_name())
            .field("user", &self.user)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}
