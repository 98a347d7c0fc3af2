//! SQL dialect mapping
//!
//! Maps abstract column types to each dialect's concrete type, and defines
//! how identifiers are quoted and values are written as literals.
//!
//! # Security
//!
//! Literals only double embedded single quotes. Backslashes, NUL bytes and
//! dialect-specific escape sequences pass through untouched, so rendered
//! text is fit for display and export. Anything executed against a live
//! database should go through parametrized statements.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Number, Value};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::models::AbstractType;

/// Error raised when a dialect name is not recognised
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DialectError {
    #[error("Unsupported dialect: {0}")]
    Unsupported(String),
}

/// Target SQL dialect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dialect {
    PostgreSql,
    MySql,
    MsSql,
    Sqlite,
}

impl Dialect {
    pub const ALL: [Dialect; 4] = [
        Dialect::PostgreSql,
        Dialect::MySql,
        Dialect::MsSql,
        Dialect::Sqlite,
    ];

    /// Canonical name of the dialect
    pub fn as_str(&self) -> &'static str {
        match self {
            Dialect::PostgreSql => "postgresql",
            Dialect::MySql => "mysql",
            Dialect::MsSql => "mssql",
            Dialect::Sqlite => "sqlite",
        }
    }

    /// Default server port; SQLite is file based and has none
    pub fn default_port(&self) -> Option<u16> {
        match self {
            Dialect::PostgreSql => Some(5432),
            Dialect::MySql => Some(3306),
            Dialect::MsSql => Some(1433),
            Dialect::Sqlite => None,
        }
    }

    /// Concrete column type for an abstract type.
    ///
    /// | Abstract     | sqlite   | mysql         | postgresql / mssql |
    /// |--------------|----------|---------------|--------------------|
    /// | DECIMAL      | REAL     | DECIMAL(10,2) | NUMERIC(18,4)      |
    /// | VARCHAR(n)   | TEXT     | VARCHAR(n)    | VARCHAR(n)         |
    /// | TIMESTAMP    | DATETIME | TIMESTAMP     | TIMESTAMP          |
    /// | INTEGER      | INTEGER  | INT           | INTEGER            |
    /// | BOOLEAN/TEXT | as is    | as is         | as is              |
    pub fn map_type(&self, column_type: AbstractType) -> String {
        use AbstractType::*;
        match self {
            Dialect::Sqlite => match column_type {
                Decimal => "REAL".to_string(),
                Varchar(_) => "TEXT".to_string(),
                Timestamp => "DATETIME".to_string(),
                Integer | Boolean | Text => column_type.to_string(),
            },
            Dialect::MySql => match column_type {
                Decimal => "DECIMAL(10,2)".to_string(),
                Integer => "INT".to_string(),
                Varchar(_) | Timestamp | Boolean | Text => column_type.to_string(),
            },
            Dialect::PostgreSql | Dialect::MsSql => match column_type {
                Decimal => "NUMERIC(18,4)".to_string(),
                Integer | Varchar(_) | Timestamp | Boolean | Text => column_type.to_string(),
            },
        }
    }

    /// Quote an identifier: backticks for MySQL, double quotes elsewhere.
    /// An embedded quote character is doubled.
    pub fn quote_identifier(&self, name: &str) -> String {
        match self {
            Dialect::MySql => format!("`{}`", name.replace('`', "``")),
            Dialect::PostgreSql | Dialect::MsSql | Dialect::Sqlite => {
                format!("\"{}\"", name.replace('"', "\"\""))
            }
        }
    }

    /// Write a value as a SQL literal. `None` (absent) and `null` become `NULL`.
    pub fn format_literal(&self, value: Option<&Value>) -> String {
        match value {
            None | Some(Value::Null) => "NULL".to_string(),
            Some(Value::Number(n)) => format_number(n),
            Some(Value::Bool(b)) => match (self, b) {
                (Dialect::MySql, true) => "1".to_string(),
                (Dialect::MySql, false) => "0".to_string(),
                (_, true) => "TRUE".to_string(),
                (_, false) => "FALSE".to_string(),
            },
            Some(Value::String(s)) => quote_string(s),
            Some(other) => quote_string(&other.to_string()),
        }
    }
}

/// Integral floats are written without a fraction (`5.0` → `5`)
pub fn format_number(n: &Number) -> String {
    if n.is_f64() {
        if let Some(f) = n.as_f64() {
            if f.is_finite() && f.fract() == 0.0 && f.abs() < 1e15 {
                return format!("{}", f as i64);
            }
        }
    }
    n.to_string()
}

fn quote_string(s: &str) -> String {
    format!("'{}'", s.replace('\'', "''"))
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Dialect {
    type Err = DialectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgresql" | "postgres" => Ok(Dialect::PostgreSql),
            "mysql" => Ok(Dialect::MySql),
            "mssql" => Ok(Dialect::MsSql),
            "sqlite" | "sqlite3" => Ok(Dialect::Sqlite),
            _ => Err(DialectError::Unsupported(s.to_string())),
        }
    }
}

impl Serialize for Dialect {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Dialect {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
