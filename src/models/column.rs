//! Column model and the dialect-independent column type tag

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Width of a `VARCHAR` column chosen for short strings.
pub const SHORT_VARCHAR: u32 = 50;
/// Width of a `VARCHAR` column chosen for medium strings and email-like values.
pub const LONG_VARCHAR: u32 = 255;

/// Dialect-independent column type tag.
///
/// Serialized as its SQL-like spelling (`"INTEGER"`, `"VARCHAR(50)"`, ...) so
/// a schema can travel over the wire in the same shape a user reads it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AbstractType {
    Text,
    Boolean,
    Integer,
    Decimal,
    Timestamp,
    Varchar(u32),
}

impl AbstractType {
    /// All type tags the inferencer can produce.
    pub const ALL: [AbstractType; 7] = [
        AbstractType::Text,
        AbstractType::Boolean,
        AbstractType::Integer,
        AbstractType::Decimal,
        AbstractType::Timestamp,
        AbstractType::Varchar(SHORT_VARCHAR),
        AbstractType::Varchar(LONG_VARCHAR),
    ];
}

impl fmt::Display for AbstractType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AbstractType::Text => write!(f, "TEXT"),
            AbstractType::Boolean => write!(f, "BOOLEAN"),
            AbstractType::Integer => write!(f, "INTEGER"),
            AbstractType::Decimal => write!(f, "DECIMAL"),
            AbstractType::Timestamp => write!(f, "TIMESTAMP"),
            AbstractType::Varchar(n) => write!(f, "VARCHAR({})", n),
        }
    }
}

impl FromStr for AbstractType {
    type Err = String;

    /// Parse a type tag case-insensitively. Unknown tags are rejected rather
    /// than silently passed through.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_uppercase();
        match upper.as_str() {
            "TEXT" => Ok(AbstractType::Text),
            "BOOLEAN" => Ok(AbstractType::Boolean),
            "INTEGER" => Ok(AbstractType::Integer),
            "DECIMAL" => Ok(AbstractType::Decimal),
            "TIMESTAMP" => Ok(AbstractType::Timestamp),
            other => other
                .strip_prefix("VARCHAR(")
                .and_then(|rest| rest.strip_suffix(')'))
                .and_then(|n| n.trim().parse::<u32>().ok())
                .map(AbstractType::Varchar)
                .ok_or_else(|| format!("Unknown column type: {}", s)),
        }
    }
}

impl Serialize for AbstractType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for AbstractType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// A single column of an inferred table.
///
/// The type is fixed by the first value observed under this name; later
/// values never re-type the column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    /// Column name
    pub name: String,
    /// Abstract column type
    #[serde(rename = "type")]
    pub column_type: AbstractType,
}

impl Column {
    pub fn new(name: impl Into<String>, column_type: AbstractType) -> Self {
        Self {
            name: name.into(),
            column_type,
        }
    }
}
