//! Table model: an ordered column set plus the rows folded into it

use super::column::{AbstractType, Column};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One row of a table: column name to scalar value.
///
/// A column missing from the map and a column mapped to `null` render the
/// same way (`NULL` in SQL, an empty CSV field).
pub type Row = Map<String, Value>;

/// An inferred table.
///
/// Columns are kept in the order they were first registered. The column set
/// only ever grows during an inference pass.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Table {
    pub name: String,
    #[serde(default)]
    pub columns: Vec<Column>,
    #[serde(default)]
    pub rows: Vec<Row>,
}

impl Table {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
            rows: Vec::new(),
        }
    }

    /// Look up a column by name
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    /// Register a column unless one with the same name already exists.
    ///
    /// Returns `true` when the column was added. An existing column keeps its
    /// original type.
    pub fn register_column(&mut self, name: &str, column_type: AbstractType) -> bool {
        if self.has_column(name) {
            return false;
        }
        self.columns.push(Column::new(name, column_type));
        true
    }

    pub fn push_row(&mut self, row: Row) {
        self.rows.push(row);
    }

    /// Column names in registration order
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}
