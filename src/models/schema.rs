//! Schema model: every table inferred from one JSON document

use super::relationship::Relationship;
use super::table::Table;
use serde::{Deserialize, Serialize};

/// The complete set of tables inferred from one JSON document.
///
/// Tables are kept in creation order so rendering is reproducible.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Schema {
    #[serde(default)]
    pub tables: Vec<Table>,
    #[serde(default)]
    pub relationships: Vec<Relationship>,
}

/// Headline counts for a schema
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SchemaSummary {
    pub tables: usize,
    pub columns: usize,
    pub rows: usize,
    pub relationships: usize,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a table by name
    pub fn table(&self, name: &str) -> Option<&Table> {
        self.tables.iter().find(|t| t.name == name)
    }

    pub fn table_mut(&mut self, name: &str) -> Option<&mut Table> {
        self.tables.iter_mut().find(|t| t.name == name)
    }

    /// Position of the named table, creating an empty one at the end when it
    /// does not exist yet.
    pub fn ensure_table_index(&mut self, name: &str) -> usize {
        match self.tables.iter().position(|t| t.name == name) {
            Some(idx) => idx,
            None => {
                self.tables.push(Table::new(name));
                self.tables.len() - 1
            }
        }
    }

    /// The named table, created lazily on first reference
    pub fn ensure_table(&mut self, name: &str) -> &mut Table {
        let idx = self.ensure_table_index(name);
        &mut self.tables[idx]
    }

    pub fn table_names(&self) -> Vec<&str> {
        self.tables.iter().map(|t| t.name.as_str()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    pub fn summary(&self) -> SchemaSummary {
        SchemaSummary {
            tables: self.tables.len(),
            columns: self.tables.iter().map(|t| t.columns.len()).sum(),
            rows: self.tables.iter().map(|t| t.rows.len()).sum(),
            relationships: self.relationships.len(),
        }
    }
}
