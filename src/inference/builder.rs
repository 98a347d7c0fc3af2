//! Schema builder: walks a JSON document and folds it into tables
//!
//! The walk is depth-first and pre-order. Objects inside an array become
//! rows, one level of nested object is flattened into `key_nestedKey`
//! columns, and nested arrays become child tables named
//! `{parent}_{key}`. Tables with the same derived name coalesce.

use serde_json::{Map, Value};
use tracing::{debug, info};

use super::config::InferenceConfig;
use super::error::InferenceError;
use super::naming::child_table_name;
use super::types::infer_type;
use crate::models::{Row, Schema};

/// Builds a [`Schema`] from one parsed JSON document.
///
/// Each call to [`SchemaBuilder::build`] owns a fresh accumulator, so one
/// builder can serve concurrent, independent passes.
#[derive(Debug, Clone, Default)]
pub struct SchemaBuilder {
    config: InferenceConfig,
}

impl SchemaBuilder {
    /// Create a builder with default configuration
    pub fn new() -> Self {
        Self::with_config(InferenceConfig::default())
    }

    /// Create a builder with custom configuration
    pub fn with_config(config: InferenceConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &InferenceConfig {
        &self.config
    }

    /// Build a schema from a parsed JSON value.
    ///
    /// Fails only when a depth limit is configured and the value nests
    /// deeper than it. The depth is measured without recursion, before the
    /// walk starts.
    pub fn build(&self, value: &Value) -> Result<Schema, InferenceError> {
        if let Some(max) = self.config.max_depth {
            let depth = nesting_depth(value);
            if depth > max {
                return Err(InferenceError::MaxDepthExceeded { depth, max });
            }
        }
        Ok(self.walk(value))
    }

    /// Parse JSON text and build a schema from it
    pub fn build_from_str(&self, json: &str) -> Result<Schema, InferenceError> {
        let value: Value = serde_json::from_str(json)?;
        self.build(&value)
    }

    fn walk(&self, value: &Value) -> Schema {
        let mut pass = Pass {
            config: &self.config,
            schema: Schema::new(),
        };
        pass.process_root(value);

        let summary = pass.schema.summary();
        info!(
            "Inferred {} tables, {} columns, {} rows",
            summary.tables, summary.columns, summary.rows
        );
        pass.schema
    }
}

/// Infer a schema with the default configuration.
///
/// Total over all JSON values; there is no depth limit.
pub fn infer_schema(value: &Value) -> Schema {
    SchemaBuilder::new().walk(value)
}

/// Deepest container nesting in a value: scalars are 0, `[1]` is 1,
/// `{"a": [1]}` is 2.
pub fn nesting_depth(value: &Value) -> usize {
    let mut max = 0;
    let mut stack = vec![(value, 0usize)];
    while let Some((v, depth)) = stack.pop() {
        max = max.max(depth);
        match v {
            Value::Array(items) => stack.extend(items.iter().map(|i| (i, depth + 1))),
            Value::Object(obj) => stack.extend(obj.values().map(|i| (i, depth + 1))),
            _ => {}
        }
    }
    max
}

/// One inference pass. Owns the schema accumulator exclusively.
struct Pass<'c> {
    config: &'c InferenceConfig,
    schema: Schema,
}

impl<'c> Pass<'c> {
    fn process_root(&mut self, root: &Value) {
        let config = self.config;
        match root {
            Value::Array(items) => self.process_array(items, &config.array_table),
            Value::Object(obj) => self.process_root_object(obj),
            scalar => self.process_array(std::slice::from_ref(scalar), &config.root_table),
        }
    }

    fn process_root_object(&mut self, obj: &Map<String, Value>) {
        let config = self.config;
        let arrays: Vec<(&String, &Vec<Value>)> = obj
            .iter()
            .filter_map(|(k, v)| v.as_array().map(|items| (k, items)))
            .collect();

        // Later keys win ties for the primary table
        let Some(&(main_key, main_items)) = arrays
            .iter()
            .reduce(|best, candidate| if candidate.1.len() >= best.1.len() { candidate } else { best })
        else {
            let table_idx = self.schema.ensure_table_index(&config.root_table);
            self.table_created(&config.root_table);
            self.process_object(&config.root_table, table_idx, obj.iter());
            return;
        };

        self.process_array(main_items, main_key);
        for (key, items) in &arrays {
            if *key != main_key {
                self.process_array(items, key);
            }
        }

        if obj.values().any(|v| !v.is_array()) {
            let table_idx = self.schema.ensure_table_index(&config.metadata_table);
            self.table_created(&config.metadata_table);
            self.process_object(
                &config.metadata_table,
                table_idx,
                obj.iter().filter(|(_, v)| !v.is_array()),
            );
        }
    }

    fn process_array(&mut self, items: &[Value], table_name: &str) {
        let table_idx = self.schema.ensure_table_index(table_name);
        self.table_created(table_name);

        for item in items {
            match item {
                Value::Object(obj) => self.process_object(table_name, table_idx, obj.iter()),
                scalar => {
                    let column = &self.config.scalar_column;
                    let table = &mut self.schema.tables[table_idx];
                    table.register_column(column, infer_type(scalar));
                    let mut row = Row::new();
                    row.insert(column.clone(), scalar.clone());
                    table.push_row(row);
                }
            }
        }
    }

    /// Fold one object into a row of the table at `table_idx`
    fn process_object<'v>(
        &mut self,
        table_name: &str,
        table_idx: usize,
        props: impl Iterator<Item = (&'v String, &'v Value)>,
    ) {
        let mut row = Row::new();

        for (key, value) in props {
            match value {
                Value::Array(children) => {
                    let child = child_table_name(table_name, key);
                    self.process_array(children, &child);
                }
                Value::Object(nested) => {
                    for (nested_key, nested_value) in nested {
                        let column = format!("{}_{}", key, nested_key);
                        self.schema.tables[table_idx]
                            .register_column(&column, infer_type(nested_value));
                        row.insert(column, nested_value.clone());
                    }
                }
                scalar => {
                    self.schema.tables[table_idx].register_column(key, infer_type(scalar));
                    row.insert(key.clone(), scalar.clone());
                }
            }
        }

        self.schema.tables[table_idx].push_row(row);
    }

    fn table_created(&self, name: &str) {
        debug!(table = name, "Using table");
    }
}
