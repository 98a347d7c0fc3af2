//! Configuration for schema inference

use serde::{Deserialize, Serialize};

/// Configuration for schema inference
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InferenceConfig {
    /// Maximum nesting depth accepted before building (None = unbounded)
    pub max_depth: Option<usize>,

    /// Table name used for a root-level array
    pub array_table: String,

    /// Table name used for a root object without array-valued properties
    pub root_table: String,

    /// Table name collecting the non-array properties of a root object
    pub metadata_table: String,

    /// Column name used for bare scalars found inside arrays
    pub scalar_column: String,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            max_depth: None,
            array_table: "items".to_string(),
            root_table: "record".to_string(),
            metadata_table: "metadata".to_string(),
            scalar_column: "value".to_string(),
        }
    }
}

impl InferenceConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder for custom configuration
    pub fn builder() -> InferenceConfigBuilder {
        InferenceConfigBuilder::default()
    }
}

/// Builder for InferenceConfig
#[derive(Debug, Default)]
pub struct InferenceConfigBuilder {
    config: InferenceConfig,
}

impl InferenceConfigBuilder {
    /// Set the maximum nesting depth
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.config.max_depth = Some(depth);
        self
    }

    /// Remove the nesting depth limit
    pub fn unbounded_depth(mut self) -> Self {
        self.config.max_depth = None;
        self
    }

    /// Set the table name for a root-level array
    pub fn array_table(mut self, name: impl Into<String>) -> Self {
        self.config.array_table = name.into();
        self
    }

    /// Set the table name for a single root record
    pub fn root_table(mut self, name: impl Into<String>) -> Self {
        self.config.root_table = name.into();
        self
    }

    /// Set the table name for root metadata
    pub fn metadata_table(mut self, name: impl Into<String>) -> Self {
        self.config.metadata_table = name.into();
        self
    }

    /// Set the column name for bare scalars
    pub fn scalar_column(mut self, name: impl Into<String>) -> Self {
        self.config.scalar_column = name.into();
        self
    }

    /// Build the configuration
    pub fn build(self) -> InferenceConfig {
        self.config
    }
}
