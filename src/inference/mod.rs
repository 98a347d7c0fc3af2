//! Schema inference engine for JSON documents
//!
//! Turns one arbitrary JSON value into a set of relational tables with typed
//! columns and rows.
//!
//! ## Example
//!
//! ```rust
//! use json2sql::inference::SchemaBuilder;
//!
//! let schema = SchemaBuilder::new()
//!     .build_from_str(r#"[{"id": 1, "name": "Ann"}, {"id": 2, "name": "Bo"}]"#)
//!     .unwrap();
//!
//! let items = schema.table("items").unwrap();
//! assert_eq!(items.column_names(), vec!["id", "name"]);
//! assert_eq!(items.row_count(), 2);
//! ```

mod builder;
mod config;
mod error;
pub mod formats;
pub mod naming;
mod types;

pub use builder::{SchemaBuilder, infer_schema, nesting_depth};
pub use config::{InferenceConfig, InferenceConfigBuilder};
pub use error::InferenceError;
pub use formats::is_timestamp;
pub use naming::{child_table_name, sanitize_table_name};
pub use types::infer_type;

pub use crate::models::AbstractType;
