//! Models module
//!
//! Defines the relational structures produced by schema inference and
//! consumed by the SQL/CSV exporters and the execution layer.

pub mod column;
pub mod relationship;
pub mod schema;
pub mod table;

pub use column::{AbstractType, Column, LONG_VARCHAR, SHORT_VARCHAR};
pub use relationship::Relationship;
pub use schema::{Schema, SchemaSummary};
pub use table::{Row, Table};
