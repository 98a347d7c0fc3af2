//! Relationship model
//!
//! Reserved for foreign-key inference between a parent table and the child
//! tables derived from its nested arrays. Nothing populates it yet.

use serde::{Deserialize, Serialize};

/// A parent/child link between two inferred tables
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Relationship {
    /// Table holding the objects that contained the nested array
    pub parent_table: String,
    /// Table derived from the nested array
    pub child_table: String,
}
