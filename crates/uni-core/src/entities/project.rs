use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A project that can be associated with one scheme per category.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Hash)]
pub struct Project {
    pub id: String,
    /// Short unique key, e.g. `HSP`.
    pub key: String,
    pub name: String,
}
