use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A benchmark entity the business can be compared against.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ComparisonCandidate {
    pub name: String,
    pub description: String,
    /// Why this entity is a relevant benchmark.
    #[serde(default)]
    pub relevance: String,
}

impl ComparisonCandidate {
    /// Case-insensitive name match, ignoring surrounding whitespace.
    #[must_use]
    pub fn matches_name(&self, name: &str) -> bool {
        self.name.trim().eq_ignore_ascii_case(name.trim())
    }
}
