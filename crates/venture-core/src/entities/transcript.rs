use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::Speaker;

/// One line of the consultation history.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct TranscriptEntry {
    pub speaker: Speaker,
    pub content: String,
    pub at: DateTime<Utc>,
}
