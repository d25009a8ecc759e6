use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::EventKind;

/// Append-only record of one persisted turn.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct SessionEvent {
    pub id: String,
    pub session_id: String,
    /// Session revision produced by this turn.
    pub revision: i64,
    pub kind: EventKind,
    pub detail: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
}
