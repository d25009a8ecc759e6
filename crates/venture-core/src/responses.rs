//! Response types returned as JSON by `vnt` commands and the HTTP API.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::actions::OutputAction;
use crate::entities::Session;
use crate::enums::Phase;

/// Result of one processed turn.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct TurnResponse {
    pub session_id: String,
    pub phase: Phase,
    pub revision: i64,
    pub action: OutputAction,
}

impl TurnResponse {
    #[must_use]
    pub fn new(session: &Session, action: OutputAction) -> Self {
        Self {
            session_id: session.id.clone(),
            phase: session.phase,
            revision: session.revision,
            action,
        }
    }
}

/// Row of `vnt session list`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct SessionSummary {
    pub id: String,
    pub name: String,
    pub industry: Option<String>,
    pub phase: Phase,
    pub revision: i64,
    pub updated_at: DateTime<Utc>,
}

/// Response from `vnt session delete`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct DeleteResponse {
    pub session_id: String,
    pub deleted: bool,
}
