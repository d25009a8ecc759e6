//! Record-level errors for Venture.
//!
//! The mutators on session records return these when a call would break a
//! record's rules. Orchestration errors (`EngineError`) and storage errors
//! (`DatabaseError`) are defined in their respective crates and converge in
//! `venture-cli`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    /// A state machine transition was attempted that is not allowed.
    #[error("Invalid state transition: {entity_type} {id} from {from} to {to}")]
    InvalidTransition {
        entity_type: String,
        id: String,
        from: String,
        to: String,
    },

    /// A record the caller expected inside a session is missing.
    #[error("Not found: {entity_type} {id}")]
    NotFound { entity_type: String, id: String },

    /// A record or snapshot breaks a consistency rule.
    #[error("Validation error: {0}")]
    Validation(String),
}
