//! Load, apply, persist: the unit of work behind every CLI command and HTTP
//! request.
//!
//! A turn reads the session snapshot, runs it through the orchestrator and
//! writes the result back with the revision it was loaded at. Refused turns
//! leave the store untouched, so a failed turn never bumps the revision.

use serde::Serialize;
use thiserror::Error;
use venture_core::actions::{OutputAction, TurnEvent, TurnInput};
use venture_core::entities::{Session, SessionEvent};
use venture_core::responses::{DeleteResponse, SessionSummary, TurnResponse};
use venture_db::VentureDb;
use venture_db::error::DatabaseError;
use venture_engine::PhaseOrchestrator;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("session '{0}' not found")]
    NotFound(String),

    #[error(transparent)]
    Store(DatabaseError),
}

impl ServiceError {
    fn from_store(id: &str, error: DatabaseError) -> Self {
        match error {
            DatabaseError::NoResult => Self::NotFound(id.to_string()),
            other => Self::Store(other),
        }
    }
}

/// A stored session together with the action it is waiting on.
#[derive(Debug, Clone, Serialize)]
pub struct SessionView {
    pub session: Session,
    pub action: OutputAction,
}

pub struct ConsultationService {
    db: VentureDb,
    orchestrator: PhaseOrchestrator,
}

impl ConsultationService {
    #[must_use]
    pub const fn new(db: VentureDb, orchestrator: PhaseOrchestrator) -> Self {
        Self { db, orchestrator }
    }

    /// Create a session and return its opening question.
    ///
    /// # Errors
    ///
    /// `InvalidRequest` for a blank name, `Store` if the insert fails.
    pub async fn create_session(
        &self,
        name: &str,
        industry: Option<&str>,
    ) -> Result<TurnResponse, ServiceError> {
        if name.trim().is_empty() {
            return Err(ServiceError::InvalidRequest(
                "name must not be empty".to_string(),
            ));
        }
        let session = self
            .db
            .create_session(name, industry)
            .await
            .map_err(ServiceError::Store)?;
        tracing::info!(session = %session.id, "session created");
        let action = self.orchestrator.current_action(&session);
        Ok(TurnResponse::new(&session, action))
    }

    pub async fn show(&self, id: &str) -> Result<SessionView, ServiceError> {
        let session = self.load(id).await?;
        let action = self.orchestrator.current_action(&session);
        Ok(SessionView { session, action })
    }

    /// Process one turn and persist it.
    ///
    /// # Errors
    ///
    /// `NotFound` for an unknown session and `Store` for storage failures,
    /// including `DatabaseError::Conflict` when another writer saved the
    /// session after it was loaded. Turns the orchestrator refuses are not
    /// errors here: they come back as an `OutputAction::Error`.
    pub async fn apply(&self, id: &str, input: TurnInput) -> Result<TurnResponse, ServiceError> {
        let session = self.load(id).await?;
        let expected = session.revision;
        let (next, action) = self.orchestrator.handle_turn(session, input.clone()).await;

        if action.is_error() {
            tracing::debug!(session = %id, action = %action.render_text(), "turn refused; nothing persisted");
            return Ok(TurnResponse::new(&next, action));
        }

        let event = TurnEvent::from_turn(&input, &action);
        let saved = self
            .db
            .save_turn(&next, expected, &event)
            .await
            .map_err(|error| ServiceError::from_store(id, error))?;
        tracing::debug!(session = %id, revision = saved.revision, action = action.name(), "turn saved");
        Ok(TurnResponse::new(&saved, action))
    }

    pub async fn list(&self, limit: u32) -> Result<Vec<SessionSummary>, ServiceError> {
        self.db.list_sessions(limit).await.map_err(ServiceError::Store)
    }

    pub async fn events(&self, id: &str) -> Result<Vec<SessionEvent>, ServiceError> {
        self.load(id).await?;
        self.db
            .list_events(id)
            .await
            .map_err(|error| ServiceError::from_store(id, error))
    }

    pub async fn delete(&self, id: &str) -> Result<DeleteResponse, ServiceError> {
        let deleted = self
            .db
            .delete_session(id)
            .await
            .map_err(|error| ServiceError::from_store(id, error))?;
        if !deleted {
            return Err(ServiceError::NotFound(id.to_string()));
        }
        Ok(DeleteResponse {
            session_id: id.to_string(),
            deleted,
        })
    }

    async fn load(&self, id: &str) -> Result<Session, ServiceError> {
        self.db
            .load_session(id)
            .await
            .map_err(|error| ServiceError::from_store(id, error))
    }
}
