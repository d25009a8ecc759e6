//! Session repository.
//!
//! Snapshots are written whole. `save_turn` is the only mutation path after
//! creation and applies the optimistic revision check.

use chrono::Utc;

use venture_core::actions::TurnEvent;
use venture_core::entities::Session;
use venture_core::ids::{PREFIX_EVENT, PREFIX_SESSION};
use venture_core::responses::SessionSummary;

use crate::VentureDb;
use crate::error::DatabaseError;
use crate::helpers::{get_opt_string, parse_datetime, parse_enum, to_json};

fn row_to_summary(row: &libsql::Row) -> Result<SessionSummary, DatabaseError> {
    Ok(SessionSummary {
        id: row.get::<String>(0)?,
        name: row.get::<String>(1)?,
        industry: get_opt_string(row, 2)?,
        phase: parse_enum(&row.get::<String>(3)?)?,
        revision: row.get::<i64>(4)?,
        updated_at: parse_datetime(&row.get::<String>(5)?)?,
    })
}

fn snapshot_to_session(snapshot: &str, revision: i64) -> Result<Session, DatabaseError> {
    let mut session: Session = serde_json::from_str(snapshot)
        .map_err(|e| DatabaseError::InvalidState(format!("corrupt session snapshot: {e}")))?;
    session.revision = revision;
    session
        .validate()
        .map_err(|e| DatabaseError::InvalidState(e.to_string()))?;
    Ok(session)
}

impl VentureDb {
    /// Create a new session at revision 0 and log a `created` event.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if database operations fail.
    pub async fn create_session(
        &self,
        name: &str,
        industry: Option<&str>,
    ) -> Result<Session, DatabaseError> {
        let _guard = self.lock().await;
        let now = Utc::now();
        let id = self.generate_id(PREFIX_SESSION).await?;
        let event_id = self.generate_id(PREFIX_EVENT).await?;
        let session = Session::new(
            id.clone(),
            name.trim().to_string(),
            industry.map(|i| i.trim().to_string()).filter(|i| !i.is_empty()),
            now,
        );
        let snapshot = to_json(&session)?;
        let detail = to_json(&TurnEvent::created())?;

        let tx = self.conn().transaction().await?;
        tx.execute(
            "INSERT INTO sessions (id, name, industry, phase, revision, snapshot, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, 0, ?5, ?6, ?7)",
            libsql::params![
                id.as_str(),
                session.name.as_str(),
                session.industry.as_deref(),
                session.phase.as_str(),
                snapshot,
                now.to_rfc3339(),
                now.to_rfc3339()
            ],
        )
        .await?;
        tx.execute(
            "INSERT INTO session_events (id, session_id, revision, kind, detail, created_at)
             VALUES (?1, ?2, 0, 'created', ?3, ?4)",
            libsql::params![event_id, id.as_str(), detail, now.to_rfc3339()],
        )
        .await?;
        tx.commit().await?;

        tracing::debug!(session = %id, "session created");
        Ok(session)
    }

    /// Load a session snapshot.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NoResult` if the session does not exist and
    /// `DatabaseError::InvalidState` if the stored snapshot is unreadable.
    pub async fn load_session(&self, id: &str) -> Result<Session, DatabaseError> {
        let _guard = self.lock().await;
        let mut rows = self
            .conn()
            .query(
                "SELECT snapshot, revision FROM sessions WHERE id = ?1",
                [id],
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        snapshot_to_session(&row.get::<String>(0)?, row.get::<i64>(1)?)
    }

    /// Persist the result of one turn.
    ///
    /// Inside one transaction: replaces the snapshot only if the stored
    /// revision still equals `expected_revision`, bumps the revision, and
    /// appends `event`. Returns the session as stored (with its new revision).
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Conflict` if another writer got there first,
    /// `DatabaseError::NoResult` if the session is gone, and other
    /// `DatabaseError`s on failure. Nothing is written in any error case.
    pub async fn save_turn(
        &self,
        session: &Session,
        expected_revision: i64,
        event: &TurnEvent,
    ) -> Result<Session, DatabaseError> {
        let _guard = self.lock().await;
        let event_id = self.generate_id(PREFIX_EVENT).await?;
        let now = Utc::now();

        let mut stored = session.clone();
        stored.revision = expected_revision + 1;
        let snapshot = to_json(&stored)?;
        let detail = to_json(event)?;

        let tx = self.conn().transaction().await?;
        let updated = tx
            .execute(
                "UPDATE sessions
                 SET name = ?1, industry = ?2, phase = ?3, revision = ?4, snapshot = ?5, updated_at = ?6
                 WHERE id = ?7 AND revision = ?8",
                libsql::params![
                    stored.name.as_str(),
                    stored.industry.as_deref(),
                    stored.phase.as_str(),
                    stored.revision,
                    snapshot,
                    now.to_rfc3339(),
                    stored.id.as_str(),
                    expected_revision
                ],
            )
            .await?;

        if updated == 0 {
            tx.rollback().await?;
            let actual = self.current_revision(&stored.id).await?;
            tracing::warn!(
                session = %stored.id,
                expected = expected_revision,
                actual,
                "revision conflict; turn not saved"
            );
            return Err(DatabaseError::Conflict {
                id: stored.id,
                expected: expected_revision,
                actual,
            });
        }

        tx.execute(
            "INSERT INTO session_events (id, session_id, revision, kind, detail, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            libsql::params![
                event_id,
                stored.id.as_str(),
                stored.revision,
                event.kind.as_str(),
                detail,
                now.to_rfc3339()
            ],
        )
        .await?;
        tx.commit().await?;

        tracing::debug!(session = %stored.id, revision = stored.revision, kind = %event.kind, "turn saved");
        Ok(stored)
    }

    /// List sessions, most recently updated first.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn list_sessions(&self, limit: u32) -> Result<Vec<SessionSummary>, DatabaseError> {
        let _guard = self.lock().await;
        let mut rows = self
            .conn()
            .query(
                "SELECT id, name, industry, phase, revision, updated_at FROM sessions
                 ORDER BY updated_at DESC, id LIMIT ?1",
                [i64::from(limit)],
            )
            .await?;
        let mut sessions = Vec::new();
        while let Some(row) = rows.next().await? {
            sessions.push(row_to_summary(&row)?);
        }
        Ok(sessions)
    }

    /// Delete a session and its events. Returns whether a row was removed.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the statement fails.
    pub async fn delete_session(&self, id: &str) -> Result<bool, DatabaseError> {
        let _guard = self.lock().await;
        let deleted = self
            .conn()
            .execute("DELETE FROM sessions WHERE id = ?1", [id])
            .await?;
        Ok(deleted > 0)
    }

    /// Revision currently stored for `id`. Caller holds the lock.
    async fn current_revision(&self, id: &str) -> Result<i64, DatabaseError> {
        let mut rows = self
            .conn()
            .query("SELECT revision FROM sessions WHERE id = ?1", [id])
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        Ok(row.get::<i64>(0)?)
    }
}
