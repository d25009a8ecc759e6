//! Session event log queries.

use venture_core::entities::SessionEvent;

use crate::VentureDb;
use crate::error::DatabaseError;
use crate::helpers::{get_opt_string, parse_datetime, parse_enum, parse_optional_json};

fn row_to_event(row: &libsql::Row) -> Result<SessionEvent, DatabaseError> {
    Ok(SessionEvent {
        id: row.get::<String>(0)?,
        session_id: row.get::<String>(1)?,
        revision: row.get::<i64>(2)?,
        kind: parse_enum(&row.get::<String>(3)?)?,
        detail: parse_optional_json(get_opt_string(row, 4)?.as_deref())?,
        created_at: parse_datetime(&row.get::<String>(5)?)?,
    })
}

impl VentureDb {
    /// Events of a session in revision order.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails or a row cannot be parsed.
    pub async fn list_events(&self, session_id: &str) -> Result<Vec<SessionEvent>, DatabaseError> {
        let _guard = self.lock().await;
        let mut rows = self
            .conn()
            .query(
                "SELECT id, session_id, revision, kind, detail, created_at
                 FROM session_events WHERE session_id = ?1 ORDER BY revision, created_at",
                [session_id],
            )
            .await?;
        let mut events = Vec::new();
        while let Some(row) = rows.next().await? {
            events.push(row_to_event(&row)?);
        }
        Ok(events)
    }
}
