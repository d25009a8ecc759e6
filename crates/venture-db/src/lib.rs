//! # venture-db
//!
//! libSQL session store for Venture.
//!
//! A session is persisted as one JSON snapshot row plus an append-only event
//! log. Every turn is written with [`VentureDb::save_turn`], which updates the
//! snapshot and appends the event inside a single transaction guarded by an
//! optimistic revision check, so a crash or a concurrent writer never leaves a
//! partially applied turn behind.

pub mod error;
pub mod helpers;
mod migrations;
pub mod repos;

use error::DatabaseError;
use libsql::Builder;
use tokio::sync::{Mutex, MutexGuard};

/// Central database handle for session storage.
pub struct VentureDb {
    #[allow(dead_code)]
    db: libsql::Database,
    conn: libsql::Connection,
    /// Serializes statements on the shared connection so one task's
    /// transaction is never interleaved with another task's reads.
    gate: Mutex<()>,
}

impl VentureDb {
    /// Open a local database at the given path, or `":memory:"` for tests.
    ///
    /// Runs migrations automatically on open.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or
    /// migrations fail.
    pub async fn open_local(path: &str) -> Result<Self, DatabaseError> {
        let db = Builder::new_local(path).build().await?;
        let conn = db.connect()?;

        // Enable foreign keys (must be per-connection in SQLite)
        conn.execute("PRAGMA foreign_keys = ON", ())
            .await
            .map_err(|e| DatabaseError::Migration(format!("PRAGMA foreign_keys: {e}")))?;

        let venture_db = Self {
            db,
            conn,
            gate: Mutex::new(()),
        };
        venture_db.run_migrations().await?;
        tracing::debug!(path, "session store opened");
        Ok(venture_db)
    }

    /// Access the underlying libSQL connection for direct queries.
    #[must_use]
    pub const fn conn(&self) -> &libsql::Connection {
        &self.conn
    }

    pub(crate) async fn lock(&self) -> MutexGuard<'_, ()> {
        self.gate.lock().await
    }

    /// Generate a prefixed ID via libSQL. Returns e.g., `"ses-a3f8b2c1"`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails or returns no rows.
    pub async fn generate_id(&self, prefix: &str) -> Result<String, DatabaseError> {
        let mut rows = self
            .conn
            .query(
                &format!("SELECT '{prefix}-' || lower(hex(randomblob(4)))"),
                (),
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        Ok(row.get::<String>(0)?)
    }
}
