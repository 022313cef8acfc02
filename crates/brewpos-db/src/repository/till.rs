//! # Till Session Repository
//!
//! Database operations for till (cash drawer) sessions.
//!
//! ## Session State Machine, As Stored
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     till_sessions rows                                  │
//! │                                                                         │
//! │  insert (status='open')                                                 │
//! │       │                                                                 │
//! │       │   ← partial UNIQUE index (cashier_id WHERE status='open')      │
//! │       │     rejects a second open row for the same cashier             │
//! │       ▼                                                                 │
//! │  UPDATE ... SET status='closed', closed_at, declared_final_cents       │
//! │         WHERE id = ? AND status = 'open'                               │
//! │       │                                                                 │
//! │       │   ← the WHERE clause makes close() a compare-and-set:          │
//! │       │     zero rows affected means the session was already closed    │
//! │       ▼                                                                 │
//! │  terminal - no UPDATE path exists back to 'open'                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use brewpos_core::{TillSession, TillStatus};

const SESSION_COLUMNS: &str = "id, cashier_id, status, initial_float_cents, \
                               opened_at, closed_at, declared_final_cents";

/// Repository for till session database operations.
#[derive(Debug, Clone)]
pub struct TillSessionRepository {
    pool: SqlitePool,
}

impl TillSessionRepository {
    /// Creates a new TillSessionRepository.
    pub fn new(pool: SqlitePool) -> Self {
        TillSessionRepository { pool }
    }

    /// Inserts a new session row.
    ///
    /// If the cashier already has an open session, the partial unique index
    /// rejects the insert and this returns `DbError::UniqueViolation` - the
    /// engine maps that to `AlreadyOpen`. This is what makes concurrent
    /// `open` calls for the same cashier safe.
    pub async fn insert(&self, session: &TillSession) -> DbResult<()> {
        debug!(id = %session.id, cashier_id = %session.cashier_id, "Inserting till session");

        sqlx::query(
            r#"
            INSERT INTO till_sessions (
                id, cashier_id, status, initial_float_cents,
                opened_at, closed_at, declared_final_cents
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
        )
        .bind(&session.id)
        .bind(&session.cashier_id)
        .bind(session.status)
        .bind(session.initial_float_cents)
        .bind(session.opened_at)
        .bind(session.closed_at)
        .bind(session.declared_final_cents)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Gets a session by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<TillSession>> {
        let session = sqlx::query_as::<_, TillSession>(&format!(
            "SELECT {SESSION_COLUMNS} FROM till_sessions WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(session)
    }

    /// Finds the open session for a cashier, if any.
    ///
    /// Direct indexed lookup - the "current till" question is answered
    /// here, not by filtering a list client-side.
    pub async fn find_open_by_cashier(&self, cashier_id: &str) -> DbResult<Option<TillSession>> {
        let session = sqlx::query_as::<_, TillSession>(&format!(
            "SELECT {SESSION_COLUMNS} FROM till_sessions \
             WHERE cashier_id = ?1 AND status = ?2"
        ))
        .bind(cashier_id)
        .bind(TillStatus::Open)
        .fetch_optional(&self.pool)
        .await?;

        Ok(session)
    }

    /// Closes a session: sets status, close timestamp and declared final
    /// amount in one conditional UPDATE.
    ///
    /// ## Returns
    /// The closed session row. `DbError::InvalidState` if the session
    /// exists but is not open (zero rows affected), `DbError::NotFound`
    /// if it does not exist.
    pub async fn close(
        &self,
        id: &str,
        declared_final_cents: i64,
        closed_at: DateTime<Utc>,
    ) -> DbResult<TillSession> {
        debug!(id = %id, declared_final_cents, "Closing till session");

        let result = sqlx::query(
            r#"
            UPDATE till_sessions SET
                status = ?2,
                closed_at = ?3,
                declared_final_cents = ?4
            WHERE id = ?1 AND status = ?5
            "#,
        )
        .bind(id)
        .bind(TillStatus::Closed)
        .bind(closed_at)
        .bind(declared_final_cents)
        .bind(TillStatus::Open)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            // Distinguish "never existed" from "exists but not open".
            return match self.get_by_id(id).await? {
                Some(_) => Err(DbError::invalid_state("TillSession", id, "open")),
                None => Err(DbError::not_found("TillSession", id)),
            };
        }

        self.get_by_id(id)
            .await?
            .ok_or_else(|| DbError::not_found("TillSession", id))
    }

    /// Lists closed sessions, most recently closed first.
    pub async fn list_closed(&self) -> DbResult<Vec<TillSession>> {
        let sessions = sqlx::query_as::<_, TillSession>(&format!(
            "SELECT {SESSION_COLUMNS} FROM till_sessions \
             WHERE status = ?1 ORDER BY closed_at DESC"
        ))
        .bind(TillStatus::Closed)
        .fetch_all(&self.pool)
        .await?;

        Ok(sessions)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
