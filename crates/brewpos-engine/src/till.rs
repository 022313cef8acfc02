//! # Till Lifecycle
//!
//! Opening and closing cash drawer sessions.
//!
//! ## Session Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                   Till Session Lifecycle                                │
//! │                                                                         │
//! │  open_till(auth, initial_float)                                         │
//! │       │                                                                 │
//! │       ├── float < 0 ───────────────► InvalidAmount                     │
//! │       ├── open session exists ─────► TillAlreadyOpen                   │
//! │       │     (checked up front AND enforced by the partial unique       │
//! │       │      index, so a concurrent double-open loses cleanly)         │
//! │       ▼                                                                 │
//! │    OPEN ──── sales recorded against the session ────┐                  │
//! │       │                                             │                  │
//! │  close_till(auth, session_id, declared_final)       │                  │
//! │       │                                             │                  │
//! │       ├── declared < 0 ────────────► InvalidAmount  │                  │
//! │       ├── unknown id ──────────────► NotFound       │                  │
//! │       ├── already closed ──────────► TillNotOpen    │                  │
//! │       ▼                                             ▼                  │
//! │   CLOSED (terminal) ──► summary with reconciliation numbers            │
//! │                                                                         │
//! │  A new day means a NEW session with a new id; CLOSED never reopens.    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};
use crate::Engine;
use brewpos_core::{AuthContext, Reconciliation, TillSession, TillStatus};
use brewpos_db::DbError;

/// A closed session together with its cash reconciliation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClosedTillSummary {
    pub session: TillSession,
    pub reconciliation: Reconciliation,
}

impl Engine {
    /// Opens a till session for the calling cashier.
    ///
    /// At most one open session per cashier: a second open fails with
    /// `TillAlreadyOpen` whether it arrives sequentially (caught by the
    /// up-front check) or concurrently (caught by the storage index).
    pub async fn open_till(
        &self,
        auth: &AuthContext,
        initial_float_cents: i64,
    ) -> EngineResult<TillSession> {
        self.require_till_operator(auth, "open till")?;

        if initial_float_cents < 0 {
            return Err(EngineError::InvalidAmount {
                amount_cents: initial_float_cents,
            });
        }

        if let Some(open) = self.db().tills().find_open_by_cashier(&auth.cashier_id).await? {
            debug!(session_id = %open.id, "Open session already exists");
            return Err(EngineError::TillAlreadyOpen {
                cashier_id: auth.cashier_id.clone(),
            });
        }

        let session = TillSession {
            id: Uuid::new_v4().to_string(),
            cashier_id: auth.cashier_id.clone(),
            status: TillStatus::Open,
            initial_float_cents,
            opened_at: Utc::now(),
            closed_at: None,
            declared_final_cents: None,
        };

        match self.db().tills().insert(&session).await {
            Ok(()) => {}
            // Lost a concurrent open race: the partial unique index fired.
            Err(DbError::UniqueViolation { .. }) => {
                return Err(EngineError::TillAlreadyOpen {
                    cashier_id: auth.cashier_id.clone(),
                });
            }
            Err(e) => return Err(e.into()),
        }

        info!(
            session_id = %session.id,
            cashier_id = %auth.cashier_id,
            initial_float_cents,
            "Till session opened"
        );
        Ok(session)
    }

    /// Closes a till session with the declared (counted) drawer amount.
    ///
    /// Returns the closed session together with its reconciliation, so the
    /// caller sees expected vs declared without a second round trip.
    pub async fn close_till(
        &self,
        auth: &AuthContext,
        session_id: &str,
        declared_final_cents: i64,
    ) -> EngineResult<ClosedTillSummary> {
        self.require_till_operator(auth, "close till")?;

        if declared_final_cents < 0 {
            return Err(EngineError::InvalidAmount {
                amount_cents: declared_final_cents,
            });
        }

        let closed = match self
            .db()
            .tills()
            .close(session_id, declared_final_cents, Utc::now())
            .await
        {
            Ok(session) => session,
            Err(DbError::InvalidState { .. }) => {
                return Err(EngineError::TillNotOpen {
                    session_id: session_id.to_string(),
                });
            }
            Err(DbError::NotFound { .. }) => {
                return Err(EngineError::not_found("TillSession", session_id));
            }
            Err(e) => return Err(e.into()),
        };

        info!(
            session_id = %closed.id,
            cashier_id = %closed.cashier_id,
            declared_final_cents,
            "Till session closed"
        );

        self.summarize_closed(closed).await
    }

    /// Returns the calling cashier's open session, if any.
    ///
    /// "No open till" is a normal state (start of shift), not an error.
    pub async fn current_till(&self, auth: &AuthContext) -> EngineResult<Option<TillSession>> {
        self.require_till_operator(auth, "view current till")?;

        let session = self.db().tills().find_open_by_cashier(&auth.cashier_id).await?;
        Ok(session)
    }

    /// Lists closed sessions with their reconciliations, most recent first.
    pub async fn list_closed_tills(
        &self,
        auth: &AuthContext,
    ) -> EngineResult<Vec<ClosedTillSummary>> {
        self.require_till_operator(auth, "list closed tills")?;

        let sessions = self.db().tills().list_closed().await?;
        let mut summaries = Vec::with_capacity(sessions.len());
        for session in sessions {
            summaries.push(self.summarize_closed(session).await?);
        }
        Ok(summaries)
    }

    /// Attaches sale totals and reconciliation to a closed session.
    async fn summarize_closed(&self, session: TillSession) -> EngineResult<ClosedTillSummary> {
        let (total_sales_cents, sale_count) =
            self.db().sales().totals_for_session(&session.id).await?;

        let reconciliation = Reconciliation::derive(&session, total_sales_cents, sale_count)
            .ok_or_else(|| EngineError::TillNotClosed {
                session_id: session.id.clone(),
            })?;

        Ok(ClosedTillSummary {
            session,
            reconciliation,
        })
    }

    pub(crate) fn require_till_operator(
        &self,
        auth: &AuthContext,
        action: &str,
    ) -> EngineResult<()> {
        if auth.role.can_operate_till() {
            Ok(())
        } else {
            Err(EngineError::forbidden(action))
        }
    }
}
