//! # Reconciliation Service
//!
//! Computes the expected-vs-declared cash comparison for a closed session.
//! The arithmetic lives in `brewpos_core::reconcile`; this module fetches
//! the inputs and refuses sessions that cannot be reconciled yet.

use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::Engine;
use brewpos_core::{AuthContext, Reconciliation};

impl Engine {
    /// Reconciles a closed till session.
    ///
    /// Derived on demand from the session row and the sale ledger; nothing
    /// is stored, so calling this any number of times yields the same
    /// numbers.
    ///
    /// ## Errors
    /// - `NotFound` - no such session
    /// - `TillNotClosed` - the session is still open; there is no declared
    ///   amount to compare against yet
    pub async fn reconcile(
        &self,
        auth: &AuthContext,
        session_id: &str,
    ) -> EngineResult<Reconciliation> {
        self.require_till_operator(auth, "reconcile till")?;

        let session = self
            .db()
            .tills()
            .get_by_id(session_id)
            .await?
            .ok_or_else(|| EngineError::not_found("TillSession", session_id))?;

        let (total_sales_cents, sale_count) =
            self.db().sales().totals_for_session(session_id).await?;

        let reconciliation = Reconciliation::derive(&session, total_sales_cents, sale_count)
            .ok_or_else(|| EngineError::TillNotClosed {
                session_id: session_id.to_string(),
            })?;

        debug!(
            session_id,
            expected_cents = reconciliation.expected_cents,
            difference_cents = reconciliation.difference_cents,
            "Session reconciled"
        );
        Ok(reconciliation)
    }
}
