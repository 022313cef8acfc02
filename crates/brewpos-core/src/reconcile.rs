//! # Reconciliation Module
//!
//! End-of-shift arithmetic comparing declared cash to expected cash.
//!
//! ## The Computation
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Till Reconciliation                                  │
//! │                                                                         │
//! │  TillSession (CLOSED)              SaleLedger                          │
//! │  ├── initial_float: 10000          ├── sale #1 total: 2500             │
//! │  └── declared_final: 14200         └── sale #2 total: 1500             │
//! │            │                                 │                          │
//! │            │         total_sales = 4000 ◄───┘                          │
//! │            │                 │                                          │
//! │            ▼                 ▼                                          │
//! │       expected  = initial_float + total_sales  = 14000                 │
//! │       difference = declared_final − expected   =   200                 │
//! │                                                                         │
//! │  SIGN CONVENTION (do not flip):                                         │
//! │    difference > 0  →  overage   (more cash counted than expected)      │
//! │    difference < 0  →  shortfall (less cash counted than expected)      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The result is a derived value: recomputable at any time from the closed
//! session and its sales, never stored as mutable state.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::{TillSession, TillStatus};

// =============================================================================
// Reconciliation
// =============================================================================

/// Reconciliation summary for a closed till session.
///
/// This mirrors what the end-of-shift report screen displays: the session's
/// bookends, the sales recorded in between, and the signed difference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Reconciliation {
    /// The closed session this summary was derived from.
    pub till_session_id: String,

    /// The cashier who owned the session.
    pub cashier_id: String,

    /// Starting cash declared at open.
    pub initial_float_cents: i64,

    /// Sum of sale totals recorded against the session.
    pub total_sales_cents: i64,

    /// Number of sales recorded against the session.
    pub sale_count: i64,

    /// Cash the cashier counted at close.
    pub declared_final_cents: i64,

    /// initial_float + total_sales.
    pub expected_cents: i64,

    /// declared_final − expected. Positive = overage, negative = shortfall.
    pub difference_cents: i64,
}

impl Reconciliation {
    /// Derives the reconciliation for a closed session.
    ///
    /// Returns `None` unless the session is CLOSED with a declared final
    /// amount; reconciling an open session is a caller error surfaced by
    /// the engine as `NotClosed`.
    ///
    /// Pure function of its inputs: calling it twice with the same session
    /// and totals yields identical output.
    pub fn derive(
        session: &TillSession,
        total_sales_cents: i64,
        sale_count: i64,
    ) -> Option<Self> {
        if session.status != TillStatus::Closed {
            return None;
        }
        let declared_final_cents = session.declared_final_cents?;

        let expected_cents = session.initial_float_cents + total_sales_cents;

        Some(Reconciliation {
            till_session_id: session.id.clone(),
            cashier_id: session.cashier_id.clone(),
            initial_float_cents: session.initial_float_cents,
            total_sales_cents,
            sale_count,
            declared_final_cents,
            expected_cents,
            // declared − expected, never the reverse: flipping the
            // subtraction silently swaps overage/shortfall reporting.
            difference_cents: declared_final_cents - expected_cents,
        })
    }

    /// Returns the signed difference as Money.
    #[inline]
    pub fn difference(&self) -> Money {
        Money::from_cents(self.difference_cents)
    }

    /// Whether more cash was declared than expected.
    #[inline]
    pub fn is_overage(&self) -> bool {
        self.difference_cents > 0
    }

    /// Whether less cash was declared than expected.
    #[inline]
    pub fn is_shortfall(&self) -> bool {
        self.difference_cents < 0
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
