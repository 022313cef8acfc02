//! # Sales Reports
//!
//! Daily and date-range sale aggregation.
//!
//! ## Period Semantics
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  range_report(from: 2026-08-01, to: 2026-08-03)   (dates inclusive)    │
//! │                                                                         │
//! │  2026-08-01T00:00:00Z                      2026-08-04T00:00:00Z        │
//! │        │                                         │                      │
//! │        ▼                                         ▼                      │
//! │        [═════════════ sales counted ═════════════)                      │
//! │                                                                         │
//! │  Inclusive calendar dates become a half-open UTC instant range:        │
//! │  [from 00:00, (to + 1 day) 00:00). A sale at 23:59:59 on `to` is in;   │
//! │  midnight of the next day is out.                                      │
//! │                                                                         │
//! │  daily_report(date) ≡ range_report(date, date).                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::Engine;
use brewpos_core::{AuthContext, Sale};

/// Aggregated sales over an inclusive date range.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesReport {
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub sale_count: usize,
    pub total_sold_cents: i64,
    /// The sales in the period, ordered by timestamp ascending.
    pub sales: Vec<Sale>,
}

impl Engine {
    /// Report for a single calendar day (UTC).
    pub async fn daily_report(
        &self,
        auth: &AuthContext,
        date: NaiveDate,
    ) -> EngineResult<SalesReport> {
        self.range_report(auth, date, date).await
    }

    /// Report over an inclusive date range (UTC).
    ///
    /// `from > to` is `InvalidRange`; `from == to` is a one-day report.
    /// An empty period is a valid report with zero sales.
    pub async fn range_report(
        &self,
        auth: &AuthContext,
        from: NaiveDate,
        to: NaiveDate,
    ) -> EngineResult<SalesReport> {
        self.require_till_operator(auth, "view reports")?;

        if from > to {
            return Err(EngineError::InvalidRange {
                from: from.to_string(),
                to: to.to_string(),
            });
        }

        let start = from.and_time(NaiveTime::MIN).and_utc();
        let end = to
            .succ_opt()
            .ok_or_else(|| EngineError::InvalidRange {
                from: from.to_string(),
                to: to.to_string(),
            })?
            .and_time(NaiveTime::MIN)
            .and_utc();

        let sales = self.db().sales().list_between(start, end).await?;
        let total_sold_cents = sales.iter().map(|s| s.total_cents).sum();

        debug!(
            %from,
            %to,
            sale_count = sales.len(),
            total_sold_cents,
            "Report computed"
        );

        Ok(SalesReport {
            from,
            to,
            sale_count: sales.len(),
            total_sold_cents,
            sales,
        })
    }
}
