//! # Sale Repository
//!
//! Append-only sale ledger and the atomic checkout commit.
//!
//! ## The Checkout Transaction
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                 commit_sale: one atomic unit                            │
//! │                                                                         │
//! │  BEGIN                                                                  │
//! │    │                                                                    │
//! │    ├── 1. SELECT till session ── not found?      → NotFound, ROLLBACK  │
//! │    │                     ├───── not open?        → InvalidState        │
//! │    │                     └───── other cashier's? → InvalidState        │
//! │    │                                                                    │
//! │    ├── 2. For every line:                                              │
//! │    │       UPDATE products SET stock = stock - qty                     │
//! │    │       WHERE id = ? AND stock >= qty AND is_active = 1             │
//! │    │       └── 0 rows affected → StockConflict, ROLLBACK               │
//! │    │           (a concurrent checkout won the race; nothing persists)  │
//! │    │                                                                    │
//! │    ├── 3. INSERT sale row                                              │
//! │    ├── 4. INSERT sale_lines snapshots                                  │
//! │    ▼                                                                    │
//! │  COMMIT                                                                 │
//! │                                                                         │
//! │  The conditional UPDATE is the authoritative stock check: two          │
//! │  checkouts whose combined quantity exceeds stock cannot both pass      │
//! │  it, and readers never see the decrement without the sale row.         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use brewpos_core::{Sale, SaleLine, TillSession, TillStatus};

/// Repository for sale database operations.
#[derive(Debug, Clone)]
pub struct SaleRepository {
    pool: SqlitePool,
}

impl SaleRepository {
    /// Creates a new SaleRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SaleRepository { pool }
    }

    /// Commits a sale atomically: re-validates the till session, decrements
    /// stock per line, and appends the sale with its line snapshots.
    ///
    /// ## All-Or-Nothing
    /// Any failure (missing session, session not open, stock conflict)
    /// rolls the transaction back; catalog stock and the ledger are left
    /// exactly as before the call. A `StockConflict` is safe for the
    /// caller to retry with a fresh cart.
    pub async fn commit_sale(&self, sale: &Sale, lines: &[SaleLine]) -> DbResult<()> {
        debug!(
            id = %sale.id,
            till_session_id = %sale.till_session_id,
            total_cents = sale.total_cents,
            line_count = lines.len(),
            "Committing sale"
        );

        let mut tx = self.pool.begin().await?;

        // 1. The session must still be open at commit time, and it must
        //    belong to the cashier recording the sale - a drawer only ever
        //    accumulates its own cashier's sales.
        let session = sqlx::query_as::<_, TillSession>(
            r#"
            SELECT id, cashier_id, status, initial_float_cents,
                   opened_at, closed_at, declared_final_cents
            FROM till_sessions
            WHERE id = ?1
            "#,
        )
        .bind(&sale.till_session_id)
        .fetch_optional(&mut *tx)
        .await?;

        match session {
            None => {
                return Err(DbError::not_found("TillSession", &sale.till_session_id));
            }
            Some(s) if s.status != TillStatus::Open => {
                return Err(DbError::invalid_state(
                    "TillSession",
                    &sale.till_session_id,
                    "open",
                ));
            }
            Some(s) if s.cashier_id != sale.cashier_id => {
                return Err(DbError::invalid_state(
                    "TillSession",
                    &sale.till_session_id,
                    "owned by the acting cashier",
                ));
            }
            Some(_) => {}
        }

        // 2. Conditional decrement per line. The WHERE clause is the
        //    authoritative stock check; zero rows = lost the race.
        let now = Utc::now();
        for line in lines {
            let result = sqlx::query(
                r#"
                UPDATE products
                SET stock = stock - ?2, updated_at = ?3
                WHERE id = ?1 AND stock >= ?2 AND is_active = 1
                "#,
            )
            .bind(&line.product_id)
            .bind(line.quantity)
            .bind(now)
            .execute(&mut *tx)
            .await?;

            if result.rows_affected() == 0 {
                return Err(DbError::StockConflict {
                    product_id: line.product_id.clone(),
                });
            }
        }

        // 3. Append the sale.
        sqlx::query(
            r#"
            INSERT INTO sales (id, till_session_id, cashier_id, total_cents, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(&sale.id)
        .bind(&sale.till_session_id)
        .bind(&sale.cashier_id)
        .bind(sale.total_cents)
        .bind(sale.created_at)
        .execute(&mut *tx)
        .await?;

        // 4. Append the line snapshots.
        for line in lines {
            sqlx::query(
                r#"
                INSERT INTO sale_lines (
                    id, sale_id, product_id, name_snapshot,
                    unit_price_cents, quantity, subtotal_cents
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
                "#,
            )
            .bind(&line.id)
            .bind(&line.sale_id)
            .bind(&line.product_id)
            .bind(&line.name_snapshot)
            .bind(line.unit_price_cents)
            .bind(line.quantity)
            .bind(line.subtotal_cents)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        debug!(id = %sale.id, "Sale committed");
        Ok(())
    }

    /// Gets a sale by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Sale>> {
        let sale = sqlx::query_as::<_, Sale>(
            r#"
            SELECT id, till_session_id, cashier_id, total_cents, created_at
            FROM sales
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(sale)
    }

    /// Gets all line snapshots for a sale, in insertion order.
    pub async fn get_lines(&self, sale_id: &str) -> DbResult<Vec<SaleLine>> {
        let lines = sqlx::query_as::<_, SaleLine>(
            r#"
            SELECT id, sale_id, product_id, name_snapshot,
                   unit_price_cents, quantity, subtotal_cents
            FROM sale_lines
            WHERE sale_id = ?1
            ORDER BY rowid
            "#,
        )
        .bind(sale_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(lines)
    }

    /// Sums and counts the sales recorded against a till session.
    ///
    /// ## Returns
    /// `(total_sales_cents, sale_count)` - the reconciliation inputs.
    pub async fn totals_for_session(&self, till_session_id: &str) -> DbResult<(i64, i64)> {
        let totals: (i64, i64) = sqlx::query_as(
            r#"
            SELECT COALESCE(SUM(total_cents), 0), COUNT(*)
            FROM sales
            WHERE till_session_id = ?1
            "#,
        )
        .bind(till_session_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(totals)
    }

    /// Lists sales whose timestamp falls in `[from, to_exclusive)`,
    /// ordered by timestamp ascending. Backs the daily/range reports.
    pub async fn list_between(
        &self,
        from: DateTime<Utc>,
        to_exclusive: DateTime<Utc>,
    ) -> DbResult<Vec<Sale>> {
        let sales = sqlx::query_as::<_, Sale>(
            r#"
            SELECT id, till_session_id, cashier_id, total_cents, created_at
            FROM sales
            WHERE created_at >= ?1 AND created_at < ?2
            ORDER BY created_at ASC
            "#,
        )
        .bind(from)
        .bind(to_exclusive)
        .fetch_all(&self.pool)
        .await?;

        Ok(sales)
    }

    /// Lists a cashier's most recent sales.
    pub async fn list_recent_by_cashier(
        &self,
        cashier_id: &str,
        limit: u32,
    ) -> DbResult<Vec<Sale>> {
        let sales = sqlx::query_as::<_, Sale>(
            r#"
            SELECT id, till_session_id, cashier_id, total_cents, created_at
            FROM sales
            WHERE cashier_id = ?1
            ORDER BY created_at DESC
            LIMIT ?2
            "#,
        )
        .bind(cashier_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(sales)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
