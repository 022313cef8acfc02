//! # Cart Service & Checkout
//!
//! Resolving catalog products into cart lines and committing carts as sales.
//!
//! ## Checkout Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Checkout Flow                                     │
//! │                                                                         │
//! │  add_cart_line(auth, cart, product_id, qty)                             │
//! │       │                                                                 │
//! │       ├── id not an active product ──► UnknownProduct                  │
//! │       ├── qty ≤ 0 ───────────────────► InvalidQuantity                 │
//! │       ├── merged qty > stock ────────► InsufficientStock (advisory)    │
//! │       ▼                                                                 │
//! │  cart line added / merged (price frozen at first add)                  │
//! │       │                                                                 │
//! │  checkout(auth, cart, session_id)                                       │
//! │       │                                                                 │
//! │       ├── cart empty ────────────────► EmptyCart (nothing touched)     │
//! │       ▼                                                                 │
//! │  one SQLite transaction (SaleRepository::commit_sale):                 │
//! │    session still open, and the caller's own? ──►                       │
//! │    conditional stock decrements ──► sale + line snapshots ──► COMMIT   │
//! │       │                                                                 │
//! │       ├── lost a stock race ─────────► InsufficientStock (authoritative│
//! │       │                                 with current availability)     │
//! │       ▼                                                                 │
//! │  CheckoutReceipt { sale_id, total } - caller clears the cart           │
//! │                                                                         │
//! │  The add-time stock check is advisory UX; the decrement inside the     │
//! │  transaction is the check that counts.                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};
use crate::Engine;
use brewpos_core::{AuthContext, Cart, Sale, SaleLine};
use brewpos_db::DbError;

/// What the cashier gets back from a successful checkout.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutReceipt {
    pub sale_id: String,
    pub total_cents: i64,
    pub line_count: usize,
}

/// A sale with its immutable line snapshots.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleDetail {
    pub sale: Sale,
    pub lines: Vec<SaleLine>,
}

impl Engine {
    /// Resolves a product id and adds it to the cart.
    ///
    /// The id must refer to an *active* product; deactivated products
    /// cannot be sold even if the frontend still shows a stale button.
    pub async fn add_cart_line(
        &self,
        auth: &AuthContext,
        cart: &mut Cart,
        product_id: &str,
        quantity: i64,
    ) -> EngineResult<()> {
        self.require_till_operator(auth, "add cart line")?;

        let product = self
            .db()
            .catalog()
            .get_active_product(product_id)
            .await?
            .ok_or_else(|| EngineError::UnknownProduct {
                id: product_id.to_string(),
            })?;

        cart.add_line(&product, quantity)?;

        debug!(
            product_id = %product.id,
            quantity,
            cart_total_cents = cart.total_cents(),
            "Cart line added"
        );
        Ok(())
    }

    /// Commits the cart as a sale against an open till session.
    ///
    /// The session must be the *caller's* open session: selling into
    /// another cashier's drawer would inflate that drawer's expected cash
    /// at reconciliation, so it is rejected as `TillNotOpen`.
    ///
    /// All-or-nothing: on any failure the catalog and ledger are untouched
    /// and the cart is still intact, so the caller can adjust and retry.
    /// On success the caller should clear the cart.
    pub async fn checkout(
        &self,
        auth: &AuthContext,
        cart: &Cart,
        session_id: &str,
    ) -> EngineResult<CheckoutReceipt> {
        self.require_till_operator(auth, "checkout")?;

        if cart.is_empty() {
            return Err(EngineError::EmptyCart);
        }

        let now = Utc::now();
        let sale = Sale {
            id: Uuid::new_v4().to_string(),
            till_session_id: session_id.to_string(),
            cashier_id: auth.cashier_id.clone(),
            total_cents: cart.total_cents(),
            created_at: now,
        };

        let lines: Vec<SaleLine> = cart
            .lines
            .iter()
            .map(|line| SaleLine {
                id: Uuid::new_v4().to_string(),
                sale_id: sale.id.clone(),
                product_id: line.product_id.clone(),
                name_snapshot: line.name.clone(),
                unit_price_cents: line.unit_price_cents,
                quantity: line.quantity,
                subtotal_cents: line.subtotal_cents(),
            })
            .collect();

        match self.db().sales().commit_sale(&sale, &lines).await {
            Ok(()) => {}
            Err(DbError::NotFound { .. }) => {
                return Err(EngineError::not_found("TillSession", session_id));
            }
            Err(DbError::InvalidState { .. }) => {
                return Err(EngineError::TillNotOpen {
                    session_id: session_id.to_string(),
                });
            }
            Err(DbError::StockConflict { product_id }) => {
                return Err(self.stock_conflict_detail(cart, &product_id).await);
            }
            Err(e) => return Err(e.into()),
        }

        info!(
            sale_id = %sale.id,
            session_id,
            total_cents = sale.total_cents,
            line_count = lines.len(),
            "Checkout committed"
        );

        Ok(CheckoutReceipt {
            sale_id: sale.id,
            total_cents: sale.total_cents,
            line_count: lines.len(),
        })
    }

    /// Gets a sale with its line snapshots.
    pub async fn get_sale(&self, auth: &AuthContext, sale_id: &str) -> EngineResult<SaleDetail> {
        self.require_till_operator(auth, "view sale")?;

        let sale = self
            .db()
            .sales()
            .get_by_id(sale_id)
            .await?
            .ok_or_else(|| EngineError::not_found("Sale", sale_id))?;
        let lines = self.db().sales().get_lines(sale_id).await?;

        Ok(SaleDetail { sale, lines })
    }

    /// Lists the calling cashier's most recent sales.
    pub async fn list_sales(&self, auth: &AuthContext, limit: u32) -> EngineResult<Vec<Sale>> {
        self.require_till_operator(auth, "list sales")?;

        let sales = self
            .db()
            .sales()
            .list_recent_by_cashier(&auth.cashier_id, limit)
            .await?;
        Ok(sales)
    }

    /// Turns a commit-time stock conflict into an error the cashier can
    /// act on: product name, what is actually left, what the cart wanted.
    async fn stock_conflict_detail(&self, cart: &Cart, product_id: &str) -> EngineError {
        let requested = cart
            .lines
            .iter()
            .find(|l| l.product_id == product_id)
            .map(|l| l.quantity)
            .unwrap_or(0);

        match self.db().catalog().get_product(product_id).await {
            Ok(Some(product)) if product.is_active => EngineError::InsufficientStock {
                name: product.name,
                available: product.stock,
                requested,
            },
            // Deactivated mid-checkout reads as "not sellable", not "out of stock".
            Ok(_) => EngineError::UnknownProduct {
                id: product_id.to_string(),
            },
            Err(e) => e.into(),
        }
    }
}
