//! # Domain Types
//!
//! Core domain types used throughout BrewPOS.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │  TillSession    │   │      Sale       │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │   │  id (UUID)      │   │  id (UUID)      │       │
//! │  │  name           │   │  cashier_id     │   │  till_session   │       │
//! │  │  price_cents    │   │  status         │   │  cashier_id     │       │
//! │  │  stock          │   │  initial_float  │   │  total_cents    │       │
//! │  │  category_id    │   │  declared_final │   │  lines (child)  │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │   Category      │   │   TillStatus    │   │      Role       │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id, name       │   │  Open           │   │  Admin          │       │
//! │  │  is_active      │   │  Closed         │   │  Cashier        │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Ownership Rules
//! - The catalog exclusively owns `Product.stock`; only a committed sale
//!   (or an admin catalog edit) may change it
//! - The till register exclusively owns `TillSession` state transitions
//! - `Sale`/`SaleLine` are append-only snapshots, immutable once written

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Roles & Auth Context
// =============================================================================

/// Closed enumeration of user roles.
///
/// ## Why An Enum?
/// The original frontend gated navigation on string comparison against
/// role names stored in local storage. Scattered string equality is easy
/// to typo and impossible to exhaustively check; a closed enum with
/// capability methods is both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Full access: catalog administration plus till operation.
    Admin,
    /// Operates a till: opens/closes sessions, records sales.
    Cashier,
}

impl Role {
    /// Whether this role may open/close till sessions and record sales.
    #[inline]
    pub const fn can_operate_till(&self) -> bool {
        matches!(self, Role::Admin | Role::Cashier)
    }

    /// Whether this role may create/edit/deactivate catalog entries.
    #[inline]
    pub const fn can_administer_catalog(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

/// Authenticated caller identity, threaded explicitly into every engine
/// operation.
///
/// ## Design
/// Token validation and issuance happen outside this system. The transport
/// layer resolves its bearer token once and constructs an `AuthContext`;
/// the engine never consults ambient process state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct AuthContext {
    /// Identity of the acting cashier (UUID).
    pub cashier_id: String,
    /// The caller's role.
    pub role: Role,
}

impl AuthContext {
    /// Creates an auth context for the given cashier and role.
    pub fn new(cashier_id: impl Into<String>, role: Role) -> Self {
        AuthContext {
            cashier_id: cashier_id.into(),
            role,
        }
    }
}

// =============================================================================
// Category
// =============================================================================

/// A product category (e.g. "Coffee", "Pastries").
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Category {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Display name, unique among active categories.
    pub name: String,

    /// Whether the category is active (soft delete).
    pub is_active: bool,

    /// When the category was created.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    /// When the category was last updated.
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

// =============================================================================
// Product
// =============================================================================

/// A product available for sale.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Product {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Display name shown to cashier.
    pub name: String,

    /// Category this product belongs to (FK).
    pub category_id: String,

    /// Price in the smallest currency unit. Always > 0.
    pub price_cents: i64,

    /// Current stock level. Always ≥ 0; decremented only by sale commits.
    pub stock: i64,

    /// Whether product is active (soft delete).
    pub is_active: bool,

    /// When the product was created.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    /// When the product was last updated.
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Returns the price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }

    /// Checks whether the requested quantity is covered by current stock.
    #[inline]
    pub fn in_stock(&self, quantity: i64) -> bool {
        self.stock >= quantity
    }
}

// =============================================================================
// Till Session
// =============================================================================

/// The state of a till (cash drawer) session.
///
/// ## State Machine
/// ```text
///   open()            close()
/// ──────────► OPEN ──────────► CLOSED  (terminal)
/// ```
/// CLOSED is terminal for a session id. A cashier may open a *new* session
/// afterwards, but a closed session's declared amount can never be amended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum TillStatus {
    /// Sales may be recorded against this session.
    Open,
    /// Session is frozen; ready for reconciliation.
    Closed,
}

/// A cashier-scoped till session bounded by an open and a close event.
///
/// ## Invariants
/// - At most one OPEN session per cashier at any time (enforced by the
///   storage layer with a partial unique index)
/// - `closed_at` and `declared_final_cents` are set together, exactly once,
///   at close
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct TillSession {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// The cashier who owns this session.
    pub cashier_id: String,

    /// Current state.
    pub status: TillStatus,

    /// Starting cash amount declared at open. Always ≥ 0.
    pub initial_float_cents: i64,

    /// When the session was opened.
    #[ts(as = "String")]
    pub opened_at: DateTime<Utc>,

    /// When the session was closed. None while open.
    #[ts(as = "Option<String>")]
    pub closed_at: Option<DateTime<Utc>>,

    /// Cash amount the cashier counted at close. None while open.
    pub declared_final_cents: Option<i64>,
}

impl TillSession {
    /// Whether sales may currently be recorded against this session.
    #[inline]
    pub fn is_open(&self) -> bool {
        self.status == TillStatus::Open
    }

    /// Returns the initial float as Money.
    #[inline]
    pub fn initial_float(&self) -> Money {
        Money::from_cents(self.initial_float_cents)
    }
}

// =============================================================================
// Sale
// =============================================================================

/// A committed sale transaction.
///
/// Sales are append-only: once committed they are never updated or
/// deleted, which keeps reconciliation recomputable at any time.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Sale {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Till session this sale was recorded against (open at commit time).
    pub till_session_id: String,

    /// The cashier who recorded the sale.
    pub cashier_id: String,

    /// Sale total. Equals the sum of its line subtotals.
    pub total_cents: i64,

    /// When the sale was committed.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl Sale {
    /// Returns the total as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }
}

// =============================================================================
// Sale Line
// =============================================================================

/// A line item in a committed sale.
/// Uses snapshot pattern to freeze product data at time of sale.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct SaleLine {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// The sale this line belongs to.
    pub sale_id: String,

    /// The product sold.
    pub product_id: String,

    /// Product name at time of sale (frozen).
    pub name_snapshot: String,

    /// Unit price at time of sale (frozen at cart-add time).
    pub unit_price_cents: i64,

    /// Quantity sold. Always > 0.
    pub quantity: i64,

    /// Line subtotal (unit_price × quantity).
    pub subtotal_cents: i64,
}

impl SaleLine {
    /// Returns the unit price as Money.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.unit_price_cents)
    }

    /// Returns the subtotal as Money.
    #[inline]
    pub fn subtotal(&self) -> Money {
        Money::from_cents(self.subtotal_cents)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_capabilities() {
        assert!(Role::Admin.can_operate_till());
        assert!(Role::Admin.can_administer_catalog());
        assert!(Role::Cashier.can_operate_till());
        assert!(!Role::Cashier.can_administer_catalog());
    }

    #[test]
    fn test_product_in_stock() {
        let product = Product {
            id: "p1".to_string(),
            name: "Espresso".to_string(),
            category_id: "c1".to_string(),
            price_cents: 1500,
            stock: 3,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        assert!(product.in_stock(3));
        assert!(!product.in_stock(4));
    }

    #[test]
    fn test_till_session_is_open() {
        let session = TillSession {
            id: "t1".to_string(),
            cashier_id: "c1".to_string(),
            status: TillStatus::Open,
            initial_float_cents: 10000,
            opened_at: Utc::now(),
            closed_at: None,
            declared_final_cents: None,
        };

        assert!(session.is_open());
        assert_eq!(session.initial_float().cents(), 10000);
    }
}
