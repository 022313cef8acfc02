//! # brewpos-engine: Service Layer for BrewPOS
//!
//! The authoritative café point-of-sale service layer. Every operation a
//! frontend performs goes through the [`Engine`]: till lifecycle, cart
//! lines, atomic checkout, reconciliation, reports and catalog maintenance.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        BrewPOS Layers                                   │
//! │                                                                         │
//! │  Transport (HTTP handler, IPC command, test)                            │
//! │       │                                                                 │
//! │       │  AuthContext { cashier_id, role } threaded per call             │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 brewpos-engine (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   till.rs ──────── open / close / current / closed list        │   │
//! │  │   checkout.rs ──── cart lines + atomic sale commit             │   │
//! │  │   reconciliation.rs ─ expected vs declared cash                │   │
//! │  │   reports.rs ───── daily / range sale aggregation              │   │
//! │  │   catalog.rs ───── admin-gated catalog maintenance             │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                             │                                   │
//! │       ▼                             ▼                                   │
//! │  brewpos-core (pure rules)    brewpos-db (SQLite repositories)         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use brewpos_core::{AuthContext, Cart, Role};
//! use brewpos_db::{Database, DbConfig};
//! use brewpos_engine::Engine;
//!
//! let db = Database::new(DbConfig::new("brewpos.db")).await?;
//! let engine = Engine::new(db);
//!
//! let auth = AuthContext::new("cashier-1", Role::Cashier);
//! let session = engine.open_till(&auth, 10_000).await?;
//!
//! let mut cart = Cart::new();
//! engine.add_cart_line(&auth, &mut cart, &product_id, 2).await?;
//! let receipt = engine.checkout(&auth, &cart, &session.id).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod checkout;
pub mod error;
pub mod reconciliation;
pub mod reports;
pub mod till;

// =============================================================================
// Re-exports
// =============================================================================

pub use catalog::ProductInput;
pub use checkout::{CheckoutReceipt, SaleDetail};
pub use error::{EngineError, EngineResult};
pub use reports::SalesReport;
pub use till::ClosedTillSummary;

use brewpos_db::Database;

/// The BrewPOS service engine.
///
/// Cheap to clone; all state lives in the database. Carts are in-memory
/// values owned by the caller and passed into operations explicitly.
#[derive(Debug, Clone)]
pub struct Engine {
    db: Database,
}

impl Engine {
    /// Creates an engine over an initialized database.
    pub fn new(db: Database) -> Self {
        Engine { db }
    }

    /// Returns the underlying database handle.
    pub fn db(&self) -> &Database {
        &self.db
    }
}
