//! # Engine Error Type
//!
//! Unified error type for engine operations.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in BrewPOS                                │
//! │                                                                         │
//! │  Caller                         Engine                                  │
//! │  ──────                         ──────                                  │
//! │                                                                         │
//! │  engine.checkout(...)                                                   │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Engine operation                                                │  │
//! │  │  Result<T, EngineError>                                          │  │
//! │  │         │                                                        │  │
//! │  │    CoreError (cart/validation rules)  ──► From<CoreError> ──┐   │  │
//! │  │         │                                                    │   │  │
//! │  │    DbError (storage)  ─── contextual remap first ──────────► │   │  │
//! │  │         │                 (UniqueViolation → AlreadyOpen,    │   │  │
//! │  │         │                  StockConflict → InsufficientStock)│   │  │
//! │  │         ▼                                                    ▼   │  │
//! │  │  Success ──────────────────────────────────────────► EngineError │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  Storage errors that map onto a business rule are remapped at the      │
//! │  call site, where the context is known. The blanket From<DbError>      │
//! │  only catches genuine infrastructure failures.                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use brewpos_core::{CoreError, ValidationError};
use brewpos_db::DbError;

/// Errors from engine operations.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The cashier already has an open till session.
    #[error("Cashier {cashier_id} already has an open till session")]
    TillAlreadyOpen { cashier_id: String },

    /// The till session exists but is not open (or never existed where
    /// the distinction does not matter to the caller).
    #[error("Till session is not open: {session_id}")]
    TillNotOpen { session_id: String },

    /// Reconciliation requested for a session that has not closed yet.
    #[error("Till session {session_id} is not closed")]
    TillNotClosed { session_id: String },

    /// A referenced entity does not exist.
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// The product exists but cannot be sold (inactive or unknown).
    #[error("Product not available for sale: {id}")]
    UnknownProduct { id: String },

    /// Requested quantity exceeds what is in stock.
    #[error("Insufficient stock for {name}: {available} available, {requested} requested")]
    InsufficientStock {
        name: String,
        available: i64,
        requested: i64,
    },

    /// Checkout attempted with an empty cart.
    #[error("Cannot check out an empty cart")]
    EmptyCart,

    /// Quantity must be strictly positive.
    #[error("Invalid quantity: {requested}")]
    InvalidQuantity { requested: i64 },

    /// Cash amounts (float, declared count) must not be negative.
    #[error("Invalid cash amount: {amount_cents}")]
    InvalidAmount { amount_cents: i64 },

    /// Report range where `from` is after `to`.
    #[error("Invalid report range: {from} is after {to}")]
    InvalidRange { from: String, to: String },

    /// The caller's role does not permit the operation.
    #[error("Role does not permit this operation: {action}")]
    Forbidden { action: String },

    /// Input validation failed.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Storage failure with no business meaning.
    #[error("Database error: {0}")]
    Database(#[from] DbError),
}

impl EngineError {
    pub fn not_found(entity: &str, id: &str) -> Self {
        EngineError::NotFound {
            entity: entity.to_string(),
            id: id.to_string(),
        }
    }

    pub fn forbidden(action: &str) -> Self {
        EngineError::Forbidden {
            action: action.to_string(),
        }
    }
}

impl From<CoreError> for EngineError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::InvalidQuantity { requested } => {
                EngineError::InvalidQuantity { requested }
            }
            CoreError::InsufficientStock {
                name,
                available,
                requested,
            } => EngineError::InsufficientStock {
                name,
                available,
                requested,
            },
            CoreError::EmptyCart => EngineError::EmptyCart,
            CoreError::Validation(e) => EngineError::Validation(e),
        }
    }
}

/// Result alias for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;
