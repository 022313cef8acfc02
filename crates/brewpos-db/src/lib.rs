//! # brewpos-db: Database Layer for BrewPOS
//!
//! This crate provides database access for the BrewPOS café point-of-sale
//! backend. It uses SQLite for local storage with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        BrewPOS Data Flow                                │
//! │                                                                         │
//! │  Engine operation (checkout, open_till, daily_report)                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    brewpos-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌────────────────┐    ┌─────────────┐  │   │
//! │  │   │   Database    │    │  Repositories  │    │ Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │                │    │ (embedded)  │  │   │
//! │  │   │               │    │ CatalogRepo    │    │             │  │   │
//! │  │   │ SqlitePool    │◄───│ TillSessionRepo│    │ 001_initial │  │   │
//! │  │   │ Connection    │    │ SaleRepo       │    │ _schema.sql │  │   │
//! │  │   │ Management    │    │                │    │             │  │   │
//! │  │   └───────────────┘    └────────────────┘    └─────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite database file (WAL mode, foreign keys on)                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations (catalog, till, sale)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use brewpos_db::{Database, DbConfig};
//!
//! // Create database with default config (runs migrations)
//! let config = DbConfig::new("path/to/brewpos.db");
//! let db = Database::new(config).await?;
//!
//! // Use repositories
//! let products = db.catalog().list_active_products().await?;
//! let open = db.tills().find_open_by_cashier("cashier-1").await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use repository::catalog::{CatalogRepository, ProductListing};
pub use repository::sale::SaleRepository;
pub use repository::till::TillSessionRepository;
