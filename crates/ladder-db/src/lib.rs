//! # ladder-db: Database Layer for Ladder
//!
//! This crate provides tier storage for the Ladder volume discount engine.
//! It uses SQLite for local storage with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Ladder Data Flow                                 │
//! │                                                                         │
//! │  Request layer (admin forms / calculate endpoint)                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     ladder-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repository   │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │  (tier.rs)    │    │  (embedded)  │  │   │
//! │  │   │               │    │               │    │              │  │   │
//! │  │   │ SqlitePool    │◄───│ TierRepository│    │ 001_...sql   │  │   │
//! │  │   └───────────────┘    └───────┬───────┘    └──────────────┘  │   │
//! │  │                                │                               │   │
//! │  │   cart.rs: list_active(shop) ──┴──► ladder_core::resolve      │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite database file (one per deployment)                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Tier repository
//! - [`cart`] - Cart resolution over the store (the one read path the
//!   resolver depends on)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use ladder_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("path/to/ladder.db")).await?;
//!
//! let tiers = db.tiers().list_active("demo.myshopify.com").await?;
//! let outcome = ladder_db::cart::resolve_cart_discount(&db, "demo.myshopify.com", &items).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use cart::resolve_cart_discount;
pub use error::DbError;
pub use pool::{Database, DbConfig};
pub use repository::tier::TierRepository;
