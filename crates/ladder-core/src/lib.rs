//! # ladder-core: Pure Business Logic for Ladder
//!
//! This crate is the **heart** of Ladder, a merchant-facing volume discount
//! engine (buy-N-get-discount tiers). It contains all business logic as pure
//! functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Ladder Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Merchant Admin UI (embedded JS)                 │   │
//! │  │    Tier list ──► Create/Edit forms ──► Cart preview             │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ Request layer (auth, routing)          │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ ladder-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐                  │   │
//! │  │   │   types   │  │  resolve  │  │ validation│                  │   │
//! │  │   │   Tier    │  │ resolver  │  │   rules   │                  │   │
//! │  │   │ LineItem  │  │ rounding  │  │  checks   │                  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘                  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    ladder-db (Database Layer)                   │   │
//! │  │              SQLite queries, migrations, repositories           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (DiscountTier, LineItem, Resolution)
//! - [`resolve`] - The discount resolver: pure tier selection + arithmetic
//! - [`error`] - Domain error types
//! - [`validation`] - Admin write-path validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Explicit Ordering**: Tiers are an ordered sequence, never a set; the
//!    resolver depends on ascending `min_quantity` order for first-match-wins
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use ladder_core::resolve::resolve_discounts;
//! use ladder_core::types::{DiscountTier, DiscountType, LineItem};
//!
//! let tier = DiscountTier::sample("percentage-10", DiscountType::Percentage, 10.0, 3);
//! let cart = vec![LineItem::new("P1", 5, 10.0)];
//!
//! let outcome = resolve_discounts(&[tier], &cart);
//! // 10% of 5 × $10.00
//! assert_eq!(outcome.discount_amount, 5.0);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod resolve;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use ladder_core::DiscountTier` instead of
// `use ladder_core::types::DiscountTier`

pub use error::{CoreError, ValidationError};
pub use resolve::{resolve_discounts, round_to_cents};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum length of a tier title.
///
/// ## Business Reason
/// Titles render in the admin list and on checkout banners; anything longer
/// than this is truncated by every surface that displays it.
pub const MAX_TITLE_LEN: usize = 200;

/// Maximum length of a shop domain.
///
/// Matches the platform's own limit for `*.myshopify.com`-style domains.
pub const MAX_SHOP_LEN: usize = 255;

/// Upper bound for percentage discount values.
///
/// ## Business Reason
/// A percentage tier can never take off more than the full line total. This
/// input-time bound is what lets the resolver skip a clamp on the
/// percentage branch (see [`resolve`]).
pub const MAX_PERCENTAGE: f64 = 100.0;
