//! # Error Types
//!
//! Domain-specific error types for ladder-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  ladder-core errors (this file)                                        │
//! │  ├── CoreError        - General domain errors                          │
//! │  └── ValidationError  - Admin input validation failures                │
//! │                                                                         │
//! │  ladder-db errors (separate crate)                                     │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  Request layer (outside this workspace)                                │
//! │  └── 400-class for invalid bodies, 500-class for the unexpected        │
//! │                                                                         │
//! │  The resolver itself never fails on well-typed input: absent tiers     │
//! │  degrade to a zero discount, not an error.                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (field names, ids)
//! 3. Errors are enum variants, never String

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These represent business rule violations on the admin write path. They
/// should be caught and translated to user-facing messages by the request
/// layer.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Tier cannot be found for the requesting shop.
    ///
    /// ## When This Occurs
    /// - Tier ID doesn't exist
    /// - Tier belongs to a different shop (queries are shop-scoped)
    #[error("Discount tier not found: {0}")]
    TierNotFound(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These occur when admin form input doesn't meet requirements. Used for
/// early validation before a tier is written to the store.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: f64, max: f64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// A [min, max] pair where max undercuts min.
    #[error("max_quantity ({max}) must not be less than min_quantity ({min})")]
    InvertedRange { min: i64, max: i64 },

    /// Invalid format (e.g., non-finite number, invalid UUID).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
