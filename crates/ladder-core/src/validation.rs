//! # Validation Module
//!
//! Admin write-path validation for Ladder.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Admin form (JS)                                              │
//! │  ├── Required markers, min/max attributes                              │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE (Rust, before any write)                         │
//! │  └── Business rule validation                                          │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL constraints                                              │
//! │  └── CHECK on discount_type                                            │
//! │                                                                         │
//! │  The resolver itself does NOT validate: it assumes tiers passed these  │
//! │  checks when written. In particular, percentage <= 100 here is what    │
//! │  makes the resolver's unclamped percentage branch safe.                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::types::DiscountType;
use crate::{MAX_PERCENTAGE, MAX_SHOP_LEN, MAX_TITLE_LEN};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a shop domain.
///
/// ## Rules
/// - Must not be empty
/// - Must be at most 255 characters
pub fn validate_shop(shop: &str) -> ValidationResult<()> {
    let shop = shop.trim();

    if shop.is_empty() {
        return Err(ValidationError::Required {
            field: "shop".to_string(),
        });
    }

    if shop.len() > MAX_SHOP_LEN {
        return Err(ValidationError::TooLong {
            field: "shop".to_string(),
            max: MAX_SHOP_LEN,
        });
    }

    Ok(())
}

/// Validates a tier title.
///
/// ## Rules
/// - Must not be empty after trimming
/// - Must be at most 200 characters
///
/// ## Example
/// ```rust
/// use ladder_core::validation::validate_title;
///
/// assert!(validate_title("Buy 3 Get 10% Off").is_ok());
/// assert!(validate_title("   ").is_err());
/// ```
pub fn validate_title(title: &str) -> ValidationResult<()> {
    let title = title.trim();

    if title.is_empty() {
        return Err(ValidationError::Required {
            field: "title".to_string(),
        });
    }

    if title.len() > MAX_TITLE_LEN {
        return Err(ValidationError::TooLong {
            field: "title".to_string(),
            max: MAX_TITLE_LEN,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a discount value for a given discount type.
///
/// ## Rules
/// - Must be finite and non-negative
/// - Percentage values must not exceed 100
///
/// The 100% cap is load-bearing: the resolver applies percentage discounts
/// without clamping to the line total, relying on this bound.
pub fn validate_discount_value(discount_type: DiscountType, value: f64) -> ValidationResult<()> {
    if !value.is_finite() {
        return Err(ValidationError::InvalidFormat {
            field: "discount_value".to_string(),
            reason: "must be a finite number".to_string(),
        });
    }

    if value < 0.0 {
        return Err(ValidationError::MustBePositive {
            field: "discount_value".to_string(),
        });
    }

    if discount_type == DiscountType::Percentage && value > MAX_PERCENTAGE {
        return Err(ValidationError::OutOfRange {
            field: "discount_value".to_string(),
            min: 0.0,
            max: MAX_PERCENTAGE,
        });
    }

    Ok(())
}

/// Validates a tier's quantity range.
///
/// ## Rules
/// - `min_quantity` must be >= 1
/// - `max_quantity`, when set, must be >= 1 and >= `min_quantity`
///
/// ## Example
/// ```rust
/// use ladder_core::validation::validate_quantity_range;
///
/// assert!(validate_quantity_range(3, Some(10)).is_ok());
/// assert!(validate_quantity_range(3, None).is_ok());
/// assert!(validate_quantity_range(5, Some(2)).is_err());
/// assert!(validate_quantity_range(0, None).is_err());
/// ```
pub fn validate_quantity_range(min_quantity: i64, max_quantity: Option<i64>) -> ValidationResult<()> {
    if min_quantity < 1 {
        return Err(ValidationError::MustBePositive {
            field: "min_quantity".to_string(),
        });
    }

    if let Some(max) = max_quantity {
        if max < 1 {
            return Err(ValidationError::MustBePositive {
                field: "max_quantity".to_string(),
            });
        }
        if max < min_quantity {
            return Err(ValidationError::InvertedRange {
                min: min_quantity,
                max,
            });
        }
    }

    Ok(())
}

/// Validates a unit price.
///
/// ## Rules
/// - Must be finite and non-negative
/// - Zero is allowed (free items)
pub fn validate_price(price: f64) -> ValidationResult<()> {
    if !price.is_finite() {
        return Err(ValidationError::InvalidFormat {
            field: "price".to_string(),
            reason: "must be a finite number".to_string(),
        });
    }

    if price < 0.0 {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0.0,
            max: f64::MAX,
        });
    }

    Ok(())
}

/// Validates a usage limit.
///
/// ## Rules
/// - When set, must be >= 1 (unset means unlimited)
pub fn validate_usage_limit(limit: Option<i64>) -> ValidationResult<()> {
    if let Some(limit) = limit {
        if limit < 1 {
            return Err(ValidationError::MustBePositive {
                field: "usage_limit".to_string(),
            });
        }
    }

    Ok(())
}

// =============================================================================
// UUID Validators
// =============================================================================

/// Validates a UUID string format.
///
/// ## Example
/// ```rust
/// use ladder_core::validation::validate_uuid;
///
/// assert!(validate_uuid("550e8400-e29b-41d4-a716-446655440000").is_ok());
/// assert!(validate_uuid("not-a-uuid").is_err());
/// ```
pub fn validate_uuid(id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "id".to_string(),
        });
    }

    uuid::Uuid::parse_str(id).map_err(|_| ValidationError::InvalidFormat {
        field: "id".to_string(),
        reason: "must be a valid UUID".to_string(),
    })?;

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_shop() {
        assert!(validate_shop("demo.myshopify.com").is_ok());
        assert!(validate_shop("").is_err());
        assert!(validate_shop("   ").is_err());
        assert!(validate_shop(&"a".repeat(300)).is_err());
    }

    #[test]
    fn test_validate_title() {
        assert!(validate_title("Buy 3 Get 10% Off").is_ok());
        assert!(validate_title("").is_err());
        assert!(validate_title("   ").is_err());
        assert!(validate_title(&"A".repeat(300)).is_err());
    }

    #[test]
    fn test_validate_discount_value_percentage() {
        assert!(validate_discount_value(DiscountType::Percentage, 0.0).is_ok());
        assert!(validate_discount_value(DiscountType::Percentage, 10.0).is_ok());
        assert!(validate_discount_value(DiscountType::Percentage, 100.0).is_ok());

        assert!(validate_discount_value(DiscountType::Percentage, 100.5).is_err());
        assert!(validate_discount_value(DiscountType::Percentage, -1.0).is_err());
        assert!(validate_discount_value(DiscountType::Percentage, f64::NAN).is_err());
    }

    #[test]
    fn test_validate_discount_value_fixed() {
        // Fixed amounts have no upper bound; the resolver clamps at apply time
        assert!(validate_discount_value(DiscountType::FixedAmount, 10_000.0).is_ok());
        assert!(validate_discount_value(DiscountType::FixedAmount, -0.01).is_err());
        assert!(validate_discount_value(DiscountType::FixedAmount, f64::INFINITY).is_err());
    }

    #[test]
    fn test_validate_quantity_range() {
        assert!(validate_quantity_range(1, None).is_ok());
        assert!(validate_quantity_range(3, Some(3)).is_ok());
        assert!(validate_quantity_range(3, Some(10)).is_ok());

        assert!(validate_quantity_range(0, None).is_err());
        assert!(validate_quantity_range(-1, None).is_err());
        assert!(validate_quantity_range(3, Some(0)).is_err());
        assert!(validate_quantity_range(5, Some(2)).is_err());
    }

    #[test]
    fn test_validate_price() {
        assert!(validate_price(0.0).is_ok());
        assert!(validate_price(10.99).is_ok());
        assert!(validate_price(-0.01).is_err());
        assert!(validate_price(f64::NAN).is_err());
    }

    #[test]
    fn test_validate_usage_limit() {
        assert!(validate_usage_limit(None).is_ok());
        assert!(validate_usage_limit(Some(1)).is_ok());
        assert!(validate_usage_limit(Some(0)).is_err());
    }

    #[test]
    fn test_validate_uuid() {
        assert!(validate_uuid("550e8400-e29b-41d4-a716-446655440000").is_ok());
        assert!(validate_uuid("").is_err());
        assert!(validate_uuid("not-a-uuid").is_err());
    }
}
