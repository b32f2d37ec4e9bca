//! # Cart Resolution
//!
//! The one seam where storage meets the pure resolver.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  POST /api/discounts/calculate (request layer, outside this crate)      │
//! │       │  shop (from session) + line items (from body)                   │
//! │       ▼                                                                 │
//! │  resolve_cart_discount(db, shop, line_items)   ← THIS MODULE            │
//! │       │                                                                 │
//! │       ├── db.tiers().list_active(shop)   active, ascending min_quantity │
//! │       │                                                                 │
//! │       └── ladder_core::resolve_discounts(tiers, line_items)             │
//! │                │                                                        │
//! │                ▼                                                        │
//! │  Resolution { discount_amount, applied }                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Shop resolution and authentication stay with the request layer; this
//! function assumes `shop` is already trusted.

use tracing::debug;

use crate::error::DbResult;
use crate::pool::Database;
use ladder_core::{resolve_discounts, LineItem, Resolution};

/// Resolves the volume discount for a cart.
///
/// Loads the shop's active tiers in resolution order and delegates to the
/// pure resolver. A shop with no active tiers yields the zero resolution;
/// that is not an error.
///
/// ## Example
/// ```rust,ignore
/// let items = vec![LineItem::new("gid://shopify/Product/123", 5, 10.0)];
/// let outcome = resolve_cart_discount(&db, "demo.myshopify.com", &items).await?;
/// ```
pub async fn resolve_cart_discount(
    db: &Database,
    shop: &str,
    line_items: &[LineItem],
) -> DbResult<Resolution> {
    let tiers = db.tiers().list_active(shop).await?;

    debug!(
        shop = %shop,
        tiers = tiers.len(),
        lines = line_items.len(),
        "Resolving cart discount"
    );

    Ok(resolve_discounts(&tiers, line_items))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use ladder_core::{DiscountTier, DiscountType};

    const SHOP: &str = "demo.myshopify.com";

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    fn tier(shop: &str, title: &str, dt: DiscountType, value: f64, min: i64) -> DiscountTier {
        let mut tier = DiscountTier::sample(title, dt, value, min);
        tier.shop = shop.to_string();
        tier
    }

    #[tokio::test]
    async fn test_no_tiers_yields_zero_resolution() {
        let db = test_db().await;
        let items = vec![LineItem::new("P1", 5, 10.0)];

        let outcome = resolve_cart_discount(&db, SHOP, &items).await.unwrap();
        assert_eq!(outcome, Resolution::none());
    }

    #[tokio::test]
    async fn test_end_to_end_percentage() {
        let db = test_db().await;
        db.tiers()
            .insert(&tier(SHOP, "10% off 3+", DiscountType::Percentage, 10.0, 3))
            .await
            .unwrap();

        let items = vec![LineItem::new("P1", 5, 10.0)];
        let outcome = resolve_cart_discount(&db, SHOP, &items).await.unwrap();

        assert_eq!(outcome.discount_amount, 5.0);
        assert_eq!(outcome.applied.unwrap().title, "10% off 3+");
    }

    #[tokio::test]
    async fn test_store_order_feeds_first_match_wins() {
        let db = test_db().await;
        // Inserted high threshold first; the repository's ORDER BY still
        // presents the min 2 tier first, so it wins for qty 6.
        db.tiers()
            .insert(&tier(SHOP, "20% at 5+", DiscountType::Percentage, 20.0, 5))
            .await
            .unwrap();
        db.tiers()
            .insert(&tier(SHOP, "$5 at 2+", DiscountType::FixedAmount, 5.0, 2))
            .await
            .unwrap();

        let items = vec![LineItem::new("P1", 6, 10.0)];
        let outcome = resolve_cart_discount(&db, SHOP, &items).await.unwrap();

        assert_eq!(outcome.discount_amount, 5.0);
        assert_eq!(outcome.applied.unwrap().title, "$5 at 2+");
    }

    #[tokio::test]
    async fn test_other_shops_tiers_never_leak() {
        let db = test_db().await;
        db.tiers()
            .insert(&tier(
                "other.myshopify.com",
                "theirs",
                DiscountType::Percentage,
                50.0,
                1,
            ))
            .await
            .unwrap();

        let items = vec![LineItem::new("P1", 10, 10.0)];
        let outcome = resolve_cart_discount(&db, SHOP, &items).await.unwrap();

        assert_eq!(outcome, Resolution::none());
    }
}
