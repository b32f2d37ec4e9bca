//! # Tier Repository
//!
//! Database operations for volume discount tiers.
//!
//! ## Key Operations
//! - The resolver's input query: shop-scoped active tiers, ascending
//!   `min_quantity` (this ORDER BY is part of the resolution contract,
//!   not a presentation choice - first-match-wins depends on it)
//! - Admin CRUD: insert, update, activate/deactivate toggle, delete
//!
//! ## Stored id lists
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  product_ids / collection_ids / customer_tags columns                   │
//! │                                                                         │
//! │  Domain:   Option<Vec<String>>      None = no filter                    │
//! │  Storage:  TEXT (JSON array)        NULL = no filter                    │
//! │                                                                         │
//! │  Writes serialize from the typed vector, so stored JSON is always      │
//! │  well-formed. A row that fails to parse on read surfaces as            │
//! │  DbError::Decode rather than silently dropping the filter.             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use ladder_core::{DiscountTier, DiscountType};

/// Column list shared by every SELECT in this repository.
const TIER_COLUMNS: &str = "id, shop, title, description, discount_code, discount_type, \
     discount_value, min_quantity, max_quantity, product_ids, collection_ids, \
     customer_tags, start_date, end_date, usage_limit, priority, \
     min_order_amount, max_discount_amount, is_active, created_at, updated_at";

// =============================================================================
// Row Type
// =============================================================================

/// Raw database row for a tier.
///
/// Differs from [`DiscountTier`] in the columns that store serialized JSON
/// and the enum stored as TEXT; [`TierRow::into_tier`] performs the fallible
/// conversion.
#[derive(Debug, sqlx::FromRow)]
struct TierRow {
    id: String,
    shop: String,
    title: String,
    description: Option<String>,
    discount_code: Option<String>,
    discount_type: String,
    discount_value: f64,
    min_quantity: i64,
    max_quantity: Option<i64>,
    product_ids: Option<String>,
    collection_ids: Option<String>,
    customer_tags: Option<String>,
    start_date: Option<DateTime<Utc>>,
    end_date: Option<DateTime<Utc>>,
    usage_limit: Option<i64>,
    priority: i64,
    min_order_amount: Option<f64>,
    max_discount_amount: Option<f64>,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TierRow {
    /// Converts a stored row into the domain type.
    fn into_tier(self) -> DbResult<DiscountTier> {
        let discount_type = DiscountType::parse(&self.discount_type).ok_or_else(|| {
            DbError::decode(
                "DiscountTier",
                &self.id,
                format!("unknown discount_type '{}'", self.discount_type),
            )
        })?;

        let product_ids = decode_list(self.product_ids.as_deref(), "product_ids", &self.id)?;
        let collection_ids =
            decode_list(self.collection_ids.as_deref(), "collection_ids", &self.id)?;
        let customer_tags = decode_list(self.customer_tags.as_deref(), "customer_tags", &self.id)?;

        Ok(DiscountTier {
            id: self.id,
            shop: self.shop,
            title: self.title,
            description: self.description,
            discount_code: self.discount_code,
            discount_type,
            discount_value: self.discount_value,
            min_quantity: self.min_quantity,
            max_quantity: self.max_quantity,
            product_ids,
            collection_ids,
            customer_tags,
            start_date: self.start_date,
            end_date: self.end_date,
            usage_limit: self.usage_limit,
            priority: self.priority,
            min_order_amount: self.min_order_amount,
            max_discount_amount: self.max_discount_amount,
            is_active: self.is_active,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// Parses a JSON array column. NULL means "no filter".
fn decode_list(column: Option<&str>, field: &str, id: &str) -> DbResult<Option<Vec<String>>> {
    match column {
        None => Ok(None),
        Some(raw) => serde_json::from_str(raw)
            .map(Some)
            .map_err(|e| DbError::decode("DiscountTier", id, format!("{field}: {e}"))),
    }
}

/// Serializes an id list for storage. `None` stays NULL.
fn encode_list(list: Option<&Vec<String>>) -> DbResult<Option<String>> {
    match list {
        None => Ok(None),
        Some(ids) => serde_json::to_string(ids)
            .map(Some)
            .map_err(|e| DbError::Internal(e.to_string())),
    }
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for tier database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = TierRepository::new(pool);
///
/// // The resolver's input
/// let tiers = repo.list_active("demo.myshopify.com").await?;
///
/// // Admin screens
/// let all = repo.list_for_shop("demo.myshopify.com").await?;
/// ```
#[derive(Debug, Clone)]
pub struct TierRepository {
    pool: SqlitePool,
}

impl TierRepository {
    /// Creates a new TierRepository.
    pub fn new(pool: SqlitePool) -> Self {
        TierRepository { pool }
    }

    /// Lists a shop's active tiers, ordered ascending by `min_quantity`.
    ///
    /// This is the exact input the resolver requires: filtered to one shop,
    /// `is_active` only, lowest threshold first so overlapping ranges are
    /// won by the earliest tier.
    pub async fn list_active(&self, shop: &str) -> DbResult<Vec<DiscountTier>> {
        debug!(shop = %shop, "Listing active tiers");

        let sql = format!(
            "SELECT {TIER_COLUMNS} FROM volume_discounts \
             WHERE shop = ?1 AND is_active = 1 \
             ORDER BY min_quantity ASC"
        );
        let rows: Vec<TierRow> = sqlx::query_as(&sql).bind(shop).fetch_all(&self.pool).await?;

        debug!(count = rows.len(), "Active tiers loaded");
        rows.into_iter().map(TierRow::into_tier).collect()
    }

    /// Lists all of a shop's tiers for the admin index, newest first.
    pub async fn list_for_shop(&self, shop: &str) -> DbResult<Vec<DiscountTier>> {
        let sql = format!(
            "SELECT {TIER_COLUMNS} FROM volume_discounts \
             WHERE shop = ?1 \
             ORDER BY created_at DESC"
        );
        let rows: Vec<TierRow> = sqlx::query_as(&sql).bind(shop).fetch_all(&self.pool).await?;

        rows.into_iter().map(TierRow::into_tier).collect()
    }

    /// Gets a tier by its ID, scoped to the requesting shop.
    ///
    /// ## Returns
    /// * `Ok(Some(DiscountTier))` - Tier found and owned by `shop`
    /// * `Ok(None)` - No such tier for this shop
    pub async fn get_by_id(&self, shop: &str, id: &str) -> DbResult<Option<DiscountTier>> {
        let sql = format!(
            "SELECT {TIER_COLUMNS} FROM volume_discounts \
             WHERE id = ?1 AND shop = ?2"
        );
        let row: Option<TierRow> = sqlx::query_as(&sql)
            .bind(id)
            .bind(shop)
            .fetch_optional(&self.pool)
            .await?;

        row.map(TierRow::into_tier).transpose()
    }

    /// Inserts a new tier.
    ///
    /// ## Arguments
    /// * `tier` - Tier to insert (id should be generated beforehand)
    pub async fn insert(&self, tier: &DiscountTier) -> DbResult<()> {
        debug!(shop = %tier.shop, title = %tier.title, "Inserting tier");

        let product_ids = encode_list(tier.product_ids.as_ref())?;
        let collection_ids = encode_list(tier.collection_ids.as_ref())?;
        let customer_tags = encode_list(tier.customer_tags.as_ref())?;

        sqlx::query(
            "INSERT INTO volume_discounts (
                id, shop, title, description, discount_code, discount_type,
                discount_value, min_quantity, max_quantity, product_ids,
                collection_ids, customer_tags, start_date, end_date,
                usage_limit, priority, min_order_amount, max_discount_amount,
                is_active, created_at, updated_at
            ) VALUES (
                ?1, ?2, ?3, ?4, ?5, ?6,
                ?7, ?8, ?9, ?10,
                ?11, ?12, ?13, ?14,
                ?15, ?16, ?17, ?18,
                ?19, ?20, ?21
            )",
        )
        .bind(&tier.id)
        .bind(&tier.shop)
        .bind(&tier.title)
        .bind(&tier.description)
        .bind(&tier.discount_code)
        .bind(tier.discount_type.as_str())
        .bind(tier.discount_value)
        .bind(tier.min_quantity)
        .bind(tier.max_quantity)
        .bind(product_ids)
        .bind(collection_ids)
        .bind(customer_tags)
        .bind(tier.start_date)
        .bind(tier.end_date)
        .bind(tier.usage_limit)
        .bind(tier.priority)
        .bind(tier.min_order_amount)
        .bind(tier.max_discount_amount)
        .bind(tier.is_active)
        .bind(tier.created_at)
        .bind(tier.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Updates an existing tier, bumping `updated_at`.
    ///
    /// ## Returns
    /// * `Ok(())` - Update successful
    /// * `Err(DbError::NotFound)` - Tier doesn't exist for this shop
    pub async fn update(&self, tier: &DiscountTier) -> DbResult<()> {
        debug!(id = %tier.id, "Updating tier");

        let product_ids = encode_list(tier.product_ids.as_ref())?;
        let collection_ids = encode_list(tier.collection_ids.as_ref())?;
        let customer_tags = encode_list(tier.customer_tags.as_ref())?;
        let now = Utc::now();

        let result = sqlx::query(
            "UPDATE volume_discounts SET
                title = ?3,
                description = ?4,
                discount_code = ?5,
                discount_type = ?6,
                discount_value = ?7,
                min_quantity = ?8,
                max_quantity = ?9,
                product_ids = ?10,
                collection_ids = ?11,
                customer_tags = ?12,
                start_date = ?13,
                end_date = ?14,
                usage_limit = ?15,
                priority = ?16,
                min_order_amount = ?17,
                max_discount_amount = ?18,
                is_active = ?19,
                updated_at = ?20
            WHERE id = ?1 AND shop = ?2",
        )
        .bind(&tier.id)
        .bind(&tier.shop)
        .bind(&tier.title)
        .bind(&tier.description)
        .bind(&tier.discount_code)
        .bind(tier.discount_type.as_str())
        .bind(tier.discount_value)
        .bind(tier.min_quantity)
        .bind(tier.max_quantity)
        .bind(product_ids)
        .bind(collection_ids)
        .bind(customer_tags)
        .bind(tier.start_date)
        .bind(tier.end_date)
        .bind(tier.usage_limit)
        .bind(tier.priority)
        .bind(tier.min_order_amount)
        .bind(tier.max_discount_amount)
        .bind(tier.is_active)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("DiscountTier", &tier.id));
        }

        Ok(())
    }

    /// Toggles a tier's active flag (the admin index "Enabled" switch).
    pub async fn set_active(&self, shop: &str, id: &str, active: bool) -> DbResult<()> {
        debug!(id = %id, active = %active, "Toggling tier");

        let now = Utc::now();

        let result = sqlx::query(
            "UPDATE volume_discounts
             SET is_active = ?3, updated_at = ?4
             WHERE id = ?1 AND shop = ?2",
        )
        .bind(id)
        .bind(shop)
        .bind(active)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("DiscountTier", id));
        }

        Ok(())
    }

    /// Deletes a tier.
    ///
    /// Hard delete: tiers carry no history worth keeping, and the admin UI
    /// confirms before calling this.
    pub async fn delete(&self, shop: &str, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deleting tier");

        let result = sqlx::query("DELETE FROM volume_discounts WHERE id = ?1 AND shop = ?2")
            .bind(id)
            .bind(shop)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("DiscountTier", id));
        }

        Ok(())
    }

    /// Counts a shop's tiers (for diagnostics and the admin empty state).
    pub async fn count(&self, shop: &str) -> DbResult<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM volume_discounts WHERE shop = ?1")
                .bind(shop)
                .fetch_one(&self.pool)
                .await?;

        Ok(count)
    }
}

/// Helper to generate a new tier ID.
///
/// ## Usage
/// ```rust,ignore
/// let id = generate_tier_id();
/// let tier = DiscountTier { id, ... };
/// ```
pub fn generate_tier_id() -> String {
    Uuid::new_v4().to_string()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    const SHOP: &str = "demo.myshopify.com";

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    fn make_tier(shop: &str, title: &str, min_quantity: i64) -> DiscountTier {
        let mut tier = DiscountTier::sample(title, DiscountType::Percentage, 10.0, min_quantity);
        tier.shop = shop.to_string();
        tier
    }

    #[tokio::test]
    async fn test_insert_and_get_by_id() {
        let db = test_db().await;
        let tier = make_tier(SHOP, "10% off 3+", 3);

        db.tiers().insert(&tier).await.unwrap();

        let fetched = db.tiers().get_by_id(SHOP, &tier.id).await.unwrap().unwrap();
        assert_eq!(fetched.title, "10% off 3+");
        assert_eq!(fetched.discount_type, DiscountType::Percentage);
        assert_eq!(fetched.discount_value, 10.0);
        assert_eq!(fetched.min_quantity, 3);
        assert!(fetched.is_active);
    }

    #[tokio::test]
    async fn test_get_by_id_is_shop_scoped() {
        let db = test_db().await;
        let tier = make_tier(SHOP, "mine", 2);
        db.tiers().insert(&tier).await.unwrap();

        let other = db
            .tiers()
            .get_by_id("other.myshopify.com", &tier.id)
            .await
            .unwrap();
        assert!(other.is_none());
    }

    #[tokio::test]
    async fn test_list_active_orders_by_min_quantity() {
        let db = test_db().await;

        // Insert out of order; list must come back ascending
        db.tiers().insert(&make_tier(SHOP, "ten", 10)).await.unwrap();
        db.tiers().insert(&make_tier(SHOP, "two", 2)).await.unwrap();
        db.tiers().insert(&make_tier(SHOP, "five", 5)).await.unwrap();

        let tiers = db.tiers().list_active(SHOP).await.unwrap();
        let mins: Vec<i64> = tiers.iter().map(|t| t.min_quantity).collect();
        assert_eq!(mins, vec![2, 5, 10]);
    }

    #[tokio::test]
    async fn test_list_active_excludes_inactive_and_other_shops() {
        let db = test_db().await;

        let mut inactive = make_tier(SHOP, "off", 2);
        inactive.is_active = false;
        db.tiers().insert(&inactive).await.unwrap();
        db.tiers().insert(&make_tier(SHOP, "on", 3)).await.unwrap();
        db.tiers()
            .insert(&make_tier("other.myshopify.com", "elsewhere", 1))
            .await
            .unwrap();

        let tiers = db.tiers().list_active(SHOP).await.unwrap();
        assert_eq!(tiers.len(), 1);
        assert_eq!(tiers[0].title, "on");
    }

    #[tokio::test]
    async fn test_product_ids_round_trip() {
        let db = test_db().await;

        let mut tier = make_tier(SHOP, "filtered", 2);
        tier.product_ids = Some(vec![
            "gid://shopify/Product/123".to_string(),
            "gid://shopify/Product/456".to_string(),
        ]);
        db.tiers().insert(&tier).await.unwrap();

        let fetched = db.tiers().get_by_id(SHOP, &tier.id).await.unwrap().unwrap();
        assert_eq!(
            fetched.product_ids.as_deref(),
            Some(
                &[
                    "gid://shopify/Product/123".to_string(),
                    "gid://shopify/Product/456".to_string()
                ][..]
            )
        );
        // Unset lists stay unset
        assert!(fetched.collection_ids.is_none());
        assert!(fetched.customer_tags.is_none());
    }

    #[tokio::test]
    async fn test_update() {
        let db = test_db().await;
        let mut tier = make_tier(SHOP, "before", 2);
        db.tiers().insert(&tier).await.unwrap();

        tier.title = "after".to_string();
        tier.discount_type = DiscountType::FixedAmount;
        tier.discount_value = 5.0;
        tier.max_quantity = Some(10);
        db.tiers().update(&tier).await.unwrap();

        let fetched = db.tiers().get_by_id(SHOP, &tier.id).await.unwrap().unwrap();
        assert_eq!(fetched.title, "after");
        assert_eq!(fetched.discount_type, DiscountType::FixedAmount);
        assert_eq!(fetched.max_quantity, Some(10));
    }

    #[tokio::test]
    async fn test_update_missing_tier_is_not_found() {
        let db = test_db().await;
        let tier = make_tier(SHOP, "ghost", 2);

        let err = db.tiers().update(&tier).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_set_active_toggle() {
        let db = test_db().await;
        let tier = make_tier(SHOP, "toggled", 2);
        db.tiers().insert(&tier).await.unwrap();

        db.tiers().set_active(SHOP, &tier.id, false).await.unwrap();
        assert!(db.tiers().list_active(SHOP).await.unwrap().is_empty());

        db.tiers().set_active(SHOP, &tier.id, true).await.unwrap();
        assert_eq!(db.tiers().list_active(SHOP).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_delete() {
        let db = test_db().await;
        let tier = make_tier(SHOP, "doomed", 2);
        db.tiers().insert(&tier).await.unwrap();

        db.tiers().delete(SHOP, &tier.id).await.unwrap();
        assert!(db.tiers().get_by_id(SHOP, &tier.id).await.unwrap().is_none());

        // Second delete reports NotFound
        let err = db.tiers().delete(SHOP, &tier.id).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_count() {
        let db = test_db().await;
        assert_eq!(db.tiers().count(SHOP).await.unwrap(), 0);

        db.tiers().insert(&make_tier(SHOP, "a", 2)).await.unwrap();
        let mut inactive = make_tier(SHOP, "b", 3);
        inactive.is_active = false;
        db.tiers().insert(&inactive).await.unwrap();

        // count covers all tiers, active or not
        assert_eq!(db.tiers().count(SHOP).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_malformed_stored_json_surfaces_as_decode_error() {
        let db = test_db().await;
        let tier = make_tier(SHOP, "tampered", 2);
        db.tiers().insert(&tier).await.unwrap();

        sqlx::query("UPDATE volume_discounts SET product_ids = 'not json' WHERE id = ?1")
            .bind(&tier.id)
            .execute(db.pool())
            .await
            .unwrap();

        let err = db.tiers().get_by_id(SHOP, &tier.id).await.unwrap_err();
        assert!(matches!(err, DbError::Decode { .. }));
    }
}
