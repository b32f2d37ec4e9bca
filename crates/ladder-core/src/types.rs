//! # Domain Types
//!
//! Core domain types used throughout Ladder.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌──────────────────┐   ┌─────────────────┐   ┌─────────────────┐      │
//! │  │  DiscountTier    │   │    LineItem     │   │   Resolution    │      │
//! │  │  ──────────────  │   │  ─────────────  │   │  ─────────────  │      │
//! │  │  id (UUID)       │   │  product_id     │   │  discount_amount│      │
//! │  │  shop            │   │  quantity       │   │  applied        │      │
//! │  │  min/max qty     │   │  price          │   │  (AppliedTier)  │      │
//! │  │  discount_value  │   └─────────────────┘   └─────────────────┘      │
//! │  │  product_ids     │                                                  │
//! │  └──────────────────┘   ┌─────────────────┐                           │
//! │                         │  DiscountType   │                           │
//! │                         │  ─────────────  │                           │
//! │                         │  Percentage     │                           │
//! │                         │  FixedAmount    │                           │
//! │                         └─────────────────┘                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Ownership
//! `DiscountTier` is persisted by ladder-db and read-only during resolution.
//! `LineItem` arrives from the caller's cart. `Resolution`/`AppliedTier` are
//! the outward-facing response shape.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

// =============================================================================
// Discount Type
// =============================================================================

/// The discount formula a tier applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum DiscountType {
    /// `line_total × value / 100`. Value is constrained to [0, 100] at
    /// input time, so this branch can never exceed the line total.
    Percentage,
    /// A flat currency amount, clamped to the line total it applies to.
    FixedAmount,
}

impl DiscountType {
    /// Stable string form used in storage and on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            DiscountType::Percentage => "percentage",
            DiscountType::FixedAmount => "fixed_amount",
        }
    }

    /// Parses the stable string form.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "percentage" => Some(DiscountType::Percentage),
            "fixed_amount" => Some(DiscountType::FixedAmount),
            _ => None,
        }
    }
}

// =============================================================================
// Discount Tier
// =============================================================================

/// A configured volume discount rule: a quantity range, an applicability
/// filter, and a discount formula.
///
/// ## Evaluated vs. persisted-only fields
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Consulted by the resolver          Persisted but NOT consulted         │
/// │  ──────────────────────────         ─────────────────────────────       │
/// │  discount_type / discount_value     collection_ids, customer_tags       │
/// │  min_quantity / max_quantity        start_date / end_date               │
/// │  product_ids                        usage_limit, priority               │
/// │  (is_active: filtered by caller)    min_order_amount                    │
/// │                                     max_discount_amount                 │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
/// The right-hand column is configuration surface the admin screens expose
/// today and the resolver deliberately ignores; see `resolve` module docs.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DiscountTier {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Owning shop domain; every query is scoped to one shop's tiers.
    pub shop: String,

    /// Display title, e.g. "Buy 3 Get 10% Off".
    pub title: String,

    /// Optional merchant-facing description.
    pub description: Option<String>,

    /// Optional code customers can enter at checkout.
    pub discount_code: Option<String>,

    /// Discount formula.
    pub discount_type: DiscountType,

    /// Non-negative. Percentage: [0, 100]. Fixed amount: a currency amount.
    pub discount_value: f64,

    /// Inclusive lower bound on applicable quantity. Always >= 1.
    pub min_quantity: i64,

    /// Inclusive upper bound; `None` means unbounded.
    pub max_quantity: Option<i64>,

    /// Products this tier applies to; `None` means all products.
    pub product_ids: Option<Vec<String>>,

    /// Collections this tier targets. Persisted, not evaluated.
    pub collection_ids: Option<Vec<String>>,

    /// Customer tags this tier targets. Persisted, not evaluated.
    pub customer_tags: Option<Vec<String>>,

    /// When the tier becomes active. Persisted, not evaluated.
    #[ts(as = "Option<String>")]
    pub start_date: Option<DateTime<Utc>>,

    /// When the tier expires. Persisted, not evaluated.
    #[ts(as = "Option<String>")]
    pub end_date: Option<DateTime<Utc>>,

    /// Maximum number of redemptions. Persisted, not evaluated.
    pub usage_limit: Option<i64>,

    /// Ordering hint among competing tiers. Persisted, not evaluated:
    /// resolution order is ascending `min_quantity`, nothing else.
    pub priority: i64,

    /// Minimum order total required. Persisted, not evaluated.
    pub min_order_amount: Option<f64>,

    /// Cap on percentage discounts. Persisted, not evaluated.
    pub max_discount_amount: Option<f64>,

    /// Inactive tiers are never handed to the resolver.
    pub is_active: bool,

    /// When the tier was created.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    /// When the tier was last updated.
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl DiscountTier {
    /// Checks whether this tier's product filter admits the given product.
    ///
    /// An unset filter means the tier applies to every product.
    ///
    /// ## Example
    /// ```rust
    /// use ladder_core::types::{DiscountTier, DiscountType};
    ///
    /// let mut tier = DiscountTier::sample("t", DiscountType::Percentage, 10.0, 2);
    /// assert!(tier.applies_to_product("anything"));
    ///
    /// tier.product_ids = Some(vec!["P1".into()]);
    /// assert!(tier.applies_to_product("P1"));
    /// assert!(!tier.applies_to_product("P2"));
    /// ```
    pub fn applies_to_product(&self, product_id: &str) -> bool {
        match &self.product_ids {
            Some(ids) => ids.iter().any(|id| id == product_id),
            None => true,
        }
    }

    /// Checks whether a quantity falls inside this tier's inclusive range.
    pub fn matches_quantity(&self, quantity: i64) -> bool {
        quantity >= self.min_quantity && self.max_quantity.map_or(true, |max| quantity <= max)
    }

    /// Builds a minimal active tier for tests and examples.
    ///
    /// Everything optional is unset; `shop` is a placeholder. Production
    /// tiers come out of the store, not from this constructor.
    pub fn sample(
        title: &str,
        discount_type: DiscountType,
        discount_value: f64,
        min_quantity: i64,
    ) -> Self {
        let now = Utc::now();
        DiscountTier {
            id: uuid::Uuid::new_v4().to_string(),
            shop: "demo.myshopify.com".to_string(),
            title: title.to_string(),
            description: None,
            discount_code: None,
            discount_type,
            discount_value,
            min_quantity,
            max_quantity: None,
            product_ids: None,
            collection_ids: None,
            customer_tags: None,
            start_date: None,
            end_date: None,
            usage_limit: None,
            priority: 0,
            min_order_amount: None,
            max_discount_amount: None,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }
}

// =============================================================================
// Line Item
// =============================================================================

/// One entry in a cart: a product, a quantity, and a unit price.
///
/// Prices arrive from the platform as strings; the request layer parses them
/// before they reach the core, so this type holds an already-parsed number.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LineItem {
    /// Identifier of the purchased product.
    pub product_id: String,

    /// Positive integer count.
    pub quantity: i64,

    /// Non-negative unit price.
    pub price: f64,
}

impl LineItem {
    /// Creates a line item.
    pub fn new(product_id: impl Into<String>, quantity: i64, price: f64) -> Self {
        LineItem {
            product_id: product_id.into(),
            quantity,
            price,
        }
    }

    /// Line total before any discount: `price × quantity`.
    #[inline]
    pub fn line_total(&self) -> f64 {
        self.price * self.quantity as f64
    }
}

// =============================================================================
// Applied Tier (outward DTO)
// =============================================================================

/// The subset of a tier surfaced to callers after resolution.
///
/// The response contract exposes only these four fields; scheduling, filters,
/// and the rest of the persisted record stay internal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AppliedTier {
    pub id: String,
    pub title: String,
    pub discount_type: DiscountType,
    pub discount_value: f64,
}

impl From<&DiscountTier> for AppliedTier {
    fn from(tier: &DiscountTier) -> Self {
        AppliedTier {
            id: tier.id.clone(),
            title: tier.title.clone(),
            discount_type: tier.discount_type,
            discount_value: tier.discount_value,
        }
    }
}

// =============================================================================
// Resolution
// =============================================================================

/// The outcome of resolving a cart against a shop's tiers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Resolution {
    /// Total discount across all line items, rounded to 2 decimals.
    pub discount_amount: f64,

    /// The tier used for the most recently processed line item that matched,
    /// or `None` if no line item matched any tier.
    pub applied: Option<AppliedTier>,
}

impl Resolution {
    /// The zero outcome: no discount, no applied tier.
    pub fn none() -> Self {
        Resolution {
            discount_amount: 0.0,
            applied: None,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
