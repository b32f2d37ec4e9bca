//! # Discount Resolver
//!
//! The core of Ladder: given a shop's active tiers and a cart's line items,
//! select the applicable tier per line item and compute the total discount.
//!
//! ## Resolution Walkthrough
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Tiers (ascending min_quantity, caller-supplied order)                  │
//! │    [0] min 2, fixed $5                                                  │
//! │    [1] min 5, 20%                                                       │
//! │                                                                         │
//! │  Line item: qty 6, price $4.00                                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Scan tiers in order ── tier[0] matches (6 >= 2) ── STOP                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  fixed $5, clamped to line total $24.00 → $5.00                         │
//! │                                                                         │
//! │  FIRST match wins. tier[1] (20% = $4.80) is never considered, even     │
//! │  though it would discount less here and more elsewhere. Lower          │
//! │  thresholds shadow higher ones wherever their ranges overlap.          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Contract
//! - The caller filters to one shop's `is_active` tiers and orders them
//!   ascending by `min_quantity` (ladder-db's `list_active` does exactly
//!   this). The resolver trusts that order; it never re-sorts.
//! - One decision per line item, in input order. Quantities are never
//!   aggregated across lines, and at most one tier applies per line.
//! - No I/O, no mutation. Trivially safe to call concurrently.

use crate::types::{AppliedTier, DiscountTier, DiscountType, LineItem, Resolution};

// =============================================================================
// Rounding
// =============================================================================

/// Rounds a currency amount to 2 decimal places.
///
/// Half-cents round away from zero: multiply by 100, round to the nearest
/// integer, divide by 100. `12.345` → `12.35`, `12.344` → `12.34`.
///
/// ## Example
/// ```rust
/// use ladder_core::resolve::round_to_cents;
///
/// assert_eq!(round_to_cents(12.345), 12.35);
/// assert_eq!(round_to_cents(12.344), 12.34);
/// ```
#[inline]
pub fn round_to_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

// =============================================================================
// Resolver
// =============================================================================

/// Resolves a cart against a shop's active discount tiers.
///
/// ## Arguments
/// * `tiers` - One shop's active tiers, ordered ascending by `min_quantity`
/// * `line_items` - Cart entries, processed in input order
///
/// ## Returns
/// The accumulated discount (rounded to cents) and the tier used for the
/// last line item that matched. Callers wanting "the tier responsible for
/// most of the discount" will not get that here; the reference behavior
/// records the most recent match.
///
/// ## Per-line tier selection
/// The FIRST tier in the supplied order matching ALL of:
/// - product filter unset, or the line's `product_id` is in it
/// - `quantity >= min_quantity`
/// - `max_quantity` unset, or `quantity <= max_quantity`
///
/// A line with no matching tier contributes zero and leaves the applied
/// tier untouched. No tiers at all short-circuits to [`Resolution::none`]
/// without looking at the cart.
///
/// ## Discount formulas
/// - Percentage: `line_total × value / 100`, unclamped. `value <= 100` is
///   enforced when tiers are written, which keeps this branch at or below
///   the line total.
/// - Fixed amount: `value`, clamped to `line_total`. A flat discount never
///   exceeds the value of the line it applies to.
///
/// ## Example
/// ```rust
/// use ladder_core::resolve::resolve_discounts;
/// use ladder_core::types::{DiscountTier, DiscountType, LineItem};
///
/// let tier = DiscountTier::sample("10% off 3+", DiscountType::Percentage, 10.0, 3);
/// let cart = vec![LineItem::new("P1", 5, 10.0)];
///
/// let outcome = resolve_discounts(&[tier], &cart);
/// assert_eq!(outcome.discount_amount, 5.0); // 10% of $50.00
/// assert!(outcome.applied.is_some());
/// ```
pub fn resolve_discounts(tiers: &[DiscountTier], line_items: &[LineItem]) -> Resolution {
    if tiers.is_empty() {
        return Resolution::none();
    }

    let mut total_discount = 0.0_f64;
    let mut applied: Option<AppliedTier> = None;

    for item in line_items {
        let matching = tiers
            .iter()
            .find(|tier| tier.applies_to_product(&item.product_id) && tier.matches_quantity(item.quantity));

        if let Some(tier) = matching {
            total_discount += line_discount(tier, item.line_total());
            applied = Some(AppliedTier::from(tier));
        }
    }

    Resolution {
        discount_amount: round_to_cents(total_discount),
        applied,
    }
}

/// Computes one line's discount for an already-matched tier.
fn line_discount(tier: &DiscountTier, line_total: f64) -> f64 {
    match tier.discount_type {
        DiscountType::Percentage => line_total * tier.discount_value / 100.0,
        DiscountType::FixedAmount => tier.discount_value.min(line_total),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn tier(
        title: &str,
        discount_type: DiscountType,
        value: f64,
        min_qty: i64,
    ) -> DiscountTier {
        DiscountTier::sample(title, discount_type, value, min_qty)
    }

    #[test]
    fn test_no_tiers_returns_zero_and_none() {
        let cart = vec![LineItem::new("P1", 100, 9.99)];
        let outcome = resolve_discounts(&[], &cart);
        assert_eq!(outcome, Resolution::none());
    }

    #[test]
    fn test_no_tiers_ignores_line_items_entirely() {
        // Degenerate line items must not matter when there are no tiers
        let cart = vec![LineItem::new("", -3, f64::NAN)];
        let outcome = resolve_discounts(&[], &cart);
        assert_eq!(outcome.discount_amount, 0.0);
        assert!(outcome.applied.is_none());
    }

    #[test]
    fn test_percentage_discount() {
        // Spec example: 10% off 3+, cart of 5 × $10.00 → $5.00
        let tiers = vec![tier("10% off", DiscountType::Percentage, 10.0, 3)];
        let cart = vec![LineItem::new("P1", 5, 10.0)];

        let outcome = resolve_discounts(&tiers, &cart);
        assert_eq!(outcome.discount_amount, 5.0);
        assert_eq!(outcome.applied.as_ref().unwrap().title, "10% off");
    }

    #[test]
    fn test_fixed_discount_clamped_to_line_total() {
        // $100 off a $20.00 line → $20.00, not $100
        let tiers = vec![tier("big flat", DiscountType::FixedAmount, 100.0, 1)];
        let cart = vec![LineItem::new("P1", 1, 20.0)];

        let outcome = resolve_discounts(&tiers, &cart);
        assert_eq!(outcome.discount_amount, 20.0);
    }

    #[test]
    fn test_fixed_discount_below_line_total_not_clamped() {
        let tiers = vec![tier("flat $5", DiscountType::FixedAmount, 5.0, 1)];
        let cart = vec![LineItem::new("P1", 2, 20.0)];

        let outcome = resolve_discounts(&tiers, &cart);
        assert_eq!(outcome.discount_amount, 5.0);
    }

    #[test]
    fn test_first_match_wins_on_overlapping_ranges() {
        // Spec example: min 2 fixed $5 and min 5 at 20%. qty 6 satisfies
        // both; the lowest-min_quantity tier wins, not the larger discount.
        let tiers = vec![
            tier("flat $5 at 2+", DiscountType::FixedAmount, 5.0, 2),
            tier("20% at 5+", DiscountType::Percentage, 20.0, 5),
        ];
        let cart = vec![LineItem::new("P1", 6, 10.0)];

        let outcome = resolve_discounts(&tiers, &cart);
        assert_eq!(outcome.discount_amount, 5.0);
        assert_eq!(outcome.applied.as_ref().unwrap().title, "flat $5 at 2+");
    }

    #[test]
    fn test_quantity_below_every_tier_contributes_nothing() {
        let tiers = vec![tier("10% off 3+", DiscountType::Percentage, 10.0, 3)];
        let cart = vec![LineItem::new("P1", 2, 10.0)];

        let outcome = resolve_discounts(&tiers, &cart);
        assert_eq!(outcome.discount_amount, 0.0);
        assert!(outcome.applied.is_none());
    }

    #[test]
    fn test_quantity_above_max_contributes_nothing() {
        let mut capped = tier("3 to 5 only", DiscountType::Percentage, 10.0, 3);
        capped.max_quantity = Some(5);
        let cart = vec![LineItem::new("P1", 6, 10.0)];

        let outcome = resolve_discounts(&[capped], &cart);
        assert_eq!(outcome.discount_amount, 0.0);
        assert!(outcome.applied.is_none());
    }

    #[test]
    fn test_product_filter_excludes_regardless_of_quantity() {
        let mut filtered = tier("P1 only", DiscountType::Percentage, 50.0, 1);
        filtered.product_ids = Some(vec!["P1".to_string()]);
        let cart = vec![LineItem::new("P2", 1_000, 10.0)];

        let outcome = resolve_discounts(&[filtered], &cart);
        assert_eq!(outcome.discount_amount, 0.0);
        assert!(outcome.applied.is_none());
    }

    #[test]
    fn test_filtered_tier_skipped_in_favor_of_later_match() {
        // The product filter removes tier[0] from consideration for P2,
        // so the scan continues to tier[1].
        let mut filtered = tier("P1 only", DiscountType::FixedAmount, 5.0, 1);
        filtered.product_ids = Some(vec!["P1".to_string()]);
        let open = tier("10% any product", DiscountType::Percentage, 10.0, 2);

        let cart = vec![LineItem::new("P2", 4, 10.0)];
        let outcome = resolve_discounts(&[filtered, open], &cart);

        assert_eq!(outcome.discount_amount, 4.0); // 10% of $40.00
        assert_eq!(outcome.applied.as_ref().unwrap().title, "10% any product");
    }

    #[test]
    fn test_lines_accumulate_and_applied_is_last_match() {
        let mut p1_only = tier("P1 fixed $3", DiscountType::FixedAmount, 3.0, 1);
        p1_only.product_ids = Some(vec!["P1".to_string()]);
        let mut p2_only = tier("P2 10%", DiscountType::Percentage, 10.0, 1);
        p2_only.product_ids = Some(vec!["P2".to_string()]);

        // P1's $3.00 is the bigger share, yet `applied` reflects the later
        // P2 match because it was the most recently processed matching line.
        let cart = vec![
            LineItem::new("P1", 1, 50.0),
            LineItem::new("P2", 1, 10.0),
        ];
        let outcome = resolve_discounts(&[p1_only, p2_only], &cart);

        assert_eq!(outcome.discount_amount, 4.0); // $3.00 + $1.00
        assert_eq!(outcome.applied.as_ref().unwrap().title, "P2 10%");
    }

    #[test]
    fn test_non_matching_line_does_not_clear_applied() {
        let tiers = vec![tier("10% off 3+", DiscountType::Percentage, 10.0, 3)];
        let cart = vec![
            LineItem::new("P1", 5, 10.0), // matches
            LineItem::new("P2", 1, 99.0), // below min_quantity
        ];

        let outcome = resolve_discounts(&tiers, &cart);
        assert_eq!(outcome.discount_amount, 5.0);
        assert!(outcome.applied.is_some());
    }

    #[test]
    fn test_total_is_rounded_to_cents() {
        // 3 × $4.115 = $12.345 at 100% → rounds half away from zero
        let tiers = vec![tier("full", DiscountType::Percentage, 100.0, 1)];
        let cart = vec![LineItem::new("P1", 3, 4.115)];

        let outcome = resolve_discounts(&tiers, &cart);
        assert_eq!(outcome.discount_amount, 12.35);
    }

    #[test]
    fn test_round_to_cents() {
        assert_eq!(round_to_cents(12.345), 12.35);
        assert_eq!(round_to_cents(12.344), 12.34);
        assert_eq!(round_to_cents(0.0), 0.0);
        assert_eq!(round_to_cents(0.005), 0.01);
    }

    #[test]
    fn test_rounding_happens_once_on_the_total() {
        // Two raw line discounts of $0.004 each: rounded per line they would
        // vanish; accumulated first, they survive as $0.01.
        let tiers = vec![tier("tiny", DiscountType::Percentage, 0.1, 1)];
        let cart = vec![
            LineItem::new("P1", 1, 4.0), // 0.1% of $4.00 = $0.004
            LineItem::new("P2", 1, 4.0),
        ];

        let outcome = resolve_discounts(&tiers, &cart);
        assert_eq!(outcome.discount_amount, 0.01);
    }

    #[test]
    fn test_empty_cart_with_tiers() {
        let tiers = vec![tier("10% off 3+", DiscountType::Percentage, 10.0, 3)];
        let outcome = resolve_discounts(&tiers, &[]);
        assert_eq!(outcome, Resolution::none());
    }

    #[test]
    fn test_zero_price_line() {
        // Free items: percentage of zero is zero, fixed clamps to zero
        let tiers = vec![tier("flat $5", DiscountType::FixedAmount, 5.0, 1)];
        let cart = vec![LineItem::new("P1", 3, 0.0)];

        let outcome = resolve_discounts(&tiers, &cart);
        assert_eq!(outcome.discount_amount, 0.0);
        // The tier still matched, so it is still reported as applied
        assert!(outcome.applied.is_some());
    }
}
