//! # Pricing Calculator
//!
//! Pure derived totals over a cart state.
//!
//! ## Pricing Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Derived Totals                                   │
//! │                                                                         │
//! │  items ──► subtotal = Σ price × qty        (order-independent)         │
//! │                 │                                                       │
//! │                 ▼                                                       │
//! │  promo ──► discount = subtotal × value/100 (zero when no promo)        │
//! │                 │                                                       │
//! │                 ▼                                                       │
//! │            total = max(subtotal − discount, 0)                         │
//! │                                                                         │
//! │  Everything is recomputed from scratch on each call. Carts are demo-   │
//! │  scale (a handful of lines), so there is no incremental caching.       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::{CartItem, CartState, Promo};

// =============================================================================
// Pure Calculations
// =============================================================================

/// Sums `price × qty` over all items. Zero for an empty cart.
pub fn subtotal(items: &[CartItem]) -> Money {
    items
        .iter()
        .fold(Money::zero(), |sum, i| sum + i.line_total())
}

/// Returns the discount amount for the active promo, or zero without one.
pub fn discount(subtotal: Money, promo: Option<&Promo>) -> Money {
    match promo {
        Some(p) => subtotal.percent_of(p.value),
        None => Money::zero(),
    }
}

/// Returns `max(subtotal − discount, 0)`.
///
/// Never negative, even if a hypothetical discount exceeded the subtotal.
pub fn total(subtotal: Money, discount: Money) -> Money {
    std::cmp::max(subtotal - discount, Money::zero())
}

// =============================================================================
// Totals Snapshot
// =============================================================================

/// Cart totals summary for the order summary and drawer footer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Totals {
    pub subtotal_cents: i64,
    pub discount_cents: i64,
    pub total_cents: i64,
}

impl Totals {
    /// Returns the subtotal as Money.
    #[inline]
    pub fn subtotal(&self) -> Money {
        Money::from_cents(self.subtotal_cents)
    }

    /// Returns the discount as Money.
    #[inline]
    pub fn discount(&self) -> Money {
        Money::from_cents(self.discount_cents)
    }

    /// Returns the total as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }
}

impl From<&CartState> for Totals {
    fn from(state: &CartState) -> Self {
        let sub = subtotal(&state.items);
        let disc = discount(sub, state.promo.as_ref());
        Totals {
            subtotal_cents: sub.cents(),
            discount_cents: disc.cents(),
            total_cents: total(sub, disc).cents(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DiscountKind;

    fn item(id: u64, price_cents: i64, qty: i64) -> CartItem {
        CartItem {
            id,
            title: format!("Product {}", id),
            thumbnail: String::new(),
            price_cents,
            qty,
        }
    }

    fn percent_promo(code: &str, value: u32) -> Promo {
        Promo {
            code: code.to_string(),
            kind: DiscountKind::Percent,
            value,
        }
    }

    #[test]
    fn test_empty_cart_is_all_zero() {
        let totals = Totals::from(&CartState::default());
        assert_eq!(totals.subtotal_cents, 0);
        assert_eq!(totals.discount_cents, 0);
        assert_eq!(totals.total_cents, 0);
    }

    #[test]
    fn test_subtotal_sums_lines() {
        let items = vec![item(1, 1000, 2), item(2, 250, 4)];
        assert_eq!(subtotal(&items).cents(), 3000);
    }

    #[test]
    fn test_subtotal_is_order_independent() {
        let forward = vec![item(1, 999, 3), item(2, 1250, 1), item(3, 75, 10)];
        let mut reversed = forward.clone();
        reversed.reverse();
        assert_eq!(subtotal(&forward), subtotal(&reversed));
    }

    #[test]
    fn test_discount_zero_without_promo() {
        assert_eq!(discount(Money::from_cents(5000), None).cents(), 0);
    }

    #[test]
    fn test_scenario_save20_on_three_units() {
        // addItem(id:1, $10.00, qty 1) then (qty 2) → one line, qty 3
        let state = CartState {
            items: vec![item(1, 1000, 3)],
            promo: Some(percent_promo("SAVE20", 20)),
        };
        let totals = Totals::from(&state);
        assert_eq!(totals.subtotal_cents, 3000); // $30.00
        assert_eq!(totals.discount_cents, 600); // $6.00
        assert_eq!(totals.total_cents, 2400); // $24.00
    }

    #[test]
    fn test_total_never_negative() {
        // A hypothetical 150% promo cannot drive the total below zero.
        let state = CartState {
            items: vec![item(1, 1000, 1)],
            promo: Some(percent_promo("SAVE150", 150)),
        };
        let totals = Totals::from(&state);
        assert_eq!(totals.discount_cents, 1500);
        assert_eq!(totals.total_cents, 0);
    }

    #[test]
    fn test_totals_money_accessors_format() {
        let state = CartState {
            items: vec![item(1, 123_456, 1)],
            promo: None,
        };
        let totals = Totals::from(&state);
        assert_eq!(totals.subtotal().to_string(), "$1,234.56");
        assert_eq!(totals.total().to_string(), "$1,234.56");
    }
}
