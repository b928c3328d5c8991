//! # Domain Types
//!
//! Core domain types for the checkout cart.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │ CatalogProduct  │   │    CartItem     │   │     Promo       │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │──►│  id (key)       │   │  code "SAVE10"  │       │
//! │  │  title          │   │  title (frozen) │   │  kind: Percent  │       │
//! │  │  price_cents    │   │  price (frozen) │   │  value: 10      │       │
//! │  │  thumbnail      │   │  qty >= 1       │   └────────┬────────┘       │
//! │  └─────────────────┘   └────────┬────────┘            │                │
//! │                                 │                     │                │
//! │                        ┌────────▼─────────────────────▼──┐             │
//! │                        │           CartState             │             │
//! │                        │  items: Vec<CartItem> (ordered) │             │
//! │                        │  promo: Option<Promo>  (0 or 1) │             │
//! │                        └────────────────┬────────────────┘             │
//! │                                         │ items + promo only          │
//! │                        ┌────────────────▼────────────────┐             │
//! │                        │         PersistedCart           │             │
//! │                        │  version + items + promo        │             │
//! │                        │  (drawer flag is NOT here)      │             │
//! │                        └─────────────────────────────────┘             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Pattern
//! `CartItem` freezes `title`, `thumbnail`, and `price_cents` from the
//! catalog at add-time. If the catalog price later changes, the cart keeps
//! showing (and charging) what the shopper saw when they added the item.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::SCHEMA_VERSION;

// =============================================================================
// Catalog Collaborator Contract
// =============================================================================

/// The slice of a catalog record the cart actually reads.
///
/// The catalog fetch itself (the remote product API) lives outside this
/// workspace; the product grid and detail views hand the cart a fully-formed
/// record and the cart copies exactly these fields into a [`CartItem`].
/// Whatever else the catalog schema carries is ignored here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CatalogProduct {
    /// Catalog product identifier.
    pub id: u64,

    /// Display name.
    pub title: String,

    /// Unit price in cents.
    pub price_cents: i64,

    /// Thumbnail image URL.
    pub thumbnail: String,
}

// =============================================================================
// Cart Item
// =============================================================================

/// One distinct product line in the cart.
///
/// ## Invariants
/// - `id` is unique within the cart (same-id adds accumulate quantity)
/// - `qty >= 1` after every reducer mutation
/// - Display fields are first-write-wins: a later add with a different
///   title or price never rewrites them
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartItem {
    /// Catalog product identifier (the cart's unique key).
    pub id: u64,

    /// Product title at add-time (frozen).
    pub title: String,

    /// Thumbnail URL at add-time (frozen).
    pub thumbnail: String,

    /// Unit price in cents at add-time (frozen).
    pub price_cents: i64,

    /// Quantity in cart; always >= 1.
    pub qty: i64,
}

impl CartItem {
    /// Creates a cart item from a catalog record and quantity.
    ///
    /// ## Price Freezing
    /// The price is captured at this moment. If the catalog price changes
    /// afterwards, this cart item retains the original price.
    pub fn from_product(product: &CatalogProduct, qty: i64) -> Self {
        CartItem {
            id: product.id,
            title: product.title.clone(),
            thumbnail: product.thumbnail.clone(),
            price_cents: product.price_cents,
            qty: qty.max(1),
        }
    }

    /// Returns the unit price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }

    /// Calculates the line total (unit price × quantity).
    #[inline]
    pub fn line_total(&self) -> Money {
        self.price().multiply_quantity(self.qty)
    }
}

// =============================================================================
// Promo
// =============================================================================

/// Discount kind. The recognized set currently only carries
/// percentage-of-subtotal promos, but the wire shape keeps the tag so the
/// frontend can branch on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum DiscountKind {
    /// Percentage of subtotal.
    Percent,
}

/// An applied promo code.
///
/// ## Invariants
/// - The cart holds zero or one promo at a time
/// - Applying a new promo replaces any prior one
/// - No expiry, no stacking
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Promo {
    /// One of the recognized codes ("SAVE10", "SAVE20").
    pub code: String,

    /// Discount kind (wire name `type`).
    #[serde(rename = "type")]
    pub kind: DiscountKind,

    /// Percentage value, paired 1:1 with `code` in the recognized set.
    pub value: u32,
}

// =============================================================================
// Cart State
// =============================================================================

/// The aggregate cart state: ordered line items plus an optional promo.
///
/// Owned exclusively by the session facade; the reducer is the only
/// component that produces a new `CartState`. Everything else reads it as
/// an immutable snapshot.
///
/// ## Ordering
/// `items` keeps insertion order. Quantity updates edit entries in place;
/// nothing is ever re-sorted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartState {
    /// Line items in insertion order.
    pub items: Vec<CartItem>,

    /// At most one active promo.
    pub promo: Option<Promo>,
}

impl CartState {
    /// Returns the number of distinct line items.
    #[inline]
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Returns the total quantity across all lines (the header badge count).
    pub fn total_qty(&self) -> i64 {
        self.items.iter().map(|i| i.qty).sum()
    }

    /// Checks if the cart is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

// =============================================================================
// Persisted Shape
// =============================================================================

/// The durable-storage serialization of a cart.
///
/// Carries only `items` and `promo` (the drawer-open flag is ephemeral
/// session state and is stored separately), plus a schema `version` tag so
/// a payload from an incompatible revision loads as absent instead of being
/// merged as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PersistedCart {
    /// Schema version; payloads with any other value hydrate as empty.
    #[serde(default)]
    pub version: u32,

    /// Line items, insertion order preserved.
    pub items: Vec<CartItem>,

    /// Active promo, if any.
    pub promo: Option<Promo>,
}

impl From<&CartState> for PersistedCart {
    fn from(state: &CartState) -> Self {
        PersistedCart {
            version: SCHEMA_VERSION,
            items: state.items.clone(),
            promo: state.promo.clone(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
