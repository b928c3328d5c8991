//! # checkout-core: Pure Cart Logic for the Checkout Demo
//!
//! This crate is the **heart** of the checkout cart. It contains the cart
//! state machine as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Checkout Cart Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              UI Surfaces (drawer, badge, promo form)            │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 checkout-session (facade)                       │   │
//! │  │      add_item, update_qty, apply_promo_code, totals             │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ checkout-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │  reducer  │  │  pricing  │  │   │
//! │  │   │ CartItem  │  │   Money   │  │ CartAction│  │  subtotal │  │   │
//! │  │   │   Promo   │  │ formatter │  │  reduce() │  │  discount │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO STORAGE • NO NETWORK • PURE FUNCTIONS            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 checkout-store (storage layer)                  │   │
//! │  │        durable cart payload, session flags, change events       │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (CartItem, Promo, CartState, PersistedCart)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`reducer`] - The cart state machine: `reduce(state, action) -> state`
//! - [`pricing`] - Derived totals (subtotal, discount, total)
//! - [`promo`] - The closed promo code table
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every transition is deterministic - same input = same output
//! 2. **No I/O**: Storage, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in cents (i64) to avoid float errors
//! 4. **Total Actions**: Every reducer action succeeds; invalid input clamps or no-ops
//!
//! ## Example Usage
//!
//! ```rust
//! use checkout_core::reducer::{reduce, CartAction};
//! use checkout_core::types::{CartItem, CartState};
//! use checkout_core::{pricing, promo};
//!
//! let state = CartState::default();
//! let item = CartItem {
//!     id: 1,
//!     title: "Essence Mascara".to_string(),
//!     thumbnail: "mascara.webp".to_string(),
//!     price_cents: 1000,
//!     qty: 3,
//! };
//!
//! let state = reduce(state, CartAction::AddItem(item));
//! let state = reduce(state, CartAction::ApplyPromo(promo::lookup("SAVE20")));
//!
//! let totals = pricing::Totals::from(&state);
//! assert_eq!(totals.subtotal_cents, 3000);
//! assert_eq!(totals.discount_cents, 600);
//! assert_eq!(totals.total_cents, 2400);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod pricing;
pub mod promo;
pub mod reducer;
pub mod types;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use checkout_core::Money` instead of
// `use checkout_core::money::Money`

pub use error::PromoError;
pub use money::Money;
pub use pricing::Totals;
pub use reducer::{reduce, CartAction};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Version tag carried inside the persisted cart payload.
///
/// ## Why a version tag?
/// The payload shape will change eventually, and an untagged blob from an
/// older revision would otherwise be merged as-is into live state. A
/// mismatched (or missing) tag makes the store treat the payload as absent,
/// so stale carts load as empty instead of corrupt.
pub const SCHEMA_VERSION: u32 = 1;
