//! # Cart Reducer
//!
//! The cart state machine: a tagged union of actions processed by a single
//! pure transition function.
//!
//! ## Action Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart State Transitions                               │
//! │                                                                         │
//! │  UI Action                 CartAction              State Change         │
//! │  ─────────                 ──────────              ────────────         │
//! │                                                                         │
//! │  Click "Add to cart" ────► AddItem(item) ────────► qty accumulates or  │
//! │                                                    item appends         │
//! │  Click remove ───────────► RemoveItem { id } ────► entry dropped       │
//! │                                                    (absent = no-op)     │
//! │  Edit qty field ─────────► UpdateQty { id, qty } ► clamp to >= 1       │
//! │                                                                         │
//! │  Promo form submit ──────► ApplyPromo(promo) ────► promo replaced      │
//! │  Click "remove promo" ───► ClearPromo ───────────► promo = None        │
//! │                                                                         │
//! │  Startup / other tab ────► HydratePersisted(p) ──► items + promo       │
//! │                                                    overwritten wholesale│
//! │                                                                         │
//! │  Every action is TOTAL: invalid input clamps or no-ops, never fails.   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::types::{CartItem, CartState, PersistedCart, Promo};

// =============================================================================
// Actions
// =============================================================================

/// The closed set of cart transitions.
///
/// `UpdateQty` deliberately carries `f64`: quantity arrives from a free-form
/// input field, and the clamp (floor, minimum 1, non-finite → 1) is part of
/// the transition's contract rather than the caller's problem.
#[derive(Debug, Clone, PartialEq)]
pub enum CartAction {
    /// Add an item; same-id entries accumulate quantity in place.
    AddItem(CartItem),

    /// Remove an entry by id; absent id is a no-op.
    RemoveItem { id: u64 },

    /// Set an entry's quantity, clamped to `max(1, floor(qty))`.
    UpdateQty { id: u64, qty: f64 },

    /// Replace the active promo unconditionally (including with None).
    ApplyPromo(Option<Promo>),

    /// Drop the active promo.
    ClearPromo,

    /// Overwrite `items` and `promo` wholesale from a persisted payload.
    /// Used only at startup and on cross-session sync.
    HydratePersisted(PersistedCart),
}

// =============================================================================
// Transition Function
// =============================================================================

/// Applies an action to a cart state, producing the next state.
///
/// Pure and total: no I/O, no failure path, and fields unrelated to the
/// action are preserved by construction.
pub fn reduce(mut state: CartState, action: CartAction) -> CartState {
    match action {
        CartAction::AddItem(incoming) => {
            if let Some(existing) = state.items.iter_mut().find(|i| i.id == incoming.id) {
                // First-write-wins for display fields: only qty accumulates,
                // and the entry keeps its position.
                existing.qty += incoming.qty;
            } else {
                state.items.push(incoming);
            }
        }

        CartAction::RemoveItem { id } => {
            state.items.retain(|i| i.id != id);
        }

        CartAction::UpdateQty { id, qty } => {
            if let Some(item) = state.items.iter_mut().find(|i| i.id == id) {
                item.qty = clamp_qty(qty);
            }
        }

        CartAction::ApplyPromo(promo) => {
            state.promo = promo;
        }

        CartAction::ClearPromo => {
            state.promo = None;
        }

        CartAction::HydratePersisted(persisted) => {
            state.items = persisted.items;
            state.promo = persisted.promo;
        }
    }

    state
}

/// Clamps a raw quantity input to a valid cart quantity.
///
/// ## Rules
/// - non-finite (NaN, ±∞) → 1
/// - fractional → floored
/// - anything below 1 after flooring → 1
pub fn clamp_qty(qty: f64) -> i64 {
    if !qty.is_finite() {
        return 1;
    }
    let floored = qty.floor();
    if floored < 1.0 {
        1
    } else {
        floored as i64
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
