//! # checkout-store: Storage Layer for the Checkout Cart
//!
//! This crate provides durable and session-scoped storage for the cart.
//! It uses sled, an embedded key-value store, for the durable side.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Checkout Cart Data Flow                           │
//! │                                                                         │
//! │  CartSession (checkout-session)                                        │
//! │       │  load / save / subscribe                                       │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  checkout-store (THIS CRATE)                    │   │
//! │  │                                                                 │   │
//! │  │   ┌────────────────┐   ┌────────────────┐   ┌───────────────┐  │   │
//! │  │   │   CartStore    │   │   CartEvents   │   │ SessionStore  │  │   │
//! │  │   │   (store.rs)   │   │   (store.rs)   │   │ (session.rs)  │  │   │
//! │  │   │                │   │                │   │               │  │   │
//! │  │   │ typed load/save│──►│ change stream  │   │ drawer flag,  │  │   │
//! │  │   │ version gate   │   │ for other      │   │ in-memory,    │  │   │
//! │  │   │ unchanged-skip │   │ sessions       │   │ per session   │  │   │
//! │  │   └───────┬────────┘   └────────────────┘   └───────────────┘  │   │
//! │  └───────────┼─────────────────────────────────────────────────────┘   │
//! │              ▼                                                          │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              sled database (one dir per "origin")               │   │
//! │  │              key "checkout_cart_v1" → JSON payload              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`store`] - Durable cart store and its change-event stream
//! - [`session`] - Session-scoped flag store (drawer open)
//! - [`error`] - Storage error types
//!
//! ## Failure Policy
//! Every read/write can fail (disk full, corrupt payload); errors propagate
//! out of this crate typed, and the session facade swallows them so the cart
//! keeps operating in-memory-only. The `warn!` trail here is the only place
//! those failures remain visible.

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod session;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{StoreError, StoreResult};
pub use session::SessionStore;
pub use store::{CartEventWait, CartEvents, CartStore};

// =============================================================================
// Storage Keys
// =============================================================================

/// Durable-storage key for the serialized cart payload.
///
/// Shared by every session on the same store; concurrent writers interleave
/// with last-writer-wins and no locking.
pub const CART_KEY: &str = "checkout_cart_v1";

/// Session-scoped key for the drawer-open flag (`"1"` or `"0"`).
pub const DRAWER_KEY: &str = "cart_open";
