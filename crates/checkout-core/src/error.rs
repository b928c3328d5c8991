//! # Error Types
//!
//! Domain error types for checkout-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  checkout-core errors (this file)                                      │
//! │  └── PromoError       - Promo code rejection                           │
//! │                                                                         │
//! │  checkout-store errors (separate crate)                                │
//! │  └── StoreError       - Storage operation failures                     │
//! │                                                                         │
//! │  There are no other core error conditions: every other invalid input   │
//! │  (bad quantity, absent id) has a total-function fallback in the        │
//! │  reducer, and storage failures are swallowed by the session facade.    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Promo code rejection.
///
/// The display string is the exact human-readable message the promo form
/// shows; the facade returns this instead of an `{ok, message}` blob so the
/// caller can pattern-match while still getting the message for free.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PromoError {
    /// The input is not in the recognized code table.
    ///
    /// An existing active promo is left untouched when this is returned.
    #[error("Invalid promo code")]
    InvalidCode,
}

// =============================================================================
// Unit Tests
// =============================================================================
