//! # Promo Code Table
//!
//! The static, closed set of recognized promo codes.
//!
//! ## Lookup Flow
//! ```text
//! User input "  save10 " ──► trim + uppercase ──► "SAVE10"
//!                                                    │
//!                              ┌─────────────────────┴────────┐
//!                              │ SAVE10 → 10%   SAVE20 → 20%  │
//!                              └─────────────────────┬────────┘
//!                                                    │
//!                      Some(Promo) ◄── recognized ───┤
//!                      None        ◄── anything else ┘
//! ```
//!
//! Any other input is rejected; the facade turns `None` into
//! [`PromoError::InvalidCode`](crate::error::PromoError).

use crate::types::{DiscountKind, Promo};

/// The recognized codes and their percentage values.
///
/// Static and closed by design: there is no expiry, no stacking, and no
/// runtime configuration surface for this table.
const RECOGNIZED: &[(&str, u32)] = &[("SAVE10", 10), ("SAVE20", 20)];

/// Normalizes an input code (trim, uppercase) and looks it up.
///
/// ## Example
/// ```rust
/// use checkout_core::promo;
///
/// let promo = promo::lookup("  save20 ").unwrap();
/// assert_eq!(promo.code, "SAVE20");
/// assert_eq!(promo.value, 20);
///
/// assert!(promo::lookup("BOGUS").is_none());
/// ```
pub fn lookup(code: &str) -> Option<Promo> {
    let normalized = code.trim().to_uppercase();
    RECOGNIZED
        .iter()
        .find(|(recognized, _)| *recognized == normalized)
        .map(|(recognized, value)| Promo {
            code: (*recognized).to_string(),
            kind: DiscountKind::Percent,
            value: *value,
        })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_recognized_codes() {
        assert_eq!(lookup("SAVE10").unwrap().value, 10);
        assert_eq!(lookup("SAVE20").unwrap().value, 20);
    }

    #[test]
    fn test_lookup_normalizes_case_and_whitespace() {
        let promo = lookup("  save10 ").unwrap();
        assert_eq!(promo.code, "SAVE10");
        assert_eq!(promo.value, 10);

        assert_eq!(lookup("Save20").unwrap(), lookup("SAVE20").unwrap());
    }

    #[test]
    fn test_lookup_rejects_unknown_codes() {
        assert!(lookup("BOGUS").is_none());
        assert!(lookup("").is_none());
        assert!(lookup("SAVE30").is_none());
        assert!(lookup("SAVE 10").is_none());
    }
}
