//! # Session-Scoped Store
//!
//! The ephemeral side of the persistence bridge: per-session string flags
//! that never touch disk and vanish when the session does. This is the
//! browser `sessionStorage` generalized to a plain owned map.
//!
//! The only flag the cart keeps here is the drawer-open boolean, stored
//! under [`DRAWER_KEY`](crate::DRAWER_KEY) as `"1"`/`"0"`. It is deliberately
//! NOT part of the durable payload, so a restored cart never pops its
//! drawer open on an unrelated session.

use std::collections::HashMap;
use std::sync::Mutex;

use tracing::debug;

use crate::DRAWER_KEY;

/// In-memory session-scoped key-value store.
///
/// ## Scope Semantics
/// Owned by (usually) exactly one session and dropped with it. Sharing one
/// instance across two `CartSession` values models a reload within the same
/// tab: the drawer flag survives, while a fresh instance models a new tab
/// where it does not.
#[derive(Debug, Default)]
pub struct SessionStore {
    values: Mutex<HashMap<String, String>>,
}

impl SessionStore {
    /// Creates an empty session store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the value stored under `key`, if any.
    pub fn get(&self, key: &str) -> Option<String> {
        self.values
            .lock()
            .expect("session store mutex poisoned")
            .get(key)
            .cloned()
    }

    /// Stores `value` under `key`, replacing any prior value.
    pub fn set(&self, key: &str, value: impl Into<String>) {
        let value = value.into();
        debug!(key, %value, "Session store write");
        self.values
            .lock()
            .expect("session store mutex poisoned")
            .insert(key.to_string(), value);
    }

    /// Reads the drawer-open flag; absent or anything but `"1"` is closed.
    pub fn drawer_open(&self) -> bool {
        self.get(DRAWER_KEY).as_deref() == Some("1")
    }

    /// Writes the drawer-open flag as `"1"`/`"0"`.
    pub fn set_drawer_open(&self, open: bool) {
        self.set(DRAWER_KEY, if open { "1" } else { "0" });
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
