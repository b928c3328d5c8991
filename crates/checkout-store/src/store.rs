//! # Durable Cart Store
//!
//! The durable side of the persistence bridge: one JSON payload under one
//! key, plus a subscription stream that generalizes the browser `storage`
//! event for cross-session sync.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Durable Store Operations                           │
//! │                                                                         │
//! │  Session startup ───────► load() ────────► Some(payload) | None        │
//! │                                            (version gate inside)        │
//! │                                                                         │
//! │  Every state change ────► save(payload) ─► skip if bytes unchanged,    │
//! │  (after hydration gate)                    else insert + flush          │
//! │                                                                         │
//! │  Session startup ───────► subscribe() ───► CartEvents: blocking        │
//! │                                            iterator of payloads other  │
//! │                                            sessions wrote              │
//! │                                                                         │
//! │  Writers do not coordinate: last write wins, eventual consistency.     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::Path;
use std::sync::mpsc::RecvTimeoutError;
use std::time::{Duration, Instant};

use sled::Event;
use tracing::{debug, info, warn};

use checkout_core::{PersistedCart, SCHEMA_VERSION};

use crate::error::StoreResult;
use crate::CART_KEY;

// =============================================================================
// Cart Store
// =============================================================================

/// Durable cart storage handle.
///
/// One `CartStore` models one browser origin's `localStorage`: every
/// session ("tab") attached to the same store shares the same cart key and
/// observes each other's writes through [`CartStore::subscribe`].
#[derive(Debug, Clone)]
pub struct CartStore {
    db: sled::Db,
}

impl CartStore {
    /// Opens (or creates) a durable store at the given directory.
    ///
    /// ## Example
    /// ```rust,ignore
    /// let store = CartStore::open("./data/cart")?;
    /// ```
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        info!(path = %path.as_ref().display(), "Opening cart store");
        let db = sled::open(path)?;
        Ok(CartStore { db })
    }

    /// Creates a temporary store that is deleted on drop (for testing).
    pub fn temporary() -> StoreResult<Self> {
        let db = sled::Config::new().temporary(true).open()?;
        Ok(CartStore { db })
    }

    /// Reads the persisted cart payload, if any.
    ///
    /// ## Returns
    /// - `Ok(Some(payload))` - a payload with the current schema version
    /// - `Ok(None)` - key absent, or payload from a foreign schema version
    ///   (stale carts load as empty rather than merging as-is)
    /// - `Err(_)` - storage failure or unparseable JSON; the caller decides
    ///   whether to swallow it
    pub fn load(&self) -> StoreResult<Option<PersistedCart>> {
        let Some(raw) = self.db.get(CART_KEY)? else {
            debug!("No persisted cart found");
            return Ok(None);
        };

        let payload: PersistedCart = serde_json::from_slice(&raw)?;
        if payload.version != SCHEMA_VERSION {
            warn!(
                found = payload.version,
                expected = SCHEMA_VERSION,
                "Persisted cart has foreign schema version; treating as absent"
            );
            return Ok(None);
        }

        debug!(items = payload.items.len(), "Loaded persisted cart");
        Ok(Some(payload))
    }

    /// Writes the cart payload to the durable key.
    ///
    /// ## Unchanged-Value Skip
    /// Browser storage events fire only when the stored value actually
    /// changes. Mirroring that, a write whose bytes equal the stored bytes
    /// is skipped entirely, so subscribers only wake on real changes.
    pub fn save(&self, payload: &PersistedCart) -> StoreResult<()> {
        let bytes = serde_json::to_vec(payload)?;

        if self.db.get(CART_KEY)?.as_deref() == Some(bytes.as_slice()) {
            debug!("Persisted cart unchanged; skipping write");
            return Ok(());
        }

        self.db.insert(CART_KEY, bytes)?;
        self.db.flush()?;
        debug!(items = payload.items.len(), "Persisted cart saved");
        Ok(())
    }

    /// Subscribes to changes of the cart key.
    ///
    /// The returned stream yields the parsed payload of every write any
    /// session lands on the cart key. This is the storage-change
    /// notification channel a session's background listener consumes to
    /// stay eventually consistent with its sibling sessions. Consumers
    /// that need to stop waiting (listener shutdown, negative assertions
    /// in tests) use [`CartEvents::next_timeout`]; the plain iterator
    /// blocks until a write lands.
    pub fn subscribe(&self) -> CartEvents {
        CartEvents {
            inner: self.db.watch_prefix(CART_KEY),
        }
    }
}

// =============================================================================
// Change Events
// =============================================================================

/// Stream of cart payloads written to the shared key.
///
/// Removals and unparseable or foreign-version payloads are skipped with a
/// `warn!` rather than surfaced; a malformed write from one session must
/// not take down the listeners in the others.
pub struct CartEvents {
    inner: sled::Subscriber,
}

/// Outcome of a bounded wait on the change stream.
#[derive(Debug, Clone, PartialEq)]
pub enum CartEventWait {
    /// A payload with the current schema version arrived.
    Event(PersistedCart),
    /// The window elapsed with no qualifying write.
    TimedOut,
    /// The event channel disconnected; nothing further will arrive.
    Closed,
}

impl CartEvents {
    /// Waits up to `timeout` for the next cart payload.
    ///
    /// Applies the same filtering as the blocking iterator; skipped events
    /// (removals, foreign versions, garbage) do not extend the deadline.
    pub fn next_timeout(&mut self, timeout: Duration) -> CartEventWait {
        let deadline = Instant::now() + timeout;
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match self.inner.next_timeout(remaining) {
                Ok(event) => {
                    if let Some(payload) = parse_event(event) {
                        return CartEventWait::Event(payload);
                    }
                }
                Err(RecvTimeoutError::Timeout) => return CartEventWait::TimedOut,
                Err(RecvTimeoutError::Disconnected) => return CartEventWait::Closed,
            }
        }
    }
}

impl Iterator for CartEvents {
    type Item = PersistedCart;

    fn next(&mut self) -> Option<Self::Item> {
        for event in self.inner.by_ref() {
            if let Some(payload) = parse_event(event) {
                return Some(payload);
            }
        }
        None
    }
}

/// Filters one raw store event down to a current-version cart payload.
fn parse_event(event: Event) -> Option<PersistedCart> {
    let Event::Insert { key, value } = event else {
        return None;
    };
    if key.as_ref() != CART_KEY.as_bytes() {
        return None;
    }

    match serde_json::from_slice::<PersistedCart>(&value) {
        Ok(payload) if payload.version == SCHEMA_VERSION => Some(payload),
        Ok(payload) => {
            warn!(
                found = payload.version,
                "Ignoring cart change with foreign schema version"
            );
            None
        }
        Err(e) => {
            warn!(error = %e, "Ignoring unparseable cart change");
            None
        }
    }
}

impl std::fmt::Debug for CartEvents {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartEvents").finish_non_exhaustive()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
