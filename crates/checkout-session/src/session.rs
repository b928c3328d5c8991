//! # Cart Session
//!
//! The facade over reducer + persistence bridge + pricing.
//!
//! ## Startup Order
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      CartSession::attach                                │
//! │                                                                         │
//! │  1. load() persisted {items, promo} ──► HydratePersisted               │
//! │     absent / malformed / failed ──────► stay empty, warn!, continue    │
//! │  2. drawer flag served read-through from the session store             │
//! │  3. hydrated gate opens (regardless of step 1's outcome)               │
//! │  4. from here on, every dispatch persists the new state                │
//! │     (the gate keeps the pre-hydration empty state from clobbering      │
//! │      a previously saved cart)                                           │
//! │  5. listener thread consumes subscribe() and hydrates on each event    │
//! │     (last-writer-wins; the listener never writes back)                  │
//! │  6. dropping the session signals and joins the listener, so no thread  │
//! │     outlives the session holding the store open                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::mem;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, Weak};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tracing::{debug, warn};

use checkout_core::reducer::{reduce, CartAction};
use checkout_core::{CartItem, CartState, Money, PersistedCart, Promo, PromoError, Totals};
use checkout_store::{CartEventWait, CartEvents, CartStore, SessionStore};

// =============================================================================
// Cart Session
// =============================================================================

/// One live cart session ("tab").
///
/// ## Thread Safety
/// State lives behind `Arc<Mutex<CartState>>`:
/// - The UI thread dispatches actions in issue order
/// - The listener thread applies hydrates from sibling sessions
/// Only one of them transitions the state at a time; each transition
/// produces a new snapshot consumed by the next.
#[derive(Debug)]
pub struct CartSession {
    inner: Arc<Inner>,
    /// Stop signal for the listener thread, checked between bounded waits.
    shutdown: Arc<AtomicBool>,
    listener: Option<JoinHandle<()>>,
}

/// Upper bound on how long a dropped session's listener keeps running
/// (and keeps its store handle alive) before it notices the stop signal.
const LISTENER_POLL: Duration = Duration::from_millis(25);

#[derive(Debug)]
struct Inner {
    store: Arc<CartStore>,
    session: Arc<SessionStore>,
    state: Mutex<CartState>,
    /// Write gate: false until the startup hydration attempt completes.
    hydrated: AtomicBool,
}

impl CartSession {
    /// Attaches a new session to a shared durable store, with a fresh
    /// session-scoped store (a brand-new tab).
    pub fn attach(store: Arc<CartStore>) -> Self {
        Self::attach_with_session(store, Arc::new(SessionStore::new()))
    }

    /// Attaches a new session reusing an existing session-scoped store
    /// (a reload within the same tab: the drawer flag survives).
    pub fn attach_with_session(store: Arc<CartStore>, session: Arc<SessionStore>) -> Self {
        let inner = Arc::new(Inner {
            store: Arc::clone(&store),
            session,
            state: Mutex::new(CartState::default()),
            hydrated: AtomicBool::new(false),
        });

        // Startup hydration. Absent, malformed, or failed reads leave the
        // empty initial state in place; nothing is surfaced to the caller.
        match inner.store.load() {
            Ok(Some(persisted)) => {
                let mut state = inner.lock_state();
                *state = reduce(mem::take(&mut *state), CartAction::HydratePersisted(persisted));
                debug!(items = state.item_count(), "Session hydrated from store");
            }
            Ok(None) => debug!("No persisted cart; session starts empty"),
            Err(e) => warn!(error = %e, "Cart hydration failed; session starts empty"),
        }

        // The gate opens even when hydration failed: from here on local
        // changes are worth persisting.
        inner.hydrated.store(true, Ordering::SeqCst);

        // Cross-session listener. Waits in bounded slices between checks of
        // the stop signal, and holds only a Weak to the session state, so
        // Drop can stop and join it before the store handle goes away.
        let events = store.subscribe();
        let weak = Arc::downgrade(&inner);
        let shutdown = Arc::new(AtomicBool::new(false));
        let listener = thread::spawn({
            let shutdown = Arc::clone(&shutdown);
            move || listen(events, weak, shutdown)
        });

        CartSession {
            inner,
            shutdown,
            listener: Some(listener),
        }
    }

    // -------------------------------------------------------------------------
    // Write operations
    // -------------------------------------------------------------------------

    /// Adds an item to the cart (quantity accumulates on a same-id entry).
    ///
    /// The caller (product card or detail view) builds the `CartItem`
    /// from a catalog record; no catalog lookup happens here.
    pub fn add_item(&self, item: CartItem) {
        debug!(id = item.id, qty = item.qty, "add_item");
        self.dispatch(CartAction::AddItem(item));
    }

    /// Removes an entry by id; absent id is a no-op.
    pub fn remove_item(&self, id: u64) {
        debug!(id, "remove_item");
        self.dispatch(CartAction::RemoveItem { id });
    }

    /// Sets an entry's quantity; input is clamped to `max(1, floor(qty))`.
    pub fn update_qty(&self, id: u64, qty: f64) {
        debug!(id, qty, "update_qty");
        self.dispatch(CartAction::UpdateQty { id, qty });
    }

    /// Normalizes and applies a promo code.
    ///
    /// ## Returns
    /// - `Ok(promo)` - the code was recognized and is now active
    /// - `Err(PromoError::InvalidCode)` - rejected; an existing active
    ///   promo is left untouched
    pub fn apply_promo_code(&self, code: &str) -> Result<Promo, PromoError> {
        match checkout_core::promo::lookup(code) {
            Some(promo) => {
                debug!(code = %promo.code, "apply_promo_code");
                self.dispatch(CartAction::ApplyPromo(Some(promo.clone())));
                Ok(promo)
            }
            None => {
                debug!(input = code, "apply_promo_code rejected");
                Err(PromoError::InvalidCode)
            }
        }
    }

    /// Clears the active promo.
    pub fn clear_promo(&self) {
        debug!("clear_promo");
        self.dispatch(CartAction::ClearPromo);
    }

    // -------------------------------------------------------------------------
    // Read operations
    // -------------------------------------------------------------------------

    /// Returns a snapshot of the line items, in insertion order.
    pub fn items(&self) -> Vec<CartItem> {
        self.inner.lock_state().items.clone()
    }

    /// Returns the active promo, if any.
    pub fn promo(&self) -> Option<Promo> {
        self.inner.lock_state().promo.clone()
    }

    /// Returns the number of distinct line items.
    pub fn item_count(&self) -> usize {
        self.inner.lock_state().item_count()
    }

    /// Returns the total quantity across lines (the header badge count).
    pub fn total_qty(&self) -> i64 {
        self.inner.lock_state().total_qty()
    }

    /// Returns the derived totals snapshot.
    pub fn totals(&self) -> Totals {
        Totals::from(&*self.inner.lock_state())
    }

    /// Returns the subtotal.
    pub fn subtotal(&self) -> Money {
        self.totals().subtotal()
    }

    /// Returns the discount amount.
    pub fn discount(&self) -> Money {
        self.totals().discount()
    }

    /// Returns the grand total (never negative).
    pub fn total(&self) -> Money {
        self.totals().total()
    }

    /// True once the startup hydration attempt has completed.
    ///
    /// UI surfaces render skeletons until this flips; the persistence
    /// bridge uses it as the write gate.
    pub fn hydrated(&self) -> bool {
        self.inner.hydrated.load(Ordering::SeqCst)
    }

    // -------------------------------------------------------------------------
    // Drawer flag (session-scoped, independent of the durable gate)
    // -------------------------------------------------------------------------

    /// Reads the drawer-open flag from session-scoped storage.
    pub fn drawer_open(&self) -> bool {
        self.inner.session.drawer_open()
    }

    /// Persists the drawer-open flag to session-scoped storage.
    pub fn set_drawer_open(&self, open: bool) {
        self.inner.session.set_drawer_open(open);
    }

    // -------------------------------------------------------------------------
    // Dispatch
    // -------------------------------------------------------------------------

    /// Applies an action and, once the gate is open, persists the result.
    ///
    /// Persisting inside the state lock keeps the save order identical to
    /// the transition order. Storage failures are logged and swallowed: the
    /// session continues in-memory-only.
    fn dispatch(&self, action: CartAction) {
        let mut state = self.inner.lock_state();
        *state = reduce(mem::take(&mut *state), action);

        if self.inner.hydrated.load(Ordering::SeqCst) {
            let payload = PersistedCart::from(&*state);
            if let Err(e) = self.inner.store.save(&payload) {
                warn!(error = %e, "Cart persist failed; continuing in memory");
            }
        }
    }
}

/// Stopping the listener before the fields drop guarantees no thread
/// outlives the session holding the store open; an immediate reopen of the
/// store at the same path cannot hit its lock.
impl Drop for CartSession {
    fn drop(&mut self) {
        self.shutdown.store(true, Ordering::SeqCst);
        if let Some(listener) = self.listener.take() {
            if listener.join().is_err() {
                warn!("Cart change listener panicked");
            }
        }
    }
}

impl Inner {
    fn lock_state(&self) -> std::sync::MutexGuard<'_, CartState> {
        self.state.lock().expect("cart state mutex poisoned")
    }
}

// =============================================================================
// Cross-Session Listener
// =============================================================================

/// Consumes the store's change stream and hydrates the session state.
///
/// Each event overwrites items and promo wholesale (last-writer-wins). The
/// listener never writes back to the store, so two sessions can never feed
/// each other an endless echo. Waits are bounded to [`LISTENER_POLL`] so
/// the stop signal set by `Drop` is honored promptly; an event arriving
/// inside the window is still delivered immediately.
fn listen(mut events: CartEvents, weak: Weak<Inner>, shutdown: Arc<AtomicBool>) {
    while !shutdown.load(Ordering::SeqCst) {
        match events.next_timeout(LISTENER_POLL) {
            CartEventWait::Event(persisted) => {
                let Some(inner) = weak.upgrade() else {
                    break;
                };
                let mut state = inner.lock_state();
                *state = reduce(mem::take(&mut *state), CartAction::HydratePersisted(persisted));
                debug!(items = state.item_count(), "Session re-synced from store change");
            }
            CartEventWait::TimedOut => continue,
            CartEventWait::Closed => break,
        }
    }
    debug!("Cart change listener ended");
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use checkout_core::CatalogProduct;

    fn product(id: u64, price_cents: i64) -> CatalogProduct {
        CatalogProduct {
            id,
            title: format!("Product {}", id),
            price_cents,
            thumbnail: format!("thumb-{}.webp", id),
        }
    }

    fn fresh_session() -> CartSession {
        CartSession::attach(Arc::new(CartStore::temporary().unwrap()))
    }

    #[test]
    fn test_attach_on_empty_store_starts_empty_and_hydrated() {
        let session = fresh_session();
        assert!(session.hydrated());
        assert!(session.items().is_empty());
        assert!(session.promo().is_none());
    }

    #[test]
    fn test_scenario_accumulate_then_save20() {
        let session = fresh_session();
        session.add_item(CartItem::from_product(&product(1, 1000), 1));
        session.add_item(CartItem::from_product(&product(1, 1000), 2));

        let items = session.items();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, 1);
        assert_eq!(items[0].qty, 3);
        assert_eq!(session.subtotal().cents(), 3000);

        session.apply_promo_code("SAVE20").unwrap();
        assert_eq!(session.discount().cents(), 600);
        assert_eq!(session.total().cents(), 2400);
    }

    #[test]
    fn test_apply_promo_code_normalizes_input() {
        let session = fresh_session();
        let promo = session.apply_promo_code("  save10 ").unwrap();
        assert_eq!(promo.code, "SAVE10");
        assert_eq!(session.promo().unwrap().value, 10);
    }

    #[test]
    fn test_rejected_promo_keeps_active_promo() {
        let session = fresh_session();
        session.apply_promo_code("SAVE20").unwrap();

        let err = session.apply_promo_code("BOGUS").unwrap_err();
        assert_eq!(err, PromoError::InvalidCode);
        assert_eq!(err.to_string(), "Invalid promo code");
        assert_eq!(session.promo().unwrap().code, "SAVE20");
    }

    #[test]
    fn test_clear_promo() {
        let session = fresh_session();
        session.apply_promo_code("SAVE10").unwrap();
        session.clear_promo();
        assert!(session.promo().is_none());
        assert_eq!(session.discount().cents(), 0);
    }

    #[test]
    fn test_update_qty_clamps_through_facade() {
        let session = fresh_session();
        session.add_item(CartItem::from_product(&product(1, 500), 5));

        session.update_qty(1, 2.9);
        assert_eq!(session.items()[0].qty, 2);

        session.update_qty(1, -4.0);
        assert_eq!(session.items()[0].qty, 1);

        session.update_qty(1, f64::NAN);
        assert_eq!(session.items()[0].qty, 1);
    }

    #[test]
    fn test_remove_item_and_badge_counts() {
        let session = fresh_session();
        session.add_item(CartItem::from_product(&product(1, 500), 2));
        session.add_item(CartItem::from_product(&product(2, 300), 1));
        assert_eq!(session.item_count(), 2);
        assert_eq!(session.total_qty(), 3);

        session.remove_item(1);
        assert_eq!(session.item_count(), 1);

        // Absent id: no-op, not an error.
        session.remove_item(99);
        assert_eq!(session.item_count(), 1);
    }

    #[test]
    fn test_attach_hydrates_saved_cart_without_clobbering_it() {
        let store = Arc::new(CartStore::temporary().unwrap());

        let first = CartSession::attach(Arc::clone(&store));
        first.add_item(CartItem::from_product(&product(1, 1000), 2));
        first.apply_promo_code("SAVE10").unwrap();
        drop(first);

        // A new session hydrates the saved cart; attaching alone must not
        // overwrite the stored payload with an empty one.
        let second = CartSession::attach(Arc::clone(&store));
        assert_eq!(second.items()[0].qty, 2);
        assert_eq!(second.promo().unwrap().code, "SAVE10");

        let stored = store.load().unwrap().unwrap();
        assert_eq!(stored.items.len(), 1);
    }

    #[test]
    fn test_drawer_flag_survives_reload_not_new_tab() {
        let store = Arc::new(CartStore::temporary().unwrap());
        let tab = Arc::new(SessionStore::new());

        let session = CartSession::attach_with_session(Arc::clone(&store), Arc::clone(&tab));
        assert!(!session.drawer_open());
        session.set_drawer_open(true);
        drop(session);

        // Same tab, reloaded: flag survives.
        let reloaded = CartSession::attach_with_session(Arc::clone(&store), Arc::clone(&tab));
        assert!(reloaded.drawer_open());

        // Brand-new tab: fresh session store, drawer closed.
        let new_tab = CartSession::attach(store);
        assert!(!new_tab.drawer_open());
    }
}
