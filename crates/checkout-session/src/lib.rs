//! # checkout-session: Cart Session Facade
//!
//! Composes the pure reducer, the persistence bridge, and derived totals
//! into the single read/write interface the UI layer consumes.
//!
//! ## Session Anatomy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        One CartSession ("tab")                          │
//! │                                                                         │
//! │  UI verbs                       in-memory state        storage          │
//! │  ────────                       ───────────────        ───────          │
//! │  add_item ──────┐                                                       │
//! │  remove_item ───┼── dispatch ─► reduce(state, a) ──► save() after the  │
//! │  update_qty ────┤               Arc<Mutex<_>>         hydration gate    │
//! │  apply_promo ───┘                    ▲                                  │
//! │                                      │                                  │
//! │  listener thread ◄── subscribe() ────┴── writes from sibling sessions  │
//! │  (hydrates, never writes back)                                          │
//! │                                                                         │
//! │  drawer_open / set_drawer_open ──► SessionStore (ephemeral, per tab)   │
//! │                                                                         │
//! │  items / promo / totals / hydrated ──► read-only snapshots             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Consistency Model
//! Local dispatches apply in issue order under the state mutex. Writes from
//! sibling sessions arrive asynchronously and overwrite wholesale: last
//! writer to the shared key wins, and the design accepts eventual (not
//! strict) consistency across sessions.

pub mod session;

pub use session::CartSession;
