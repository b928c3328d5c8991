//! Cross-session synchronization: two sessions ("tabs") attached to the
//! same store observe each other's writes through the change stream, with
//! last-writer-wins semantics.

use std::sync::Arc;
use std::time::{Duration, Instant};

use checkout_core::{CartItem, CatalogProduct};
use checkout_session::CartSession;
use checkout_store::CartStore;

fn product(id: u64, price_cents: i64) -> CatalogProduct {
    CatalogProduct {
        id,
        title: format!("Product {}", id),
        price_cents,
        thumbnail: format!("thumb-{}.webp", id),
    }
}

/// Polls until `check` passes or a generous deadline expires. Cross-session
/// delivery is asynchronous by design, so assertions only hold eventually.
fn eventually(check: impl Fn() -> bool) -> bool {
    let deadline = Instant::now() + Duration::from_secs(5);
    while Instant::now() < deadline {
        if check() {
            return true;
        }
        std::thread::sleep(Duration::from_millis(10));
    }
    check()
}

#[test]
fn tab_b_sees_tab_a_additions() {
    let store = Arc::new(CartStore::temporary().unwrap());
    let tab_a = CartSession::attach(Arc::clone(&store));
    let tab_b = CartSession::attach(Arc::clone(&store));

    tab_a.add_item(CartItem::from_product(&product(1, 1000), 3));

    assert!(
        eventually(|| tab_b.items().iter().any(|i| i.id == 1 && i.qty == 3)),
        "tab B never observed tab A's item"
    );

    // The synced item carries the frozen display fields, not defaults.
    let item = tab_b
        .items()
        .into_iter()
        .find(|i| i.id == 1)
        .expect("item present");
    assert_eq!(item.price_cents, 1000);
    assert_eq!(item.title, "Product 1");
}

#[test]
fn promo_propagates_between_tabs() {
    let store = Arc::new(CartStore::temporary().unwrap());
    let tab_a = CartSession::attach(Arc::clone(&store));
    let tab_b = CartSession::attach(Arc::clone(&store));

    tab_a.add_item(CartItem::from_product(&product(1, 1000), 3));
    assert!(eventually(|| !tab_b.items().is_empty()));

    tab_b.apply_promo_code("SAVE20").unwrap();

    assert!(
        eventually(|| tab_a.promo().map(|p| p.code) == Some("SAVE20".to_string())),
        "tab A never observed tab B's promo"
    );
    assert!(eventually(|| tab_a.total().cents() == 2400));
}

#[test]
fn last_writer_wins_on_removal() {
    let store = Arc::new(CartStore::temporary().unwrap());
    let tab_a = CartSession::attach(Arc::clone(&store));
    let tab_b = CartSession::attach(Arc::clone(&store));

    tab_a.add_item(CartItem::from_product(&product(1, 500), 1));
    tab_a.add_item(CartItem::from_product(&product(2, 750), 1));
    assert!(eventually(|| tab_b.item_count() == 2));

    tab_b.remove_item(1);

    assert!(
        eventually(|| {
            let items = tab_a.items();
            items.len() == 1 && items[0].id == 2
        }),
        "tab A never converged on tab B's removal"
    );
}
