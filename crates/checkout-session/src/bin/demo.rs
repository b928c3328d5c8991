//! # Checkout Demo Driver
//!
//! Drives a scripted cart session against a hardcoded catalog, standing in
//! for the storefront UI (the product grid and detail views that normally
//! fetch the remote catalog API and call `add_item`).
//!
//! ## Usage
//! ```bash
//! # Default store directory (./data/cart)
//! cargo run -p checkout-session --bin demo
//!
//! # Custom store directory; run twice to watch the cart survive a restart
//! cargo run -p checkout-session --bin demo -- ./my-cart
//!
//! # Verbose logging
//! RUST_LOG=debug cargo run -p checkout-session --bin demo
//! ```

use std::env;
use std::error::Error;
use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use checkout_core::{CartItem, CatalogProduct};
use checkout_session::CartSession;
use checkout_store::CartStore;

/// Stand-in for the remote catalog API response.
const CATALOG: &[(u64, &str, i64, &str)] = &[
    (1, "Essence Mascara Lash Princess", 999, "mascara.webp"),
    (2, "Eyeshadow Palette with Mirror", 1999, "palette.webp"),
    (3, "Powder Canister", 1499, "powder.webp"),
    (4, "Red Lipstick", 1299, "lipstick.webp"),
    (5, "Red Nail Polish", 899, "polish.webp"),
];

fn catalog_product(id: u64) -> Option<CatalogProduct> {
    CATALOG
        .iter()
        .find(|(pid, _, _, _)| *pid == id)
        .map(|(pid, title, price_cents, thumbnail)| CatalogProduct {
            id: *pid,
            title: (*title).to_string(),
            price_cents: *price_cents,
            thumbnail: (*thumbnail).to_string(),
        })
}

fn main() -> Result<(), Box<dyn Error>> {
    init_tracing();

    let path = env::args().nth(1).unwrap_or_else(|| "./data/cart".to_string());
    let store = Arc::new(CartStore::open(&path)?);
    let session = CartSession::attach(store);

    if !session.items().is_empty() {
        info!("Cart restored from a previous run:");
        print_summary(&session);
    }

    // Scripted shopping trip.
    for (id, qty) in [(1, 1), (2, 2), (1, 2)] {
        if let Some(product) = catalog_product(id) {
            session.add_item(CartItem::from_product(&product, qty));
        }
    }
    session.update_qty(2, 1.0);
    session.set_drawer_open(true);

    match session.apply_promo_code("save20") {
        Ok(promo) => info!(code = %promo.code, value = promo.value, "Promo applied"),
        Err(e) => info!(error = %e, "Promo rejected"),
    }
    if let Err(e) = session.apply_promo_code("BOGUS") {
        info!(error = %e, "Promo rejected as expected");
    }

    print_summary(&session);
    Ok(())
}

fn print_summary(session: &CartSession) {
    let totals = session.totals();
    println!();
    println!("  ORDER SUMMARY");
    println!("  ──────────────────────────────────────────────");
    for item in session.items() {
        println!(
            "  {:<34} x{:<3} {:>8}",
            item.title,
            item.qty,
            item.line_total().to_string()
        );
    }
    println!("  ──────────────────────────────────────────────");
    println!("  {:<38} {:>8}", "Subtotal", totals.subtotal().to_string());
    if let Some(promo) = session.promo() {
        let label = format!("Discount ({})", promo.code);
        println!("  {:<38} -{:>7}", label, totals.discount().to_string());
    }
    println!("  {:<38} {:>8}", "TOTAL", totals.total().to_string());
    println!();
}

/// Initializes the tracing subscriber for structured logging.
fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,checkout=debug"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}
