//! Scripted order walkthrough.
//!
//! Drives the full lifecycle against the real stores: browse, fill the
//! bag, adjust it, check out, and pay. Toasts are printed as they are
//! published so the notification bus is visible too.

use maygloss_core::ProductId;
use maygloss_storefront::router::Page;
use maygloss_storefront::state::AppState;

/// Run the walkthrough.
///
/// # Errors
///
/// Returns an error if a catalog lookup or the payment unexpectedly
/// fails.
#[allow(clippy::print_stdout)]
pub async fn run(state: &AppState) -> Result<(), Box<dyn std::error::Error>> {
    let crystal_dew = ProductId::new("1");
    let rose_quartz = ProductId::new("2");

    state.navigate(Page::Shop, None);
    println!("Browsing the shop ({} products)", state.catalog().all().len());

    let a = state
        .catalog()
        .find(&crystal_dew)
        .ok_or("catalog missing Crystal Dew")?
        .clone();
    let b = state
        .catalog()
        .find(&rose_quartz)
        .ok_or("catalog missing Rose Quartz")?
        .clone();

    state.navigate(Page::Product, Some(a.id.clone()));
    state.cart().add_item(&a);
    state.cart().add_item(&a);
    state.navigate(Page::Product, Some(b.id.clone()));
    state.cart().add_item(&b);
    state.cart().update_quantity(&b.id, 1);
    print_toasts(state);

    println!(
        "Bag: {} items, subtotal {}",
        state.cart().item_count(),
        state.cart().total()
    );

    state.navigate(Page::Checkout, None);
    state.checkout().continue_to_payment();
    println!(
        "Checkout: subtotal {}, grand total {}",
        state.cart().total(),
        state.checkout().grand_total(state.cart().total())
    );

    println!("Submitting payment...");
    let order = state
        .checkout()
        .submit_payment()
        .await
        .ok_or("payment was not accepted")?;
    print_toasts(state);

    println!(
        "Order {} placed at {}: {} lines, total {}",
        order.number,
        order.placed_at.format("%Y-%m-%d %H:%M:%S UTC"),
        order.items.len(),
        order.grand_total
    );
    println!(
        "Back on {:?}; bag is {}",
        state.router().state().page,
        if state.cart().items().is_empty() {
            "empty"
        } else {
            "not empty"
        }
    );

    Ok(())
}

#[allow(clippy::print_stdout)]
fn print_toasts(state: &AppState) {
    for note in state.notifications().snapshot() {
        println!("  [{:?}] {}", note.kind, note.message);
        state.notifications().dismiss(note.id);
    }
}
