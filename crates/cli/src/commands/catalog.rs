//! List the product catalog.

use maygloss_storefront::state::AppState;

/// Print the catalog, one product per line.
///
/// # Errors
///
/// Infallible today; returns `Result` for symmetry with other commands.
#[allow(clippy::print_stdout)]
pub fn run(state: &AppState) -> Result<(), Box<dyn std::error::Error>> {
    for product in state.catalog().all() {
        println!(
            "{:<4} {:<20} {:>8}  {} ({})",
            product.id.as_str(),
            product.name,
            product.price.to_string(),
            product.category,
            product.shade
        );
    }
    Ok(())
}
