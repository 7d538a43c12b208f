//! Application state wiring the storefront components together.

use std::sync::Arc;

use maygloss_core::ProductId;

use crate::assistant::AssistantClient;
use crate::cart::CartStore;
use crate::catalog::Catalog;
use crate::checkout::CheckoutFlow;
use crate::config::StorefrontConfig;
use crate::notify::NotificationBus;
use crate::persist::{CartSlot, FileSlot};
use crate::router::{NavigationState, Page, Router};

/// Application state shared across the storefront.
///
/// This struct is cheaply cloneable via `Arc` and provides access to the
/// stores, the catalog, and the assistant. It also owns the checkout
/// session lifecycle: entering the Checkout page begins a session,
/// leaving it abandons the session.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: Catalog,
    cart: CartStore,
    bus: NotificationBus,
    router: Router,
    checkout: CheckoutFlow,
    assistant: Option<AssistantClient>,
}

impl AppState {
    /// Create application state with the file-backed cart slot from
    /// configuration.
    #[must_use]
    pub fn new(config: StorefrontConfig) -> Self {
        let slot = Arc::new(FileSlot::new(&config.cart_path));
        Self::with_slot(config, slot)
    }

    /// Create application state over an explicit cart slot.
    #[must_use]
    pub fn with_slot(config: StorefrontConfig, slot: Arc<dyn CartSlot>) -> Self {
        let bus = NotificationBus::new();
        let cart = CartStore::load(slot, bus.clone());
        let router = Router::new();
        let checkout = CheckoutFlow::new(
            config.checkout.clone(),
            cart.clone(),
            bus.clone(),
            router.clone(),
        );
        let assistant = config.assistant.as_ref().map(AssistantClient::new);

        Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog: Catalog::standard(),
                cart,
                bus,
                router,
                checkout,
                assistant,
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the product catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    /// Get a reference to the cart store.
    #[must_use]
    pub fn cart(&self) -> &CartStore {
        &self.inner.cart
    }

    /// Get a reference to the notification bus.
    #[must_use]
    pub fn notifications(&self) -> &NotificationBus {
        &self.inner.bus
    }

    /// Get a reference to the navigation router.
    #[must_use]
    pub fn router(&self) -> &Router {
        &self.inner.router
    }

    /// Get a reference to the checkout flow.
    #[must_use]
    pub fn checkout(&self) -> &CheckoutFlow {
        &self.inner.checkout
    }

    /// Get a reference to the assistant, if configured.
    #[must_use]
    pub fn assistant(&self) -> Option<&AssistantClient> {
        self.inner.assistant.as_ref()
    }

    /// Navigate to a page, keeping the checkout session in sync.
    pub fn navigate(&self, page: Page, id: Option<ProductId>) -> NavigationState {
        let state = self.inner.router.navigate(page, id);
        self.sync_checkout(state.page);
        state
    }

    /// Apply an external location change, keeping the checkout session in
    /// sync.
    pub fn handle_location_change(&self, token: &str) -> NavigationState {
        let state = self.inner.router.handle_location_change(token);
        self.sync_checkout(state.page);
        state
    }

    fn sync_checkout(&self, page: Page) {
        if page == Page::Checkout {
            self.inner.checkout.begin();
        } else {
            self.inner.checkout.abandon();
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::checkout::CheckoutStep;
    use crate::persist::MemorySlot;

    fn state() -> AppState {
        let config = StorefrontConfig {
            cart_path: "unused.json".into(),
            checkout: crate::config::CheckoutConfig::default(),
            assistant: None,
        };
        AppState::with_slot(config, Arc::new(MemorySlot::new()))
    }

    #[tokio::test(start_paused = true)]
    async fn test_entering_checkout_begins_session() {
        let app = state();
        assert_eq!(app.checkout().step(), None);

        app.navigate(Page::Checkout, None);
        assert_eq!(app.checkout().step(), Some(CheckoutStep::Shipping));
    }

    #[tokio::test(start_paused = true)]
    async fn test_leaving_checkout_abandons_session() {
        let app = state();
        app.navigate(Page::Checkout, None);
        app.checkout().continue_to_payment();

        app.navigate(Page::Shop, None);
        assert_eq!(app.checkout().step(), None);

        // Returning starts over at Shipping; no resumability
        app.navigate(Page::Checkout, None);
        assert_eq!(app.checkout().step(), Some(CheckoutStep::Shipping));
    }

    #[tokio::test(start_paused = true)]
    async fn test_external_location_change_drives_session_too() {
        let app = state();
        app.handle_location_change("checkout");
        assert_eq!(app.checkout().step(), Some(CheckoutStep::Shipping));

        app.handle_location_change("product/3");
        assert_eq!(app.checkout().step(), None);
        assert_eq!(app.router().state().page, Page::Product);
    }

    #[tokio::test(start_paused = true)]
    async fn test_assistant_absent_without_key() {
        let app = state();
        assert!(app.assistant().is_none());
    }
}
