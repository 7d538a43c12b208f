//! Page navigation driven by location tokens.
//!
//! The location token is the serialized form of the navigation state:
//! `""`/`"home"`, `"shop"`, `"product/<id>"`, `"checkout"`. The parser is
//! the single source of truth: internal `navigate` calls encode a token
//! and run it through the same parser that handles external location
//! changes (address bar edits, back/forward), so the two paths can never
//! diverge. Malformed tokens degrade to Home rather than failing.
//!
//! The router never validates a product ID against the catalog; "product
//! not found" is the rendering layer's concern.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use maygloss_core::ProductId;

/// The storefront's pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Page {
    Home,
    Shop,
    Product,
    Checkout,
}

/// Current page plus optional selected product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationState {
    /// The page being displayed.
    pub page: Page,
    /// Selected product, only meaningful on [`Page::Product`].
    pub selected_product: Option<ProductId>,
}

impl NavigationState {
    /// The default state: Home with no selection.
    #[must_use]
    pub const fn home() -> Self {
        Self {
            page: Page::Home,
            selected_product: None,
        }
    }
}

impl Default for NavigationState {
    fn default() -> Self {
        Self::home()
    }
}

/// Parse a location token into a navigation state.
///
/// Unrecognized tokens are not an error; they fall back to Home.
#[must_use]
pub fn parse_location(token: &str) -> NavigationState {
    match token {
        "" | "home" => NavigationState::home(),
        "shop" => NavigationState {
            page: Page::Shop,
            selected_product: None,
        },
        "checkout" => NavigationState {
            page: Page::Checkout,
            selected_product: None,
        },
        other => match other.strip_prefix("product/") {
            Some(id) if !id.is_empty() => NavigationState {
                page: Page::Product,
                selected_product: Some(ProductId::new(id)),
            },
            _ => NavigationState::home(),
        },
    }
}

/// Encode a navigation state into its location token.
///
/// Exact inverse of [`parse_location`] for every reachable state. A
/// Product state without an ID is unreachable through `navigate`; it
/// degrades to the Home token.
#[must_use]
pub fn encode_location(state: &NavigationState) -> String {
    match (state.page, state.selected_product.as_ref()) {
        (Page::Home, _) | (Page::Product, None) => "home".to_owned(),
        (Page::Shop, _) => "shop".to_owned(),
        (Page::Checkout, _) => "checkout".to_owned(),
        (Page::Product, Some(id)) => format!("product/{id}"),
    }
}

/// The navigation state machine.
///
/// Owns the [`NavigationState`]; other components read it but mutate it
/// only through [`Router::navigate`] or external location changes.
#[derive(Clone, Default)]
pub struct Router {
    inner: Arc<Mutex<NavigationState>>,
}

impl Router {
    /// Create a router starting at Home.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, NavigationState> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Navigate to a page, with the product ID required for [`Page::Product`].
    ///
    /// Routes through the token encoder and parser so internal navigation
    /// behaves identically to an external location change.
    pub fn navigate(&self, page: Page, id: Option<ProductId>) -> NavigationState {
        let token = encode_location(&NavigationState {
            page,
            selected_product: id,
        });
        self.handle_location_change(&token)
    }

    /// Apply an external location change (e.g., back/forward, address bar).
    pub fn handle_location_change(&self, token: &str) -> NavigationState {
        let state = parse_location(token);
        tracing::debug!(?token, page = ?state.page, "navigated");
        *self.lock() = state.clone();
        state
    }

    /// The current navigation state.
    #[must_use]
    pub fn state(&self) -> NavigationState {
        self.lock().clone()
    }

    /// The current location token (for addressability).
    #[must_use]
    pub fn location(&self) -> String {
        encode_location(&self.lock())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip_for_every_page() {
        let states = [
            NavigationState::home(),
            NavigationState {
                page: Page::Shop,
                selected_product: None,
            },
            NavigationState {
                page: Page::Product,
                selected_product: Some(ProductId::new("3")),
            },
            NavigationState {
                page: Page::Checkout,
                selected_product: None,
            },
        ];

        for state in states {
            assert_eq!(parse_location(&encode_location(&state)), state);
        }
    }

    #[test]
    fn test_empty_and_home_tokens_are_home() {
        assert_eq!(parse_location(""), NavigationState::home());
        assert_eq!(parse_location("home"), NavigationState::home());
    }

    #[test]
    fn test_garbage_degrades_to_home() {
        for token in ["garbage", "producx/3", "checkout/extra", "product/", "shop2"] {
            assert_eq!(parse_location(token), NavigationState::home(), "token {token:?}");
        }
    }

    #[test]
    fn test_unresolvable_product_id_is_still_product_state() {
        // The router never checks the catalog; "not found" rendering is
        // someone else's job.
        let state = parse_location("product/does-not-exist");
        assert_eq!(state.page, Page::Product);
        assert_eq!(
            state.selected_product,
            Some(ProductId::new("does-not-exist"))
        );
    }

    #[test]
    fn test_navigate_and_external_change_agree() {
        let via_navigate = Router::new();
        via_navigate.navigate(Page::Product, Some(ProductId::new("5")));

        let via_location = Router::new();
        via_location.handle_location_change("product/5");

        assert_eq!(via_navigate.state(), via_location.state());
        assert_eq!(via_navigate.location(), "product/5");
    }

    #[test]
    fn test_router_starts_at_home() {
        let router = Router::new();
        assert_eq!(router.state(), NavigationState::home());
        assert_eq!(router.location(), "home");
    }

    #[test]
    fn test_navigate_away_clears_selection() {
        let router = Router::new();
        router.navigate(Page::Product, Some(ProductId::new("2")));
        router.navigate(Page::Shop, None);
        assert_eq!(router.state().selected_product, None);
    }
}
