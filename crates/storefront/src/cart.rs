//! The cart store: the shopper's bag and its invariants.
//!
//! Invariants held by every public operation:
//!
//! - At most one line per product ID; adding an existing product
//!   increments its quantity instead of appending a duplicate.
//! - Every line's quantity is >= 1; quantity deltas clamp at 1, and
//!   removal is always an explicit action.
//! - Lines keep insertion order across updates.
//! - The subtotal is recomputed on every read, never cached.
//!
//! Every mutation persists the bag synchronously through the configured
//! [`CartSlot`] before notifying, so a crash after a mutation loses at
//! most that one best-effort write.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use maygloss_core::{CartItem, Price, Product, ProductId};

use crate::notify::{NotificationBus, NotificationKind};
use crate::persist::CartSlot;

/// The shopper's bag.
///
/// Cheaply cloneable handle; all clones share the same bag. Other
/// components access cart data only through these operations.
#[derive(Clone)]
pub struct CartStore {
    inner: Arc<Mutex<CartInner>>,
    slot: Arc<dyn CartSlot>,
    bus: NotificationBus,
}

struct CartInner {
    items: Vec<CartItem>,
    bag_open: bool,
}

impl CartStore {
    /// Initialize the bag from the persistence slot.
    ///
    /// A missing or malformed slot degrades to an empty bag; the failure
    /// is logged, never surfaced.
    #[must_use]
    pub fn load(slot: Arc<dyn CartSlot>, bus: NotificationBus) -> Self {
        let mut items = match slot.load() {
            Ok(items) => items,
            Err(e) => {
                tracing::warn!("failed to load persisted cart, starting empty: {e}");
                Vec::new()
            }
        };
        // A hand-edited slot could violate the bag invariants; repair
        // rather than reject.
        for item in &mut items {
            item.quantity = item.quantity.max(1);
        }
        let mut seen = Vec::new();
        items.retain(|item| {
            let fresh = !seen.contains(item.id());
            if fresh {
                seen.push(item.id().clone());
            }
            fresh
        });

        Self {
            inner: Arc::new(Mutex::new(CartInner {
                items,
                bag_open: false,
            })),
            slot,
            bus,
        }
    }

    fn lock(&self) -> MutexGuard<'_, CartInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Persist the bag, best-effort.
    fn persist(&self, items: &[CartItem]) {
        if let Err(e) = self.slot.save(items) {
            tracing::warn!("failed to persist cart: {e}");
        }
    }

    /// Add one unit of a product to the bag.
    ///
    /// Increments the existing line if the product is already in the bag,
    /// otherwise appends a new line with quantity 1. Publishes a success
    /// notification and opens the bag drawer.
    pub fn add_item(&self, product: &Product) {
        let snapshot = {
            let mut inner = self.lock();
            match inner.items.iter_mut().find(|i| i.id() == &product.id) {
                Some(item) => item.quantity += 1,
                None => inner.items.push(CartItem::new(product.clone())),
            }
            inner.bag_open = true;
            inner.items.clone()
        };
        self.persist(&snapshot);
        tracing::debug!(product_id = %product.id, "item added to bag");
        self.bus.publish(
            format!("{} added to bag", product.name),
            NotificationKind::Success,
        );
    }

    /// Remove a line from the bag.
    ///
    /// No-op if the product is not in the bag; publishes an info
    /// notification only when a line was actually removed.
    pub fn remove_item(&self, id: &ProductId) {
        let removed = {
            let mut inner = self.lock();
            let pos = inner.items.iter().position(|i| i.id() == id);
            let removed = pos.map(|pos| inner.items.remove(pos));
            removed.map(|item| (item, inner.items.clone()))
        };

        if let Some((item, snapshot)) = removed {
            self.persist(&snapshot);
            tracing::debug!(product_id = %id, "item removed from bag");
            self.bus.publish(
                format!("Removed {} from bag", item.product.name),
                NotificationKind::Info,
            );
        }
    }

    /// Adjust a line's quantity by a signed delta, clamping at 1.
    ///
    /// No-op if the product is not in the bag. Emits no notification;
    /// this is direct manipulation, not an event worth announcing.
    pub fn update_quantity(&self, id: &ProductId, delta: i32) {
        let snapshot = {
            let mut inner = self.lock();
            let Some(item) = inner.items.iter_mut().find(|i| i.id() == id) else {
                return;
            };
            let next = i64::from(item.quantity) + i64::from(delta);
            item.quantity = u32::try_from(next.max(1)).unwrap_or(1);
            inner.items.clone()
        };
        self.persist(&snapshot);
    }

    /// Empty the bag.
    ///
    /// Called once, by a successful checkout completion.
    pub fn clear(&self) {
        {
            let mut inner = self.lock();
            inner.items.clear();
        }
        self.persist(&[]);
        tracing::debug!("bag cleared");
    }

    /// Current bag lines in insertion order.
    #[must_use]
    pub fn items(&self) -> Vec<CartItem> {
        self.lock().items.clone()
    }

    /// Subtotal: sum of price x quantity across lines.
    #[must_use]
    pub fn total(&self) -> Price {
        self.lock().items.iter().map(CartItem::line_total).sum()
    }

    /// Total units across all lines (the header badge count).
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.lock().items.iter().map(|i| i.quantity).sum()
    }

    /// Whether the bag drawer is open.
    #[must_use]
    pub fn is_bag_open(&self) -> bool {
        self.lock().bag_open
    }

    /// Open the bag drawer.
    pub fn open_bag(&self) {
        self.lock().bag_open = true;
    }

    /// Close the bag drawer.
    pub fn close_bag(&self) {
        self.lock().bag_open = false;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use maygloss_core::Price;

    use super::*;
    use crate::persist::MemorySlot;

    fn gloss(id: &str, name: &str, dollars: i64) -> Product {
        Product {
            id: ProductId::new(id),
            name: name.to_owned(),
            price: Price::from_dollars(dollars),
            category: "Tinted".to_owned(),
            shade: "Soft Pink".to_owned(),
            description: "Test gloss.".to_owned(),
            image: "https://example.com/gloss.jpg".to_owned(),
            ingredients: vec!["Shea Butter".to_owned()],
        }
    }

    fn store() -> (CartStore, Arc<MemorySlot>, NotificationBus) {
        let slot = Arc::new(MemorySlot::new());
        let bus = NotificationBus::new();
        let cart = CartStore::load(slot.clone(), bus.clone());
        (cart, slot, bus)
    }

    #[tokio::test(start_paused = true)]
    async fn test_add_twice_merges_into_one_line() {
        let (cart, _, _) = store();
        let product = gloss("1", "Crystal Dew", 24);

        cart.add_item(&product);
        cart.add_item(&product);

        let items = cart.items();
        assert_eq!(items.len(), 1);
        assert_eq!(items.first().unwrap().quantity, 2);
        assert_eq!(cart.total(), Price::from_dollars(48));
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_duplicate_ids_across_operations() {
        let (cart, _, _) = store();
        let a = gloss("1", "Crystal Dew", 24);
        let b = gloss("2", "Rose Quartz", 26);

        cart.add_item(&a);
        cart.add_item(&b);
        cart.add_item(&a);
        cart.update_quantity(&b.id, 3);
        cart.add_item(&b);

        let mut ids: Vec<_> = cart.items().iter().map(|i| i.id().clone()).collect();
        let total_lines = ids.len();
        ids.dedup();
        assert_eq!(ids.len(), total_lines);
        assert!(cart.items().iter().all(|i| i.quantity >= 1));
    }

    #[tokio::test(start_paused = true)]
    async fn test_update_quantity_clamps_at_one() {
        let (cart, _, _) = store();
        let product = gloss("1", "Crystal Dew", 24);
        cart.add_item(&product);

        cart.update_quantity(&product.id, -5);
        assert_eq!(cart.items().first().unwrap().quantity, 1);

        cart.update_quantity(&product.id, 2);
        assert_eq!(cart.items().first().unwrap().quantity, 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_update_quantity_absent_is_noop_and_silent() {
        let (cart, _, bus) = store();
        cart.update_quantity(&ProductId::new("missing"), 1);
        assert!(cart.items().is_empty());
        assert!(bus.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_remove_absent_is_noop_without_notification() {
        let (cart, _, bus) = store();
        cart.add_item(&gloss("1", "Crystal Dew", 24));
        let published = bus.len();

        cart.remove_item(&ProductId::new("missing"));
        assert_eq!(cart.items().len(), 1);
        assert_eq!(bus.len(), published);
    }

    #[tokio::test(start_paused = true)]
    async fn test_remove_present_publishes_info() {
        let (cart, _, bus) = store();
        cart.add_item(&gloss("2", "Rose Quartz", 26));

        cart.remove_item(&ProductId::new("2"));
        assert!(cart.items().is_empty());

        let notes = bus.snapshot();
        let removal = notes.last().unwrap();
        assert_eq!(removal.kind, NotificationKind::Info);
        assert!(removal.message.contains("Removed Rose Quartz"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_insertion_order_survives_updates() {
        let (cart, _, _) = store();
        cart.add_item(&gloss("1", "Crystal Dew", 24));
        cart.add_item(&gloss("2", "Rose Quartz", 26));
        cart.add_item(&gloss("3", "Starlight Shimmer", 28));

        cart.update_quantity(&ProductId::new("1"), 4);
        cart.remove_item(&ProductId::new("2"));

        let names: Vec<_> = cart
            .items()
            .iter()
            .map(|i| i.product.name.clone())
            .collect();
        assert_eq!(names, ["Crystal Dew", "Starlight Shimmer"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_every_mutation_persists() {
        let (cart, slot, _) = store();
        let product = gloss("1", "Crystal Dew", 24);

        cart.add_item(&product);
        assert_eq!(slot.load().unwrap().len(), 1);

        cart.update_quantity(&product.id, 1);
        assert_eq!(slot.load().unwrap().first().unwrap().quantity, 2);

        cart.remove_item(&product.id);
        assert!(slot.load().unwrap().is_empty());

        cart.add_item(&product);
        cart.clear();
        assert!(slot.load().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_load_from_corrupt_slot_is_empty() {
        let slot = Arc::new(MemorySlot::new());
        slot.set_raw("definitely not json");

        let cart = CartStore::load(slot, NotificationBus::new());
        assert!(cart.items().is_empty());
        assert_eq!(cart.total(), Price::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_load_repairs_invariant_violations() {
        let slot = Arc::new(MemorySlot::new());
        {
            let seed = CartStore::load(slot.clone(), NotificationBus::new());
            seed.add_item(&gloss("1", "Crystal Dew", 24));
        }
        // Hand-edit the slot: zero quantity and a duplicated line
        let raw = slot.raw().unwrap();
        let mut lines: Vec<serde_json::Value> = serde_json::from_str(&raw).unwrap();
        lines.first_mut().unwrap()["quantity"] = 0.into();
        let duplicate = lines.first().unwrap().clone();
        lines.push(duplicate);
        slot.set_raw(serde_json::to_string(&lines).unwrap());

        let cart = CartStore::load(slot, NotificationBus::new());
        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.items().first().unwrap().quantity, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_add_opens_bag_drawer() {
        let (cart, _, _) = store();
        assert!(!cart.is_bag_open());

        cart.add_item(&gloss("1", "Crystal Dew", 24));
        assert!(cart.is_bag_open());

        cart.close_bag();
        assert!(!cart.is_bag_open());
    }

    #[tokio::test(start_paused = true)]
    async fn test_persistence_survives_reload() {
        let slot = Arc::new(MemorySlot::new());
        {
            let cart = CartStore::load(slot.clone(), NotificationBus::new());
            cart.add_item(&gloss("1", "Crystal Dew", 24));
            cart.add_item(&gloss("1", "Crystal Dew", 24));
            cart.add_item(&gloss("2", "Rose Quartz", 26));
        }

        let reloaded = CartStore::load(slot, NotificationBus::new());
        assert_eq!(reloaded.item_count(), 3);
        assert_eq!(reloaded.total(), Price::from_dollars(74));
    }
}
