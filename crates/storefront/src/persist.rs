//! Durable persistence for the shopper's bag.
//!
//! The bag is stored as a JSON-serialized sequence of cart items under a
//! single slot. Persistence is best-effort: the in-memory cart is the
//! source of truth for the session, and a missing or malformed slot is
//! treated as an empty bag, never surfaced to the shopper.

use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::{Mutex, PoisonError};

use maygloss_core::CartItem;
use thiserror::Error;

/// Errors that can occur reading or writing the cart slot.
///
/// Callers recover from every variant by acting as if the slot were empty
/// (on load) or skipping the write (on save).
#[derive(Debug, Error)]
pub enum PersistError {
    /// Filesystem read or write failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Stored value did not parse as a cart.
    #[error("malformed cart payload: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// A durable key-value slot holding the serialized cart.
pub trait CartSlot: Send + Sync {
    /// Read the persisted cart.
    ///
    /// An absent slot is an empty cart, not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the slot exists but cannot be read or parsed.
    fn load(&self) -> Result<Vec<CartItem>, PersistError>;

    /// Serialize and write the cart to the slot.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails (e.g., quota or permissions).
    fn save(&self, items: &[CartItem]) -> Result<(), PersistError>;
}

/// File-backed cart slot.
///
/// The production slot: one JSON file at a configured path.
pub struct FileSlot {
    path: PathBuf,
}

impl FileSlot {
    /// Create a slot at the given path.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CartSlot for FileSlot {
    fn load(&self) -> Result<Vec<CartItem>, PersistError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        Ok(serde_json::from_slice(&bytes)?)
    }

    fn save(&self, items: &[CartItem]) -> Result<(), PersistError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        let payload = serde_json::to_vec(items)?;
        fs::write(&self.path, payload)?;
        Ok(())
    }
}

/// In-memory cart slot for tests.
#[derive(Default)]
pub struct MemorySlot {
    value: Mutex<Option<String>>,
}

impl MemorySlot {
    /// Create an empty in-memory slot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite the slot with a raw value, e.g. to simulate corruption.
    pub fn set_raw(&self, value: impl Into<String>) {
        *self.lock() = Some(value.into());
    }

    /// The raw stored value, if any.
    #[must_use]
    pub fn raw(&self) -> Option<String> {
        self.lock().clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Option<String>> {
        self.value.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl CartSlot for MemorySlot {
    fn load(&self) -> Result<Vec<CartItem>, PersistError> {
        match self.lock().as_deref() {
            None => Ok(Vec::new()),
            Some(raw) => Ok(serde_json::from_str(raw)?),
        }
    }

    fn save(&self, items: &[CartItem]) -> Result<(), PersistError> {
        let payload = serde_json::to_string(items)?;
        *self.lock() = Some(payload);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use maygloss_core::{Price, Product, ProductId};

    use super::*;

    fn sample_items() -> Vec<CartItem> {
        let product = Product {
            id: ProductId::new("1"),
            name: "Crystal Dew".to_owned(),
            price: Price::from_dollars(24),
            category: "Clear".to_owned(),
            shade: "Transparent".to_owned(),
            description: "A non-sticky, high-shine clear gloss.".to_owned(),
            image: "https://example.com/crystal-dew.jpg".to_owned(),
            ingredients: vec!["Hyaluronic Acid".to_owned(), "Vitamin E".to_owned()],
        };
        let mut item = CartItem::new(product);
        item.quantity = 2;
        vec![item]
    }

    fn temp_slot_path() -> PathBuf {
        std::env::temp_dir().join(format!("maygloss-test-{}.json", uuid::Uuid::new_v4()))
    }

    #[test]
    fn test_file_slot_roundtrip() {
        let path = temp_slot_path();
        let slot = FileSlot::new(&path);

        let items = sample_items();
        slot.save(&items).unwrap();
        assert_eq!(slot.load().unwrap(), items);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_file_slot_missing_is_empty() {
        let slot = FileSlot::new(temp_slot_path());
        assert!(slot.load().unwrap().is_empty());
    }

    #[test]
    fn test_file_slot_corrupt_is_error() {
        let path = temp_slot_path();
        fs::write(&path, b"{ not json").unwrap();

        let slot = FileSlot::new(&path);
        assert!(matches!(slot.load(), Err(PersistError::Malformed(_))));

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_memory_slot_roundtrip() {
        let slot = MemorySlot::new();
        assert!(slot.load().unwrap().is_empty());

        let items = sample_items();
        slot.save(&items).unwrap();
        assert_eq!(slot.load().unwrap(), items);
    }

    #[test]
    fn test_memory_slot_corrupt_is_error() {
        let slot = MemorySlot::new();
        slot.set_raw("not a cart");
        assert!(matches!(slot.load(), Err(PersistError::Malformed(_))));
    }
}
