//! Cart persistence on a local key-value store.
//!
//! The cart is the only durable state in the storefront. It is stored as a
//! JSON array of line items under a single fixed key ([`CART_STORAGE_KEY`]).
//! Every mutation writes immediately: there is no batching or debounce, and
//! a write has completed by the time [`CartPersistence::save`] returns.
//!
//! Loading never fails: a missing key (first run) and unreadable or corrupted
//! data both yield an empty cart.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use black_royalty_core::Cart;
use thiserror::Error;

/// Key the cart is stored under.
pub const CART_STORAGE_KEY: &str = "blackRoyaltyCart";

/// Errors that can occur while writing to a key-value store.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem operation failed.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The cart could not be serialized.
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Keys must be plain names (no path separators).
    #[error("Invalid storage key: {0}")]
    InvalidKey(String),
}

/// A string key-value store.
///
/// Implementations must be synchronous: a successful `set` is durable when it
/// returns.
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete the value under `key`. Deleting a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be written.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

// =============================================================================
// FileStore
// =============================================================================

/// Key-value store backed by one file per key in a directory.
///
/// Writes go to a temporary file that is then renamed over the target, so a
/// crash mid-write leaves the previous value intact.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open a store rooted at `dir`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// Directory holding the store's files.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
            && !key.starts_with('.');
        if !valid {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

// =============================================================================
// MemoryStore
// =============================================================================

/// In-memory key-value store. Contents are lost when the process exits.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.remove(key);
        Ok(())
    }
}

// =============================================================================
// CartPersistence
// =============================================================================

/// Reads and writes the cart under a fixed key.
#[derive(Clone)]
pub struct CartPersistence {
    store: Arc<dyn KeyValueStore>,
    key: String,
}

impl std::fmt::Debug for CartPersistence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartPersistence")
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}

impl CartPersistence {
    /// Persist under [`CART_STORAGE_KEY`].
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self::with_key(store, CART_STORAGE_KEY)
    }

    /// Persist under a custom key.
    #[must_use]
    pub fn with_key(store: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    /// Write the cart.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the underlying write fails.
    pub fn save(&self, cart: &Cart) -> Result<(), StorageError> {
        let json = serde_json::to_string(cart)?;
        self.store.set(&self.key, &json)
    }

    /// Read the cart, degrading to an empty cart on any problem.
    #[must_use]
    pub fn load(&self) -> Cart {
        let raw = match self.store.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                tracing::debug!(key = %self.key, "No stored cart, starting empty");
                return Cart::new();
            }
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "Failed to read stored cart, starting empty");
                return Cart::new();
            }
        };

        match serde_json::from_str::<Cart>(&raw) {
            Ok(cart) => {
                tracing::info!(key = %self.key, lines = cart.len(), "Restored cart");
                cart
            }
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "Stored cart is corrupted, starting empty");
                Cart::new()
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use black_royalty_core::{CartLineItem, Price, ProductId, Quantity};

    use super::*;

    fn sample_cart() -> Cart {
        let mut cart = Cart::new();
        cart.add(CartLineItem {
            id: ProductId::from("p1"),
            name: "Royal Oud".to_string(),
            price: Price::from_minor(1000),
            image: "img/oud.jpg".to_string(),
            quantity: Quantity::new(2).unwrap(),
        });
        cart.add(CartLineItem {
            id: ProductId::from("p2"),
            name: "Gold Musk".to_string(),
            price: Price::from_minor(2550),
            image: "img/musk.jpg".to_string(),
            quantity: Quantity::ONE,
        });
        cart
    }

    #[test]
    fn test_round_trip_memory() {
        let persistence = CartPersistence::new(Arc::new(MemoryStore::new()));
        let cart = sample_cart();

        persistence.save(&cart).unwrap();
        assert_eq!(persistence.load(), cart);
    }

    #[test]
    fn test_round_trip_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();
        let persistence = CartPersistence::new(Arc::new(store.clone()));
        let cart = sample_cart();

        persistence.save(&cart).unwrap();

        // A fresh adapter over the same directory sees the saved cart.
        let reopened = CartPersistence::new(Arc::new(FileStore::open(dir.path()).unwrap()));
        assert_eq!(reopened.load(), cart);
        assert!(store.dir().join("blackRoyaltyCart.json").exists());
    }

    #[test]
    fn test_load_absent_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let persistence = CartPersistence::new(Arc::new(FileStore::open(dir.path()).unwrap()));
        assert!(persistence.load().is_empty());
    }

    #[test]
    fn test_load_corrupted_is_empty() {
        let store = Arc::new(MemoryStore::new());
        store.set(CART_STORAGE_KEY, "{not json").unwrap();
        assert!(CartPersistence::new(store.clone()).load().is_empty());

        store.set(CART_STORAGE_KEY, r#"{"id": "p1"}"#).unwrap();
        assert!(CartPersistence::new(store.clone()).load().is_empty());

        store
            .set(
                CART_STORAGE_KEY,
                r#"[{"id": "p1", "name": "A", "price": -5, "image": "", "quantity": 1}]"#,
            )
            .unwrap();
        assert!(CartPersistence::new(store).load().is_empty());
    }

    #[test]
    fn test_save_overwrites() {
        let persistence = CartPersistence::new(Arc::new(MemoryStore::new()));
        let mut cart = sample_cart();
        persistence.save(&cart).unwrap();

        cart.remove(&ProductId::from("p1"));
        persistence.save(&cart).unwrap();

        assert_eq!(persistence.load().len(), 1);
    }

    #[test]
    fn test_file_store_rejects_path_keys() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();
        assert!(matches!(
            store.set("../escape", "x"),
            Err(StorageError::InvalidKey(_))
        ));
        assert!(matches!(store.get(""), Err(StorageError::InvalidKey(_))));
    }

    #[test]
    fn test_file_store_remove_missing_is_ok() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();
        store.remove("nothing").unwrap();
        store.set("k", "v").unwrap();
        store.remove("k").unwrap();
        assert_eq!(store.get("k").unwrap(), None);
    }
}
