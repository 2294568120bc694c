//! The durable store behind the saved-code history.
//!
//! The history only ever needs a single string-keyed slot, so the port is a
//! two-method trait. The browser build maps it onto `localStorage`; native
//! builds (and the unit tests) use an in-memory map.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    /// The browser exposes no storage at all (disabled, sandboxed iframe).
    #[error("browser storage is not available")]
    Unavailable,
    #[error("storage read failed: {0}")]
    ReadFailed(String),
    /// Typically quota exhaustion or a privacy-mode write block.
    #[error("storage rejected the write: {0}")]
    WriteRejected(String),
}

/// A persistent, string-keyed, string-valued store scoped to the user's
/// browser profile.
pub trait StoragePort {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

// Re-export the platform implementation under one name so the rest of the
// app can stay target-agnostic.
#[cfg(target_arch = "wasm32")]
pub type DefaultStorage = BrowserStorage;

#[cfg(not(target_arch = "wasm32"))]
pub type DefaultStorage = MemoryStorage;

#[cfg(target_arch = "wasm32")]
pub fn open_storage() -> DefaultStorage {
    BrowserStorage::open()
}

#[cfg(not(target_arch = "wasm32"))]
pub fn open_storage() -> DefaultStorage {
    MemoryStorage::new()
}

/// `localStorage`-backed store. Construction never fails; an unavailable
/// backend surfaces as `StorageError::Unavailable` on first use instead.
#[cfg(target_arch = "wasm32")]
pub struct BrowserStorage {
    inner: Option<web_sys::Storage>,
}

#[cfg(target_arch = "wasm32")]
impl BrowserStorage {
    pub fn open() -> Self {
        let inner = web_sys::window().and_then(|window| window.local_storage().ok().flatten());
        Self { inner }
    }
}

#[cfg(target_arch = "wasm32")]
impl StoragePort for BrowserStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let storage = self.inner.as_ref().ok_or(StorageError::Unavailable)?;
        storage
            .get_item(key)
            .map_err(|e| StorageError::ReadFailed(format!("{e:?}")))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let storage = self.inner.as_ref().ok_or(StorageError::Unavailable)?;
        storage
            .set_item(key, value)
            .map_err(|e| StorageError::WriteRejected(format!("{e:?}")))
    }
}

/// In-memory store. Clones share the same map, so a clone taken before a
/// write observes that write afterwards, mimicking two sessions against the
/// same browser profile.
#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    inner: std::rc::Rc<std::cell::RefCell<std::collections::HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StoragePort for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.inner.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.inner.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }
}
