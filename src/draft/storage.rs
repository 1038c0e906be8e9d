//! Key/value storage port for draft persistence.
//!
//! DESIGN
//! ======
//! The store never touches `localStorage` directly. It talks to a
//! [`DraftStorage`] so tests inject [`MemoryStorage`] and the browser build
//! injects [`LocalStorage`] (behind the `hydrate` feature).

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Errors raised by a storage backend or by (de)serializing its entries.
///
/// These never leave [`crate::DraftSessionStore`]; they are logged and the
/// entry is treated as absent.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The backend refused a read.
    #[error("storage read failed: {0}")]
    Read(String),

    /// The backend refused a write or removal (quota exceeded, disabled).
    #[error("storage write failed: {0}")]
    Write(String),

    /// A stored entry is not a valid session record.
    #[error("stored draft is malformed: {0}")]
    Decode(String),

    /// The draft could not be serialized.
    #[error("draft serialization failed: {0}")]
    Encode(String),
}

impl StorageError {
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Read(_) => "E_STORAGE_READ",
            Self::Write(_) => "E_STORAGE_WRITE",
            Self::Decode(_) => "E_STORAGE_DECODE",
            Self::Encode(_) => "E_STORAGE_ENCODE",
        }
    }
}

/// String-keyed persistent storage, shaped after the Web Storage API.
pub trait DraftStorage {
    /// Read the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Read`] when the backend is unreadable.
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Write`] when the backend rejects the write.
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete `key`. Removing a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Write`] when the backend rejects the removal.
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}

// =============================================================================
// MEMORY STORAGE
// =============================================================================

/// In-process storage. Clones share the same entries, which lets a test
/// "reload the page" by building a second store over the same backend.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: Arc<Mutex<HashMap<String, String>>>,
    reject_reads: Arc<AtomicBool>,
    reject_writes: Arc<AtomicBool>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent read fail, as blocked storage access would.
    pub fn reject_reads(&self, reject: bool) {
        self.reject_reads.store(reject, Ordering::Relaxed);
    }

    /// Make every subsequent write fail, as a full or disabled quota would.
    pub fn reject_writes(&self, reject: bool) {
        self.reject_writes.store(reject, Ordering::Relaxed);
    }

    /// Raw value under `key`, bypassing the trait.
    #[must_use]
    pub fn raw(&self, key: &str) -> Option<String> {
        self.lock().get(key).cloned()
    }

    /// Seed `key` with a raw value, bypassing the write rejection switch.
    pub fn insert_raw(&self, key: &str, value: &str) {
        self.lock().insert(key.to_owned(), value.to_owned());
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, String>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn check_writable(&self) -> Result<(), StorageError> {
        if self.reject_writes.load(Ordering::Relaxed) {
            return Err(StorageError::Write("quota exceeded".into()));
        }
        Ok(())
    }
}

impl DraftStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        if self.reject_reads.load(Ordering::Relaxed) {
            return Err(StorageError::Read("access denied".into()));
        }
        Ok(self.lock().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.check_writable()?;
        self.lock().insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.check_writable()?;
        self.lock().remove(key);
        Ok(())
    }
}

// =============================================================================
// BROWSER STORAGE
// =============================================================================

/// `window.localStorage`, available only in hydrated browser builds.
#[cfg(feature = "hydrate")]
#[derive(Debug, Clone)]
pub struct LocalStorage(web_sys::Storage);

#[cfg(feature = "hydrate")]
impl LocalStorage {
    /// Look up `window.localStorage`. Returns `None` outside a browser or
    /// when the user agent has storage disabled.
    #[must_use]
    pub fn detect() -> Option<Self> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok().flatten())
            .map(Self)
    }
}

#[cfg(feature = "hydrate")]
impl DraftStorage for LocalStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.0
            .get_item(key)
            .map_err(|e| StorageError::Read(format!("{e:?}")))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.0
            .set_item(key, value)
            .map_err(|e| StorageError::Write(format!("{e:?}")))
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.0
            .remove_item(key)
            .map_err(|e| StorageError::Write(format!("{e:?}")))
    }
}

#[cfg(test)]
#[path = "storage_test.rs"]
mod tests;
