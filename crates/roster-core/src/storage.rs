//! The [`SlotStorage`] trait and an in-memory implementation.
//!
//! A slot is a named string value, the same shape as browser `localStorage`.
//! Each store owns one slot and rewrites it whole on every mutation.
//! Durable backends live in their own crates (e.g. `roster-store-sqlite`).

use std::{
  collections::HashMap,
  convert::Infallible,
  sync::{Mutex, PoisonError},
};

/// Slot holding the serialised [`SessionRecord`](crate::session::SessionRecord).
pub const AUTH_SLOT: &str = "authUser";

/// Slot holding the serialised employee list.
pub const EMPLOYEES_SLOT: &str = "employees";

// ─── Trait ───────────────────────────────────────────────────────────────────

/// A key/value backend for persisted slots.
///
/// Writes are synchronous: when `set` or `remove` returns `Ok`, the value is
/// durable as far as the backend can promise.
pub trait SlotStorage: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Read a slot. `None` if it has never been written or was removed.
  fn get(&self, key: &str) -> Result<Option<String>, Self::Error>;

  /// Overwrite a slot.
  fn set(&self, key: &str, value: &str) -> Result<(), Self::Error>;

  /// Erase a slot. Removing an absent slot is not an error.
  fn remove(&self, key: &str) -> Result<(), Self::Error>;
}

// ─── In-memory backend ───────────────────────────────────────────────────────

/// Process-local slots. Nothing survives the process; used in tests and as a
/// scratch backend.
#[derive(Debug, Default)]
pub struct MemoryStorage {
  slots: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
  pub fn new() -> Self { Self::default() }

  /// Number of slots currently written.
  pub fn len(&self) -> usize { self.lock().len() }

  pub fn is_empty(&self) -> bool { self.lock().is_empty() }

  fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
    // The map is never left half-updated, so a poisoned lock is still usable.
    self.slots.lock().unwrap_or_else(PoisonError::into_inner)
  }
}

impl SlotStorage for MemoryStorage {
  type Error = Infallible;

  fn get(&self, key: &str) -> Result<Option<String>, Self::Error> {
    Ok(self.lock().get(key).cloned())
  }

  fn set(&self, key: &str, value: &str) -> Result<(), Self::Error> {
    self.lock().insert(key.to_owned(), value.to_owned());
    Ok(())
  }

  fn remove(&self, key: &str) -> Result<(), Self::Error> {
    self.lock().remove(key);
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn set_get_remove() {
    let storage = MemoryStorage::new();
    assert_eq!(storage.get("k").unwrap(), None);

    storage.set("k", "v1").unwrap();
    storage.set("k", "v2").unwrap();
    assert_eq!(storage.get("k").unwrap().as_deref(), Some("v2"));
    assert_eq!(storage.len(), 1);

    storage.remove("k").unwrap();
    storage.remove("k").unwrap();
    assert_eq!(storage.get("k").unwrap(), None);
    assert!(storage.is_empty());
  }
}
