//! [`SqliteSlots`] — the SQLite implementation of [`SlotStorage`].

use std::{
  path::Path,
  sync::{Mutex, MutexGuard, PoisonError},
};

use rusqlite::{Connection, OptionalExtension as _};

use roster_core::storage::SlotStorage;

use crate::{
  Error, Result,
  schema::{SCHEMA, SCHEMA_VERSION},
};

/// Slot storage backed by a single SQLite file.
///
/// The connection sits behind a mutex so one instance can be shared (via
/// `Arc`) by the session and employee stores.
pub struct SqliteSlots {
  conn: Mutex<Connection>,
}

impl SqliteSlots {
  /// Open (or create) a store at `path`, creating parent directories as
  /// needed, and run schema initialisation.
  pub fn open(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    if let Some(dir) = path.parent()
      && !dir.as_os_str().is_empty()
    {
      std::fs::create_dir_all(dir)
        .map_err(|source| Error::CreateDir { path: dir.to_path_buf(), source })?;
    }

    let conn = Connection::open(path)?;
    tracing::debug!(path = %path.display(), "opened slot database");
    Self::init(conn)
  }

  /// Open an in-memory store — useful for testing.
  pub fn open_in_memory() -> Result<Self> { Self::init(Connection::open_in_memory()?) }

  fn init(conn: Connection) -> Result<Self> {
    let version: i64 = conn.query_row("PRAGMA user_version", [], |r| r.get(0))?;
    if version > SCHEMA_VERSION {
      return Err(Error::UnsupportedSchema(version));
    }
    conn.execute_batch(SCHEMA)?;
    Ok(Self { conn: Mutex::new(conn) })
  }

  pub(crate) fn conn(&self) -> MutexGuard<'_, Connection> {
    // Every statement is atomic on its own; a panic elsewhere can't leave the
    // connection mid-write.
    self.conn.lock().unwrap_or_else(PoisonError::into_inner)
  }

  /// Keys of every slot currently written, sorted.
  pub fn keys(&self) -> Result<Vec<String>> {
    let conn = self.conn();
    let mut stmt = conn.prepare("SELECT key FROM slots ORDER BY key")?;
    let keys = stmt
      .query_map([], |r| r.get(0))?
      .collect::<rusqlite::Result<Vec<String>>>()?;
    Ok(keys)
  }
}

impl SlotStorage for SqliteSlots {
  type Error = Error;

  fn get(&self, key: &str) -> Result<Option<String>> {
    let value = self
      .conn()
      .query_row("SELECT value FROM slots WHERE key = ?1", [key], |r| r.get(0))
      .optional()?;
    Ok(value)
  }

  fn set(&self, key: &str, value: &str) -> Result<()> {
    self.conn().execute(
      "INSERT INTO slots (key, value) VALUES (?1, ?2)
       ON CONFLICT(key) DO UPDATE SET
         value      = excluded.value,
         updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')",
      [key, value],
    )?;
    tracing::trace!(key, bytes = value.len(), "wrote slot");
    Ok(())
  }

  fn remove(&self, key: &str) -> Result<()> {
    self.conn().execute("DELETE FROM slots WHERE key = ?1", [key])?;
    Ok(())
  }
}
