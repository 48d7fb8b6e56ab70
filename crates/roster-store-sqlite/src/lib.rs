//! SQLite backend for Roster slot storage.
//!
//! One file holds every slot as a row of a key/value table. Writes are
//! synchronous and each one is its own transaction.

mod schema;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::SqliteSlots;
