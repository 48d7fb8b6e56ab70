//! Employee id generation.
//!
//! Ids are opaque strings prefixed `EMP`. The store never derives an id from
//! the size of the roster, so deleting a record can't cause a later collision.

use chrono::Utc;
use uuid::Uuid;

pub trait IdGenerator: Send + Sync {
  fn next_id(&mut self) -> String;
}

// ─── Timestamp ───────────────────────────────────────────────────────────────

/// `EMP<unix millis>`, strictly increasing within a process.
///
/// Two calls in the same millisecond (or a clock step backwards) yield
/// `last + 1` instead of repeating a value.
#[derive(Debug, Default)]
pub struct TimestampIds {
  last: i64,
}

impl TimestampIds {
  pub fn new() -> Self { Self::default() }

  fn next_millis(&mut self, now: i64) -> i64 {
    self.last = now.max(self.last + 1);
    self.last
  }
}

impl IdGenerator for TimestampIds {
  fn next_id(&mut self) -> String {
    let millis = self.next_millis(Utc::now().timestamp_millis());
    format!("EMP{millis}")
  }
}

// ─── Sequential ──────────────────────────────────────────────────────────────

/// `EMP0001`, `EMP0002`, … Deterministic; used by tests and demos.
#[derive(Debug, Default)]
pub struct SequentialIds {
  next: u64,
}

impl SequentialIds {
  pub fn new() -> Self { Self::default() }

  /// Start numbering after `n`.
  pub fn starting_after(n: u64) -> Self { Self { next: n } }
}

impl IdGenerator for SequentialIds {
  fn next_id(&mut self) -> String {
    self.next += 1;
    format!("EMP{:04}", self.next)
  }
}

// ─── UUID ────────────────────────────────────────────────────────────────────

/// `EMP-<uuid v4>` in simple (unhyphenated) form.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidIds;

impl IdGenerator for UuidIds {
  fn next_id(&mut self) -> String { format!("EMP-{}", Uuid::new_v4().simple()) }
}
