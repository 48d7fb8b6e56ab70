//! The session store: a single-slot login gate.
//!
//! The credential pair is a fixed placeholder, compared as plain strings. There
//! is no lockout or hashing, and a failed login does not say which half was
//! wrong.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
  Error, Result,
  clock::{Clock, SystemClock},
  storage::{AUTH_SLOT, SlotStorage},
};

pub const EXPECTED_IDENTITY: &str = "EMP01202601";
pub const EXPECTED_SECRET: &str = "2026@01";

/// Who is logged in, and since when. Persisted in the `authUser` slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
  #[serde(alias = "employeeId")]
  pub identity:   String,
  pub login_time: DateTime<Utc>,
}

/// Authentication state as seen by the console.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionStatus {
  /// [`SessionStore::restore`] has not run yet.
  Loading,
  Unauthenticated,
  Authenticated(SessionRecord),
}

pub struct SessionStore<S> {
  storage: Arc<S>,
  clock:   Arc<dyn Clock>,
  status:  SessionStatus,
}

impl<S: SlotStorage> SessionStore<S> {
  pub fn new(storage: Arc<S>) -> Self { Self::with_clock(storage, Arc::new(SystemClock)) }

  pub fn with_clock(storage: Arc<S>, clock: Arc<dyn Clock>) -> Self {
    Self { storage, clock, status: SessionStatus::Loading }
  }

  /// Load the persisted session, if any.
  ///
  /// An unreadable or malformed slot means "logged out"; the status is never
  /// left at [`SessionStatus::Loading`] after this returns.
  pub fn restore(&mut self) -> &SessionStatus {
    self.status = match self.read_slot() {
      Ok(Some(record)) => {
        tracing::debug!(identity = %record.identity, "restored session");
        SessionStatus::Authenticated(record)
      }
      Ok(None) => SessionStatus::Unauthenticated,
      Err(e) => {
        tracing::warn!(error = %e, "discarding unreadable session slot");
        SessionStatus::Unauthenticated
      }
    };
    &self.status
  }

  fn read_slot(&self) -> Result<Option<SessionRecord>> {
    let Some(raw) = self.storage.get(AUTH_SLOT).map_err(Error::storage)? else {
      return Ok(None);
    };
    serde_json::from_str(&raw)
      .map(Some)
      .map_err(|source| Error::CorruptSlot { key: AUTH_SLOT, source })
  }

  /// Check the credential pair and, on a match, persist a new session.
  ///
  /// Returns `Ok(false)` on a mismatch, leaving any existing session alone.
  /// Fails only if the session could not be written, in which case the
  /// in-memory state is unchanged too.
  pub fn login(&mut self, identity: &str, secret: &str) -> Result<bool> {
    if identity != EXPECTED_IDENTITY || secret != EXPECTED_SECRET {
      tracing::info!("login rejected");
      return Ok(false);
    }

    let record = SessionRecord {
      identity:   identity.to_owned(),
      login_time: self.clock.now(),
    };
    let raw = serde_json::to_string(&record)?;
    self.storage.set(AUTH_SLOT, &raw).map_err(Error::storage)?;

    tracing::info!(identity = %record.identity, "logged in");
    self.status = SessionStatus::Authenticated(record);
    Ok(true)
  }

  /// Forget the session and erase its slot. Calling it twice is harmless.
  pub fn logout(&mut self) -> Result<()> {
    self.storage.remove(AUTH_SLOT).map_err(Error::storage)?;
    if self.is_authenticated() {
      tracing::info!("logged out");
    }
    self.status = SessionStatus::Unauthenticated;
    Ok(())
  }

  pub fn status(&self) -> &SessionStatus { &self.status }

  pub fn is_loading(&self) -> bool { self.status == SessionStatus::Loading }

  pub fn is_authenticated(&self) -> bool {
    matches!(self.status, SessionStatus::Authenticated(_))
  }

  pub fn record(&self) -> Option<&SessionRecord> {
    match &self.status {
      SessionStatus::Authenticated(record) => Some(record),
      _ => None,
    }
  }

  pub fn identity(&self) -> Option<&str> { self.record().map(|r| r.identity.as_str()) }

  /// The gate in front of the dashboard.
  pub fn require_authenticated(&self) -> Result<&SessionRecord> {
    match &self.status {
      SessionStatus::Loading => Err(Error::SessionLoading),
      SessionStatus::Unauthenticated => Err(Error::NotAuthenticated),
      SessionStatus::Authenticated(record) => Ok(record),
    }
  }
}
