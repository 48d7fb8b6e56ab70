//! Time sources. Stores read the clock for `createdAt`, `loginTime` and the
//! "today" used by age validation.

use chrono::{DateTime, Local, NaiveDate, Utc};

pub trait Clock: Send + Sync {
  fn now(&self) -> DateTime<Utc>;

  /// The calendar date used for age checks.
  fn today(&self) -> NaiveDate;
}

/// Wall-clock time; "today" is the local calendar date.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
  fn now(&self) -> DateTime<Utc> { Utc::now() }

  fn today(&self) -> NaiveDate { Local::now().date_naive() }
}

/// A clock stopped at one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl FixedClock {
  /// Midday UTC on the given date.
  pub fn on(date: NaiveDate) -> Self {
    Self(date.and_hms_opt(12, 0, 0).unwrap_or_default().and_utc())
  }
}

impl Clock for FixedClock {
  fn now(&self) -> DateTime<Utc> { self.0 }

  fn today(&self) -> NaiveDate { self.0.date_naive() }
}
