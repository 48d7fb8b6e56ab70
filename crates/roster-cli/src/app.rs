//! Console state and command handlers.
//!
//! [`App`] owns both stores. Each handler returns the text to print, so the
//! binary stays a thin argument parser around it.

use std::{fmt::Write as _, num::NonZeroUsize, sync::Arc};

use anyhow::{Context as _, bail};
use roster_core::{
  clock::Clock,
  employee::{EmployeePatch, NewEmployee, Region},
  id::IdGenerator,
  query::{self, EmployeeQuery, Summary},
  session::{SessionStatus, SessionStore},
  storage::SlotStorage,
  store::EmployeeStore,
  validation,
};
use strum::IntoEnumIterator;

use crate::{render, report::Report};

/// Paging and filtering for [`App::list`].
#[derive(Debug, Clone, Default)]
pub struct ListOptions {
  pub query:     EmployeeQuery,
  /// 1-based page number; 0 is treated as 1.
  pub page:      usize,
  /// Overrides the configured page size.
  pub page_size: Option<NonZeroUsize>,
}

pub struct App<S> {
  pub session:   SessionStore<S>,
  pub employees: EmployeeStore<S>,
  page_size:     NonZeroUsize,
}

impl<S: SlotStorage> App<S> {
  /// Restore the session and load the roster. Nothing is served before both
  /// have finished.
  pub fn start(
    storage: Arc<S>,
    ids: Box<dyn IdGenerator>,
    clock: Arc<dyn Clock>,
    page_size: NonZeroUsize,
  ) -> roster_core::Result<Self> {
    let mut session = SessionStore::with_clock(Arc::clone(&storage), Arc::clone(&clock));
    session.restore();

    let mut employees = EmployeeStore::with_parts(storage, ids, clock);
    let outcome = employees.initialize()?;
    tracing::debug!(?outcome, count = employees.len(), "roster ready");

    Ok(Self { session, employees, page_size })
  }

  fn require_login(&self) -> anyhow::Result<()> {
    self
      .session
      .require_authenticated()
      .context("run `roster login` first")?;
    Ok(())
  }

  // ── Session ──────────────────────────────────────────────────────────────

  pub fn login(&mut self, identity: &str, secret: &str) -> anyhow::Result<String> {
    if !self.session.login(identity, secret)? {
      bail!("invalid employee id or password");
    }
    Ok(format!("Logged in as {identity}\n"))
  }

  pub fn logout(&mut self) -> anyhow::Result<String> {
    self.session.logout()?;
    Ok("Logged out\n".to_owned())
  }

  pub fn whoami(&self) -> String {
    match self.session.status() {
      SessionStatus::Authenticated(record) => format!(
        "Logged in as {} since {}\n",
        record.identity,
        record.login_time.format("%Y-%m-%d %H:%M:%S UTC")
      ),
      SessionStatus::Unauthenticated => "Not logged in\n".to_owned(),
      SessionStatus::Loading => "Restoring session…\n".to_owned(),
    }
  }

  // ── Reads ────────────────────────────────────────────────────────────────

  pub fn list(&self, options: &ListOptions) -> anyhow::Result<String> {
    self.require_login()?;
    let today = self.employees.clock().today();

    let filtered = query::filter(self.employees.employees(), &options.query);
    let page_size = options.page_size.unwrap_or(self.page_size).get();
    let page = options.page.max(1);
    let rows: Vec<_> = query::paginate(&filtered, page - 1, page_size)
      .iter()
      .map(|e| render::cells(e, today))
      .collect();

    let mut out = if rows.is_empty() {
      "No employees match.\n".to_owned()
    } else {
      render::table(render::COLUMNS, &rows)
    };
    let pages = query::page_count(filtered.len(), page_size);
    let _ = writeln!(out, "Page {page} of {}", pages.max(1));
    let _ = writeln!(out, "{}", render::summary_line(&Summary::of(filtered.iter().copied())));
    Ok(out)
  }

  pub fn show(&self, id: &str) -> anyhow::Result<String> {
    self.require_login()?;
    let employee = self
      .employees
      .get_by_id(id)
      .with_context(|| format!("no employee with id {id}"))?;
    Ok(render::detail(employee, self.employees.clock().today()))
  }

  /// Dashboard counts over the whole roster.
  pub fn stats(&self) -> anyhow::Result<String> {
    self.require_login()?;
    let summary = Summary::of(self.employees.employees());
    Ok(format!("{}\n", render::summary_line(&summary)))
  }

  pub fn report(&self, query: &EmployeeQuery) -> anyhow::Result<String> {
    self.require_login()?;
    let clock = self.employees.clock();
    let filtered = query::filter(self.employees.employees(), query);
    Ok(Report::build(filtered, clock.now(), clock.today()).to_string())
  }

  /// The accepted `--state` values and the date-of-birth window.
  pub fn states(&self) -> String {
    let mut out: String = Region::iter().map(|r| format!("{r}\n")).collect();
    let today = self.employees.clock().today();
    if let (Some(min), Some(max)) =
      (validation::min_birth_date(today), validation::max_birth_date(today))
    {
      let _ = writeln!(out, "\nDates of birth must fall between {min} and {max}.");
    }
    out
  }

  // ── Mutations ────────────────────────────────────────────────────────────

  pub fn add(&mut self, draft: NewEmployee) -> anyhow::Result<String> {
    self.require_login()?;
    let employee = self.employees.add(draft)?;
    Ok(format!("Added {} ({})\n", employee.id, employee.full_name))
  }

  pub fn edit(&mut self, id: &str, patch: &EmployeePatch) -> anyhow::Result<String> {
    self.require_login()?;
    if patch.is_empty() {
      bail!("nothing to change");
    }
    let employee = self.employees.update(id, patch)?;
    Ok(format!("Updated {} ({})\n", employee.id, employee.full_name))
  }

  pub fn delete(&mut self, id: &str) -> anyhow::Result<String> {
    self.require_login()?;
    Ok(match self.employees.delete(id)? {
      Some(employee) => format!("Deleted {} ({})\n", employee.id, employee.full_name),
      None => format!("No employee with id {id}\n"),
    })
  }
}

#[cfg(test)]
mod tests {
  use chrono::NaiveDate;
  use roster_core::{
    clock::FixedClock,
    employee::Gender,
    id::SequentialIds,
    query::StatusFilter,
    session::{EXPECTED_IDENTITY, EXPECTED_SECRET},
    storage::MemoryStorage,
  };

  use super::*;

  fn app_on(storage: Arc<MemoryStorage>) -> App<MemoryStorage> {
    let clock = FixedClock::on(NaiveDate::from_ymd_opt(2024, 6, 15).unwrap());
    let page_size = NonZeroUsize::new(3).unwrap();
    App::start(storage, Box::new(SequentialIds::new()), Arc::new(clock), page_size).unwrap()
  }

  fn logged_in() -> App<MemoryStorage> {
    let mut app = app_on(Arc::new(MemoryStorage::new()));
    app.login(EXPECTED_IDENTITY, EXPECTED_SECRET).unwrap();
    app
  }

  #[test]
  fn gated_commands_require_login() {
    let mut app = app_on(Arc::new(MemoryStorage::new()));
    assert!(app.list(&ListOptions::default()).is_err());
    assert!(app.show("EMP001").is_err());
    assert!(app.stats().is_err());
    assert!(app.delete("EMP001").is_err());
    assert_eq!(app.employees.len(), 8);
    assert_eq!(app.whoami(), "Not logged in\n");
  }

  #[test]
  fn bad_credentials_are_rejected() {
    let mut app = app_on(Arc::new(MemoryStorage::new()));
    let err = app.login(EXPECTED_IDENTITY, "nope").unwrap_err();
    assert_eq!(err.to_string(), "invalid employee id or password");
    assert!(!app.session.is_authenticated());
  }

  #[test]
  fn login_persists_across_starts() {
    let storage = Arc::new(MemoryStorage::new());
    app_on(Arc::clone(&storage))
      .login(EXPECTED_IDENTITY, EXPECTED_SECRET)
      .unwrap();

    let app = app_on(storage);
    assert!(app.whoami().starts_with("Logged in as EMP01202601 since 2024-06-15"));
    assert!(app.stats().is_ok());
  }

  #[test]
  fn list_pages_through_filtered_rows() {
    let app = logged_in();
    let out = app.list(&ListOptions { page: 2, ..Default::default() }).unwrap();
    assert!(out.contains("Alice Brown"));
    assert!(out.contains("Diana Wilson"));
    assert!(!out.contains("John Doe"));
    assert!(!out.contains("Eve Martinez"));
    assert!(out.contains("Page 2 of 3"));
    assert!(out.contains("Total: 8  Active: 5  Inactive: 3  Active rate: 63%"));

    let options = ListOptions {
      query: EmployeeQuery {
        search: "john".into(),
        gender: Some(Gender::Male),
        status: StatusFilter::Active,
      },
      page: 1,
      page_size: None,
    };
    let out = app.list(&options).unwrap();
    assert!(out.contains("John Doe"));
    assert!(!out.contains("Bob Johnson"));
    assert!(out.contains("Total: 1  Active: 1  Inactive: 0  Active rate: 100%"));
  }

  #[test]
  fn list_past_the_end_is_empty() {
    let app = logged_in();
    let out = app.list(&ListOptions { page: 9, ..Default::default() }).unwrap();
    assert!(out.starts_with("No employees match."));
  }

  #[test]
  fn add_edit_delete_flow() {
    let mut app = logged_in();
    let draft = NewEmployee::new(
      "Rohan Kulkarni",
      Gender::Male,
      NaiveDate::from_ymd_opt(1989, 1, 26).unwrap(),
      Region::Maharashtra,
    );
    assert_eq!(app.add(draft).unwrap(), "Added EMP0001 (Rohan Kulkarni)\n");

    let patch = EmployeePatch { is_active: Some(false), ..Default::default() };
    app.edit("EMP0001", &patch).unwrap();
    assert!(app.show("EMP0001").unwrap().contains("Status:        Inactive"));

    assert!(app.edit("EMP0001", &EmployeePatch::default()).is_err());
    assert!(app.delete("EMP0001").unwrap().starts_with("Deleted EMP0001"));
    assert_eq!(app.delete("EMP0001").unwrap(), "No employee with id EMP0001\n");
    assert!(app.show("EMP0001").is_err());
  }

  #[test]
  fn add_reports_field_errors() {
    let mut app = logged_in();
    let draft = NewEmployee {
      full_name: "Ab".into(),
      gender:    None,
      dob:       "1990-01-01".into(),
      state:     Some(Region::Goa),
      is_active: true,
      image:     None,
    };
    let err = app.add(draft).unwrap_err().to_string();
    assert!(err.contains("fullName: Name must be 3-50 characters"));
    assert!(err.contains("gender: Gender is required"));
  }

  #[test]
  fn report_covers_filtered_rows() {
    let app = logged_in();
    let query = EmployeeQuery { status: StatusFilter::Inactive, ..Default::default() };
    let out = app.report(&query).unwrap();
    assert!(out.contains("Total Employees: 3"));
    assert!(out.contains("Charlie Davis"));
  }

  #[test]
  fn states_lists_regions_and_window() {
    let app = app_on(Arc::new(MemoryStorage::new()));
    let out = app.states();
    assert!(out.contains("Tamil Nadu\n"));
    assert!(out.contains("between 1944-06-15 and 2006-06-15"));
  }

  #[test]
  fn logout_closes_the_gate() {
    let mut app = logged_in();
    app.logout().unwrap();
    assert!(app.stats().is_err());
  }
}
