//! [`EmployeeStore`] — the write-through owner of the employee roster.
//!
//! The roster is an ordered `Vec<Employee>` mirrored into the `employees`
//! slot. Every mutation builds the next roster, writes it whole, and only then
//! replaces the in-memory copy, so a failed write leaves nothing half-applied.

use std::sync::Arc;

use crate::{
  Error, Result,
  clock::{Clock, SystemClock},
  employee::{Employee, EmployeePatch, NewEmployee},
  id::{IdGenerator, TimestampIds},
  seed,
  storage::{EMPLOYEES_SLOT, SlotStorage},
  validation::{self, ValidDraft},
};

/// How [`EmployeeStore::initialize`] obtained its roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
  /// The persisted slot was read back.
  Restored,
  /// No slot existed; the built-in roster was written.
  Seeded,
  /// The slot could not be decoded; the built-in roster replaced it.
  Reseeded,
}

pub struct EmployeeStore<S> {
  storage:   Arc<S>,
  ids:       Box<dyn IdGenerator>,
  clock:     Arc<dyn Clock>,
  employees: Vec<Employee>,
}

impl<S: SlotStorage> EmployeeStore<S> {
  /// A store using timestamp ids and the system clock. Call
  /// [`initialize`](Self::initialize) before reading from it.
  pub fn new(storage: Arc<S>) -> Self {
    Self::with_parts(storage, Box::new(TimestampIds::new()), Arc::new(SystemClock))
  }

  pub fn with_parts(
    storage: Arc<S>,
    ids: Box<dyn IdGenerator>,
    clock: Arc<dyn Clock>,
  ) -> Self {
    Self { storage, ids, clock, employees: Vec::new() }
  }

  // ── Startup ──────────────────────────────────────────────────────────────

  /// Load the persisted roster, or seed it with [`seed::default_roster`].
  ///
  /// A slot that fails to decode is treated as absent. Only a storage failure
  /// is an error.
  pub fn initialize(&mut self) -> Result<LoadOutcome> {
    let outcome = match self.read_slot() {
      Ok(Some(employees)) => {
        tracing::debug!(count = employees.len(), "restored employee roster");
        self.employees = employees;
        return Ok(LoadOutcome::Restored);
      }
      Ok(None) => LoadOutcome::Seeded,
      Err(Error::CorruptSlot { key, source }) => {
        tracing::warn!(slot = key, error = %source, "employee slot is corrupt; reseeding");
        LoadOutcome::Reseeded
      }
      Err(e) => return Err(e),
    };

    let roster = seed::default_roster();
    self.persist(&roster)?;
    self.employees = roster;
    tracing::info!(count = self.employees.len(), "seeded employee roster");
    Ok(outcome)
  }

  fn read_slot(&self) -> Result<Option<Vec<Employee>>> {
    let Some(raw) = self.storage.get(EMPLOYEES_SLOT).map_err(Error::storage)? else {
      return Ok(None);
    };
    serde_json::from_str(&raw)
      .map(Some)
      .map_err(|source| Error::CorruptSlot { key: EMPLOYEES_SLOT, source })
  }

  fn persist(&self, roster: &[Employee]) -> Result<()> {
    let raw = serde_json::to_string(roster)?;
    self.storage.set(EMPLOYEES_SLOT, &raw).map_err(Error::storage)
  }

  /// Write `next` through to storage, then adopt it.
  fn commit(&mut self, next: Vec<Employee>) -> Result<()> {
    self.persist(&next)?;
    self.employees = next;
    Ok(())
  }

  // ── Mutations ────────────────────────────────────────────────────────────

  /// Validate `draft`, assign an id and creation time, append and persist.
  pub fn add(&mut self, draft: NewEmployee) -> Result<Employee> {
    let ValidDraft { full_name, gender, dob, state, is_active, image } =
      validation::validate_draft(&draft, self.clock.today())?;

    let employee = Employee {
      id: self.fresh_id(),
      full_name,
      gender,
      dob,
      state,
      is_active,
      image,
      created_at: self.clock.now(),
    };

    let mut next = self.employees.clone();
    next.push(employee.clone());
    self.commit(next)?;

    tracing::info!(id = %employee.id, "added employee");
    Ok(employee)
  }

  fn fresh_id(&mut self) -> String {
    loop {
      let id = self.ids.next_id();
      if self.position(&id).is_none() {
        return id;
      }
      tracing::debug!(%id, "generated id already in use; drawing another");
    }
  }

  /// Merge `patch` onto the record with `id` and persist.
  ///
  /// The merged record is held to the same rules as a new one, including the
  /// age window on today's date.
  pub fn update(&mut self, id: &str, patch: &EmployeePatch) -> Result<Employee> {
    let index = self
      .position(id)
      .ok_or_else(|| Error::EmployeeNotFound(id.to_owned()))?;

    let merged = patch.merge(&self.employees[index]);
    validation::validate_record(&merged, self.clock.today())?;

    let mut next = self.employees.clone();
    next[index] = merged.clone();
    self.commit(next)?;

    tracing::info!(%id, "updated employee");
    Ok(merged)
  }

  /// Remove the record with `id`. An unknown id is not an error; the roster is
  /// persisted either way.
  pub fn delete(&mut self, id: &str) -> Result<Option<Employee>> {
    let mut next = self.employees.clone();
    let removed = self.position(id).map(|index| next.remove(index));
    self.commit(next)?;

    match &removed {
      Some(_) => tracing::info!(%id, "deleted employee"),
      None => tracing::debug!(%id, "delete of unknown employee ignored"),
    }
    Ok(removed)
  }

  // ── Reads ────────────────────────────────────────────────────────────────

  pub fn get_by_id(&self, id: &str) -> Option<&Employee> {
    self.employees.iter().find(|e| e.id == id)
  }

  /// The roster in insertion order.
  pub fn employees(&self) -> &[Employee] { &self.employees }

  pub fn len(&self) -> usize { self.employees.len() }

  pub fn is_empty(&self) -> bool { self.employees.is_empty() }

  /// The clock this store stamps records with.
  pub fn clock(&self) -> &dyn Clock { self.clock.as_ref() }

  fn position(&self, id: &str) -> Option<usize> {
    self.employees.iter().position(|e| e.id == id)
  }
}
