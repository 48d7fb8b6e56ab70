//! Field rules for employee records.
//!
//! Every function here is pure. Anything that depends on the current date
//! takes `today` explicitly; [`age`] is the only convenience that reads the
//! local calendar.

use std::{collections::BTreeMap, fmt};

use chrono::{DateTime, Datelike, Local, Months, NaiveDate};
use serde::Serialize;

use crate::employee::{Employee, Gender, NewEmployee, Region};

pub const MIN_NAME_LEN: usize = 3;
pub const MAX_NAME_LEN: usize = 50;
pub const MIN_AGE: i32 = 18;
pub const MAX_AGE: i32 = 80;

// ─── Rules ───────────────────────────────────────────────────────────────────

/// Trimmed length in `[3, 50]` characters.
pub fn valid_full_name(name: &str) -> bool {
  let len = name.trim().chars().count();
  (MIN_NAME_LEN..=MAX_NAME_LEN).contains(&len)
}

/// `dob` parses as a date and the age it implies on `today` is in `[18, 80]`.
pub fn valid_date_of_birth(dob: &str, today: NaiveDate) -> bool {
  parse_date(dob).is_some_and(|d| (MIN_AGE..=MAX_AGE).contains(&age_on(d, today)))
}

/// Whole years between `dob` and `today`, not counting a birthday that has not
/// happened yet this year.
pub fn age_on(dob: NaiveDate, today: NaiveDate) -> i32 {
  let mut age = today.year() - dob.year();
  if (today.month(), today.day()) < (dob.month(), dob.day()) {
    age -= 1;
  }
  age
}

/// [`age_on`] against the local calendar date.
pub fn age(dob: NaiveDate) -> i32 { age_on(dob, Local::now().date_naive()) }

/// Parse `YYYY-MM-DD`, or take the date part of an RFC 3339 timestamp.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
  let s = s.trim();
  if s.is_empty() {
    return None;
  }
  s.parse::<NaiveDate>()
    .ok()
    .or_else(|| DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive()))
}

/// Earliest acceptable date of birth on `today` (the 80-year bound).
pub fn min_birth_date(today: NaiveDate) -> Option<NaiveDate> {
  today.checked_sub_months(Months::new(MAX_AGE as u32 * 12))
}

/// Latest acceptable date of birth on `today` (the 18-year bound).
pub fn max_birth_date(today: NaiveDate) -> Option<NaiveDate> {
  today.checked_sub_months(Months::new(MIN_AGE as u32 * 12))
}

// ─── Field-keyed errors ──────────────────────────────────────────────────────

/// A draft field that can fail validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
  FullName,
  Gender,
  Dob,
  State,
}

impl fmt::Display for Field {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(match self {
      Self::FullName => "fullName",
      Self::Gender => "gender",
      Self::Dob => "dob",
      Self::State => "state",
    })
  }
}

/// Every failing field of a draft, with a user-facing message each.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<Field, String>);

impl ValidationErrors {
  pub fn is_empty(&self) -> bool { self.0.is_empty() }

  pub fn len(&self) -> usize { self.0.len() }

  pub fn get(&self, field: Field) -> Option<&str> {
    self.0.get(&field).map(String::as_str)
  }

  pub fn contains(&self, field: Field) -> bool { self.0.contains_key(&field) }

  pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
    self.0.iter().map(|(f, m)| (*f, m.as_str()))
  }

  fn insert(&mut self, field: Field, message: &str) {
    self.0.insert(field, message.to_owned());
  }
}

impl fmt::Display for ValidationErrors {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let mut first = true;
    for (field, message) in self.iter() {
      if !first {
        f.write_str("; ")?;
      }
      write!(f, "{field}: {message}")?;
      first = false;
    }
    Ok(())
  }
}

// ─── Draft validation ────────────────────────────────────────────────────────

/// The typed fields of a draft that passed [`validate_draft`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidDraft {
  pub full_name: String,
  pub gender:    Gender,
  pub dob:       NaiveDate,
  pub state:     Region,
  pub is_active: bool,
  pub image:     Option<String>,
}

/// Check every field of `draft` and report all failures together.
pub fn validate_draft(
  draft: &NewEmployee,
  today: NaiveDate,
) -> Result<ValidDraft, ValidationErrors> {
  let mut errors = ValidationErrors::default();

  if !valid_full_name(&draft.full_name) {
    errors.insert(Field::FullName, "Name must be 3-50 characters");
  }
  if draft.gender.is_none() {
    errors.insert(Field::Gender, "Gender is required");
  }
  let dob = parse_date(&draft.dob)
    .filter(|d| (MIN_AGE..=MAX_AGE).contains(&age_on(*d, today)));
  if dob.is_none() {
    errors.insert(Field::Dob, "Employee must be 18-80 years old");
  }
  if draft.state.is_none() {
    errors.insert(Field::State, "State is required");
  }

  match (draft.gender, dob, draft.state) {
    (Some(gender), Some(dob), Some(state)) if errors.is_empty() => Ok(ValidDraft {
      full_name: draft.full_name.clone(),
      gender,
      dob,
      state,
      is_active: draft.is_active,
      image: draft.image.clone(),
    }),
    _ => Err(errors),
  }
}

/// Check a whole record before it is committed, as an update does with the
/// merged result. Gender and state are typed, so only the name and the age
/// window can fail.
pub fn validate_record(
  employee: &Employee,
  today: NaiveDate,
) -> Result<(), ValidationErrors> {
  let mut errors = ValidationErrors::default();

  if !valid_full_name(&employee.full_name) {
    errors.insert(Field::FullName, "Name must be 3-50 characters");
  }
  if !(MIN_AGE..=MAX_AGE).contains(&age_on(employee.dob, today)) {
    errors.insert(Field::Dob, "Employee must be 18-80 years old");
  }

  if errors.is_empty() { Ok(()) } else { Err(errors) }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn date(y: i32, m: u32, d: u32) -> NaiveDate { NaiveDate::from_ymd_opt(y, m, d).unwrap() }

  #[test]
  fn age_counts_birthday_only_once_reached() {
    let dob = date(2000, 6, 15);
    assert_eq!(age_on(dob, date(2024, 6, 14)), 23);
    assert_eq!(age_on(dob, date(2024, 6, 15)), 24);
    assert_eq!(age_on(dob, date(2024, 12, 31)), 24);
    assert_eq!(age_on(dob, date(2025, 1, 1)), 24);
  }

  #[test]
  fn leap_day_birthday() {
    let dob = date(2004, 2, 29);
    assert_eq!(age_on(dob, date(2022, 2, 28)), 17);
    assert_eq!(age_on(dob, date(2022, 3, 1)), 18);
  }

  #[test]
  fn full_name_length_is_trimmed_and_counted_in_chars() {
    assert!(!valid_full_name("Al"));
    assert!(!valid_full_name("  Al   "));
    assert!(valid_full_name("Ali"));
    assert!(valid_full_name(&"x".repeat(50)));
    assert!(!valid_full_name(&"x".repeat(51)));
    // Three characters, six bytes.
    assert!(valid_full_name("éèê"));
  }

  #[test]
  fn date_of_birth_window_is_inclusive() {
    let today = date(2024, 6, 15);
    assert!(valid_date_of_birth("2006-06-15", today));
    assert!(!valid_date_of_birth("2006-06-16", today));
    assert!(valid_date_of_birth("1944-06-15", today));
    assert!(valid_date_of_birth("1943-06-16", today));
    assert!(!valid_date_of_birth("1943-06-15", today));
    assert!(!valid_date_of_birth("", today));
    assert!(!valid_date_of_birth("not a date", today));
  }

  #[test]
  fn parse_date_accepts_iso_timestamps() {
    assert_eq!(parse_date("1990-05-15"), Some(date(1990, 5, 15)));
    assert_eq!(parse_date("1990-05-15T00:00:00.000Z"), Some(date(1990, 5, 15)));
    assert_eq!(parse_date("15/05/1990"), None);
  }

  #[test]
  fn birth_date_bounds() {
    let today = date(2026, 1, 20);
    assert_eq!(min_birth_date(today), Some(date(1946, 1, 20)));
    assert_eq!(max_birth_date(today), Some(date(2008, 1, 20)));
  }

  #[test]
  fn every_failing_field_is_reported() {
    let draft = NewEmployee {
      full_name: "Al".into(),
      gender:    None,
      dob:       "2020-01-01".into(),
      state:     None,
      is_active: true,
      image:     None,
    };
    let errors = validate_draft(&draft, date(2024, 1, 1)).unwrap_err();
    assert_eq!(errors.len(), 4);
    assert_eq!(errors.get(Field::FullName), Some("Name must be 3-50 characters"));
    assert_eq!(errors.get(Field::Gender), Some("Gender is required"));
    assert_eq!(errors.get(Field::Dob), Some("Employee must be 18-80 years old"));
    assert_eq!(errors.get(Field::State), Some("State is required"));
  }

  #[test]
  fn valid_draft_is_typed() {
    let draft = NewEmployee::new("Asha Rao", Gender::Female, date(1995, 3, 9), Region::Kerala);
    let valid = validate_draft(&draft, date(2024, 1, 1)).unwrap();
    assert_eq!(valid.dob, date(1995, 3, 9));
    assert_eq!(valid.state, Region::Kerala);
  }

  #[test]
  fn errors_serialise_keyed_by_field() {
    let draft = NewEmployee {
      full_name: "Asha Rao".into(),
      gender:    Some(Gender::Female),
      dob:       "1995-03-09".into(),
      state:     None,
      is_active: true,
      image:     None,
    };
    let errors = validate_draft(&draft, date(2024, 1, 1)).unwrap_err();
    let json = serde_json::to_value(&errors).unwrap();
    assert_eq!(json, serde_json::json!({ "state": "State is required" }));
    assert_eq!(errors.to_string(), "state: State is required");
  }

  #[test]
  fn record_is_checked_as_a_whole() {
    let dob = date(1990, 5, 15);
    let employee = Employee {
      id:         "EMP001".into(),
      full_name:  "John Doe".into(),
      gender:     Gender::Male,
      dob,
      state:      Region::Maharashtra,
      is_active:  true,
      image:      None,
      created_at: chrono::Utc::now(),
    };
    assert!(validate_record(&employee, date(2024, 1, 1)).is_ok());

    // Nothing changed, but the age has since left the window.
    let errors = validate_record(&employee, date(2080, 1, 1)).unwrap_err();
    assert_eq!(errors.len(), 1);
    assert!(errors.contains(Field::Dob));

    let renamed = Employee { full_name: " x ".into(), ..employee };
    let errors = validate_record(&renamed, date(2024, 1, 1)).unwrap_err();
    assert!(errors.contains(Field::FullName));
    assert!(!errors.contains(Field::Dob));
  }
}
