//! The built-in roster written on first run.

use chrono::{DateTime, NaiveDate, Utc};

use crate::employee::{Employee, Gender, Region};

struct SeedRow {
  id:        &'static str,
  full_name: &'static str,
  gender:    Gender,
  dob:       (i32, u32, u32),
  state:     Region,
  is_active: bool,
  created:   &'static str,
}

const ROWS: [SeedRow; 8] = [
  SeedRow {
    id:        "EMP001",
    full_name: "John Doe",
    gender:    Gender::Male,
    dob:       (1990, 5, 15),
    state:     Region::Maharashtra,
    is_active: true,
    created:   "2024-01-15T10:30:00Z",
  },
  SeedRow {
    id:        "EMP002",
    full_name: "Jane Smith",
    gender:    Gender::Female,
    dob:       (1992, 8, 22),
    state:     Region::Karnataka,
    is_active: true,
    created:   "2024-01-16T09:15:00Z",
  },
  SeedRow {
    id:        "EMP003",
    full_name: "Bob Johnson",
    gender:    Gender::Male,
    dob:       (1988, 3, 10),
    state:     Region::TamilNadu,
    is_active: false,
    created:   "2024-01-17T14:45:00Z",
  },
  SeedRow {
    id:        "EMP004",
    full_name: "Alice Brown",
    gender:    Gender::Female,
    dob:       (1995, 11, 30),
    state:     Region::Delhi,
    is_active: true,
    created:   "2024-01-18T11:00:00Z",
  },
  SeedRow {
    id:        "EMP005",
    full_name: "Charlie Davis",
    gender:    Gender::Male,
    dob:       (1985, 7, 4),
    state:     Region::Gujarat,
    is_active: false,
    created:   "2024-01-19T16:20:00Z",
  },
  SeedRow {
    id:        "EMP006",
    full_name: "Diana Wilson",
    gender:    Gender::Female,
    dob:       (1993, 2, 14),
    state:     Region::Kerala,
    is_active: true,
    created:   "2024-01-20T08:40:00Z",
  },
  SeedRow {
    id:        "EMP007",
    full_name: "Eve Martinez",
    gender:    Gender::Female,
    dob:       (1991, 9, 18),
    state:     Region::WestBengal,
    is_active: true,
    created:   "2024-01-21T13:05:00Z",
  },
  SeedRow {
    id:        "EMP008",
    full_name: "Frank Taylor",
    gender:    Gender::Male,
    dob:       (1987, 12, 1),
    state:     Region::Rajasthan,
    is_active: false,
    created:   "2024-01-22T10:10:00Z",
  },
];

/// The eight sample employees. Three of them (Bob Johnson, Charlie Davis and
/// Frank Taylor) are inactive.
pub fn default_roster() -> Vec<Employee> {
  ROWS
    .iter()
    .map(|row| {
      let (y, m, d) = row.dob;
      Employee {
        id:         row.id.to_owned(),
        full_name:  row.full_name.to_owned(),
        gender:     row.gender,
        dob:        NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default(),
        state:      row.state,
        is_active:  row.is_active,
        image:      None,
        created_at: DateTime::parse_from_rfc3339(row.created)
          .map(|dt| dt.with_timezone(&Utc))
          .unwrap_or_default(),
      }
    })
    .collect()
}

#[cfg(test)]
mod tests {
  use chrono::Datelike;

  use super::*;

  #[test]
  fn seed_rows_are_well_formed() {
    let roster = default_roster();
    assert_eq!(roster.len(), 8);
    assert_eq!(roster.iter().filter(|e| e.is_active).count(), 5);

    // No row fell back to a default date.
    assert!(roster.iter().all(|e| e.dob.year() > 1970));
    assert!(roster.iter().all(|e| e.created_at.timestamp() > 0));

    let mut ids: Vec<_> = roster.iter().map(|e| e.id.as_str()).collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), 8);
  }
}
