//! The printable employee report.

use std::fmt;

use chrono::{DateTime, Local, NaiveDate, Utc};
use roster_core::employee::Employee;

use crate::render;

/// A snapshot of a filtered roster, ready to print.
pub struct Report {
  pub generated_at: DateTime<Utc>,
  pub rows:         Vec<[String; 6]>,
}

impl Report {
  pub fn build<'a>(
    employees: impl IntoIterator<Item = &'a Employee>,
    generated_at: DateTime<Utc>,
    today: NaiveDate,
  ) -> Self {
    let rows = employees.into_iter().map(|e| render::cells(e, today)).collect();
    Self { generated_at, rows }
  }
}

impl fmt::Display for Report {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    writeln!(f, "Employee Management System - Employee List Report")?;
    writeln!(
      f,
      "Generated on: {}",
      self
        .generated_at
        .with_timezone(&Local)
        .format("%d/%m/%Y, %H:%M:%S")
    )?;
    writeln!(f, "Total Employees: {}", self.rows.len())?;
    writeln!(f)?;
    f.write_str(&render::table(render::COLUMNS, &self.rows))?;
    writeln!(f)?;
    writeln!(f, "This is a system-generated report. For official use only.")
  }
}
