//! Plain-text rendering of employee rows, details and summaries.

use std::fmt::Write as _;

use chrono::NaiveDate;
use roster_core::{employee::Employee, query::Summary};

/// Column headers shared by the list view and the report.
pub const COLUMNS: [&str; 6] = ["ID", "Name", "Gender", "Age", "State", "Status"];

/// The six table cells for one employee.
pub fn cells(employee: &Employee, today: NaiveDate) -> [String; 6] {
  [
    employee.id.clone(),
    employee.full_name.clone(),
    employee.gender.to_string(),
    employee.age_on(today).to_string(),
    employee.state.to_string(),
    employee.status_label().to_owned(),
  ]
}

/// Left-aligned columns separated by two spaces, with a rule under the header.
pub fn table<const N: usize>(headers: [&str; N], rows: &[[String; N]]) -> String {
  let mut widths = headers.map(|h| h.chars().count());
  for row in rows {
    for (width, cell) in widths.iter_mut().zip(row) {
      *width = (*width).max(cell.chars().count());
    }
  }

  let mut out = String::new();
  push_row(&mut out, &widths, headers.iter().copied());
  push_row(&mut out, &widths, widths.map(|w| "-".repeat(w)).iter().map(String::as_str));
  for row in rows {
    push_row(&mut out, &widths, row.iter().map(String::as_str));
  }
  out
}

fn push_row<'a>(out: &mut String, widths: &[usize], cells: impl Iterator<Item = &'a str>) {
  let line = cells
    .zip(widths.iter().copied())
    .map(|(cell, width)| format!("{cell:<width$}"))
    .collect::<Vec<_>>()
    .join("  ");
  out.push_str(line.trim_end());
  out.push('\n');
}

/// One-line dashboard counts.
pub fn summary_line(summary: &Summary) -> String {
  format!(
    "Total: {}  Active: {}  Inactive: {}  Active rate: {}%",
    summary.total, summary.active, summary.inactive, summary.active_rate
  )
}

/// Every field of one record, one per line.
pub fn detail(employee: &Employee, today: NaiveDate) -> String {
  let mut out = String::new();
  let _ = writeln!(out, "ID:            {}", employee.id);
  let _ = writeln!(out, "Name:          {}", employee.full_name);
  let _ = writeln!(out, "Gender:        {}", employee.gender);
  let _ = writeln!(
    out,
    "Date of birth: {} (age {})",
    employee.dob.format("%d %b %Y"),
    employee.age_on(today)
  );
  let _ = writeln!(out, "State:         {}", employee.state);
  let _ = writeln!(out, "Status:        {}", employee.status_label());
  let photo = match &employee.image {
    Some(uri) => format!("yes ({} bytes)", uri.len()),
    None => "none".to_owned(),
  };
  let _ = writeln!(out, "Photo:         {photo}");
  let _ = writeln!(
    out,
    "Created:       {}",
    employee.created_at.format("%Y-%m-%d %H:%M UTC")
  );
  out
}

#[cfg(test)]
mod tests {
  use roster_core::seed::default_roster;

  use super::*;

  fn today() -> NaiveDate { NaiveDate::from_ymd_opt(2024, 6, 15).unwrap() }

  #[test]
  fn table_pads_columns_to_widest_cell() {
    let rows = [
      ["1".to_owned(), "Jo".to_owned()],
      ["22".to_owned(), "Josephine".to_owned()],
    ];
    let out = table(["ID", "Name"], &rows);
    let lines: Vec<_> = out.lines().collect();
    assert_eq!(lines[0], "ID  Name");
    assert_eq!(lines[1], "--  ---------");
    assert_eq!(lines[2], "1   Jo");
    assert_eq!(lines[3], "22  Josephine");
  }

  #[test]
  fn cells_show_age_and_status() {
    let roster = default_roster();
    let john = cells(&roster[0], today());
    assert_eq!(john, ["EMP001", "John Doe", "Male", "34", "Maharashtra", "Active"]);
    let bob = cells(&roster[2], today());
    assert_eq!(bob[5], "Inactive");
  }

  #[test]
  fn summary_line_format() {
    let summary = Summary { total: 8, active: 5, inactive: 3, active_rate: 63 };
    assert_eq!(summary_line(&summary), "Total: 8  Active: 5  Inactive: 3  Active rate: 63%");
  }

  #[test]
  fn detail_lists_every_field() {
    let out = detail(&default_roster()[1], today());
    assert!(out.contains("Jane Smith"));
    assert!(out.contains("22 Aug 1992 (age 31)"));
    assert!(out.contains("Karnataka"));
    assert!(out.contains("Photo:         none"));
  }
}
