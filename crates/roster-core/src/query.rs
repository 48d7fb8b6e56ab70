//! The query view: search, filter and paginate a roster snapshot.
//!
//! Nothing here mutates or persists anything. Results borrow from the
//! snapshot and keep its order.

use serde::{Deserialize, Serialize};

use crate::employee::{Employee, Gender};

// ─── Parameters ──────────────────────────────────────────────────────────────

/// Three-way status filter. `Any` is distinct from `Inactive`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
  #[default]
  Any,
  Active,
  Inactive,
}

impl StatusFilter {
  pub fn matches(self, is_active: bool) -> bool {
    match self {
      Self::Any => true,
      Self::Active => is_active,
      Self::Inactive => !is_active,
    }
  }
}

/// `None` means no filter; `Some(flag)` keeps records whose `isActive == flag`.
impl From<Option<bool>> for StatusFilter {
  fn from(status: Option<bool>) -> Self {
    match status {
      None => Self::Any,
      Some(true) => Self::Active,
      Some(false) => Self::Inactive,
    }
  }
}

/// Parameters for [`filter`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeQuery {
  /// Case-insensitive substring of `fullName`. Empty matches everything.
  #[serde(default)]
  pub search: String,
  #[serde(default)]
  pub gender: Option<Gender>,
  #[serde(default)]
  pub status: StatusFilter,
}

impl EmployeeQuery {
  pub fn matches(&self, employee: &Employee) -> bool {
    let name_matches = self.search.is_empty()
      || employee
        .full_name
        .to_lowercase()
        .contains(&self.search.to_lowercase());

    name_matches
      && self.gender.is_none_or(|g| employee.gender == g)
      && self.status.matches(employee.is_active)
  }
}

// ─── Operations ──────────────────────────────────────────────────────────────

/// The records of `snapshot` that satisfy `query`, in their original order.
pub fn filter<'a>(snapshot: &'a [Employee], query: &EmployeeQuery) -> Vec<&'a Employee> {
  snapshot.iter().filter(|e| query.matches(e)).collect()
}

/// The slice `[page * page_size, page * page_size + page_size)`, clamped to
/// `items`. A page past the end, or a zero page size, is empty.
pub fn paginate<T>(items: &[T], page: usize, page_size: usize) -> &[T] {
  let start = page.saturating_mul(page_size).min(items.len());
  let end = start.saturating_add(page_size).min(items.len());
  &items[start..end]
}

/// Number of pages needed to show `total` items, `page_size` at a time.
pub fn page_count(total: usize, page_size: usize) -> usize {
  if page_size == 0 { 0 } else { total.div_ceil(page_size) }
}

// ─── Summary ─────────────────────────────────────────────────────────────────

/// Dashboard counts over a set of records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
  pub total:       usize,
  pub active:      usize,
  pub inactive:    usize,
  /// Whole percent of `total` that is active; 0 for an empty set.
  pub active_rate: u32,
}

impl Summary {
  pub fn of<'a>(employees: impl IntoIterator<Item = &'a Employee>) -> Self {
    let (total, active) = employees
      .into_iter()
      .fold((0, 0), |(total, active), e| (total + 1, active + usize::from(e.is_active)));

    let active_rate = if total == 0 {
      0
    } else {
      (active as f64 / total as f64 * 100.0).round() as u32
    };

    Self { total, active, inactive: total - active, active_rate }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::seed::default_roster;

  fn names<'a>(rows: &[&'a Employee]) -> Vec<&'a str> {
    rows.iter().map(|e| e.full_name.as_str()).collect()
  }

  #[test]
  fn empty_query_returns_everything_in_order() {
    let roster = default_roster();
    let all = filter(&roster, &EmployeeQuery::default());
    assert_eq!(all.len(), roster.len());
    assert!(all.iter().zip(&roster).all(|(a, b)| a.id == b.id));
  }

  #[test]
  fn name_gender_and_status_combine() {
    let roster = default_roster();
    let query = EmployeeQuery {
      search: "john".into(),
      gender: Some(Gender::Male),
      status: StatusFilter::Active,
    };
    // "Bob Johnson" matches the name but is inactive; "Jane Smith" fails the name.
    assert_eq!(names(&filter(&roster, &query)), ["John Doe"]);

    let query = EmployeeQuery { status: StatusFilter::Any, ..query };
    assert_eq!(names(&filter(&roster, &query)), ["John Doe", "Bob Johnson"]);
    assert!(query.matches(&roster[2]));
  }

  #[test]
  fn search_is_case_insensitive() {
    let roster = default_roster();
    let query = EmployeeQuery { search: "MARTINEZ".into(), ..Default::default() };
    assert_eq!(names(&filter(&roster, &query)), ["Eve Martinez"]);
  }

  #[test]
  fn inactive_filter_is_not_no_filter() {
    let roster = default_roster();
    let inactive = EmployeeQuery { status: StatusFilter::from(Some(false)), ..Default::default() };
    assert_eq!(
      names(&filter(&roster, &inactive)),
      ["Bob Johnson", "Charlie Davis", "Frank Taylor"]
    );

    let any = EmployeeQuery { status: StatusFilter::from(None), ..Default::default() };
    assert_eq!(filter(&roster, &any).len(), 8);
  }

  #[test]
  fn gender_filter() {
    let roster = default_roster();
    let query = EmployeeQuery { gender: Some(Gender::Female), ..Default::default() };
    let rows = filter(&roster, &query);
    assert_eq!(rows.len(), 4);
    assert!(rows.iter().all(|e| e.gender == Gender::Female));

    let query = EmployeeQuery { gender: Some(Gender::Other), ..Default::default() };
    assert!(filter(&roster, &query).is_empty());
  }

  #[test]
  fn paginate_slices_and_clamps() {
    let items: Vec<u32> = (0..8).collect();
    assert_eq!(paginate(&items, 1, 3), &[3, 4, 5]);
    assert_eq!(paginate(&items, 2, 3), &[6, 7]);
    assert!(paginate(&items, 3, 3).is_empty());
    assert!(paginate(&items, usize::MAX, 3).is_empty());
    assert!(paginate(&items, 0, 0).is_empty());
    assert_eq!(paginate(&items, 0, 100).len(), 8);
  }

  #[test]
  fn page_counts() {
    assert_eq!(page_count(8, 3), 3);
    assert_eq!(page_count(9, 3), 3);
    assert_eq!(page_count(0, 10), 0);
    assert_eq!(page_count(5, 0), 0);
  }

  #[test]
  fn summary_counts_and_rate() {
    let roster = default_roster();
    let summary = Summary::of(&roster);
    assert_eq!(summary, Summary { total: 8, active: 5, inactive: 3, active_rate: 63 });

    assert_eq!(Summary::of(&Vec::<Employee>::new()), Summary::default());
  }

  #[test]
  fn summary_of_filtered_rows() {
    let roster = default_roster();
    let query = EmployeeQuery { gender: Some(Gender::Male), ..Default::default() };
    let men = filter(&roster, &query);
    let summary = Summary::of(men.iter().copied());
    assert_eq!(summary, Summary { total: 4, active: 1, inactive: 3, active_rate: 25 });
  }
}
