//! Employee records and the shapes used to create and modify them.
//!
//! [`Employee`] is the committed record as persisted in the `employees` slot.
//! [`NewEmployee`] is the unvalidated draft a caller submits, and
//! [`EmployeePatch`] is a shallow overwrite applied by
//! [`EmployeeStore::update`](crate::store::EmployeeStore::update).

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use strum::{AsRefStr, Display, EnumIter, EnumString};

use crate::validation;

// ─── Gender ──────────────────────────────────────────────────────────────────

#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Serialize,
  Deserialize,
  Display,
  EnumString,
  EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum Gender {
  Male,
  Female,
  Other,
}

// ─── Region ──────────────────────────────────────────────────────────────────

/// The fixed list of states and union territories an employee can be based in.
///
/// Serialised by display name (`"Tamil Nadu"`), which is also what
/// [`FromStr`](std::str::FromStr) accepts, case-insensitively.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, Display, EnumString, EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum Region {
  // ── States ──────────────────────────────────────────────────────────────
  #[strum(to_string = "Andhra Pradesh")]
  AndhraPradesh,
  #[strum(to_string = "Arunachal Pradesh")]
  ArunachalPradesh,
  #[strum(to_string = "Assam")]
  Assam,
  #[strum(to_string = "Bihar")]
  Bihar,
  #[strum(to_string = "Chhattisgarh")]
  Chhattisgarh,
  #[strum(to_string = "Goa")]
  Goa,
  #[strum(to_string = "Gujarat")]
  Gujarat,
  #[strum(to_string = "Haryana")]
  Haryana,
  #[strum(to_string = "Himachal Pradesh")]
  HimachalPradesh,
  #[strum(to_string = "Jharkhand")]
  Jharkhand,
  #[strum(to_string = "Karnataka")]
  Karnataka,
  #[strum(to_string = "Kerala")]
  Kerala,
  #[strum(to_string = "Madhya Pradesh")]
  MadhyaPradesh,
  #[strum(to_string = "Maharashtra")]
  Maharashtra,
  #[strum(to_string = "Manipur")]
  Manipur,
  #[strum(to_string = "Meghalaya")]
  Meghalaya,
  #[strum(to_string = "Mizoram")]
  Mizoram,
  #[strum(to_string = "Nagaland")]
  Nagaland,
  #[strum(to_string = "Odisha")]
  Odisha,
  #[strum(to_string = "Punjab")]
  Punjab,
  #[strum(to_string = "Rajasthan")]
  Rajasthan,
  #[strum(to_string = "Sikkim")]
  Sikkim,
  #[strum(to_string = "Tamil Nadu")]
  TamilNadu,
  #[strum(to_string = "Telangana")]
  Telangana,
  #[strum(to_string = "Tripura")]
  Tripura,
  #[strum(to_string = "Uttar Pradesh")]
  UttarPradesh,
  #[strum(to_string = "Uttarakhand")]
  Uttarakhand,
  #[strum(to_string = "West Bengal")]
  WestBengal,

  // ── Union territories ───────────────────────────────────────────────────
  #[strum(to_string = "Andaman and Nicobar Islands")]
  AndamanAndNicobarIslands,
  #[strum(to_string = "Chandigarh")]
  Chandigarh,
  #[strum(to_string = "Dadra and Nagar Haveli and Daman and Diu")]
  DadraAndNagarHaveliAndDamanAndDiu,
  #[strum(to_string = "Delhi")]
  Delhi,
  #[strum(to_string = "Jammu and Kashmir")]
  JammuAndKashmir,
  #[strum(to_string = "Ladakh")]
  Ladakh,
  #[strum(to_string = "Lakshadweep")]
  Lakshadweep,
  #[strum(to_string = "Puducherry")]
  Puducherry,
}

impl Serialize for Region {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(self.as_ref())
  }
}

impl<'de> Deserialize<'de> for Region {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    let name = String::deserialize(deserializer)?;
    name
      .parse()
      .map_err(|_| serde::de::Error::custom(format!("unknown state: {name:?}")))
  }
}

// ─── Employee ────────────────────────────────────────────────────────────────

/// A committed employee record.
///
/// `id` and `created_at` are assigned by the store when the record is added
/// and never change afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
  pub id:         String,
  pub full_name:  String,
  pub gender:     Gender,
  pub dob:        NaiveDate,
  pub state:      Region,
  pub is_active:  bool,
  /// Photo as a `data:` URI.
  #[serde(default)]
  pub image:      Option<String>,
  pub created_at: DateTime<Utc>,
}

impl Employee {
  /// Age in whole years on `today`.
  pub fn age_on(&self, today: NaiveDate) -> i32 { validation::age_on(self.dob, today) }

  pub fn status_label(&self) -> &'static str {
    if self.is_active { "Active" } else { "Inactive" }
  }
}

// ─── NewEmployee ─────────────────────────────────────────────────────────────

fn active_by_default() -> bool { true }

/// Input to [`EmployeeStore::add`](crate::store::EmployeeStore::add).
///
/// Nothing here is trusted: the draft is validated as a whole before a record
/// is built from it. `id` and `createdAt` keys in JSON input are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEmployee {
  #[serde(default)]
  pub full_name: String,
  #[serde(default)]
  pub gender:    Option<Gender>,
  /// Date of birth as entered, `YYYY-MM-DD`.
  #[serde(default)]
  pub dob:       String,
  #[serde(default)]
  pub state:     Option<Region>,
  #[serde(default = "active_by_default")]
  pub is_active: bool,
  #[serde(default)]
  pub image:     Option<String>,
}

impl NewEmployee {
  /// A fully-populated, active draft without a photo.
  pub fn new(
    full_name: impl Into<String>,
    gender: Gender,
    dob: NaiveDate,
    state: Region,
  ) -> Self {
    Self {
      full_name: full_name.into(),
      gender:    Some(gender),
      dob:       dob.format("%Y-%m-%d").to_string(),
      state:     Some(state),
      is_active: true,
      image:     None,
    }
  }
}

impl From<&Employee> for NewEmployee {
  fn from(employee: &Employee) -> Self {
    Self {
      full_name: employee.full_name.clone(),
      gender:    Some(employee.gender),
      dob:       employee.dob.format("%Y-%m-%d").to_string(),
      state:     Some(employee.state),
      is_active: employee.is_active,
      image:     employee.image.clone(),
    }
  }
}

// ─── EmployeePatch ───────────────────────────────────────────────────────────

/// A shallow overwrite for an existing record. `None` leaves a field alone.
///
/// `image` is tri-state: `None` keeps the photo, `Some(None)` clears it and
/// `Some(Some(uri))` replaces it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmployeePatch {
  pub full_name: Option<String>,
  pub gender:    Option<Gender>,
  pub dob:       Option<NaiveDate>,
  pub state:     Option<Region>,
  pub is_active: Option<bool>,
  pub image:     Option<Option<String>>,
}

impl EmployeePatch {
  pub fn is_empty(&self) -> bool { *self == Self::default() }

  /// Return a copy of `employee` with this patch merged on top.
  /// `id` and `created_at` always come from `employee`.
  pub fn merge(&self, employee: &Employee) -> Employee {
    Employee {
      id:         employee.id.clone(),
      full_name:  self
        .full_name
        .clone()
        .unwrap_or_else(|| employee.full_name.clone()),
      gender:     self.gender.unwrap_or(employee.gender),
      dob:        self.dob.unwrap_or(employee.dob),
      state:      self.state.unwrap_or(employee.state),
      is_active:  self.is_active.unwrap_or(employee.is_active),
      image:      match &self.image {
        Some(image) => image.clone(),
        None => employee.image.clone(),
      },
      created_at: employee.created_at,
    }
  }
}
