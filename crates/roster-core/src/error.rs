//! Error types for `roster-core`.

use thiserror::Error;

use crate::validation::ValidationErrors;

#[derive(Debug, Error)]
pub enum Error {
  #[error("invalid employee: {0}")]
  Validation(ValidationErrors),

  #[error("employee not found: {0}")]
  EmployeeNotFound(String),

  #[error("not logged in")]
  NotAuthenticated,

  #[error("session is still being restored")]
  SessionLoading,

  /// A persisted slot exists but cannot be decoded. The stores recover from
  /// this locally; it never reaches the caller of a store operation.
  #[error("slot {key:?} is corrupt: {source}")]
  CorruptSlot {
    key:    &'static str,
    #[source]
    source: serde_json::Error,
  },

  #[error("storage error: {0}")]
  Storage(#[source] Box<dyn std::error::Error + Send + Sync>),

  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),
}

impl From<ValidationErrors> for Error {
  fn from(errors: ValidationErrors) -> Self { Self::Validation(errors) }
}

impl Error {
  /// Box a backend error into [`Error::Storage`].
  pub fn storage<E>(err: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Self::Storage(Box::new(err))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
