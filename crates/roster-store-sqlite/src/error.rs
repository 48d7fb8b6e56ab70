//! Error type for `roster-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] rusqlite::Error),

  #[error("could not create {path}: {source}")]
  CreateDir {
    path:   std::path::PathBuf,
    #[source]
    source: std::io::Error,
  },

  /// The database file was written by a newer schema than this build knows.
  #[error("unsupported schema version {0}")]
  UnsupportedSchema(i64),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
