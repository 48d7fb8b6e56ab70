//! Console configuration: an optional TOML file layered under `ROSTER_*`
//! environment variables.

use std::{
  num::NonZeroUsize,
  path::{Path, PathBuf},
};

use anyhow::Context as _;
use roster_core::id::{IdGenerator, SequentialIds, TimestampIds, UuidIds};
use serde::Deserialize;

/// How new employee ids are minted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdScheme {
  /// `EMP<unix millis>`.
  #[default]
  Timestamp,
  /// `EMP0001`, `EMP0002`, … restarting each run.
  Sequential,
  Uuid,
}

impl IdScheme {
  pub fn generator(self) -> Box<dyn IdGenerator> {
    match self {
      Self::Timestamp => Box::new(TimestampIds::new()),
      Self::Sequential => Box::new(SequentialIds::new()),
      Self::Uuid => Box::new(UuidIds),
    }
  }
}

fn default_store_path() -> PathBuf { PathBuf::from("~/.local/share/roster/roster.db") }

const DEFAULT_PAGE_SIZE: NonZeroUsize = NonZeroUsize::new(10).unwrap();

fn default_page_size() -> NonZeroUsize { DEFAULT_PAGE_SIZE }

/// Runtime configuration, deserialised from `roster.toml` and the environment.
#[derive(Debug, Clone, Deserialize)]
pub struct ConsoleConfig {
  /// SQLite file holding the persisted slots. A leading `~/` is expanded.
  #[serde(default = "default_store_path")]
  pub store_path: PathBuf,
  /// Rows per page for `list`. Zero is refused when the config is read.
  #[serde(default = "default_page_size")]
  pub page_size:  NonZeroUsize,
  #[serde(default)]
  pub id_scheme:  IdScheme,
}

impl Default for ConsoleConfig {
  fn default() -> Self {
    Self {
      store_path: default_store_path(),
      page_size:  default_page_size(),
      id_scheme:  IdScheme::default(),
    }
  }
}

impl ConsoleConfig {
  /// Read `path` (if it exists), then apply `ROSTER_*` overrides.
  pub fn load(path: &Path) -> anyhow::Result<Self> {
    let settings = config::Config::builder()
      .add_source(config::File::from(path).required(false))
      .add_source(config::Environment::with_prefix("ROSTER"))
      .build()
      .context("failed to read config file")?;

    let mut cfg: Self = settings
      .try_deserialize()
      .context("failed to deserialise ConsoleConfig")?;
    cfg.store_path = expand_tilde(&cfg.store_path);
    Ok(cfg)
  }
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
