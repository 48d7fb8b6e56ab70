//! `roster` — terminal console for the Roster employee store.
//!
//! # Usage
//!
//! ```text
//! roster login --employee-id EMP01202601
//! roster list --search john --gender male --status active
//! roster add --name "Asha Rao" --gender female --dob 1995-03-09 --state Kerala
//! roster --config ~/.config/roster/roster.toml report --status inactive
//! ```

mod app;
mod image;
mod render;
mod report;
mod settings;

use std::{num::NonZeroUsize, path::PathBuf, sync::Arc};

use anyhow::Context as _;
use app::{App, ListOptions};
use clap::{Args, Parser, Subcommand, ValueEnum};
use roster_core::{
  clock::SystemClock,
  employee::{EmployeePatch, Gender, NewEmployee, Region},
  query::{EmployeeQuery, StatusFilter},
  storage::SlotStorage,
  validation,
};
use roster_store_sqlite::SqliteSlots;
use settings::ConsoleConfig;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(author, version, about = "Employee management console")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, global = true, default_value = "roster.toml")]
  config: PathBuf,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Start a session. Prompts for anything not given on the command line.
  Login {
    #[arg(long)]
    employee_id: Option<String>,
    #[arg(long)]
    password:    Option<String>,
  },
  /// End the current session.
  Logout,
  /// Show who is logged in.
  Whoami,
  /// Search, filter and page through employees.
  List(ListArgs),
  /// Show one employee in full.
  Show { id: String },
  /// Add an employee.
  Add(AddArgs),
  /// Change fields of an existing employee.
  Edit(EditArgs),
  /// Remove an employee.
  Delete { id: String },
  /// Headcount and active rate across the whole roster.
  Stats,
  /// Print a report of the (filtered) roster.
  Report(FilterArgs),
  /// List the accepted state names.
  States,
}

#[derive(Clone, Copy, Debug, Default, ValueEnum)]
enum StatusArg {
  #[default]
  All,
  Active,
  Inactive,
}

impl From<StatusArg> for StatusFilter {
  fn from(status: StatusArg) -> Self {
    match status {
      StatusArg::All => Self::Any,
      StatusArg::Active => Self::Active,
      StatusArg::Inactive => Self::Inactive,
    }
  }
}

#[derive(Args, Debug)]
struct FilterArgs {
  /// Case-insensitive substring of the full name.
  #[arg(short, long, default_value = "")]
  search: String,
  /// male, female or other.
  #[arg(short, long)]
  gender: Option<Gender>,
  #[arg(long, value_enum, default_value_t = StatusArg::All)]
  status: StatusArg,
}

impl From<FilterArgs> for EmployeeQuery {
  fn from(args: FilterArgs) -> Self {
    Self { search: args.search, gender: args.gender, status: args.status.into() }
  }
}

#[derive(Args, Debug)]
struct ListArgs {
  #[command(flatten)]
  filter:    FilterArgs,
  /// 1-based page number.
  #[arg(short, long, default_value_t = 1)]
  page:      usize,
  /// Rows per page (defaults to `page_size` from the config).
  #[arg(long)]
  page_size: Option<NonZeroUsize>,
}

#[derive(Args, Debug)]
struct AddArgs {
  /// Full name, 3 to 50 characters.
  #[arg(long)]
  name:     String,
  #[arg(long)]
  gender:   Option<Gender>,
  /// Date of birth, YYYY-MM-DD.
  #[arg(long, default_value = "")]
  dob:      String,
  /// State or union territory, e.g. "Tamil Nadu" (see `roster states`).
  #[arg(long)]
  state:    Option<Region>,
  /// Record the employee as inactive.
  #[arg(long)]
  inactive: bool,
  /// Photo file (png, jpeg, gif, webp or svg).
  #[arg(long, value_name = "FILE")]
  image:    Option<PathBuf>,
}

#[derive(Args, Debug)]
struct EditArgs {
  id:          String,
  #[arg(long)]
  name:        Option<String>,
  #[arg(long)]
  gender:      Option<Gender>,
  #[arg(long)]
  dob:         Option<String>,
  #[arg(long)]
  state:       Option<Region>,
  #[arg(long, conflicts_with = "inactive")]
  active:      bool,
  #[arg(long)]
  inactive:    bool,
  #[arg(long, value_name = "FILE", conflicts_with = "clear_image")]
  image:       Option<PathBuf>,
  /// Remove the current photo.
  #[arg(long)]
  clear_image: bool,
}

// ─── Entry point ──────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
  // Logs go to stderr so command output stays clean.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy(),
    )
    .with_writer(std::io::stderr)
    .init();

  let cli = Cli::parse();
  let cfg = ConsoleConfig::load(&cli.config)?;

  let slots = SqliteSlots::open(&cfg.store_path)
    .with_context(|| format!("failed to open store at {:?}", cfg.store_path))?;

  let mut app = App::start(
    Arc::new(slots),
    cfg.id_scheme.generator(),
    Arc::new(SystemClock),
    cfg.page_size,
  )
  .context("failed to load the roster")?;

  let output = run(&mut app, cli.command)?;
  print!("{output}");
  Ok(())
}

fn run<S: SlotStorage>(app: &mut App<S>, command: Command) -> anyhow::Result<String> {
  match command {
    Command::Login { employee_id, password } => {
      let identity = match employee_id {
        Some(id) => id,
        None => prompt("Employee ID: ")?,
      };
      let secret = match password {
        Some(pw) => pw,
        None => prompt("Password: ")?,
      };
      app.login(&identity, &secret)
    }
    Command::Logout => app.logout(),
    Command::Whoami => Ok(app.whoami()),
    Command::List(args) => app.list(&ListOptions {
      query:     args.filter.into(),
      page:      args.page,
      page_size: args.page_size,
    }),
    Command::Show { id } => app.show(&id),
    Command::Add(args) => {
      let image = args.image.as_deref().map(image::data_uri).transpose()?;
      app.add(NewEmployee {
        full_name: args.name,
        gender: args.gender,
        dob: args.dob,
        state: args.state,
        is_active: !args.inactive,
        image,
      })
    }
    Command::Edit(args) => {
      let patch = edit_patch(&args)?;
      app.edit(&args.id, &patch)
    }
    Command::Delete { id } => app.delete(&id),
    Command::Stats => app.stats(),
    Command::Report(args) => app.report(&EmployeeQuery::from(args)),
    Command::States => Ok(app.states()),
  }
}

fn edit_patch(args: &EditArgs) -> anyhow::Result<EmployeePatch> {
  let dob = args
    .dob
    .as_deref()
    .map(|s| validation::parse_date(s).with_context(|| format!("{s:?} is not a YYYY-MM-DD date")))
    .transpose()?;

  let image = if args.clear_image {
    Some(None)
  } else {
    args.image.as_deref().map(image::data_uri).transpose()?.map(Some)
  };

  let is_active = match (args.active, args.inactive) {
    (true, _) => Some(true),
    (_, true) => Some(false),
    _ => None,
  };

  Ok(EmployeePatch {
    full_name: args.name.clone(),
    gender: args.gender,
    dob,
    state: args.state,
    is_active,
    image,
  })
}

/// Read one line from stdin after printing `label`.
fn prompt(label: &str) -> anyhow::Result<String> {
  use std::io::{self, BufRead, Write};
  print!("{label}");
  io::stdout().flush().ok();
  let mut line = String::new();
  io::stdin().lock().read_line(&mut line)?;
  Ok(
    line
      .trim_end_matches('\n')
      .trim_end_matches('\r')
      .to_string(),
  )
}
