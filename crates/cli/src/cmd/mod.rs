mod add;
mod list;
mod ng_add;
mod status;
mod update;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use owo_colors::{OwoColorize, Stream};
use tracing::debug;

use tailkit_lib::hashdb::RunSummary;
use tailkit_lib::library::{Library, resolve_library_dir};
use tailkit_lib::manifest::Selection;
use tailkit_lib::plan::{FileOutcome, FileStatus};
use tailkit_lib::tree::DiskTree;

use crate::output::{print_stat, symbols};

pub use add::{AddArgs, cmd_add};
pub use list::cmd_list;
pub use ng_add::{NgAddArgs, cmd_ng_add};
pub use status::cmd_status;
pub use update::{UpdateArgs, cmd_update};

/// Host project and component library locations for one invocation.
#[derive(Debug)]
pub struct Workspace {
  pub project: PathBuf,
  pub library_dir: PathBuf,
}

impl Workspace {
  pub fn resolve(project: &Path, library: Option<&Path>) -> Result<Self> {
    let project = dunce::canonicalize(project)
      .with_context(|| format!("Project directory not found: {}", project.display()))?;
    let library_dir = resolve_library_dir(&project, library);
    debug!(project = %project.display(), library = %library_dir.display(), "resolved workspace");
    Ok(Self { project, library_dir })
  }

  pub fn open_library(&self) -> Result<Library> {
    Library::open(&self.library_dir)
      .with_context(|| format!("Failed to open component library at {}", self.library_dir.display()))
  }

  pub fn host(&self) -> DiskTree {
    DiskTree::new(&self.project)
  }
}

/// Component selectors shared by `add` and `update`.
#[derive(Args, Debug, Default)]
#[group(multiple = false)]
pub struct SelectionArgs {
  /// Select every component
  #[arg(long)]
  pub all: bool,

  /// Component names, comma-separated
  #[arg(long, value_delimiter = ',')]
  pub names: Vec<String>,

  /// Group names, comma-separated
  #[arg(long, value_delimiter = ',')]
  pub groups: Vec<String>,
}

impl From<SelectionArgs> for Selection {
  fn from(args: SelectionArgs) -> Self {
    Selection {
      all: args.all,
      names: args.names,
      groups: args.groups,
    }
  }
}

fn status_symbol(status: FileStatus) -> &'static str {
  match status {
    FileStatus::Created => symbols::ADD,
    FileStatus::Updated => symbols::MODIFY,
    FileStatus::SkippedIdentical => symbols::INFO,
    FileStatus::SkippedConflict | FileStatus::SkippedNoRecord => symbols::WARNING,
    FileStatus::MissingSource => symbols::ERROR,
  }
}

/// One line per file; identical files only when `verbose`.
pub fn print_file_outcomes(files: &[FileOutcome], verbose: bool) {
  for file in files {
    if file.status == FileStatus::SkippedIdentical && !verbose {
      continue;
    }
    let symbol = status_symbol(file.status);
    let line = format!("  {} {} ({})", symbol, file.path, file.status);
    match file.status {
      FileStatus::Created => println!("{}", line.if_supports_color(Stream::Stdout, |s| s.green())),
      FileStatus::Updated => println!("{}", line.if_supports_color(Stream::Stdout, |s| s.yellow())),
      FileStatus::SkippedIdentical => println!("{}", line.if_supports_color(Stream::Stdout, |s| s.dimmed())),
      FileStatus::SkippedConflict | FileStatus::SkippedNoRecord => {
        println!("{}", line.if_supports_color(Stream::Stdout, |s| s.yellow()))
      }
      FileStatus::MissingSource => println!("{}", line.if_supports_color(Stream::Stdout, |s| s.red())),
    }
  }
}

pub fn print_summary(summary: &RunSummary) {
  let counters = [
    ("Created", summary.created),
    ("Updated", summary.updated),
    ("Identical", summary.skipped_identical),
    ("Conflicts", summary.skipped_conflict),
    ("No record", summary.skipped_no_record),
    ("Missing source", summary.missing_source),
  ];
  for (label, count) in counters {
    if count > 0 {
      print_stat(label, &count.to_string());
    }
  }
}
