//! Implementation of the `tailkit update` command.
//!
//! Regenerates components and reconciles each file with what is on disk
//! according to the chosen mode.

use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};

use tailkit_lib::run::TimestampRunIds;
use tailkit_lib::update::{UpdateMode, UpdateOptions, update_components};

use super::{SelectionArgs, Workspace, print_file_outcomes, print_summary};
use crate::output::{OutputFormat, format_duration, print_info, print_json, print_stat, print_success, print_warning};
use crate::prompts::confirm;

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum ModeArg {
  /// Overwrite files you have not edited
  #[default]
  Auto,
  /// Overwrite files you have edited, and files the tool never recorded
  Conflicts,
  /// Overwrite everything
  All,
}

impl From<ModeArg> for UpdateMode {
  fn from(mode: ModeArg) -> Self {
    match mode {
      ModeArg::Auto => UpdateMode::Auto,
      ModeArg::Conflicts => UpdateMode::Conflicts,
      ModeArg::All => UpdateMode::All,
    }
  }
}

#[derive(Args, Debug)]
pub struct UpdateArgs {
  /// Components to update (default: every component added before)
  #[command(flatten)]
  pub selection: SelectionArgs,

  /// Destination root inside the project (default: the recorded one)
  #[arg(long)]
  pub dest: Option<String>,

  /// Reconciliation mode for files that already exist
  #[arg(long, value_enum, default_value = "auto")]
  pub mode: ModeArg,

  /// Copy files without rewriting import specifiers
  #[arg(long)]
  pub no_rewrite: bool,

  /// Show what would be written without writing
  #[arg(long)]
  pub dry_run: bool,

  /// Skip confirmation prompt for --mode all
  #[arg(long)]
  pub force: bool,

  /// Output format
  #[arg(short = 'o', long, value_enum, default_value = "text")]
  pub output: OutputFormat,
}

/// Execute the update command.
///
/// # Errors
///
/// Returns an error if no destination is known, the user declines the
/// confirmation, or a file cannot be read or written.
pub fn cmd_update(workspace: &Workspace, args: UpdateArgs) -> Result<()> {
  let start = Instant::now();
  let mode = UpdateMode::from(args.mode);

  if mode == UpdateMode::All
    && !args.dry_run
    && !confirm("Overwrite every selected file, including files you edited?", args.force)?
  {
    print_info("Aborted.");
    return Ok(());
  }

  let library = workspace.open_library()?;
  let mut host = workspace.host();

  let options = UpdateOptions {
    selection: args.selection.into(),
    dest: args.dest,
    mode,
    rewrite_imports: !args.no_rewrite,
    dry_run: args.dry_run,
  };

  let result = update_components(&library, &mut host, &mut TimestampRunIds::new(), &options)
    .context("Failed to update components")?;

  if args.output.is_json() {
    return print_json(&result);
  }

  if result.run_id.is_none() {
    print_warning("No components matched the selection.");
    return Ok(());
  }

  if args.dry_run {
    print_info("Dry run - no changes written");
  }
  print_file_outcomes(&result.files, false);
  println!();

  if result.summary.written() == 0 {
    print_success("Everything is up to date.");
  } else {
    print_success(&format!(
      "Updated {} in {} ({} mode)",
      result.components.join(", "),
      result.dest.as_deref().unwrap_or_default(),
      result.mode
    ));
  }
  print_summary(&result.summary);

  if result.summary.skipped_conflict > 0 && mode == UpdateMode::Auto {
    print_info("Edited files were kept. Use --mode conflicts to replace them.");
  }

  print_stat("Duration", &format_duration(start.elapsed()));
  Ok(())
}
