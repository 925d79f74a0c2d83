//! Implementation of the `tailkit add` command.

use std::time::Instant;

use anyhow::{Context, Result};
use clap::Args;

use tailkit_lib::add::{AddOptions, add_components};
use tailkit_lib::run::TimestampRunIds;

use super::{SelectionArgs, Workspace, print_file_outcomes, print_summary};
use crate::output::{
  OutputFormat, format_duration, plural, print_info, print_json, print_stat, print_success, print_warning,
};

#[derive(Args, Debug)]
pub struct AddArgs {
  #[command(flatten)]
  pub selection: SelectionArgs,

  /// Destination root inside the project (default: the recorded one, then src/app/ui)
  #[arg(long)]
  pub dest: Option<String>,

  /// Copy files without rewriting import specifiers
  #[arg(long)]
  pub no_rewrite: bool,

  /// Show what would be written without writing
  #[arg(long)]
  pub dry_run: bool,

  /// Output format
  #[arg(short = 'o', long, value_enum, default_value = "text")]
  pub output: OutputFormat,
}

/// Execute the add command.
///
/// # Errors
///
/// Returns an error if the library cannot be opened or a file cannot be
/// read or written.
pub fn cmd_add(workspace: &Workspace, args: AddArgs) -> Result<()> {
  let start = Instant::now();
  let library = workspace.open_library()?;
  let mut host = workspace.host();

  let options = AddOptions {
    selection: args.selection.into(),
    dest: args.dest,
    rewrite_imports: !args.no_rewrite,
    dry_run: args.dry_run,
  };

  let result =
    add_components(&library, &mut host, &mut TimestampRunIds::new(), &options).context("Failed to add components")?;

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

  let dest = result.dest.as_deref().unwrap_or_default();
  print_success(&format!(
    "Added {} to {}: {}",
    plural(result.components.len(), "component"),
    dest,
    result.components.join(", ")
  ));
  print_summary(&result.summary);

  if !result.dependencies.added.is_empty() {
    let added: Vec<String> = result
      .dependencies
      .added
      .iter()
      .map(|(name, version)| format!("{name}@{version}"))
      .collect();
    print_stat("Dependencies added", &added.join(", "));
  }
  for name in &result.dependencies.unknown_version {
    print_warning(&format!("No version known for {name}; add it to package.json yourself"));
  }
  if result.summary.skipped_conflict > 0 {
    print_info("Existing files with different content were kept. Use `tailkit update --mode conflicts` to replace them.");
  }

  print_stat("Duration", &format_duration(start.elapsed()));
  Ok(())
}
