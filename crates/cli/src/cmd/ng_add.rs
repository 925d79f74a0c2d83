//! Implementation of the `tailkit ng-add` command.

use anyhow::{Context, Result};
use clap::Args;

use tailkit_lib::bootstrap::{BootstrapOptions, register_provider};

use super::Workspace;
use crate::output::{OutputFormat, print_info, print_json, print_stat, print_success};

#[derive(Args, Debug)]
pub struct NgAddArgs {
  /// Entry file containing bootstrapApplication (default: from angular.json, then src/main.ts)
  #[arg(long)]
  pub entry: Option<String>,

  /// Module exporting provideTailkit (default: core/provider.ts under the destination root)
  #[arg(long)]
  pub provider_module: Option<String>,

  /// Show what would change without writing
  #[arg(long)]
  pub dry_run: bool,

  /// Output format
  #[arg(short = 'o', long, value_enum, default_value = "text")]
  pub output: OutputFormat,
}

pub fn cmd_ng_add(workspace: &Workspace, args: NgAddArgs) -> Result<()> {
  let mut host = workspace.host();
  let options = BootstrapOptions {
    entry: args.entry,
    provider_module: args.provider_module,
    dry_run: args.dry_run,
  };

  let outcome = register_provider(&mut host, &options).context("Failed to register provider")?;

  if args.output.is_json() {
    return print_json(&outcome);
  }

  if !outcome.changed() {
    print_info(&format!("Provider already registered in {}", outcome.config_file));
    return Ok(());
  }

  if args.dry_run {
    print_info("Dry run - no changes written");
  }
  print_success(&format!("Registered provider in {}", outcome.config_file));
  if outcome.config_file != outcome.entry {
    print_stat("Entry", &outcome.entry);
  }
  print_stat("Provider module", &outcome.provider_module);
  Ok(())
}
