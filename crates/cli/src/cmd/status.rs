//! Status command implementation.
//!
//! Displays the recorded destination, generated files that were edited or
//! deleted since they were written, and the most recent runs.

use std::time::{Duration, UNIX_EPOCH};

use anyhow::{Context, Result};

use tailkit_lib::status::{FileState, status};

use super::Workspace;
use crate::output::{self, OutputFormat, print_info, print_json, print_stat, print_success};

pub fn cmd_status(workspace: &Workspace, verbose: bool, output: OutputFormat) -> Result<()> {
  let host = workspace.host();
  let report = status(&host).context("Failed to read hash database")?;

  if output.is_json() {
    return print_json(&report);
  }

  let Some(dest) = &report.dest else {
    print_info("No components generated yet. Run 'tailkit add' first.");
    return Ok(());
  };

  print_success(&format!("Components generated into {}", dest));
  if let Some(version) = &report.lib_version {
    print_stat("Library version", version);
  }
  if let Some(entry) = &report.global_styles_entry {
    print_stat("Global styles", entry);
  }
  println!();
  print_stat("Tracked files", &report.files.len().to_string());
  print_stat("Untouched", &report.count(FileState::Untouched).to_string());
  print_stat("Modified", &report.count(FileState::Modified).to_string());
  print_stat("Deleted", &report.count(FileState::Deleted).to_string());

  let listed: Vec<_> = report
    .files
    .iter()
    .filter(|file| verbose || file.state != FileState::Untouched)
    .collect();
  if !listed.is_empty() {
    println!();
    for file in listed {
      let symbol = match file.state {
        FileState::Untouched => output::symbols::INFO,
        FileState::Modified => output::symbols::MODIFY,
        FileState::Deleted => output::symbols::REMOVE,
      };
      println!("  {} {} ({}, {})", symbol, file.path, file.state, file.component);
    }
  }

  if !report.runs.is_empty() {
    println!();
    println!("Recent runs:");
    for run in &report.runs {
      let at = humantime::format_rfc3339_seconds(UNIX_EPOCH + Duration::from_secs(run.timestamp));
      println!(
        "  {} {} {} ({} written)",
        output::symbols::INFO,
        at,
        run.action,
        run.summary.written()
      );
    }
  }

  Ok(())
}
