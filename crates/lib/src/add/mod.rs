//! First-time generation of components into a host project.
//!
//! This module provides the core logic for the `tailkit add` command: resolve
//! the selection, plan and render every file, create what does not exist yet,
//! record hashes, and patch the host's `package.json`.

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::consts::DEFAULT_DEST;
use crate::hashdb::{HashDb, HashDbError, HashDbStore, RunAction, RunEntry, RunSummary, compute_hash};
use crate::host::{DependencyPatch, HostError, patch_dependencies};
use crate::library::Library;
use crate::manifest::{Selection, resolve_selection};
use crate::plan::{FileOutcome, FileStatus, RenderOptions, generate, required_external_dependencies, settle_dest_root};
use crate::run::{RunIdSource, unix_timestamp};
use crate::tree::{Tree, TreeError};

/// Options for the add operation.
#[derive(Debug, Clone)]
pub struct AddOptions {
  /// Components to add.
  pub selection: Selection,
  /// Destination root. Falls back to the recorded root, then `/src/app/ui`.
  pub dest: Option<String>,
  /// Rewrite import specifiers for the new layout.
  pub rewrite_imports: bool,
  /// Compute everything, write nothing.
  pub dry_run: bool,
}

impl Default for AddOptions {
  fn default() -> Self {
    Self {
      selection: Selection::default(),
      dest: None,
      rewrite_imports: true,
      dry_run: false,
    }
  }
}

/// Result of an add operation.
#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddResult {
  /// `None` when the selection was empty and nothing ran.
  pub run_id: Option<String>,
  pub dest: Option<String>,
  /// Selected components after closure.
  pub components: Vec<String>,
  pub files: Vec<FileOutcome>,
  pub summary: RunSummary,
  pub dependencies: DependencyPatch,
  pub dry_run: bool,
}

/// Errors that can occur during add.
#[derive(Debug, Error)]
pub enum AddError {
  #[error(transparent)]
  Tree(#[from] TreeError),

  #[error(transparent)]
  HashDb(#[from] HashDbError),

  #[error(transparent)]
  Host(#[from] HostError),
}

/// Generate the selected components into `host`.
///
/// Existing files are never overwritten: identical ones are skipped, and
/// divergent ones are skipped with their current on-disk hash recorded so a
/// later update sees them as user-modified.
///
/// # Errors
///
/// Returns an error if the hash database cannot be read, the host build
/// configuration is malformed, or writing to the host fails.
pub fn add_components(
  library: &Library,
  host: &mut dyn Tree,
  run_ids: &mut dyn RunIdSource,
  options: &AddOptions,
) -> Result<AddResult, AddError> {
  let components = resolve_selection(&library.manifest, &options.selection);
  if components.is_empty() {
    warn!("selection resolved to no components; nothing to add");
    return Ok(AddResult {
      dry_run: options.dry_run,
      ..Default::default()
    });
  }

  let store = HashDbStore::default();
  let mut db = store.read(host)?;

  let chosen = options
    .dest
    .clone()
    .or_else(|| db.dest.clone())
    .unwrap_or_else(|| DEFAULT_DEST.to_string());
  let dest = settle_dest_root(&mut db, &chosen);
  let styles_entry = db.find_and_cache_global_styles_entry(host)?;

  info!(components = ?components, dest = %dest, "adding components");

  let generation = generate(
    library,
    &components,
    &dest,
    RenderOptions {
      rewrite_imports: options.rewrite_imports,
      styles_entry: styles_entry.as_deref(),
    },
  )?;

  let run_id = run_ids.next_run_id();
  let lib_version = library.version.as_deref();
  let mut summary = RunSummary::default();
  let mut files = Vec::with_capacity(generation.files.len() + generation.missing.len());

  for file in generation.files {
    let status = match host.read(&file.destination)? {
      Some(current) if current == file.content => {
        db.record_file(&file.destination, compute_hash(&current), &file.component, lib_version, &run_id);
        FileStatus::SkippedIdentical
      }
      Some(current) => {
        debug!(path = %file.destination, "keeping existing file with different content");
        db.record_file(&file.destination, compute_hash(&current), &file.component, lib_version, &run_id);
        FileStatus::SkippedConflict
      }
      None => {
        if !options.dry_run {
          host.write(&file.destination, &file.content)?;
        }
        db.record_file(&file.destination, compute_hash(&file.content), &file.component, lib_version, &run_id);
        FileStatus::Created
      }
    };
    status.count(&mut summary);
    files.push(FileOutcome {
      path: file.destination,
      source: file.original,
      component: file.component,
      status,
    });
  }
  for missing in generation.missing {
    missing.status.count(&mut summary);
    files.push(missing);
  }

  finish_run(&mut db, library, &run_id, RunAction::Add, &options.selection, &summary);
  if !options.dry_run {
    store.write(host, &db)?;
  }

  let required = required_external_dependencies(&library.manifest, &components);
  let dependencies = patch_dependencies(
    host,
    &required,
    &library.manifest.external_dependency_versions,
    options.dry_run,
  )?;

  info!(
    created = summary.created,
    identical = summary.skipped_identical,
    conflicts = summary.skipped_conflict,
    missing = summary.missing_source,
    "add complete"
  );

  Ok(AddResult {
    run_id: Some(run_id),
    dest: Some(dest),
    components,
    files,
    summary,
    dependencies,
    dry_run: options.dry_run,
  })
}

/// Stamp versions and append the run log entry.
pub(crate) fn finish_run(
  db: &mut HashDb,
  library: &Library,
  run_id: &str,
  action: RunAction,
  selection: &Selection,
  summary: &RunSummary,
) {
  db.manifest_version = library.manifest.version.clone();
  db.lib_version = library.version.clone();
  db.append_run(RunEntry {
    id: run_id.to_string(),
    timestamp: unix_timestamp(),
    action,
    selection: selection.clone(),
    summary: summary.clone(),
  });
}
