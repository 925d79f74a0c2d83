//! Re-application of components to a host project.
//!
//! This module provides the core logic for the `tailkit update` command. It
//! runs the same planning and rendering as `add`, but decides per file whether
//! to overwrite by comparing the on-disk content against the hash recorded
//! when the tool last wrote it.

use std::collections::BTreeSet;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::add::finish_run;
use crate::consts::SHARED_COMPONENT;
use crate::hashdb::{HashDb, HashDbError, HashDbStore, RunAction, RunSummary, compute_hash};
use crate::host::HostError;
use crate::library::Library;
use crate::manifest::{Selection, resolve_selection};
use crate::plan::{FileOutcome, FileStatus, RenderOptions, generate, settle_dest_root};
use crate::run::RunIdSource;
use crate::tree::{Tree, TreeError};
use crate::util::hash::ContentHash;

/// Reconciliation policy for files that already exist.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UpdateMode {
  /// Overwrite only files the user has not modified.
  #[default]
  Auto,
  /// Overwrite only files the user has modified, and files with no record.
  Conflicts,
  /// Overwrite everything.
  All,
}

impl std::fmt::Display for UpdateMode {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      UpdateMode::Auto => write!(f, "auto"),
      UpdateMode::Conflicts => write!(f, "conflicts"),
      UpdateMode::All => write!(f, "all"),
    }
  }
}

impl FromStr for UpdateMode {
  type Err = UpdateError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "auto" => Ok(UpdateMode::Auto),
      "conflicts" => Ok(UpdateMode::Conflicts),
      "all" => Ok(UpdateMode::All),
      other => Err(UpdateError::InvalidMode(other.to_string())),
    }
  }
}

/// Options for the update operation.
#[derive(Debug, Clone)]
pub struct UpdateOptions {
  /// Components to update. If empty, every component with recorded files.
  pub selection: Selection,
  /// Destination root. Falls back to the recorded root; there is no default.
  pub dest: Option<String>,
  pub mode: UpdateMode,
  /// Rewrite import specifiers for the new layout.
  pub rewrite_imports: bool,
  /// Compute everything, write nothing.
  pub dry_run: bool,
}

impl Default for UpdateOptions {
  fn default() -> Self {
    Self {
      selection: Selection::default(),
      dest: None,
      mode: UpdateMode::Auto,
      rewrite_imports: true,
      dry_run: false,
    }
  }
}

/// Result of an update operation.
#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateResult {
  /// `None` when the selection was empty and nothing ran.
  pub run_id: Option<String>,
  pub dest: Option<String>,
  pub mode: UpdateMode,
  /// Selected components after closure.
  pub components: Vec<String>,
  pub files: Vec<FileOutcome>,
  pub summary: RunSummary,
  pub dry_run: bool,
}

/// Errors that can occur during update.
#[derive(Debug, Error)]
pub enum UpdateError {
  /// No destination given and none recorded by a previous run.
  #[error("no destination recorded; run `add` first or pass --dest")]
  NoDestination,

  #[error("unknown update mode '{0}' (expected auto, conflicts or all)")]
  InvalidMode(String),

  #[error(transparent)]
  Tree(#[from] TreeError),

  #[error(transparent)]
  HashDb(#[from] HashDbError),

  #[error(transparent)]
  Host(#[from] HostError),
}

/// Decide what happens to one destination file.
///
/// `on_disk` is the current content, `recorded` the hash stored when the tool
/// last wrote the file. Returns [`FileStatus::Created`] or
/// [`FileStatus::Updated`] when the file must be written.
pub fn reconcile(mode: UpdateMode, generated: &[u8], on_disk: Option<&[u8]>, recorded: Option<&ContentHash>) -> FileStatus {
  let Some(current) = on_disk else {
    return FileStatus::Created;
  };
  if current == generated {
    return FileStatus::SkippedIdentical;
  }

  let Some(recorded) = recorded else {
    return match mode {
      UpdateMode::Conflicts | UpdateMode::All => FileStatus::Updated,
      UpdateMode::Auto => FileStatus::SkippedNoRecord,
    };
  };

  let untouched = compute_hash(current) == *recorded;
  let write = match mode {
    UpdateMode::Auto => untouched,
    UpdateMode::Conflicts => !untouched,
    UpdateMode::All => true,
  };
  if write { FileStatus::Updated } else { FileStatus::SkippedConflict }
}

/// Components owning at least one recorded file.
fn recorded_components(db: &HashDb) -> BTreeSet<String> {
  db.files
    .values()
    .filter(|record| record.component != SHARED_COMPONENT)
    .map(|record| record.component.clone())
    .collect()
}

/// Regenerate the selected components in `host` under the chosen mode.
///
/// The hash database is written once, after every file has been handled.
///
/// # Errors
///
/// Returns [`UpdateError::NoDestination`] if no destination is given and
/// none was recorded. I/O and parse failures are propagated.
pub fn update_components(
  library: &Library,
  host: &mut dyn Tree,
  run_ids: &mut dyn RunIdSource,
  options: &UpdateOptions,
) -> Result<UpdateResult, UpdateError> {
  let store = HashDbStore::default();
  let mut db = store.read(host)?;

  let chosen = options.dest.clone().or_else(|| db.dest.clone()).ok_or(UpdateError::NoDestination)?;

  let selection = if options.selection.is_empty() {
    let recorded = recorded_components(&db);
    debug!(components = ?recorded, "no selection given; updating recorded components");
    Selection::names(recorded)
  } else {
    options.selection.clone()
  };

  let components = resolve_selection(&library.manifest, &selection);
  if components.is_empty() {
    warn!("selection resolved to no components; nothing to update");
    return Ok(UpdateResult {
      mode: options.mode,
      dry_run: options.dry_run,
      ..Default::default()
    });
  }

  let dest = settle_dest_root(&mut db, &chosen);
  let styles_entry = db.find_and_cache_global_styles_entry(host)?;

  info!(components = ?components, dest = %dest, mode = %options.mode, "updating components");

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
    let on_disk = host.read(&file.destination)?;
    let recorded = db.file(&file.destination).map(|record| record.hash.clone());
    let status = reconcile(options.mode, &file.content, on_disk.as_deref(), recorded.as_ref());

    match status {
      FileStatus::Created | FileStatus::Updated => {
        if !options.dry_run {
          host.write(&file.destination, &file.content)?;
        }
        db.record_file(&file.destination, compute_hash(&file.content), &file.component, lib_version, &run_id);
      }
      FileStatus::SkippedIdentical => {
        db.record_file(&file.destination, compute_hash(&file.content), &file.component, lib_version, &run_id);
      }
      _ => debug!(path = %file.destination, status = %status, "leaving file as is"),
    }

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

  finish_run(&mut db, library, &run_id, RunAction::Update, &selection, &summary);
  if !options.dry_run {
    store.write(host, &db)?;
  }

  info!(
    created = summary.created,
    updated = summary.updated,
    identical = summary.skipped_identical,
    conflicts = summary.skipped_conflict,
    no_record = summary.skipped_no_record,
    missing = summary.missing_source,
    "update complete"
  );

  Ok(UpdateResult {
    run_id: Some(run_id),
    dest: Some(dest),
    mode: options.mode,
    components,
    files,
    summary,
    dry_run: options.dry_run,
  })
}
