//! Report on generated files as recorded in the hash database.

use serde::Serialize;

use crate::hashdb::{HashDbError, HashDbStore, RunEntry, compute_hash};
use crate::tree::ReadTree;

/// Number of runs included in a report.
pub const RECENT_RUNS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileState {
  /// Content matches what the tool last wrote.
  Untouched,
  /// Edited since the tool last wrote it.
  Modified,
  /// Recorded but no longer on disk.
  Deleted,
}

impl std::fmt::Display for FileState {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      FileState::Untouched => write!(f, "untouched"),
      FileState::Modified => write!(f, "modified"),
      FileState::Deleted => write!(f, "deleted"),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackedFile {
  pub path: String,
  pub component: String,
  pub state: FileState,
  pub lib_version: Option<String>,
}

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusReport {
  pub dest: Option<String>,
  pub lib_version: Option<String>,
  pub manifest_version: Option<String>,
  pub global_styles_entry: Option<String>,
  pub files: Vec<TrackedFile>,
  /// Most recent runs, oldest first.
  pub runs: Vec<RunEntry>,
}

impl StatusReport {
  pub fn count(&self, state: FileState) -> usize {
    self.files.iter().filter(|f| f.state == state).count()
  }
}

/// Compare every recorded file against the host.
pub fn status(host: &dyn ReadTree) -> Result<StatusReport, HashDbError> {
  let db = HashDbStore::default().read(host)?;

  let mut files = Vec::with_capacity(db.files.len());
  for (path, record) in &db.files {
    let state = match host.read(path)? {
      None => FileState::Deleted,
      Some(content) if compute_hash(&content) == record.hash => FileState::Untouched,
      Some(_) => FileState::Modified,
    };
    files.push(TrackedFile {
      path: path.clone(),
      component: record.component.clone(),
      state,
      lib_version: record.lib_version.clone(),
    });
  }

  let skip = db.runs.len().saturating_sub(RECENT_RUNS);
  Ok(StatusReport {
    dest: db.dest,
    lib_version: db.lib_version,
    manifest_version: db.manifest_version,
    global_styles_entry: db.global_styles_entry,
    files,
    runs: db.runs.into_iter().skip(skip).collect(),
  })
}
