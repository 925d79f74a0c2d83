//! Hash database document.
//!
//! # Format
//!
//! ```json
//! {
//!   "schemaVersion": 1,
//!   "manifestVersion": "2.1.0",
//!   "libVersion": "2.1.0",
//!   "dest": "/src/app/ui",
//!   "globalStylesEntry": "/src/styles.css",
//!   "files": {
//!     "/src/app/ui/button/button.ts": {
//!       "hash": "9f86d081884c7d659a2feaa0c55ad015a3bf4f1b2b0b822cd15d6c15b0f00a08",
//!       "component": "button",
//!       "libVersion": "2.1.0",
//!       "runId": "1760781600123-0001"
//!     }
//!   },
//!   "runs": [
//!     { "id": "1760781600123-0001", "timestamp": 1760781600, "action": "add",
//!       "selection": { "all": false, "names": ["button"] },
//!       "summary": { "created": 1 } }
//!   ]
//! }
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::consts::HASH_DB_SCHEMA_VERSION;
use crate::manifest::Selection;
use crate::util::hash::ContentHash;

/// Per-project record of generated files and past runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HashDb {
  pub schema_version: u32,

  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub manifest_version: Option<String>,

  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub lib_version: Option<String>,

  /// Destination root chosen on the last generation.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub dest: Option<String>,

  /// Host's primary stylesheet, detected once and never recomputed.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub global_styles_entry: Option<String>,

  /// Generated files keyed by destination tree path.
  #[serde(default)]
  pub files: BTreeMap<String, FileRecord>,

  /// Append-only run log.
  #[serde(default)]
  pub runs: Vec<RunEntry>,
}

/// What the tool last wrote to a destination file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileRecord {
  pub hash: ContentHash,
  /// Owning component, or `shared` for discovered files.
  pub component: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub lib_version: Option<String>,
  pub run_id: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunAction {
  Add,
  Update,
}

impl std::fmt::Display for RunAction {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      RunAction::Add => write!(f, "add"),
      RunAction::Update => write!(f, "update"),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunEntry {
  pub id: String,
  /// Unix timestamp in seconds.
  pub timestamp: u64,
  pub action: RunAction,
  pub selection: Selection,
  pub summary: RunSummary,
}

/// Per-run counters. Reporting only; no decision depends on them.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RunSummary {
  pub created: usize,
  pub updated: usize,
  pub skipped_identical: usize,
  pub skipped_conflict: usize,
  pub skipped_no_record: usize,
  pub missing_source: usize,
}

impl RunSummary {
  /// Number of files written during the run.
  pub fn written(&self) -> usize {
    self.created + self.updated
  }
}

impl Default for HashDb {
  fn default() -> Self {
    Self::new()
  }
}

impl HashDb {
  /// A fresh, empty document at the current schema version.
  pub fn new() -> Self {
    Self {
      schema_version: HASH_DB_SCHEMA_VERSION,
      manifest_version: None,
      lib_version: None,
      dest: None,
      global_styles_entry: None,
      files: BTreeMap::new(),
      runs: Vec::new(),
    }
  }

  pub fn file(&self, dest_path: &str) -> Option<&FileRecord> {
    self.files.get(dest_path)
  }

  /// Insert or replace the record for `dest_path`.
  pub fn record_file(&mut self, dest_path: &str, hash: ContentHash, component: &str, lib_version: Option<&str>, run_id: &str) {
    self.files.insert(
      dest_path.to_string(),
      FileRecord {
        hash,
        component: component.to_string(),
        lib_version: lib_version.map(str::to_string),
        run_id: run_id.to_string(),
      },
    );
  }

  pub fn append_run(&mut self, entry: RunEntry) {
    self.runs.push(entry);
  }

  pub fn last_run(&self) -> Option<&RunEntry> {
    self.runs.last()
  }
}
