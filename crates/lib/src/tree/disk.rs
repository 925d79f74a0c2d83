//! Disk-backed tree rooted at a directory.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::{ReadTree, Tree, TreeError};
use crate::util::posix;

/// A tree whose root is a directory on disk.
///
/// Writes go to a temp file next to the target and are renamed into place,
/// so an interrupted run never leaves a half-written file behind.
#[derive(Debug, Clone)]
pub struct DiskTree {
  root: PathBuf,
}

impl DiskTree {
  /// Create a tree rooted at `root`.
  ///
  /// The root is canonicalized when it exists so that reported paths are stable.
  pub fn new(root: impl Into<PathBuf>) -> Self {
    let root = root.into();
    let root = dunce::canonicalize(&root).unwrap_or(root);
    Self { root }
  }

  pub fn root(&self) -> &Path {
    &self.root
  }

  /// Map a tree path onto the filesystem below the root.
  pub fn resolve(&self, path: &str) -> PathBuf {
    let normalized = posix::normalize(path);
    let mut resolved = self.root.clone();
    for segment in normalized.split('/').filter(|s| !s.is_empty()) {
      resolved.push(segment);
    }
    resolved
  }
}

impl ReadTree for DiskTree {
  fn read(&self, path: &str) -> Result<Option<Vec<u8>>, TreeError> {
    let full = self.resolve(path);
    if full.is_dir() {
      return Ok(None);
    }
    match fs::read(&full) {
      Ok(content) => Ok(Some(content)),
      Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
      Err(e) => Err(TreeError::Read { path: full, source: e }),
    }
  }
}

impl Tree for DiskTree {
  fn write(&mut self, path: &str, content: &[u8]) -> Result<(), TreeError> {
    let full = self.resolve(path);
    if let Some(parent) = full.parent() {
      fs::create_dir_all(parent).map_err(|e| TreeError::CreateDir {
        path: parent.to_path_buf(),
        source: e,
      })?;
    }

    let file_name = full
      .file_name()
      .map(|n| n.to_string_lossy().to_string())
      .unwrap_or_default();
    let temp_path = full.with_file_name(format!(".{}.tmp", file_name));

    fs::write(&temp_path, content).map_err(|e| TreeError::Write {
      path: temp_path.clone(),
      source: e,
    })?;
    fs::rename(&temp_path, &full).map_err(|e| TreeError::Write { path: full, source: e })?;
    Ok(())
  }
}
