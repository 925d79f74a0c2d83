//! Hash database: the only state persisted between runs.
//!
//! Records the content hash of every file the tool generated so that later
//! runs can tell files the user never touched from files they edited.

mod storage;
mod types;

pub use storage::{HashDbError, HashDbStore};
pub use types::*;

use crate::host::{HostError, detect_global_styles_entry};
use crate::tree::ReadTree;
use crate::util::hash::{ContentHash, hash_bytes};

/// Hash used to detect user modification of generated files.
pub fn compute_hash(content: &[u8]) -> ContentHash {
  hash_bytes(content)
}

impl HashDb {
  /// Whether the on-disk `content` still matches what the tool last wrote.
  ///
  /// `None` when the file has no record.
  pub fn is_untouched(&self, dest_path: &str, content: &[u8]) -> Option<bool> {
    self.file(dest_path).map(|record| record.hash == compute_hash(content))
  }

  pub fn cached_global_styles_entry(&self) -> Option<&str> {
    self.global_styles_entry.as_deref()
  }

  /// The host's global stylesheet, detected on first use and cached.
  ///
  /// Once cached the value is returned as-is even if the build configuration
  /// changes later. The cached value is persisted with the next write.
  pub fn find_and_cache_global_styles_entry(&mut self, host: &dyn ReadTree) -> Result<Option<String>, HostError> {
    if let Some(entry) = &self.global_styles_entry {
      return Ok(Some(entry.clone()));
    }
    let entry = detect_global_styles_entry(host)?;
    self.global_styles_entry = entry.clone();
    Ok(entry)
  }
}
