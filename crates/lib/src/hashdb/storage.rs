//! Hash database persistence inside the host tree.

use thiserror::Error;

use super::types::HashDb;
use crate::consts::{HASH_DB_PATH, HASH_DB_SCHEMA_VERSION};
use crate::tree::{ReadTree, Tree, TreeError};

/// Errors that can occur when reading or writing the hash database.
#[derive(Debug, Error)]
pub enum HashDbError {
  #[error(transparent)]
  Tree(#[from] TreeError),

  #[error("failed to parse hash database {path}: {source}")]
  Parse { path: String, source: serde_json::Error },

  #[error("failed to serialize hash database: {0}")]
  Serialize(#[source] serde_json::Error),

  #[error("unsupported hash database schema version {0}, expected at most {HASH_DB_SCHEMA_VERSION}")]
  UnsupportedVersion(u32),
}

/// Location of the hash database within a host tree.
#[derive(Debug, Clone)]
pub struct HashDbStore {
  path: String,
}

impl Default for HashDbStore {
  fn default() -> Self {
    Self::new(HASH_DB_PATH)
  }
}

impl HashDbStore {
  pub fn new(path: impl Into<String>) -> Self {
    Self { path: path.into() }
  }

  pub fn path(&self) -> &str {
    &self.path
  }

  /// Load the document. A missing file yields a fresh empty document.
  pub fn read(&self, tree: &dyn ReadTree) -> Result<HashDb, HashDbError> {
    let Some(content) = tree.read_text(&self.path)? else {
      return Ok(HashDb::new());
    };

    let db: HashDb = serde_json::from_str(&content).map_err(|e| HashDbError::Parse {
      path: self.path.clone(),
      source: e,
    })?;

    if db.schema_version > HASH_DB_SCHEMA_VERSION {
      return Err(HashDbError::UnsupportedVersion(db.schema_version));
    }

    Ok(db)
  }

  /// Persist the document as pretty-printed JSON.
  pub fn write(&self, tree: &mut dyn Tree, db: &HashDb) -> Result<(), HashDbError> {
    let mut content = serde_json::to_string_pretty(db).map_err(HashDbError::Serialize)?;
    content.push('\n');
    tree.write(&self.path, content.as_bytes())?;
    Ok(())
  }
}
