//! File trees addressed by POSIX tree paths.
//!
//! The engine never touches `std::fs` directly: the host project and the
//! library sources are both reached through these traits, which keeps the
//! orchestrators testable against [`MemoryTree`].
//!
//! A tree must offer read-after-write consistency: content written earlier in
//! a run is what later reads observe.

mod disk;
mod memory;
mod source;

use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub use disk::DiskTree;
pub use memory::MemoryTree;
pub use source::SourceChain;

/// Errors raised by tree implementations.
#[derive(Debug, Error)]
pub enum TreeError {
  #[error("failed to read {}: {source}", path.display())]
  Read { path: PathBuf, source: io::Error },

  #[error("failed to write {}: {source}", path.display())]
  Write { path: PathBuf, source: io::Error },

  #[error("failed to create directory {}: {source}", path.display())]
  CreateDir { path: PathBuf, source: io::Error },

  #[error("{path} is not valid UTF-8")]
  NotUtf8 { path: String },
}

/// Read access to a tree.
pub trait ReadTree {
  /// Read a file. Returns `Ok(None)` if it does not exist.
  fn read(&self, path: &str) -> Result<Option<Vec<u8>>, TreeError>;

  fn exists(&self, path: &str) -> Result<bool, TreeError> {
    Ok(self.read(path)?.is_some())
  }

  /// Read a file as UTF-8 text. Returns `Ok(None)` if it does not exist.
  fn read_text(&self, path: &str) -> Result<Option<String>, TreeError> {
    match self.read(path)? {
      Some(bytes) => String::from_utf8(bytes)
        .map(Some)
        .map_err(|_| TreeError::NotUtf8 { path: path.to_string() }),
      None => Ok(None),
    }
  }
}

/// Read/write access to a tree.
pub trait Tree: ReadTree {
  /// Create or overwrite a file, creating parent directories as needed.
  fn write(&mut self, path: &str, content: &[u8]) -> Result<(), TreeError>;
}
