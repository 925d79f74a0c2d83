use std::collections::BTreeMap;

use super::{ReadTree, Tree, TreeError};
use crate::util::posix;

/// An in-memory tree, keyed by normalized tree path.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct MemoryTree {
  files: BTreeMap<String, Vec<u8>>,
}

impl MemoryTree {
  pub fn new() -> Self {
    Self::default()
  }

  /// Builder-style insert, convenient for fixtures.
  pub fn with_file(mut self, path: &str, content: impl AsRef<[u8]>) -> Self {
    self.insert(path, content);
    self
  }

  pub fn insert(&mut self, path: &str, content: impl AsRef<[u8]>) {
    self.files.insert(posix::normalize(path), content.as_ref().to_vec());
  }

  pub fn remove(&mut self, path: &str) -> Option<Vec<u8>> {
    self.files.remove(&posix::normalize(path))
  }

  pub fn paths(&self) -> impl Iterator<Item = &str> {
    self.files.keys().map(String::as_str)
  }

  pub fn len(&self) -> usize {
    self.files.len()
  }

  pub fn is_empty(&self) -> bool {
    self.files.is_empty()
  }
}

impl ReadTree for MemoryTree {
  fn read(&self, path: &str) -> Result<Option<Vec<u8>>, TreeError> {
    Ok(self.files.get(&posix::normalize(path)).cloned())
  }
}

impl Tree for MemoryTree {
  fn write(&mut self, path: &str, content: &[u8]) -> Result<(), TreeError> {
    self.insert(path, content);
    Ok(())
  }
}
