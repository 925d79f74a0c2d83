//! Ordered read strategies for library sources.

use tracing::trace;

use super::{ReadTree, TreeError};

/// An ordered list of read strategies tried in sequence.
///
/// The first strategy that has the file wins. A strategy that does not have
/// the file (`Ok(None)`) falls through to the next; a real I/O error stops
/// the lookup.
#[derive(Default)]
pub struct SourceChain {
  strategies: Vec<(String, Box<dyn ReadTree>)>,
}

impl SourceChain {
  pub fn new() -> Self {
    Self::default()
  }

  /// Append a strategy. `label` only appears in trace logs.
  pub fn push(mut self, label: impl Into<String>, tree: impl ReadTree + 'static) -> Self {
    self.strategies.push((label.into(), Box::new(tree)));
    self
  }

  pub fn labels(&self) -> impl Iterator<Item = &str> {
    self.strategies.iter().map(|(label, _)| label.as_str())
  }
}

impl std::fmt::Debug for SourceChain {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_list().entries(self.labels()).finish()
  }
}

impl ReadTree for SourceChain {
  fn read(&self, path: &str) -> Result<Option<Vec<u8>>, TreeError> {
    for (label, tree) in &self.strategies {
      if let Some(content) = tree.read(path)? {
        trace!(path, source = %label, "read library source");
        return Ok(Some(content));
      }
    }
    Ok(None)
  }
}
