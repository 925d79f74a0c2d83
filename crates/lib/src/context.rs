//! Per-run resolution state: destination mapping and the planned set.

use std::collections::{BTreeMap, HashMap, VecDeque};

use crate::consts::{LIB_ROOT, SHARED_COMPONENT, SOURCE_PREFIX};
use crate::util::posix;

/// State shared by the discovery and rewrite passes of one run.
///
/// Created once per orchestrator invocation and dropped at the end of it.
#[derive(Debug, Clone)]
pub struct ResolutionContext {
  /// Source root inside the library, e.g. `/src/lib`.
  pub lib_root: String,
  /// Destination root inside the host project, e.g. `/src/app/ui`.
  pub dest_root: String,
  /// Package name internal imports use.
  pub package_name: String,
  /// Component names in scope after closure.
  pub selected: Vec<String>,
  mapping: HashMap<String, String>,
  planned: BTreeMap<String, String>,
  pending: VecDeque<String>,
}

impl ResolutionContext {
  pub fn new(dest_root: &str, package_name: &str, selected: Vec<String>) -> Self {
    Self {
      lib_root: LIB_ROOT.to_string(),
      dest_root: posix::normalize(dest_root),
      package_name: package_name.to_string(),
      selected,
      mapping: HashMap::new(),
      planned: BTreeMap::new(),
      pending: VecDeque::new(),
    }
  }

  /// Destination of `original`, computed once and memoized.
  ///
  /// Strips the library root (or failing that, the `src/` prefix) and joins
  /// the remainder onto the destination root. Always tree-absolute.
  pub fn map_to_destination(&mut self, original: &str) -> String {
    if let Some(mapped) = self.mapping.get(original) {
      return mapped.clone();
    }

    let normalized = posix::normalize(original);
    let rest = posix::strip_dir_prefix(&normalized, &self.lib_root)
      .or_else(|| posix::strip_dir_prefix(&normalized, SOURCE_PREFIX))
      .unwrap_or_else(|| normalized.trim_start_matches('/'));
    let mapped = posix::join(&self.dest_root, rest);

    self.mapping.insert(original.to_string(), mapped.clone());
    mapped
  }

  /// Number of memoized mappings.
  pub fn mapping_len(&self) -> usize {
    self.mapping.len()
  }

  /// Add `original` to the planned set, owned by `component`.
  ///
  /// Returns `false` if it was already planned; the first owner is kept.
  pub fn plan(&mut self, original: &str, component: &str) -> bool {
    if self.planned.contains_key(original) {
      return false;
    }
    self.planned.insert(original.to_string(), component.to_string());
    self.pending.push_back(original.to_string());
    true
  }

  /// Next planned file not yet handed out, in planning order.
  ///
  /// Drives the discovery worklist: files planned while scanning are queued
  /// behind the ones already waiting.
  pub fn next_pending(&mut self) -> Option<String> {
    self.pending.pop_front()
  }

  /// Plan a file discovered through imports rather than the manifest.
  pub fn plan_shared(&mut self, original: &str) -> bool {
    self.plan(original, SHARED_COMPONENT)
  }

  pub fn is_planned(&self, original: &str) -> bool {
    self.planned.contains_key(original)
  }

  /// Planned files with their owners, sorted by original path.
  pub fn planned(&self) -> impl Iterator<Item = (&str, &str)> {
    self.planned.iter().map(|(path, owner)| (path.as_str(), owner.as_str()))
  }

  pub fn planned_len(&self) -> usize {
    self.planned.len()
  }
}
