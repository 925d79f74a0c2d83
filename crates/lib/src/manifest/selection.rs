//! Selection of components and their dependency closure.

use std::collections::BTreeSet;

use petgraph::graphmap::DiGraphMap;
use petgraph::visit::Dfs;
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::Manifest;

/// Which components a run operates on.
///
/// Precedence: `all`, then `groups`, then `names`.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
  #[serde(default)]
  pub all: bool,
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub names: Vec<String>,
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub groups: Vec<String>,
}

impl Selection {
  pub fn all() -> Self {
    Self {
      all: true,
      ..Default::default()
    }
  }

  pub fn names<I, S>(names: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    Self {
      names: names.into_iter().map(Into::into).collect(),
      ..Default::default()
    }
  }

  pub fn groups<I, S>(groups: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    Self {
      groups: groups.into_iter().map(Into::into).collect(),
      ..Default::default()
    }
  }

  pub fn is_empty(&self) -> bool {
    !self.all && self.names.is_empty() && self.groups.is_empty()
  }
}

/// Resolve a selection into the sorted transitive closure of component names.
///
/// Dependencies are followed depth-first; cycles terminate because every
/// component is visited once. Names that are not components of the manifest,
/// whether requested directly or listed as a dependency, are skipped with a
/// warning and never appear in the result.
pub fn resolve_selection(manifest: &Manifest, selection: &Selection) -> Vec<String> {
  let base: Vec<&str> = if selection.all {
    manifest.components.keys().map(String::as_str).collect()
  } else if !selection.groups.is_empty() {
    let mut names = Vec::new();
    for group in &selection.groups {
      match manifest.groups.get(group) {
        Some(members) => names.extend(members.iter().map(String::as_str)),
        None => warn!(group = %group, "unknown component group"),
      }
    }
    names
  } else {
    selection.names.iter().map(String::as_str).collect()
  };

  let graph = dependency_graph(manifest);

  let mut closure = BTreeSet::new();
  for name in base {
    if !graph.contains_node(name) {
      warn!(component = %name, "unknown component");
      continue;
    }
    if closure.contains(name) {
      continue;
    }
    let mut dfs = Dfs::new(&graph, name);
    while let Some(node) = dfs.next(&graph) {
      closure.insert(node.to_string());
    }
  }

  closure.into_iter().collect()
}

/// Build the component dependency graph. Edges point from a component to its deps.
fn dependency_graph(manifest: &Manifest) -> DiGraphMap<&str, ()> {
  let mut graph = DiGraphMap::new();
  for name in manifest.components.keys() {
    graph.add_node(name.as_str());
  }
  for (name, def) in &manifest.components {
    for dep in &def.deps {
      if manifest.components.contains_key(dep) {
        graph.add_edge(name.as_str(), dep.as_str(), ());
      } else {
        warn!(component = %name, dependency = %dep, "ignoring unknown dependency");
      }
    }
  }
  graph
}
