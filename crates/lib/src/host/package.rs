//! Patching the host's `package.json` with external dependencies.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{info, warn};

use super::HostError;
use crate::consts::PACKAGE_JSON_PATH;
use crate::tree::Tree;

/// Sections in which an already declared dependency counts as present.
const DEPENDENCY_SECTIONS: &[&str] = &["dependencies", "devDependencies", "peerDependencies"];

/// Outcome of [`patch_dependencies`].
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DependencyPatch {
  /// Newly added to `dependencies`: name -> version.
  pub added: BTreeMap<String, String>,
  /// Already declared in one of the dependency sections.
  pub present: Vec<String>,
  /// Required but without a version in the manifest; skipped.
  pub unknown_version: Vec<String>,
}

/// Add every `required` package the host does not declare yet.
///
/// Versions come only from `versions`; a package without one is warned about
/// and skipped, never guessed. A host without `package.json` is warned about
/// and left alone. With `dry_run` the outcome is computed but nothing is written.
pub fn patch_dependencies(
  host: &mut dyn Tree,
  required: &BTreeSet<String>,
  versions: &BTreeMap<String, String>,
  dry_run: bool,
) -> Result<DependencyPatch, HostError> {
  let mut patch = DependencyPatch::default();
  if required.is_empty() {
    return Ok(patch);
  }

  let Some(content) = host.read_text(PACKAGE_JSON_PATH)? else {
    warn!(path = PACKAGE_JSON_PATH, "host has no package.json; skipping dependency patch");
    return Ok(patch);
  };
  let mut doc: Value = serde_json::from_str(&content).map_err(|e| HostError::Parse {
    path: PACKAGE_JSON_PATH.to_string(),
    source: e,
  })?;
  let Some(root) = doc.as_object_mut() else {
    return Err(HostError::InvalidPackageJson {
      reason: "top-level value is not an object".to_string(),
    });
  };

  for name in required {
    if is_declared(root, name) {
      patch.present.push(name.clone());
      continue;
    }
    match versions.get(name) {
      Some(version) => {
        patch.added.insert(name.clone(), version.clone());
      }
      None => {
        warn!(package = %name, "no known version for external dependency; skipping");
        patch.unknown_version.push(name.clone());
      }
    }
  }

  if patch.added.is_empty() || dry_run {
    return Ok(patch);
  }

  let deps = root
    .entry("dependencies")
    .or_insert_with(|| Value::Object(Map::new()));
  let Some(deps) = deps.as_object_mut() else {
    return Err(HostError::InvalidPackageJson {
      reason: "`dependencies` is not an object".to_string(),
    });
  };
  for (name, version) in &patch.added {
    info!(package = %name, version = %version, "adding dependency");
    deps.insert(name.clone(), Value::String(version.clone()));
  }

  let mut out = serde_json::to_string_pretty(&doc).map_err(HostError::Serialize)?;
  out.push('\n');
  host.write(PACKAGE_JSON_PATH, out.as_bytes())?;

  Ok(patch)
}

fn is_declared(root: &Map<String, Value>, name: &str) -> bool {
  DEPENDENCY_SECTIONS.iter().any(|section| {
    root
      .get(*section)
      .and_then(Value::as_object)
      .is_some_and(|deps| deps.contains_key(name))
  })
}
