//! Read-only inspection of the host's build configuration (`angular.json`).

use serde_json::Value;
use tracing::debug;

use super::HostError;
use crate::consts::ANGULAR_JSON_PATH;
use crate::tree::ReadTree;
use crate::util::posix;

/// The first global stylesheet declared by any project's build target.
///
/// Projects are visited in declaration order. A `styles` entry is either a
/// path string or an object with an `input` path. Returns `Ok(None)` when the
/// host has no build configuration or declares no styles.
pub fn detect_global_styles_entry(host: &dyn ReadTree) -> Result<Option<String>, HostError> {
  let Some(doc) = read_workspace(host)? else {
    return Ok(None);
  };

  for options in build_options(&doc) {
    let Some(first) = options.get("styles").and_then(Value::as_array).and_then(|s| s.first()) else {
      continue;
    };
    let input = match first {
      Value::String(path) => Some(path.as_str()),
      Value::Object(obj) => obj.get("input").and_then(Value::as_str),
      _ => None,
    };
    if let Some(input) = input {
      let entry = posix::normalize(input);
      debug!(entry = %entry, "detected global styles entry");
      return Ok(Some(entry));
    }
  }

  Ok(None)
}

/// The application entry file (`browser`, or the older `main` option).
pub fn detect_main_entry(host: &dyn ReadTree) -> Result<Option<String>, HostError> {
  let Some(doc) = read_workspace(host)? else {
    return Ok(None);
  };

  Ok(
    build_options(&doc)
      .find_map(|options| {
        options
          .get("browser")
          .or_else(|| options.get("main"))
          .and_then(Value::as_str)
      })
      .map(posix::normalize),
  )
}

fn read_workspace(host: &dyn ReadTree) -> Result<Option<Value>, HostError> {
  let Some(content) = host.read_text(ANGULAR_JSON_PATH)? else {
    return Ok(None);
  };
  let doc = serde_json::from_str(&content).map_err(|e| HostError::Parse {
    path: ANGULAR_JSON_PATH.to_string(),
    source: e,
  })?;
  Ok(Some(doc))
}

/// `projects.*.architect.build.options` (or `targets`), in declaration order.
fn build_options(doc: &Value) -> impl Iterator<Item = &Value> {
  doc
    .get("projects")
    .and_then(Value::as_object)
    .into_iter()
    .flat_map(|projects| projects.values())
    .filter_map(|project| {
      project
        .get("architect")
        .or_else(|| project.get("targets"))
        .and_then(|targets| targets.get("build"))
        .and_then(|build| build.get("options"))
    })
}
