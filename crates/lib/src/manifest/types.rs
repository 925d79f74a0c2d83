//! Manifest types.
//!
//! The manifest is the static catalog shipped with the library. It maps every
//! component to the files that make it up, the components it depends on and
//! the external packages it needs at runtime.
//!
//! # Example
//!
//! ```json
//! {
//!   "version": "2.1.0",
//!   "components": {
//!     "button": { "files": ["src/lib/button/button.ts"], "deps": ["ripple"] },
//!     "ripple": { "files": ["src/lib/ripple/ripple.ts"], "externalDependencies": ["@floating-ui/dom"] }
//!   },
//!   "groups": { "actions": ["button"] },
//!   "externalDependencyVersions": { "@floating-ui/dom": "^1.6.0" }
//! }
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::consts::MANIFEST_CANDIDATES;
use crate::util::posix;

/// The component catalog.
///
/// Missing sections default to empty so older manifests keep loading.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
  /// Manifest version, recorded in the hash database.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub version: Option<String>,

  /// Package name internal imports use to refer back into the library.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub package_name: Option<String>,

  #[serde(default)]
  pub components: BTreeMap<String, ComponentDef>,

  /// Logical groups for bulk selection: group name -> component names.
  #[serde(default)]
  pub groups: BTreeMap<String, Vec<String>>,

  /// Versions used when patching the host's `package.json`.
  #[serde(default)]
  pub external_dependency_versions: BTreeMap<String, String>,

  /// Overrides the default whitelist patterns.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub whitelist: Option<Vec<String>>,
}

/// A single component entry.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentDef {
  /// Files relative to the library directory, e.g. `src/lib/button/button.ts`.
  #[serde(default)]
  pub files: Vec<String>,

  /// Names of components this one depends on.
  #[serde(default)]
  pub deps: Vec<String>,

  /// External packages needed at runtime.
  #[serde(default)]
  pub external_dependencies: Vec<String>,
}

impl ComponentDef {
  /// Component files as normalized tree paths.
  pub fn tree_paths(&self) -> impl Iterator<Item = String> + '_ {
    self.files.iter().map(|f| posix::normalize(f))
  }
}

/// Errors that can occur when loading a manifest.
#[derive(Debug, Error)]
pub enum ManifestError {
  #[error("manifest not found (tried {tried})")]
  NotFound { tried: String },

  #[error("failed to read manifest {}: {source}", path.display())]
  Read { path: PathBuf, source: io::Error },

  #[error("failed to parse manifest {}: {source}", path.display())]
  Parse { path: PathBuf, source: serde_json::Error },
}

impl Manifest {
  /// Load the manifest shipped with the library at `library_dir`.
  ///
  /// Tries each location in [`MANIFEST_CANDIDATES`] in order.
  pub fn load(library_dir: &Path) -> Result<Self, ManifestError> {
    let candidates: Vec<PathBuf> = MANIFEST_CANDIDATES.iter().map(|c| library_dir.join(c)).collect();
    Self::load_first(&candidates)
  }

  /// Load the first manifest that exists among `candidates`.
  pub fn load_first(candidates: &[PathBuf]) -> Result<Self, ManifestError> {
    for path in candidates {
      match fs::read_to_string(path) {
        Ok(content) => {
          debug!(path = %path.display(), "loading manifest");
          return Self::parse(&content).map_err(|e| ManifestError::Parse {
            path: path.clone(),
            source: e,
          });
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => continue,
        Err(e) => {
          return Err(ManifestError::Read {
            path: path.clone(),
            source: e,
          });
        }
      }
    }

    Err(ManifestError::NotFound {
      tried: candidates
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", "),
    })
  }

  pub fn parse(content: &str) -> Result<Self, serde_json::Error> {
    serde_json::from_str(content)
  }

  pub fn component(&self, name: &str) -> Option<&ComponentDef> {
    self.components.get(name)
  }
}
