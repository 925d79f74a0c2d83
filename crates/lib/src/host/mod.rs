//! Host project collaborators: build configuration and dependency manifest.

mod package;
mod workspace;

use thiserror::Error;

use crate::tree::TreeError;

pub use package::{DependencyPatch, patch_dependencies};
pub use workspace::{detect_global_styles_entry, detect_main_entry};

#[derive(Debug, Error)]
pub enum HostError {
  #[error(transparent)]
  Tree(#[from] TreeError),

  #[error("failed to parse {path}: {source}")]
  Parse { path: String, source: serde_json::Error },

  #[error("invalid package.json: {reason}")]
  InvalidPackageJson { reason: String },

  #[error("failed to serialize package.json: {0}")]
  Serialize(#[source] serde_json::Error),
}
