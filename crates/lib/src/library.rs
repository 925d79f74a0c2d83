//! The component library being copied from.
//!
//! Bundles the manifest, the ordered source read strategies, and the
//! identity (package name, version) recorded with every generated file.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::consts::{DEFAULT_PACKAGE_NAME, LIBRARY_ENV, STAGED_FILES_DIR};
use crate::manifest::{Manifest, ManifestError};
use crate::tree::{DiskTree, SourceChain};
use crate::whitelist::{Whitelist, WhitelistError};

#[derive(Debug, Error)]
pub enum LibraryError {
  #[error(transparent)]
  Manifest(#[from] ManifestError),

  #[error(transparent)]
  Whitelist(#[from] WhitelistError),

  #[error("failed to read {}: {source}", path.display())]
  ReadPackage { path: PathBuf, source: io::Error },

  #[error("failed to parse {}: {source}", path.display())]
  ParsePackage { path: PathBuf, source: serde_json::Error },
}

#[derive(Debug, Default, Deserialize)]
struct PackageInfo {
  name: Option<String>,
  version: Option<String>,
}

#[derive(Debug)]
pub struct Library {
  pub manifest: Manifest,
  /// Where file contents are read from: staged snapshot first, then the library itself.
  pub sources: SourceChain,
  pub package_name: String,
  pub version: Option<String>,
  pub whitelist: Whitelist,
}

impl Library {
  /// Open the library installed at `dir`.
  pub fn open(dir: &Path) -> Result<Self, LibraryError> {
    let manifest = Manifest::load(dir)?;
    let package = read_package_info(dir)?;

    let sources = SourceChain::new()
      .push("staged", DiskTree::new(dir.join(STAGED_FILES_DIR)))
      .push("library", DiskTree::new(dir));

    debug!(dir = %dir.display(), "opened component library");
    Self::from_parts(manifest, sources, package.name, package.version)
  }

  /// Assemble a library from already loaded parts.
  ///
  /// The manifest's `packageName` wins over `package_name`; the manifest's
  /// `version` is used when `version` is absent.
  pub fn from_parts(
    manifest: Manifest,
    sources: SourceChain,
    package_name: Option<String>,
    version: Option<String>,
  ) -> Result<Self, LibraryError> {
    let whitelist = match &manifest.whitelist {
      Some(patterns) => Whitelist::new(patterns)?,
      None => Whitelist::default(),
    };
    let package_name = manifest
      .package_name
      .clone()
      .or(package_name)
      .unwrap_or_else(|| DEFAULT_PACKAGE_NAME.to_string());
    let version = version.or_else(|| manifest.version.clone());

    Ok(Self {
      manifest,
      sources,
      package_name,
      version,
      whitelist,
    })
  }
}

fn read_package_info(dir: &Path) -> Result<PackageInfo, LibraryError> {
  let path = dir.join("package.json");
  let content = match fs::read_to_string(&path) {
    Ok(content) => content,
    Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(PackageInfo::default()),
    Err(e) => return Err(LibraryError::ReadPackage { path, source: e }),
  };
  serde_json::from_str(&content).map_err(|e| LibraryError::ParsePackage { path, source: e })
}

/// Locate the library directory.
///
/// Priority order:
/// 1. Explicit path if provided
/// 2. `TAILKIT_LIBRARY` environment variable
/// 3. `<project>/node_modules/@practices/ui-tailwind`
pub fn resolve_library_dir(project: &Path, explicit: Option<&Path>) -> PathBuf {
  if let Some(path) = explicit {
    return path.to_path_buf();
  }
  if let Ok(path) = std::env::var(LIBRARY_ENV)
    && !path.is_empty()
  {
    return PathBuf::from(path);
  }
  let mut dir = project.join("node_modules");
  for segment in DEFAULT_PACKAGE_NAME.split('/') {
    dir.push(segment);
  }
  dir
}
