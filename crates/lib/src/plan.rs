//! The generation pipeline shared by `add` and `update`.
//!
//! Planning seeds the selected components' files, discovery grows the set by
//! scanning imports for whitelisted shared files, and rendering produces the
//! final content of every planned file at its destination. Nothing here
//! touches the host tree; the orchestrators decide what to write.

use std::collections::{BTreeSet, HashMap};

use serde::Serialize;
use tracing::{debug, warn};

use crate::context::ResolutionContext;
use crate::hashdb::{HashDb, RunSummary};
use crate::imports::{ImportResolver, is_source_file, is_style_file, rewrite_imports, scan_imports};
use crate::library::Library;
use crate::manifest::Manifest;
use crate::styles::rewrite_style_references;
use crate::tree::{ReadTree, TreeError};
use crate::util::posix;

/// Rendering switches for one run.
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderOptions<'a> {
  pub rewrite_imports: bool,
  /// Host global stylesheet; style references are rewritten when set.
  pub styles_entry: Option<&'a str>,
}

/// A planned file with its final content.
#[derive(Debug, Clone)]
pub struct RenderedFile {
  pub original: String,
  pub destination: String,
  pub component: String,
  pub content: Vec<u8>,
}

/// Result of planning, discovery and rendering.
#[derive(Debug, Default)]
pub struct Generation {
  pub files: Vec<RenderedFile>,
  /// Planned files no source in the library provided.
  pub missing: Vec<FileOutcome>,
}

/// What happened to one destination file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum FileStatus {
  Created,
  Updated,
  SkippedIdentical,
  SkippedConflict,
  SkippedNoRecord,
  MissingSource,
}

impl FileStatus {
  /// Whether the file is written to the host.
  pub fn is_write(self) -> bool {
    matches!(self, FileStatus::Created | FileStatus::Updated)
  }

  pub fn count(self, summary: &mut RunSummary) {
    let counter = match self {
      FileStatus::Created => &mut summary.created,
      FileStatus::Updated => &mut summary.updated,
      FileStatus::SkippedIdentical => &mut summary.skipped_identical,
      FileStatus::SkippedConflict => &mut summary.skipped_conflict,
      FileStatus::SkippedNoRecord => &mut summary.skipped_no_record,
      FileStatus::MissingSource => &mut summary.missing_source,
    };
    *counter += 1;
  }
}

impl std::fmt::Display for FileStatus {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    let label = match self {
      FileStatus::Created => "created",
      FileStatus::Updated => "updated",
      FileStatus::SkippedIdentical => "identical",
      FileStatus::SkippedConflict => "conflict",
      FileStatus::SkippedNoRecord => "no record",
      FileStatus::MissingSource => "missing source",
    };
    f.write_str(label)
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileOutcome {
  /// Destination tree path.
  pub path: String,
  /// Library tree path it was generated from.
  pub source: String,
  pub component: String,
  pub status: FileStatus,
}

/// Plan, discover and render every file of `selected` under `dest_root`.
pub fn generate(
  library: &Library,
  selected: &[String],
  dest_root: &str,
  options: RenderOptions<'_>,
) -> Result<Generation, TreeError> {
  let mut ctx = ResolutionContext::new(dest_root, &library.package_name, selected.to_vec());
  let resolver = ImportResolver::new(&library.whitelist);

  for name in selected {
    let Some(component) = library.manifest.component(name) else {
      continue;
    };
    for path in component.tree_paths() {
      ctx.plan(&path, name);
    }
  }

  // Discovery: every planned source file is scanned once, including files
  // planned while scanning.
  let mut contents: HashMap<String, Option<Vec<u8>>> = HashMap::new();
  while let Some(path) = ctx.next_pending() {
    let content = library.sources.read(&path)?;
    if is_source_file(&path)
      && let Some(bytes) = &content
      && let Ok(text) = std::str::from_utf8(bytes)
    {
      for spec in scan_imports(text) {
        resolver.resolve_and_rewrite(&path, None, spec, &mut ctx);
      }
    }
    contents.insert(path, content);
  }
  debug!(planned = ctx.planned_len(), components = selected.len(), "discovery complete");

  let planned: Vec<(String, String)> = ctx
    .planned()
    .map(|(path, owner)| (path.to_string(), owner.to_string()))
    .collect();

  let mut generation = Generation::default();
  for (original, component) in planned {
    let destination = ctx.map_to_destination(&original);
    let Some(bytes) = contents.remove(&original).flatten() else {
      warn!(path = %original, component = %component, "source file not found in library");
      generation.missing.push(FileOutcome {
        path: destination,
        source: original,
        component,
        status: FileStatus::MissingSource,
      });
      continue;
    };

    let content = render(&resolver, &mut ctx, &original, &destination, bytes, options);
    generation.files.push(RenderedFile {
      original,
      destination,
      component,
      content,
    });
  }

  Ok(generation)
}

fn render(
  resolver: &ImportResolver<'_>,
  ctx: &mut ResolutionContext,
  original: &str,
  destination: &str,
  bytes: Vec<u8>,
  options: RenderOptions<'_>,
) -> Vec<u8> {
  let source = is_source_file(original);
  let imports = options.rewrite_imports && source;
  let styles = options.styles_entry.filter(|_| source || is_style_file(original));
  if !imports && styles.is_none() {
    return bytes;
  }

  let mut text = match String::from_utf8(bytes) {
    Ok(text) => text,
    Err(e) => return e.into_bytes(),
  };
  if imports {
    text = rewrite_imports(&text, |spec| resolver.resolve_and_rewrite(original, Some(destination), spec, ctx));
  }
  if let Some(entry) = styles {
    text = rewrite_style_references(&text, destination, entry);
  }
  text.into_bytes()
}

/// Union of the external packages the selected components need.
pub fn required_external_dependencies(manifest: &Manifest, selected: &[String]) -> BTreeSet<String> {
  selected
    .iter()
    .filter_map(|name| manifest.component(name))
    .flat_map(|component| component.external_dependencies.iter().cloned())
    .collect()
}

/// Record `chosen` as the destination root, warning when it replaces another.
///
/// Files generated under the previous root stay where they are.
pub fn settle_dest_root(db: &mut HashDb, chosen: &str) -> String {
  let chosen = posix::normalize(chosen);
  if let Some(previous) = &db.dest
    && *previous != chosen
  {
    warn!(previous = %previous, dest = %chosen, "destination root changed; files under the previous root are left in place");
  }
  db.dest = Some(chosen.clone());
  chosen
}
