//! Classification of import specifiers.

use crate::util::posix;

/// Extensions kept as-is during resolution. Anything else gets [`DEFAULT_EXTENSION`].
pub const KNOWN_EXTENSIONS: &[&str] = &[".ts", ".mts", ".js", ".mjs", ".css", ".scss", ".html", ".json"];

/// Extension appended to extension-less specifiers, and stripped again when rewriting.
pub const DEFAULT_EXTENSION: &str = ".ts";

/// What an import specifier refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportTarget {
  /// `./x` or `../x`, resolved against the importer's directory.
  Relative(String),
  /// `<package>` or `<package>/x`, resolved against the library root.
  Internal(String),
  /// Anything else; not resolvable inside the library.
  External,
}

impl ImportTarget {
  /// The resolved library path, if any.
  pub fn path(&self) -> Option<&str> {
    match self {
      ImportTarget::Relative(path) | ImportTarget::Internal(path) => Some(path),
      ImportTarget::External => None,
    }
  }
}

/// Classify `specifier` as written inside the file at `importer`.
///
/// Pure: no file is consulted. `importer` and `lib_root` are tree paths in
/// the library.
pub fn parse_specifier(specifier: &str, importer: &str, package_name: &str, lib_root: &str) -> ImportTarget {
  if specifier.starts_with('.') {
    let resolved = posix::join(&posix::dirname(importer), specifier);
    return ImportTarget::Relative(with_extension(resolved));
  }

  let Some(rest) = specifier.strip_prefix(package_name) else {
    return ImportTarget::External;
  };
  let rest = match rest {
    "" => "",
    r if r.starts_with('/') => r.trim_start_matches('/'),
    // a different package that shares the prefix
    _ => return ImportTarget::External,
  };
  let rest = if rest.is_empty() { "index" } else { rest };
  ImportTarget::Internal(with_extension(posix::join(lib_root, rest)))
}

fn with_extension(path: String) -> String {
  match posix::extension(&path) {
    Some(ext) if KNOWN_EXTENSIONS.contains(&ext) => path,
    _ => format!("{}{}", path, DEFAULT_EXTENSION),
  }
}
