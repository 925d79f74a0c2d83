//! Regex-based import statement scanning.
//!
//! Recognizes `import <bindings> from '<spec>'` and side-effect
//! `import '<spec>'`. Re-exports and dynamic `import()` are not recognized.

use std::sync::LazyLock;

use regex::Regex;

use crate::util::posix;

static IMPORT_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r#"\bimport\s+(?:[\w$*{}\s,]+?\s+from\s+)?['"]([^'"\r\n]+)['"]"#).expect("import pattern is valid")
});

const SOURCE_EXTENSIONS: &[&str] = &[".ts", ".mts", ".js", ".mjs"];
const STYLE_EXTENSIONS: &[&str] = &[".css", ".scss"];

/// Whether imports inside `path` are scanned and rewritten.
pub fn is_source_file(path: &str) -> bool {
  posix::extension(path).is_some_and(|ext| SOURCE_EXTENSIONS.contains(&ext))
}

pub fn is_style_file(path: &str) -> bool {
  posix::extension(path).is_some_and(|ext| STYLE_EXTENSIONS.contains(&ext))
}

/// All import specifiers in `source`, in order of appearance.
pub fn scan_imports(source: &str) -> Vec<&str> {
  IMPORT_RE
    .captures_iter(source)
    .filter_map(|caps| caps.get(1))
    .map(|m| m.as_str())
    .collect()
}

/// Replace import specifiers in `source`.
///
/// `rewrite` receives each specifier; returning `None` leaves it untouched.
/// Only the specifier text changes, quotes and bindings are preserved.
pub fn rewrite_imports<F>(source: &str, mut rewrite: F) -> String
where
  F: FnMut(&str) -> Option<String>,
{
  let mut out = String::with_capacity(source.len());
  let mut last = 0;
  for caps in IMPORT_RE.captures_iter(source) {
    let Some(spec) = caps.get(1) else { continue };
    if let Some(replacement) = rewrite(spec.as_str()) {
      out.push_str(&source[last..spec.start()]);
      out.push_str(&replacement);
      last = spec.end();
    }
  }
  out.push_str(&source[last..]);
  out
}
