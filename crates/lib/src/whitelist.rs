//! Whitelist for files outside the explicit manifest.
//!
//! Import discovery only pulls a file into the planned set when it is
//! whitelisted: shared modules, global styles and similar support files.

use globset::{Glob, GlobBuilder, GlobMatcher};
use thiserror::Error;

use crate::consts::SOURCE_PREFIX;
use crate::util::posix;

/// Patterns applied when the manifest does not override them.
///
/// Evaluated relative to the library's `src/` directory.
pub const DEFAULT_PATTERNS: &[&str] = &["lib/**", "styles.css", "styles/**/*.css", "**/*.module.ts"];

#[derive(Debug, Error)]
#[error("invalid whitelist pattern {pattern:?}: {source}")]
pub struct WhitelistError {
  pattern: String,
  source: globset::Error,
}

#[derive(Debug, Clone)]
struct Pattern {
  matcher: GlobMatcher,
  /// Whether the pattern names a dot-segment itself and may therefore match dotfiles.
  allows_dotfiles: bool,
}

/// Ordered set of glob patterns.
///
/// `*` matches within one segment, `**` across any depth. Paths containing a
/// segment that starts with `.` only match patterns that spell out such a
/// segment themselves.
#[derive(Debug, Clone)]
pub struct Whitelist {
  patterns: Vec<Pattern>,
}

impl Default for Whitelist {
  fn default() -> Self {
    Self::new(DEFAULT_PATTERNS).expect("default whitelist patterns are valid")
  }
}

impl Whitelist {
  pub fn new<I, S>(patterns: I) -> Result<Self, WhitelistError>
  where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
  {
    let patterns = patterns
      .into_iter()
      .map(|p| compile(p.as_ref()))
      .collect::<Result<Vec<_>, _>>()?;
    Ok(Self { patterns })
  }

  /// Whether `path` may be auto-included.
  ///
  /// Paths outside the `src/` source prefix are always rejected. A leading
  /// `/` is accepted and ignored.
  pub fn is_whitelisted(&self, path: &str) -> bool {
    let absolute = posix::normalize(path);
    let Some(rest) = posix::strip_dir_prefix(&absolute, SOURCE_PREFIX) else {
      return false;
    };
    if rest.is_empty() {
      return false;
    }

    let has_dot_segment = rest.split('/').any(|s| s.starts_with('.'));
    self
      .patterns
      .iter()
      .filter(|p| !has_dot_segment || p.allows_dotfiles)
      .any(|p| p.matcher.is_match(rest))
  }
}

fn compile(pattern: &str) -> Result<Pattern, WhitelistError> {
  let glob: Glob = GlobBuilder::new(pattern)
    .literal_separator(true)
    .build()
    .map_err(|e| WhitelistError {
      pattern: pattern.to_string(),
      source: e,
    })?;
  Ok(Pattern {
    matcher: glob.compile_matcher(),
    allows_dotfiles: pattern.split('/').any(|s| s.starts_with('.')),
  })
}
