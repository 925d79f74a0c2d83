//! Rewriting of stylesheet `@reference` directives.
//!
//! Component styles reference the library's global stylesheet (for example
//! `@reference "../../styles.css";`). Once copied into the host they must point
//! at the host's own global stylesheet instead.

use std::sync::LazyLock;

use regex::Regex;

use crate::util::posix;

static REFERENCE_RE: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r#"@reference\s+['"]([^'"\r\n]+)['"]"#).expect("reference pattern is valid"));

/// Whether a referenced path names a global styles file.
fn is_styles_target(target: &str) -> bool {
  let name = posix::basename(target);
  name.ends_with("styles.css") || name.ends_with("styles.scss")
}

/// Point every `@reference` to a styles file at `global_entry`.
///
/// `file_dest` is the destination of the file being rewritten; the new
/// reference is relative to its directory. Other references are untouched.
pub fn rewrite_style_references(content: &str, file_dest: &str, global_entry: &str) -> String {
  let replacement = posix::relative_specifier(&posix::dirname(file_dest), global_entry);

  let mut out = String::with_capacity(content.len());
  let mut last = 0;
  for caps in REFERENCE_RE.captures_iter(content) {
    let Some(target) = caps.get(1) else { continue };
    if !is_styles_target(target.as_str()) {
      continue;
    }
    out.push_str(&content[last..target.start()]);
    out.push_str(&replacement);
    last = target.end();
  }
  out.push_str(&content[last..]);
  out
}
