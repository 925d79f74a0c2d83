//! POSIX path arithmetic for tree paths.
//!
//! Tree paths are always `/`-separated and absolute within their tree,
//! regardless of the host platform, so `std::path` is not used here.

/// Normalize a path: collapse `.`/`..`/empty segments and force a leading `/`.
///
/// `..` above the root is dropped.
pub fn normalize(path: &str) -> String {
  let mut segments: Vec<&str> = Vec::new();
  for segment in path.split('/') {
    match segment {
      "" | "." => {}
      ".." => {
        segments.pop();
      }
      other => segments.push(other),
    }
  }
  format!("/{}", segments.join("/"))
}

/// Join `rel` onto `base`. An absolute `rel` replaces `base`.
pub fn join(base: &str, rel: &str) -> String {
  if rel.starts_with('/') {
    normalize(rel)
  } else {
    normalize(&format!("{}/{}", base, rel))
  }
}

/// Parent directory of a normalized path. The parent of a root-level entry is `/`.
pub fn dirname(path: &str) -> String {
  let path = normalize(path);
  match path.rfind('/') {
    Some(0) | None => "/".to_string(),
    Some(idx) => path[..idx].to_string(),
  }
}

pub fn basename(path: &str) -> &str {
  path.rsplit('/').next().unwrap_or(path)
}

/// Extension of the final segment including the dot, e.g. `.ts`.
///
/// Dotfiles such as `.gitignore` have no extension.
pub fn extension(path: &str) -> Option<&str> {
  let name = basename(path);
  match name.rfind('.') {
    Some(0) | None => None,
    Some(idx) => Some(&name[idx..]),
  }
}

/// Remainder of `path` below the directory `prefix`, without a leading `/`.
pub fn strip_dir_prefix<'a>(path: &'a str, prefix: &str) -> Option<&'a str> {
  let prefix = prefix.trim_end_matches('/');
  let rest = path.strip_prefix(prefix)?;
  if rest.is_empty() {
    Some("")
  } else {
    rest.strip_prefix('/')
  }
}

/// Relative path from directory `from_dir` to `to`.
///
/// Returns `.` when both are the same location.
pub fn relative(from_dir: &str, to: &str) -> String {
  let from = normalize(from_dir);
  let to = normalize(to);
  let from_segments: Vec<&str> = from.split('/').filter(|s| !s.is_empty()).collect();
  let to_segments: Vec<&str> = to.split('/').filter(|s| !s.is_empty()).collect();

  let common = from_segments
    .iter()
    .zip(to_segments.iter())
    .take_while(|(a, b)| a == b)
    .count();

  let mut parts: Vec<&str> = Vec::new();
  parts.extend(std::iter::repeat_n("..", from_segments.len() - common));
  parts.extend(&to_segments[common..]);

  if parts.is_empty() {
    ".".to_string()
  } else {
    parts.join("/")
  }
}

/// Relative path usable as an ES module specifier: always starts with `./` or `../`.
pub fn relative_specifier(from_dir: &str, to: &str) -> String {
  let rel = relative(from_dir, to);
  if rel.starts_with("./") || rel.starts_with("../") {
    rel
  } else if rel == "." {
    "./".to_string()
  } else {
    format!("./{}", rel)
  }
}
