//! Registration of the library's provider in the host application.
//!
//! Locates the `bootstrapApplication(...)` call in the host's entry file and
//! makes sure its application config lists `provideTailkit()`, importing the
//! factory from the generated provider module. The mutation is textual; only
//! the resulting source matters: the call appears exactly once and so does
//! its import, no matter how many times this runs.
//!
//! Supported config shapes:
//! - no config argument: `bootstrapApplication(App)`
//! - inline object: `bootstrapApplication(App, { providers: [...] })`
//! - identifier bound by `const` in the entry file or imported by name from
//!   a relative module: `bootstrapApplication(App, appConfig)`

mod scanner;

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::consts::{BOOTSTRAP_CALL, DEFAULT_DEST, DEFAULT_ENTRY_PATH, PROVIDER_FACTORY, PROVIDER_MODULE};
use crate::hashdb::{HashDbError, HashDbStore};
use crate::host::{HostError, detect_main_entry};
use crate::imports::{DEFAULT_EXTENSION, ImportTarget, parse_specifier};
use crate::tree::{Tree, TreeError};
use crate::util::posix;

pub use scanner::Scanner;

static IMPORT_STATEMENT_RE: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r#"(?m)^import\s[^;]*?['"][^'"\r\n]+['"]\s*;?"#).expect("import statement pattern is valid"));

static NAMED_IMPORT_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r#"import\s*(?:type\s+)?\{([^}]*)\}\s*from\s*['"]([^'"\r\n]+)['"]"#).expect("named import pattern is valid")
});

#[derive(Debug, Error)]
pub enum BootstrapError {
  #[error(transparent)]
  Tree(#[from] TreeError),

  #[error(transparent)]
  Host(#[from] HostError),

  #[error(transparent)]
  HashDb(#[from] HashDbError),

  #[error("entry file {path} not found")]
  EntryNotFound { path: String },

  #[error("no {BOOTSTRAP_CALL}(...) call found in {path}")]
  CallNotFound { path: String },

  #[error("cannot register provider in {path}: {reason}")]
  Unsupported { path: String, reason: String },
}

#[derive(Debug, Clone, Default)]
pub struct BootstrapOptions {
  /// Entry file; detected from `angular.json`, then `/src/main.ts`.
  pub entry: Option<String>,
  /// Provider module; defaults to `core/provider.ts` under the destination root.
  pub provider_module: Option<String>,
  pub dry_run: bool,
}

/// What [`register_provider`] changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BootstrapOutcome {
  pub entry: String,
  /// File holding the application config that was (or would be) edited.
  pub config_file: String,
  pub provider_module: String,
  pub provider_inserted: bool,
  pub import_inserted: bool,
}

impl BootstrapOutcome {
  pub fn changed(&self) -> bool {
    self.provider_inserted || self.import_inserted
  }
}

/// A pending edit: replace `range` of the text with `text`.
struct Edit {
  at: usize,
  remove: usize,
  text: String,
}

fn apply(source: &str, edit: Edit) -> String {
  let mut out = String::with_capacity(source.len() + edit.text.len());
  out.push_str(&source[..edit.at]);
  out.push_str(&edit.text);
  out.push_str(&source[edit.at + edit.remove..]);
  out
}

fn provider_call() -> String {
  format!("{PROVIDER_FACTORY}()")
}

/// Ensure the host application registers the library provider.
///
/// # Errors
///
/// Fails when the entry file or the bootstrap call cannot be found, or the
/// config argument has a shape that cannot be edited textually.
pub fn register_provider(host: &mut dyn Tree, options: &BootstrapOptions) -> Result<BootstrapOutcome, BootstrapError> {
  let entry = match &options.entry {
    Some(entry) => posix::normalize(entry),
    None => detect_main_entry(host)?.unwrap_or_else(|| DEFAULT_ENTRY_PATH.to_string()),
  };
  let provider_module = match &options.provider_module {
    Some(module) => posix::normalize(module),
    None => {
      let db = HashDbStore::default().read(host)?;
      let dest = db.dest.unwrap_or_else(|| DEFAULT_DEST.to_string());
      posix::join(&dest, PROVIDER_MODULE)
    }
  };

  let source = host
    .read_text(&entry)?
    .ok_or_else(|| BootstrapError::EntryNotFound { path: entry.clone() })?;

  let (config_file, config_source, provider_inserted) = match locate_config(host, &entry, &source)? {
    ConfigSite::NoConfig { after_first_arg } => {
      let edit = Edit {
        at: after_first_arg,
        remove: 0,
        text: format!(", {{ providers: [{}] }}", provider_call()),
      };
      (entry.clone(), apply(&source, edit), true)
    }
    ConfigSite::Object { file, source, open } => match insert_into_object(&file, &source, open)? {
      Some(updated) => (file, updated, true),
      None => (file, source, false),
    },
  };

  let (config_source, import_inserted) = ensure_import(&config_file, config_source, &provider_module);

  let outcome = BootstrapOutcome {
    entry,
    config_file,
    provider_module,
    provider_inserted,
    import_inserted,
  };

  if outcome.changed() && !options.dry_run {
    host.write(&outcome.config_file, config_source.as_bytes())?;
  }
  if outcome.changed() {
    info!(file = %outcome.config_file, provider = outcome.provider_inserted, import = outcome.import_inserted, "registered provider");
  } else {
    debug!(file = %outcome.config_file, "provider already registered");
  }
  Ok(outcome)
}

enum ConfigSite {
  /// The call has only the component argument.
  NoConfig { after_first_arg: usize },
  /// An object literal, possibly in another file.
  Object { file: String, source: String, open: usize },
}

fn unsupported(path: &str, reason: impl Into<String>) -> BootstrapError {
  BootstrapError::Unsupported {
    path: path.to_string(),
    reason: reason.into(),
  }
}

fn locate_config(host: &dyn Tree, entry: &str, source: &str) -> Result<ConfigSite, BootstrapError> {
  let scanner = Scanner::new(source);
  let open = scanner
    .find_call(BOOTSTRAP_CALL)
    .ok_or_else(|| BootstrapError::CallNotFound { path: entry.to_string() })?;
  let close = scanner
    .matching(open)
    .ok_or_else(|| unsupported(entry, "unbalanced brackets"))?;

  let args = scanner.top_level_items(open, close);
  match args.as_slice() {
    [] => Err(unsupported(entry, "bootstrap call has no arguments")),
    [(_, end)] => {
      if !scanner.find_identifier(PROVIDER_FACTORY, open, close).is_empty() {
        return Err(unsupported(entry, "provider referenced outside a config object"));
      }
      Ok(ConfigSite::NoConfig { after_first_arg: *end })
    }
    [_, (start, end), ..] => {
      let arg = &source[*start..*end];
      if arg.starts_with('{') {
        return Ok(ConfigSite::Object {
          file: entry.to_string(),
          source: source.to_string(),
          open: *start,
        });
      }
      if is_identifier(arg) {
        return resolve_identifier(host, entry, source, arg);
      }
      Err(unsupported(entry, format!("config argument `{arg}` is not an object or identifier")))
    }
  }
}

fn is_identifier(text: &str) -> bool {
  let mut chars = text.chars();
  chars
    .next()
    .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '$')
    && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

/// Offset of the `{` initializing `const <name>` in `source`.
fn find_const_object(source: &str, name: &str) -> Option<usize> {
  let scanner = Scanner::new(source);
  scanner.find_identifier(name, 0, source.len()).into_iter().find_map(|start| {
    let before = source[..start].trim_end();
    if !before.ends_with("const") {
      return None;
    }
    let eq = source[start..].find('=')? + start;
    let open = scanner.skip_whitespace(eq + 1)?;
    (source.as_bytes()[open] == b'{').then_some(open)
  })
}

fn resolve_identifier(host: &dyn Tree, entry: &str, source: &str, name: &str) -> Result<ConfigSite, BootstrapError> {
  if let Some(open) = find_const_object(source, name) {
    return Ok(ConfigSite::Object {
      file: entry.to_string(),
      source: source.to_string(),
      open,
    });
  }

  for caps in NAMED_IMPORT_RE.captures_iter(source) {
    let (Some(names), Some(spec)) = (caps.get(1), caps.get(2)) else {
      continue;
    };
    let exported = names.as_str().split(',').find_map(|binding| {
      let mut parts = binding.split_whitespace();
      match (parts.next(), parts.next(), parts.next()) {
        (Some(local), None, None) if local == name => Some(local.to_string()),
        (Some(original), Some("as"), Some(local)) if local == name => Some(original.to_string()),
        _ => None,
      }
    });
    let Some(exported) = exported else { continue };

    let ImportTarget::Relative(file) = parse_specifier(spec.as_str(), entry, "", "") else {
      return Err(unsupported(entry, format!("`{name}` is imported from a package")));
    };
    let imported = host
      .read_text(&file)?
      .ok_or_else(|| unsupported(entry, format!("{file} imported for `{name}` does not exist")))?;
    let open = find_const_object(&imported, &exported)
      .ok_or_else(|| unsupported(&file, format!("no `const {exported} = {{...}}` found")))?;
    return Ok(ConfigSite::Object {
      file,
      source: imported,
      open,
    });
  }

  Err(unsupported(entry, format!("cannot find the definition of `{name}`")))
}

/// Add the provider call to the `providers` array of the object at `open`.
///
/// Returns `None` when the object already mentions the provider.
fn insert_into_object(file: &str, source: &str, open: usize) -> Result<Option<String>, BootstrapError> {
  let scanner = Scanner::new(source);
  let close = scanner
    .matching(open)
    .ok_or_else(|| unsupported(file, "unbalanced brackets in config object"))?;
  if !scanner.find_identifier(PROVIDER_FACTORY, open, close).is_empty() {
    return Ok(None);
  }

  let edit = match scanner.find_property(open, "providers") {
    Some(value) if source.as_bytes()[value] == b'[' => {
      let array_close = scanner
        .matching(value)
        .ok_or_else(|| unsupported(file, "unbalanced providers array"))?;
      let last = scanner.last_non_whitespace(array_close).unwrap_or(value);
      let text = if last == value {
        provider_call()
      } else if source.as_bytes()[last] == b',' {
        format!(" {}", provider_call())
      } else {
        format!(", {}", provider_call())
      };
      Edit {
        at: last + 1,
        remove: 0,
        text,
      }
    }
    Some(_) => return Err(unsupported(file, "`providers` is not an array literal")),
    None => {
      let inner = &source[open + 1..close];
      if inner.trim().is_empty() {
        Edit {
          at: open + 1,
          remove: inner.len(),
          text: format!(" providers: [{}] ", provider_call()),
        }
      } else if let Some(indent) = first_line_indent(inner) {
        Edit {
          at: open + 1,
          remove: 0,
          text: format!("\n{indent}providers: [{}],", provider_call()),
        }
      } else {
        Edit {
          at: open + 1,
          remove: 0,
          text: format!(" providers: [{}],", provider_call()),
        }
      }
    }
  };

  Ok(Some(apply(source, edit)))
}

/// Indentation of the first non-blank line of a multi-line object body.
fn first_line_indent(inner: &str) -> Option<&str> {
  let (first, rest) = inner.split_once('\n')?;
  if !first.trim().is_empty() {
    return None;
  }
  let line = rest.lines().find(|line| !line.trim().is_empty())?;
  Some(&line[..line.len() - line.trim_start().len()])
}

/// Add `import { provideTailkit } from '<module>'` unless already imported.
fn ensure_import(file: &str, source: String, provider_module: &str) -> (String, bool) {
  let already = NAMED_IMPORT_RE.captures_iter(&source).any(|caps| {
    caps
      .get(1)
      .is_some_and(|names| names.as_str().split(',').any(|b| b.split_whitespace().next_back() == Some(PROVIDER_FACTORY)))
  });
  if already {
    return (source, false);
  }

  let spec = posix::relative_specifier(&posix::dirname(file), provider_module);
  let spec = spec.strip_suffix(DEFAULT_EXTENSION).unwrap_or(&spec);
  let statement = format!("import {{ {PROVIDER_FACTORY} }} from '{spec}';\n");

  let scanner = Scanner::new(&source);
  let at = IMPORT_STATEMENT_RE
    .find_iter(&source)
    .filter(|m| scanner.is_code(m.start()))
    .last()
    .map(|m| {
      let end = m.end();
      source[end..].find('\n').map(|nl| end + nl + 1).unwrap_or(source.len())
    })
    .unwrap_or(0);

  let mut text = statement;
  if at == source.len() && !source.is_empty() && !source.ends_with('\n') {
    text.insert(0, '\n');
  }
  let updated = apply(&source, Edit { at, remove: 0, text });
  (updated, true)
}
