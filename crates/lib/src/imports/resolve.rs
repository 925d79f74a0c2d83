//! Import resolution across the library-to-project relocation.

use tracing::trace;

use super::specifier::{DEFAULT_EXTENSION, parse_specifier};
use crate::context::ResolutionContext;
use crate::util::posix;
use crate::whitelist::Whitelist;

/// Decides which imported files join the planned set and how specifiers
/// read once both importer and target have moved.
///
/// Discovery and rewriting go through the same [`resolve_and_rewrite`] call,
/// so the two passes can never disagree about what is in scope.
///
/// [`resolve_and_rewrite`]: ImportResolver::resolve_and_rewrite
#[derive(Debug, Clone, Copy)]
pub struct ImportResolver<'a> {
  whitelist: &'a Whitelist,
}

impl<'a> ImportResolver<'a> {
  pub fn new(whitelist: &'a Whitelist) -> Self {
    Self { whitelist }
  }

  /// Resolve `specifier` found in `importer_original`.
  ///
  /// External specifiers yield `None`. A whitelisted target that is not yet
  /// planned is added to `ctx` as a shared file. Targets that are neither
  /// planned nor whitelisted are still mapped and rewritten, but nothing
  /// copies them.
  ///
  /// With `importer_new` set (rewrite pass) the returned value is the new
  /// specifier: relative to the importer's new directory, dotted, without the
  /// `.ts` extension. Without it (discovery pass) only the planned set is
  /// updated and `None` is returned.
  pub fn resolve_and_rewrite(
    &self,
    importer_original: &str,
    importer_new: Option<&str>,
    specifier: &str,
    ctx: &mut ResolutionContext,
  ) -> Option<String> {
    let target = parse_specifier(specifier, importer_original, &ctx.package_name, &ctx.lib_root);
    let target = target.path()?;

    if self.whitelist.is_whitelisted(target) && ctx.plan_shared(target) {
      trace!(importer = importer_original, target, "discovered shared file");
    }

    let target_new = ctx.map_to_destination(target);
    let importer_new = importer_new?;

    let rel = posix::relative_specifier(&posix::dirname(importer_new), &target_new);
    let rel = rel.strip_suffix(DEFAULT_EXTENSION).map(str::to_string).unwrap_or(rel);
    Some(rel)
  }
}
