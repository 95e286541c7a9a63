use portalpack_common::{RecordSnapshot, ResolvedId, ScriptPrefix};

use crate::{LibraryRegistry, ModuleIdentities, Resolution, strategies};

/// Everything a single build resolves against.
#[derive(Debug, Clone, Copy)]
pub struct ResolveContext<'a> {
  pub snapshot: &'a RecordSnapshot,
  pub prefixes: &'a [ScriptPrefix],
  pub libraries: &'a LibraryRegistry,
  pub identities: &'a ModuleIdentities,
  pub registry_url: &'a str,
  pub type_declarations_marker: &'a str,
}

#[derive(Debug, Clone, Copy)]
pub struct ResolveRequest<'a> {
  pub specifier: &'a str,
  pub importer: Option<&'a ResolvedId>,
}

type Strategy = fn(&ResolveContext<'_>, &ResolveRequest<'_>) -> Option<Resolution>;

/// Tried in order, the first applicable one decides.
const STRATEGIES: [(&str, Strategy); 6] = [
  ("entry", strategies::entry),
  ("record-tag", strategies::record_tag),
  ("library", strategies::library),
  ("relative", strategies::relative),
  ("prefixed", strategies::prefixed),
  ("fallback-prefixed", strategies::fallback_prefixed),
];

pub fn resolve(ctx: &ResolveContext<'_>, request: &ResolveRequest<'_>) -> Resolution {
  let (rule, resolution) = STRATEGIES
    .iter()
    .find_map(|(rule, strategy)| strategy(ctx, request).map(|resolution| (*rule, resolution)))
    .unwrap_or_else(|| ("bare", strategies::bare(ctx, request)));

  tracing::trace!(
    specifier = request.specifier,
    importer = ?request.importer.map(ToString::to_string),
    rule,
    ?resolution,
    "resolved"
  );
  resolution
}
