use dashmap::DashMap;
use portalpack_common::{ModuleIdentity, ScriptPrefix};

/// Canonical ids handed out during one build.
///
/// A registered id always decodes to the identity it was made from. Re-parsing is only a fallback
/// for ids written by hand, since a record id may extend one marker into another or contain a `.`.
#[derive(Debug, Default)]
pub struct ModuleIdentities {
  by_id: DashMap<String, ModuleIdentity>,
}

impl ModuleIdentities {
  /// Returns the canonical id of `identity`. The first identity registered under an id keeps it.
  pub fn register(&self, identity: &ModuleIdentity) -> String {
    let id = identity.to_canonical_id();
    self.by_id.entry(id.clone()).or_insert_with(|| identity.clone());
    id
  }

  pub fn lookup(&self, id: &str, prefixes: &[ScriptPrefix]) -> Option<ModuleIdentity> {
    match self.by_id.get(id) {
      Some(identity) => Some(identity.clone()),
      None => ModuleIdentity::parse(id, prefixes),
    }
  }
}
