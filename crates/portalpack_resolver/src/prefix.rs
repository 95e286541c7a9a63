use portalpack_common::ScriptPrefix;

/// Which records a build starts from: the tag to read and the prefixes that may mark it.
#[derive(Debug, Clone)]
pub struct EntryTarget<'a> {
  /// The entry tag with the selecting marker removed.
  pub tag: &'a str,
  /// Set when the entry tag itself starts with a marker.
  pub selected: Option<&'a ScriptPrefix>,
  pub candidates: Vec<&'a ScriptPrefix>,
}

impl<'a> EntryTarget<'a> {
  /// The prefix `value` is an entry module under, if any.
  ///
  /// A fallback prefix counts only when the entry tag selected it, and then takes any non-empty
  /// value. Otherwise the first non-fallback candidate the value starts with wins.
  pub fn entry_prefix(&self, value: &str) -> Option<&'a ScriptPrefix> {
    if let Some(prefix) = self.selected.filter(|prefix| prefix.is_fallback) {
      return (!value.is_empty()).then_some(prefix);
    }
    self.candidates.iter().copied().find(|prefix| !prefix.is_fallback && prefix.matches(value))
  }
}

/// `"📖main"` selects the `📖` prefix and the tag `main`; an unmarked tag keeps every prefix as a
/// candidate.
pub fn resolve_entry_prefix<'a>(tag: &'a str, prefixes: &'a [ScriptPrefix]) -> EntryTarget<'a> {
  match prefixes.iter().find(|prefix| prefix.selects(tag)) {
    Some(prefix) => {
      EntryTarget { tag: prefix.trim(tag), selected: Some(prefix), candidates: vec![prefix] }
    }
    None => EntryTarget { tag, selected: None, candidates: prefixes.iter().collect() },
  }
}

/// The marker hosts should use for new scripts.
pub fn default_prefix(prefixes: &[ScriptPrefix]) -> Option<&ScriptPrefix> {
  prefixes
    .iter()
    .find(|prefix| prefix.is_default)
    .or_else(|| prefixes.iter().find(|prefix| !prefix.is_fallback))
}
