use arcstr::ArcStr;

use crate::ScriptPrefix;

/// Terminal marker that tells canonical record-tag ids apart from ordinary specifiers.
pub const TAG_MODULE_SUFFIX: &str = "?portal-tag";

/// The `(prefix, record, tag)` triple behind a record-backed module.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ModuleIdentity {
  pub prefix: ScriptPrefix,
  pub record_id: ArcStr,
  pub tag: ArcStr,
}

impl ModuleIdentity {
  pub fn new(prefix: ScriptPrefix, record_id: impl Into<ArcStr>, tag: impl Into<ArcStr>) -> Self {
    Self { prefix, record_id: record_id.into(), tag: tag.into() }
  }

  /// `${prefix}${recordId}.${tag}` followed by [`TAG_MODULE_SUFFIX`].
  pub fn to_canonical_id(&self) -> String {
    [self.prefix.prefix.as_str(), &self.record_id, ".", &self.tag, TAG_MODULE_SUFFIX].concat()
  }

  pub fn is_canonical_id(specifier: &str) -> bool {
    specifier.ends_with(TAG_MODULE_SUFFIX)
  }

  /// Decodes a canonical id. The first configured prefix the id starts with is used, then the rest
  /// is split on its first `.`. An empty prefix is only used when no marker matches.
  pub fn parse(id: &str, prefixes: &[ScriptPrefix]) -> Option<Self> {
    let body = id.strip_suffix(TAG_MODULE_SUFFIX)?;
    let prefix = prefixes
      .iter()
      .find(|prefix| prefix.selects(body))
      .or_else(|| prefixes.iter().find(|prefix| prefix.prefix.is_empty()))?;
    let (record_id, tag) = prefix.trim(body).split_once('.')?;
    if record_id.is_empty() || tag.is_empty() {
      return None;
    }
    Some(Self::new(prefix.clone(), record_id, tag))
  }

  /// The module text for a tag value: fallback prefixes load verbatim, the rest are stripped.
  pub fn module_source<'a>(&self, value: &'a str) -> &'a str {
    if self.prefix.is_fallback { value } else { self.prefix.trim(value) }
  }
}
