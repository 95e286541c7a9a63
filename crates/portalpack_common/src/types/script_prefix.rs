use arcstr::ArcStr;
use serde::{Deserialize, Serialize};

use crate::ModuleType;

/// A marker that declares a tag value as a script of `language` when the value starts with it.
///
/// Prefix lists are ordered: the first matching prefix wins, there is no longest-match rule.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScriptPrefix {
  pub prefix: ArcStr,
  pub language: ModuleType,
  /// Loads any non-empty tag value, marker or not, without stripping anything.
  #[serde(default)]
  pub is_fallback: bool,
  #[serde(default)]
  pub is_default: bool,
}

impl ScriptPrefix {
  pub fn new(prefix: impl Into<ArcStr>, language: ModuleType) -> Self {
    Self { prefix: prefix.into(), language, is_fallback: false, is_default: false }
  }

  pub fn fallback(prefix: impl Into<ArcStr>, language: ModuleType) -> Self {
    Self { is_fallback: true, ..Self::new(prefix, language) }
  }

  #[must_use]
  pub fn with_default(mut self, is_default: bool) -> Self {
    self.is_default = is_default;
    self
  }

  /// Literal starts-with check of the marker text.
  pub fn matches(&self, value: &str) -> bool {
    value.starts_with(self.prefix.as_str())
  }

  /// Whether the marker selects a name such as an entry tag or an import specifier.
  /// An empty marker never does, it can't tell one name apart from another.
  pub fn selects(&self, name: &str) -> bool {
    !self.prefix.is_empty() && self.matches(name)
  }

  /// Removes exactly the marker's length from the start of `value`.
  pub fn trim<'a>(&self, value: &'a str) -> &'a str {
    value.get(self.prefix.len()..).unwrap_or_default()
  }
}
