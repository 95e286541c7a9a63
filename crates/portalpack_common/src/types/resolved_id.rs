use std::fmt::Display;

use arcstr::ArcStr;

/// A module as the plugin named it: an id that is only unique inside its namespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResolvedId {
  pub id: ArcStr,
  pub namespace: ArcStr,
}

impl ResolvedId {
  pub fn new(id: impl Into<ArcStr>, namespace: impl Into<ArcStr>) -> Self {
    Self { id: id.into(), namespace: namespace.into() }
  }

  /// `namespace:id`, unique across the whole build.
  pub fn stable_id(&self) -> String {
    self.to_string()
  }
}

impl Display for ResolvedId {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}:{}", self.namespace, self.id)
  }
}
