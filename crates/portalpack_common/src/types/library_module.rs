use arcstr::ArcStr;
use serde::{Deserialize, Serialize};

use crate::ModuleType;

/// A host-injected module that replaces network resolution for exactly one import id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LibraryModule {
  pub id: ArcStr,
  pub source: ArcStr,
  pub language: ModuleType,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub typescript_definitions: Option<ArcStr>,
}

impl LibraryModule {
  pub fn new(id: impl Into<ArcStr>, source: impl Into<ArcStr>, language: ModuleType) -> Self {
    Self { id: id.into(), source: source.into(), language, typescript_definitions: None }
  }
}
