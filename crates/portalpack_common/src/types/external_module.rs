use arcstr::ArcStr;
use serde::{Deserialize, Serialize};

/// A bare import that was resolved to the remote module registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalModule {
  pub id: ArcStr,
  pub url: String,
  #[serde(rename = "typescriptDefinitionsURL")]
  pub typescript_definitions_url: Option<String>,
}

impl ExternalModule {
  pub fn new(id: impl Into<ArcStr>, url: impl Into<String>) -> Self {
    Self { id: id.into(), url: url.into(), typescript_definitions_url: None }
  }
}
