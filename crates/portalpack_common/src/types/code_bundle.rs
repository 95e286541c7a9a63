use std::collections::{BTreeMap, BTreeSet};

use arcstr::ArcStr;
use serde::Serialize;

use crate::{ExternalModule, LibraryModule};

/// Record id to the tags of that record the bundle was built from.
pub type ModulesReport = BTreeMap<ArcStr, BTreeSet<ArcStr>>;

/// The outcome of bundling one tag. Exactly one of `source` and `error` is set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeBundle {
  pub tag: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub source: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub error: Option<String>,
  pub warnings: Vec<String>,
  pub modules: ModulesReport,
  pub externals: BTreeMap<ArcStr, ExternalModule>,
  pub libraries: BTreeMap<ArcStr, LibraryModule>,
}

impl CodeBundle {
  pub fn succeeded(tag: impl Into<String>, source: String, warnings: Vec<String>) -> Self {
    Self {
      tag: tag.into(),
      source: Some(source),
      error: None,
      warnings,
      modules: BTreeMap::default(),
      externals: BTreeMap::default(),
      libraries: BTreeMap::default(),
    }
  }

  pub fn failed(tag: impl Into<String>, error: String) -> Self {
    Self { source: None, error: Some(error), ..Self::succeeded(tag, String::new(), Vec::new()) }
  }

  pub fn is_ok(&self) -> bool {
    self.source.is_some()
  }
}

#[test]
fn failed_bundle_serializes_without_source() {
  let bundle = CodeBundle::failed("main", "boom".to_string());
  let json = serde_json::to_value(&bundle).unwrap();
  assert_eq!(json["error"], "boom");
  assert!(json.get("source").is_none());
  assert!(!bundle.is_ok());
}
