use arcstr::ArcStr;
use dashmap::DashMap;
use portalpack_common::LibraryModule;

/// Host injected modules, shared by every build of one bundler.
#[derive(Debug, Default)]
pub struct LibraryRegistry {
  libraries: DashMap<ArcStr, LibraryModule>,
}

impl LibraryRegistry {
  pub fn new() -> Self {
    Self::default()
  }

  /// Inserts or replaces the library with the same id, returning the replaced one.
  pub fn add_library(&self, module: LibraryModule) -> Option<LibraryModule> {
    self.libraries.insert(module.id.clone(), module)
  }

  pub fn remove_library(&self, id: &str) -> Option<LibraryModule> {
    self.libraries.remove(id).map(|(_, module)| module)
  }

  pub fn get(&self, id: &str) -> Option<LibraryModule> {
    self.libraries.get(id).map(|module| module.clone())
  }

  pub fn contains(&self, id: &str) -> bool {
    self.libraries.contains_key(id)
  }

  pub fn len(&self) -> usize {
    self.libraries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.libraries.is_empty()
  }
}

#[test]
fn upserts_by_exact_id() {
  use portalpack_common::ModuleType;

  let registry = LibraryRegistry::new();
  assert!(registry.add_library(LibraryModule::new("lodash", "v1", ModuleType::Js)).is_none());
  let replaced = registry.add_library(LibraryModule::new("lodash", "v2", ModuleType::Js));
  assert_eq!(replaced.map(|module| module.source), Some(ArcStr::from("v1")));

  assert!(registry.contains("lodash"));
  assert!(!registry.contains("lodash/fp"));
  assert_eq!(registry.get("lodash").map(|module| module.source), Some(ArcStr::from("v2")));

  assert!(registry.remove_library("lodash").is_some());
  assert!(registry.is_empty());
}
