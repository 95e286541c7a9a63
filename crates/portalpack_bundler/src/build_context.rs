use std::{
  collections::{BTreeMap, BTreeSet},
  sync::Arc,
};

use arcstr::ArcStr;
use dashmap::DashMap;
use portalpack_common::{
  ExternalModule, LibraryModule, ModulesReport, RecordSnapshot, ScriptPrefix,
};
use portalpack_http::RemoteModuleCache;
use portalpack_resolver::{LibraryRegistry, ModuleIdentities, ResolveContext};

use crate::NormalizedBundlerOptions;

/// What one build discovered about its inputs, filled concurrently by the module tasks.
#[derive(Debug, Default)]
pub struct BuildReport {
  modules: DashMap<ArcStr, BTreeSet<ArcStr>>,
  externals: DashMap<ArcStr, ExternalModule>,
  libraries: DashMap<ArcStr, LibraryModule>,
}

impl BuildReport {
  pub fn record_module(&self, record_id: ArcStr, tag: ArcStr) {
    self.modules.entry(record_id).or_default().insert(tag);
  }

  pub fn record_external(&self, specifier: ArcStr, url: &str) {
    self
      .externals
      .entry(specifier.clone())
      .or_insert_with(|| ExternalModule::new(specifier, url));
  }

  /// Only urls requested for a bare import carry type declarations, nested fetches don't.
  pub fn attach_type_declarations(&self, url: &str, definitions: &str) {
    for mut external in self.externals.iter_mut() {
      if external.url == url {
        external.typescript_definitions_url = Some(definitions.to_string());
      }
    }
  }

  pub fn record_library(&self, module: LibraryModule) {
    self.libraries.insert(module.id.clone(), module);
  }

  pub fn snapshot(
    &self,
  ) -> (ModulesReport, BTreeMap<ArcStr, ExternalModule>, BTreeMap<ArcStr, LibraryModule>) {
    let modules = self.modules.iter().map(|entry| (entry.key().clone(), entry.value().clone()));
    let externals = self.externals.iter().map(|entry| (entry.key().clone(), entry.value().clone()));
    let libraries = self.libraries.iter().map(|entry| (entry.key().clone(), entry.value().clone()));
    (modules.collect(), externals.collect(), libraries.collect())
  }
}

/// State owned by a single `bundle_tag` call plus the registries it shares with other builds.
pub struct BuildContext {
  pub snapshot: Arc<RecordSnapshot>,
  pub prefixes: Vec<ScriptPrefix>,
  pub entry_document: String,
  pub libraries: Arc<LibraryRegistry>,
  pub cache: Arc<RemoteModuleCache>,
  pub options: Arc<NormalizedBundlerOptions>,
  pub identities: ModuleIdentities,
  pub report: BuildReport,
}

impl BuildContext {
  pub fn resolve_context(&self) -> ResolveContext<'_> {
    ResolveContext {
      snapshot: &self.snapshot,
      prefixes: &self.prefixes,
      libraries: &self.libraries,
      identities: &self.identities,
      registry_url: &self.options.registry_url,
      type_declarations_marker: &self.options.type_declarations_marker,
    }
  }
}

#[test]
fn type_declarations_only_attach_to_tracked_externals() {
  let report = BuildReport::default();
  report.record_external(ArcStr::from("pkg"), "https://registry.test/pkg?dts");
  report.attach_type_declarations("https://registry.test/pkg?dts", "https://registry.test/pkg.d.ts");
  report.attach_type_declarations("https://registry.test/pkg/x", "https://registry.test/x.d.ts");

  let (_, externals, _) = report.snapshot();
  assert_eq!(
    externals["pkg"].typescript_definitions_url.as_deref(),
    Some("https://registry.test/pkg.d.ts")
  );
  assert_eq!(externals.len(), 1);
}
