use std::{sync::Arc, time::Instant};

use portalpack::{Engine, EngineOptions, InputItem};
use portalpack_common::{CodeBundle, LibraryModule, RecordSnapshot, ScriptPrefix};
use portalpack_http::{RemoteModuleCache, SharedHttpClient};
use portalpack_resolver::{
  LibraryRegistry, ModuleIdentities, namespace::ENTRY_PATH, resolve_entry_prefix,
};

use crate::{
  BuildState, BundlerOptions, NormalizedBundlerOptions,
  build_context::{BuildContext, BuildReport},
  entry::{collect_entries, entry_document},
  options::normalize_options,
  portal_plugin::PortalPlugin,
};

/// Bundles record tags into portal bundles.
///
/// One long-lived instance owns the library registry and the remote module cache; every
/// `bundle_tag` call shares them and keeps everything else to itself, so builds may run
/// concurrently through `&self`.
pub struct Bundler {
  options: Arc<NormalizedBundlerOptions>,
  libraries: Arc<LibraryRegistry>,
  cache: Arc<RemoteModuleCache>,
}

impl Bundler {
  #[cfg(feature = "client")]
  pub fn new(options: BundlerOptions) -> Self {
    Self::with_http_client(options, Arc::new(portalpack_http::ReqwestClient::new()))
  }

  pub fn with_http_client(options: BundlerOptions, http: SharedHttpClient) -> Self {
    Self {
      options: Arc::new(normalize_options(options)),
      libraries: Arc::new(LibraryRegistry::new()),
      cache: Arc::new(RemoteModuleCache::new(http)),
    }
  }

  pub fn options(&self) -> &NormalizedBundlerOptions {
    &self.options
  }

  /// Registers `module` for imports of exactly its id, replacing a library with the same id.
  pub fn add_library(&self, module: LibraryModule) {
    tracing::debug!(id = %module.id, language = %module.language, "library added");
    self.libraries.add_library(module);
  }

  pub fn remove_library(&self, id: &str) -> Option<LibraryModule> {
    self.libraries.remove_library(id)
  }

  pub fn libraries(&self) -> &LibraryRegistry {
    &self.libraries
  }

  pub fn cache(&self) -> &RemoteModuleCache {
    &self.cache
  }

  /// Bundles every record whose `tag` holds a script.
  ///
  /// Returns `None` when no record matches. Any module failure yields a bundle with `error` set
  /// and no `source`, carrying whatever was discovered before the failure.
  pub async fn bundle_tag(
    &self,
    snapshot: Arc<RecordSnapshot>,
    tag: &str,
    prefixes: &[ScriptPrefix],
  ) -> Option<CodeBundle> {
    let start = Instant::now();
    let state = BuildState::Idle.advance(BuildState::Collecting, tag);

    let target = resolve_entry_prefix(tag, prefixes);
    let entries = collect_entries(&snapshot, &target);
    if entries.is_empty() {
      tracing::debug!(tag, records = snapshot.len(), "no entry records");
      return None;
    }

    let identities = ModuleIdentities::default();
    let ctx = Arc::new(BuildContext {
      entry_document: entry_document(&entries, &identities),
      snapshot,
      prefixes: prefixes.to_vec(),
      libraries: Arc::clone(&self.libraries),
      cache: Arc::clone(&self.cache),
      options: Arc::clone(&self.options),
      identities,
      report: BuildReport::default(),
    });

    let state = state.advance(BuildState::Building, tag);
    let engine = Engine::new(
      EngineOptions {
        input: Some(vec![InputItem { name: None, import: ENTRY_PATH.to_string() }]),
        minify: Some(self.options.minify),
        silent: Some(true),
      },
      Arc::new(PortalPlugin::new(Arc::clone(&ctx))),
    );
    let result = engine.build().await;

    let (modules, externals, libraries) = ctx.report.snapshot();
    let (outcome, bundle) = match result {
      Ok(output) => {
        let source = output.chunks.into_iter().map(|chunk| chunk.code).collect::<String>();
        let warnings = output.warnings.iter().map(|warning| format!("{warning:#}")).collect();
        (BuildState::Succeeded, CodeBundle::succeeded(tag, source, warnings))
      }
      Err(errors) => (BuildState::Failed, CodeBundle::failed(tag, errors.to_message())),
    };
    let state = state.advance(outcome, tag);

    tracing::debug!(
      tag,
      entries = entries.len(),
      ?state,
      elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
      "bundled"
    );

    Some(CodeBundle { modules, externals, libraries, ..bundle })
  }
}
