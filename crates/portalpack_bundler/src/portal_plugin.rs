use std::sync::Arc;

use arcstr::ArcStr;
use async_trait::async_trait;
use portalpack::{
  HookLoadArgs, HookLoadOutput, HookLoadReturn, HookResolveIdArgs, HookResolveIdReturn, Plugin,
};
use portalpack_common::{ModuleType, ResolvedId, TAG_MODULE_SUFFIX};
use portalpack_error::BundleError;
use portalpack_resolver::{
  Resolution, ResolveRequest,
  namespace::{ENTRY_NAMESPACE, ENTRY_PATH, HTTP_NAMESPACE, LIBRARY_NAMESPACE, TAG_NAMESPACE},
  resolve,
};
use url::Url;

use crate::build_context::BuildContext;

/// Maps the engine's resolve and load hooks onto records, libraries and the remote registry.
pub struct PortalPlugin {
  ctx: Arc<BuildContext>,
}

impl PortalPlugin {
  pub fn new(ctx: Arc<BuildContext>) -> Self {
    Self { ctx }
  }

  fn load_record_tag(&self, id: &str) -> anyhow::Result<HookLoadOutput> {
    let unresolved = |prefix: &str, tag: &str| BundleError::UnresolvedRecordModule {
      prefix: prefix.to_string(),
      tag: tag.to_string(),
    };

    let Some(identity) = self.ctx.identities.lookup(id, &self.ctx.prefixes) else {
      return Err(unresolved("", id.strip_suffix(TAG_MODULE_SUFFIX).unwrap_or(id)).into());
    };
    let prefix = identity.prefix.prefix.as_str();
    let Some(record) = self.ctx.snapshot.get(&identity.record_id) else {
      return Err(unresolved(prefix, &identity.tag).into());
    };

    self.ctx.report.record_module(identity.record_id.clone(), identity.tag.clone());

    let value = record
      .get(identity.tag.as_str())
      .filter(|value| identity.prefix.is_fallback || identity.prefix.matches(value))
      .ok_or_else(|| unresolved(prefix, &identity.tag))?;

    Ok(HookLoadOutput {
      code: identity.module_source(value).to_string(),
      module_type: identity.prefix.language,
    })
  }

  fn load_library(&self, id: &str) -> anyhow::Result<HookLoadOutput> {
    let module = self
      .ctx
      .libraries
      .get(id)
      .ok_or_else(|| BundleError::UnresolvedLibraryModule { id: id.to_string() })?;
    let output = HookLoadOutput { code: module.source.to_string(), module_type: module.language };
    self.ctx.report.record_library(module);
    Ok(output)
  }

  async fn load_remote(&self, id: &str) -> anyhow::Result<HookLoadOutput> {
    let url = Url::parse(id)
      .map_err(|err| BundleError::InvalidUrl { url: id.to_string(), message: err.to_string() })?;
    let response = self.ctx.cache.fetch(&url).await?;

    if let Some(definitions) = response.type_declarations_url(&url) {
      self.ctx.report.attach_type_declarations(url.as_str(), definitions.as_str());
    }

    Ok(HookLoadOutput { code: response.body.clone(), module_type: ModuleType::Js })
  }
}

#[async_trait]
impl Plugin for PortalPlugin {
  async fn resolve_id(&self, args: &HookResolveIdArgs<'_>) -> HookResolveIdReturn {
    let request = ResolveRequest { specifier: args.specifier, importer: args.importer };
    let resolved_id = match resolve(&self.ctx.resolve_context(), &request) {
      Resolution::Entry => ResolvedId::new(ENTRY_PATH, ENTRY_NAMESPACE),
      Resolution::RecordTag(identity) => {
        ResolvedId::new(self.ctx.identities.register(&identity), TAG_NAMESPACE)
      }
      Resolution::Library(id) => ResolvedId::new(id, LIBRARY_NAMESPACE),
      Resolution::Http { url, external } => {
        if let Some(specifier) = external {
          self.ctx.report.record_external(specifier, url.as_str());
        }
        ResolvedId::new(ArcStr::from(url.as_str()), HTTP_NAMESPACE)
      }
      Resolution::Error(err) => return Err(err.into()),
    };
    Ok(Some(resolved_id))
  }

  async fn load(&self, args: &HookLoadArgs<'_>) -> HookLoadReturn {
    let output = match args.namespace {
      ENTRY_NAMESPACE => {
        HookLoadOutput { code: self.ctx.entry_document.clone(), module_type: ModuleType::Js }
      }
      TAG_NAMESPACE => self.load_record_tag(args.id)?,
      LIBRARY_NAMESPACE => self.load_library(args.id)?,
      HTTP_NAMESPACE => self.load_remote(args.id).await?,
      _ => return Ok(None),
    };
    Ok(Some(output))
  }
}

#[cfg(test)]
mod tests {
  use std::sync::Arc;

  use async_trait::async_trait;
  use portalpack::{HookLoadArgs, HookResolveIdArgs, ImportKind, Plugin};
  use portalpack_common::{LibraryModule, ModuleType, RecordSnapshot};
  use portalpack_http::{HttpClient, HttpResponse, RemoteModuleCache};
  use portalpack_resolver::{LibraryRegistry, ModuleIdentities, namespace::LIBRARY_NAMESPACE};
  use url::Url;

  use super::PortalPlugin;
  use crate::{
    BundlerOptions,
    build_context::{BuildContext, BuildReport},
    options::normalize_options,
  };

  struct Offline;

  #[async_trait]
  impl HttpClient for Offline {
    async fn get(&self, url: &Url) -> anyhow::Result<HttpResponse> {
      anyhow::bail!("offline: {url}")
    }
  }

  fn plugin(libraries: &Arc<LibraryRegistry>) -> PortalPlugin {
    PortalPlugin::new(Arc::new(BuildContext {
      snapshot: Arc::new(RecordSnapshot::default()),
      prefixes: Vec::new(),
      entry_document: String::new(),
      libraries: Arc::clone(libraries),
      cache: Arc::new(RemoteModuleCache::new(Arc::new(Offline))),
      options: Arc::new(normalize_options(BundlerOptions::default())),
      identities: ModuleIdentities::default(),
      report: BuildReport::default(),
    }))
  }

  #[tokio::test]
  async fn libraries_removed_after_resolve_fail_to_load() {
    let libraries = Arc::new(LibraryRegistry::new());
    libraries.add_library(LibraryModule::new("lodash", "export default 1;", ModuleType::Js));
    let plugin = plugin(&libraries);

    let resolved = plugin
      .resolve_id(&HookResolveIdArgs { importer: None, specifier: "lodash", kind: ImportKind::Import })
      .await
      .unwrap()
      .unwrap();
    assert_eq!(resolved.namespace.as_str(), LIBRARY_NAMESPACE);

    libraries.remove_library("lodash");
    let err = plugin
      .load(&HookLoadArgs { id: resolved.id.as_str(), namespace: LIBRARY_NAMESPACE })
      .await
      .unwrap_err();
    assert_eq!(err.to_string(), "Unresolved library module \"lodash\"");
  }
}
