use portalpack_common::{ImportKind, ResolvedId};
use portalpack_plugin::{HookResolveIdArgs, SharedPlugin};

pub async fn resolve_id(
  plugin: &SharedPlugin,
  specifier: &str,
  importer: Option<&ResolvedId>,
  kind: ImportKind,
) -> anyhow::Result<ResolvedId> {
  let args = HookResolveIdArgs { importer, specifier, kind };
  match plugin.resolve_id(&args).await? {
    Some(resolved) => Ok(resolved),
    None => match importer {
      Some(importer) => Err(anyhow::anyhow!("Could not resolve {specifier:?} from {importer}")),
      None => Err(anyhow::anyhow!("Could not resolve entry module {specifier:?}")),
    },
  }
}
