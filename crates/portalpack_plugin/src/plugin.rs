use std::{borrow::Cow, sync::Arc};

use async_trait::async_trait;
use portalpack_common::ResolvedId;
use portalpack_utils::pretty_type_name::pretty_type_name;

use crate::{HookLoadArgs, HookLoadOutput, HookResolveIdArgs};

/// `Ok(None)` means the plugin doesn't know the module; the engine reports it as unresolved.
pub type HookResolveIdReturn = anyhow::Result<Option<ResolvedId>>;
pub type HookLoadReturn = anyhow::Result<Option<HookLoadOutput>>;

pub type SharedPlugin = Arc<dyn Plugin>;

/// The hooks the engine drives while it walks the module graph.
///
/// Hooks may suspend at any point and are called concurrently from different module tasks.
#[async_trait]
pub trait Plugin: Send + Sync + 'static {
  fn name(&self) -> Cow<'static, str> {
    pretty_type_name::<Self>()
  }

  async fn resolve_id(&self, _args: &HookResolveIdArgs<'_>) -> HookResolveIdReturn {
    Ok(None)
  }

  async fn load(&self, _args: &HookLoadArgs<'_>) -> HookLoadReturn {
    Ok(None)
  }
}
