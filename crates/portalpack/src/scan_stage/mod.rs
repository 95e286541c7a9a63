pub mod ast_scanner;

use std::sync::Arc;

use arcstr::ArcStr;
use futures::future::join_all;
use portalpack_common::{ImportKind, ResolvedId};
use portalpack_error::BuildResult;
use portalpack_plugin::SharedPlugin;

use crate::{
  module_loader::{ModuleLoader, ModuleLoaderOutput},
  types::SharedOptions,
  utils::resolve_id::resolve_id,
};

pub type ScanStageOutput = ModuleLoaderOutput;

pub struct ScanStage {
  options: SharedOptions,
  plugin: SharedPlugin,
}

impl ScanStage {
  pub fn new(options: SharedOptions, plugin: SharedPlugin) -> Self {
    Self { options, plugin }
  }

  pub async fn scan(&self) -> BuildResult<ScanStageOutput> {
    if self.options.input.is_empty() {
      Err(vec![anyhow::anyhow!("You must supply options.input to the engine")])?;
    }

    let user_defined_entries = self.resolve_user_defined_entries().await?;
    let module_loader = ModuleLoader::new(Arc::clone(&self.options), Arc::clone(&self.plugin));
    module_loader.fetch_all_modules(user_defined_entries).await
  }

  async fn resolve_user_defined_entries(
    &self,
  ) -> BuildResult<Vec<(Option<ArcStr>, ResolvedId)>> {
    let jobs = self.options.input.iter().map(|input_item| async move {
      let resolved_id = resolve_id(&self.plugin, &input_item.import, None, ImportKind::Import).await;
      resolved_id.map(|resolved_id| (input_item.name.as_deref().map(ArcStr::from), resolved_id))
    });

    let mut entries = Vec::with_capacity(self.options.input.len());
    let mut errors = Vec::new();
    for result in join_all(jobs).await {
      match result {
        Ok(entry) => entries.push(entry),
        Err(err) => errors.push(err),
      }
    }

    if !errors.is_empty() {
      Err(errors)?;
    }

    Ok(entries)
  }
}
