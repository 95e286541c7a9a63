use std::{sync::Arc, time::Instant};

use portalpack_common::EngineOptions;
use portalpack_error::BuildResult;
use portalpack_plugin::SharedPlugin;

use crate::{
  generate_stage::GenerateStage, link_stage::LinkStage, scan_stage::ScanStage,
  types::{SharedOptions, engine_output::EngineOutput},
  utils::normalize_options::normalize_options,
};

/// Bundles the module graph reachable from `options.input` into one self-contained chunk.
///
/// Every module is resolved and loaded through the plugin, the engine never touches a file system.
pub struct Engine {
  pub(crate) options: SharedOptions,
  pub(crate) plugin: SharedPlugin,
}

impl Engine {
  pub fn new(options: EngineOptions, plugin: SharedPlugin) -> Self {
    Engine { options: Arc::new(normalize_options(options)), plugin }
  }

  pub async fn build(&self) -> BuildResult<EngineOutput> {
    let start = Instant::now();

    let scan_stage_output =
      ScanStage::new(Arc::clone(&self.options), Arc::clone(&self.plugin)).scan().await?;
    let link_stage_output = LinkStage::new(scan_stage_output).link();
    let module_count = link_stage_output.module_table.len();
    let output = GenerateStage::new(link_stage_output, &self.options).generate()?;

    if !self.options.silent {
      tracing::debug!(
        plugin = %self.plugin.name(),
        modules = module_count,
        elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
        "build finished"
      );
    }

    Ok(output)
  }
}
