use portalpack_common::ModuleLoaderMsg;
use portalpack_plugin::SharedPlugin;

use crate::types::SharedOptions;

/// Used to store common data shared between all tasks.
pub struct TaskContext {
  pub options: SharedOptions,
  pub plugin: SharedPlugin,
  pub tx: tokio::sync::mpsc::Sender<ModuleLoaderMsg>,
}
