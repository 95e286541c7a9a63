pub mod task_result;

use task_result::NormalModuleTaskResult;

pub enum ModuleLoaderMsg {
  NormalModuleDone(Box<NormalModuleTaskResult>),
  BuildErrors(Vec<anyhow::Error>),
}
