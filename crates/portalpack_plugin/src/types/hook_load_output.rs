use portalpack_common::ModuleType;

#[derive(Debug)]
pub struct HookLoadOutput {
  pub code: String,
  pub module_type: ModuleType,
}
