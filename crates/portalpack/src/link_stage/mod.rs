mod sort_modules;

use portalpack_common::{EntryPoint, ModuleIdx};

use crate::{
  scan_stage::ScanStageOutput,
  types::{IndexEcmaAst, IndexModules},
};

#[derive(Debug)]
pub struct LinkStageOutput {
  pub module_table: IndexModules,
  pub index_ecma_ast: IndexEcmaAst,
  pub entry_points: Vec<EntryPoint>,
  /// Every module in the order its body runs.
  pub sorted_modules: Vec<ModuleIdx>,
  pub warnings: Vec<anyhow::Error>,
}

#[derive(Debug)]
pub struct LinkStage {
  pub module_table: IndexModules,
  pub index_ecma_ast: IndexEcmaAst,
  pub entry_points: Vec<EntryPoint>,
  pub sorted_modules: Vec<ModuleIdx>,
  pub warnings: Vec<anyhow::Error>,
}

impl LinkStage {
  pub fn new(scan_stage_output: ScanStageOutput) -> Self {
    Self {
      sorted_modules: Vec::new(),
      module_table: scan_stage_output.module_table,
      index_ecma_ast: scan_stage_output.index_ecma_ast,
      entry_points: scan_stage_output.entry_points,
      warnings: scan_stage_output.warnings,
    }
  }

  pub fn link(mut self) -> LinkStageOutput {
    self.sort_modules();

    LinkStageOutput {
      module_table: self.module_table,
      index_ecma_ast: self.index_ecma_ast,
      entry_points: self.entry_points,
      sorted_modules: self.sorted_modules,
      warnings: self.warnings,
    }
  }
}
