mod module_task;
pub mod task_context;

use std::sync::Arc;

use arcstr::ArcStr;
use oxc_index::IndexVec;
use portalpack_common::{
  EntryPoint, ModuleIdx, ModuleLoaderMsg, NormalModule, NormalModuleTaskResult, ResolvedId,
};
use portalpack_ecmascript::EcmaAst;
use portalpack_error::BuildResult;
use portalpack_plugin::SharedPlugin;
use rustc_hash::FxHashMap;
use tokio::sync::mpsc::Receiver;

use self::{module_task::ModuleTask, task_context::TaskContext};
use crate::types::{IndexEcmaAst, IndexModules, SharedOptions};

pub struct IntermediateNormalModules {
  pub modules: IndexVec<ModuleIdx, Option<NormalModule>>,
  pub index_ecma_ast: IndexVec<ModuleIdx, Option<EcmaAst>>,
}

impl IntermediateNormalModules {
  pub fn new() -> Self {
    Self { modules: IndexVec::new(), index_ecma_ast: IndexVec::new() }
  }

  pub fn alloc_ecma_module_idx(&mut self) -> ModuleIdx {
    self.index_ecma_ast.push(None);
    self.modules.push(None)
  }
}

pub struct ModuleLoader {
  rx: Receiver<ModuleLoaderMsg>,
  remaining: u32,
  shared_context: Arc<TaskContext>,
  inm: IntermediateNormalModules,
  visited: FxHashMap<ResolvedId, ModuleIdx>,
}

pub struct ModuleLoaderOutput {
  pub module_table: IndexModules,
  pub index_ecma_ast: IndexEcmaAst,
  pub entry_points: Vec<EntryPoint>,
  pub warnings: Vec<anyhow::Error>,
}

impl ModuleLoader {
  pub fn new(options: SharedOptions, plugin: SharedPlugin) -> Self {
    // 1024 should be enough for most cases
    // over 1024 pending tasks are insane
    let (tx, rx) = tokio::sync::mpsc::channel(1024);
    let shared_context = Arc::new(TaskContext { options, plugin, tx });

    Self {
      rx,
      remaining: 0,
      shared_context,
      inm: IntermediateNormalModules::new(),
      visited: FxHashMap::default(),
    }
  }

  fn try_spawn_new_task(&mut self, resolved_id: ResolvedId) -> ModuleIdx {
    if let Some(idx) = self.visited.get(&resolved_id) {
      return *idx;
    }

    let idx = self.inm.alloc_ecma_module_idx();
    self.visited.insert(resolved_id.clone(), idx);
    self.remaining += 1;

    let task = ModuleTask::new(Arc::clone(&self.shared_context), idx, resolved_id);
    tokio::spawn(task.run());
    idx
  }

  pub async fn fetch_all_modules(
    mut self,
    user_defined_entries: Vec<(Option<ArcStr>, ResolvedId)>,
  ) -> BuildResult<ModuleLoaderOutput> {
    let entry_points = user_defined_entries
      .into_iter()
      .map(|(name, resolved_id)| EntryPoint { idx: self.try_spawn_new_task(resolved_id), name })
      .collect::<Vec<_>>();

    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    while self.remaining > 0 {
      let Some(msg) = self.rx.recv().await else {
        break;
      };
      match msg {
        ModuleLoaderMsg::NormalModuleDone(task_result) => {
          let NormalModuleTaskResult {
            module_idx,
            resolved_id,
            module_type,
            ast,
            raw_import_records,
            imports,
            resolved_deps,
            warnings: task_warnings,
          } = *task_result;
          warnings.extend(task_warnings);

          let import_records = raw_import_records
            .into_iter()
            .zip(resolved_deps)
            .map(|(raw_record, dep_id)| {
              let dep_idx = self.try_spawn_new_task(dep_id);
              raw_record.into_resolved(dep_idx)
            })
            .collect::<IndexVec<_, _>>();

          let stable_id = resolved_id.stable_id();
          self.inm.modules[module_idx] = Some(NormalModule {
            exec_order: u32::MAX,
            idx: module_idx,
            id: resolved_id,
            stable_id,
            module_type,
            import_records,
            imports,
          });
          self.inm.index_ecma_ast[module_idx] = Some(ast);
        }
        ModuleLoaderMsg::BuildErrors(errs) => {
          errors.extend(errs);
        }
      }
      self.remaining -= 1;
    }

    if !errors.is_empty() {
      Err(errors)?;
    }

    let module_table = self
      .inm
      .modules
      .into_iter()
      .map(|module| module.expect("Every allocated module should have been loaded"))
      .collect();
    let index_ecma_ast = self
      .inm
      .index_ecma_ast
      .into_iter()
      .map(|ast| ast.expect("Every loaded module should have an ast"))
      .collect();

    Ok(ModuleLoaderOutput { module_table, index_ecma_ast, entry_points, warnings })
  }
}
