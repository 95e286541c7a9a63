use std::iter;

use portalpack_common::ModuleIdx;
use rustc_hash::{FxBuildHasher, FxHashMap, FxHashSet};

use super::LinkStage;

#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
enum Status {
  ToBeExecuted(ModuleIdx),
  WaitForExit(ModuleIdx),
}

impl LinkStage {
  /// Orders modules the way an ESM host would evaluate them: depth first, dependencies in import
  /// order, each module once. Modules only reachable through `import()` are ordered afterwards,
  /// starting from the targets of the modules already ordered.
  pub(crate) fn sort_modules(&mut self) {
    let mut executed_ids =
      FxHashSet::with_capacity_and_hasher(self.module_table.len(), FxBuildHasher);
    let mut stack_indexes_of_executing_id = FxHashMap::default();

    let mut next_exec_order = 0;
    let mut circular_dependencies = FxHashSet::default();
    let mut sorted_modules: Vec<ModuleIdx> = Vec::with_capacity(self.module_table.len());

    let mut roots = self.entry_points.iter().map(|entry| entry.idx).collect::<Vec<_>>();
    while !roots.is_empty() {
      let first_sorted_in_round = sorted_modules.len();
      let mut execution_stack =
        roots.iter().rev().map(|&idx| Status::ToBeExecuted(idx)).collect::<Vec<_>>();

      while let Some(status) = execution_stack.pop() {
        match status {
          Status::ToBeExecuted(id) => {
            if executed_ids.contains(&id) {
              // Try to check if there is a circular dependency
              if let Some(index) = stack_indexes_of_executing_id.get(&id).copied() {
                // Executing
                let cycles = execution_stack[index..]
                  .iter()
                  .filter_map(|action| match action {
                    // Only modules with `Status::WaitForExit` are on the execution chain
                    Status::ToBeExecuted(_) => None,
                    Status::WaitForExit(id) => Some(*id),
                  })
                  .chain(iter::once(id))
                  .collect::<Box<[_]>>();
                circular_dependencies.insert(cycles);
              }
            } else {
              executed_ids.insert(id);
              execution_stack.push(Status::WaitForExit(id));
              stack_indexes_of_executing_id.insert(id, execution_stack.len() - 1);

              execution_stack.extend(
                self.module_table[id].static_dependencies().rev().map(Status::ToBeExecuted),
              );
            }
          }
          Status::WaitForExit(id) => {
            sorted_modules.push(id);
            self.module_table[id].exec_order = next_exec_order;
            next_exec_order += 1;
            stack_indexes_of_executing_id.remove(&id);
          }
        }
      }

      roots = sorted_modules[first_sorted_in_round..]
        .iter()
        .flat_map(|&idx| self.module_table[idx].dynamic_dependencies())
        .filter(|idx| !executed_ids.contains(idx))
        .collect();
    }

    let mut messages = circular_dependencies
      .into_iter()
      .map(|cycle| {
        let paths =
          cycle.iter().map(|&id| self.module_table[id].stable_id.as_str()).collect::<Vec<_>>();
        format!("Circular dependency: {}.", paths.join(" -> "))
      })
      .collect::<Vec<_>>();
    messages.sort_unstable();
    self.warnings.extend(messages.into_iter().map(|message| anyhow::anyhow!(message)));

    self.sorted_modules = sorted_modules;
  }
}
