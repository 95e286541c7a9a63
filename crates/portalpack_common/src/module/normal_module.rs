use oxc::span::Span;
use oxc_index::IndexVec;
use rustc_hash::FxHashMap;

use crate::{ImportRecordIdx, ModuleIdx, ModuleType, ResolvedId, ResolvedImportRecord};

#[derive(Debug)]
pub struct NormalModule {
  pub exec_order: u32,
  pub idx: ModuleIdx,
  pub id: ResolvedId,
  /// `namespace:id`, used as the module's key in the generated code.
  pub stable_id: String,
  pub module_type: ModuleType,
  pub import_records: IndexVec<ImportRecordIdx, ResolvedImportRecord>,
  /// Span of each import statement or `import()` expression to the record it produced.
  pub imports: FxHashMap<Span, ImportRecordIdx>,
}

impl NormalModule {
  pub fn static_dependencies(&self) -> impl DoubleEndedIterator<Item = ModuleIdx> + '_ {
    self.import_records.iter().filter(|rec| rec.kind.is_static()).map(|rec| rec.state)
  }

  pub fn dynamic_dependencies(&self) -> impl Iterator<Item = ModuleIdx> + '_ {
    self.import_records.iter().filter(|rec| !rec.kind.is_static()).map(|rec| rec.state)
  }
}
