use oxc::span::Span;
use oxc_index::IndexVec;
use portalpack_ecmascript::EcmaAst;
use rustc_hash::FxHashMap;

use crate::{ImportRecordIdx, ModuleIdx, ModuleType, RawImportRecord, ResolvedId};

pub struct NormalModuleTaskResult {
  pub module_idx: ModuleIdx,
  pub resolved_id: ResolvedId,
  pub module_type: ModuleType,
  pub ast: EcmaAst,
  pub raw_import_records: IndexVec<ImportRecordIdx, RawImportRecord>,
  pub imports: FxHashMap<Span, ImportRecordIdx>,
  pub resolved_deps: IndexVec<ImportRecordIdx, ResolvedId>,
  pub warnings: Vec<anyhow::Error>,
}
