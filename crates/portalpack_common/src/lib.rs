mod bundler_options;
mod module;
mod module_loader;
mod types;

pub use bundler_options::{
  EngineOptions, input_item::InputItem, module_type::ModuleType,
  normalized_engine_options::NormalizedEngineOptions,
};

pub use crate::{
  module::normal_module::NormalModule,
  module_loader::{ModuleLoaderMsg, task_result::NormalModuleTaskResult},
  types::{
    code_bundle::{CodeBundle, ModulesReport},
    entry_point::EntryPoint,
    external_module::ExternalModule,
    import_kind::ImportKind,
    import_record::{RawImportRecord, ResolvedImportRecord},
    library_module::LibraryModule,
    module_identity::{ModuleIdentity, TAG_MODULE_SUFFIX},
    output_chunk::OutputChunk,
    raw_idx::{ImportRecordIdx, ModuleIdx},
    record_snapshot::{Record, RecordSnapshot},
    resolved_id::ResolvedId,
    script_prefix::ScriptPrefix,
    source::Source,
    source_joiner::SourceJoiner,
  },
};
