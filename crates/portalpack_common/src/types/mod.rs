pub mod code_bundle;
pub mod entry_point;
pub mod external_module;
pub mod import_kind;
pub mod import_record;
pub mod library_module;
pub mod module_identity;
pub mod output_chunk;
pub mod raw_idx;
pub mod record_snapshot;
pub mod resolved_id;
pub mod script_prefix;
pub mod source;
pub mod source_joiner;
