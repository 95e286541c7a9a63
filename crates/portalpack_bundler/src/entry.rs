use portalpack_common::{ModuleIdentity, RecordSnapshot};
use portalpack_resolver::{EntryTarget, ModuleIdentities};
use portalpack_utils::{concat_string, ecmascript::to_string_literal};

/// Every record whose entry tag holds an entry script, in ascending record id order.
pub fn collect_entries(snapshot: &RecordSnapshot, target: &EntryTarget<'_>) -> Vec<ModuleIdentity> {
  snapshot
    .iter_sorted()
    .filter_map(|(record_id, record)| {
      let prefix = target.entry_prefix(record.get(target.tag)?)?;
      Some(ModuleIdentity::new(prefix.clone(), record_id.clone(), target.tag))
    })
    .collect()
}

/// One side effect import per entry. The order of these imports is the execution order of the
/// entry records.
pub fn entry_document(entries: &[ModuleIdentity], identities: &ModuleIdentities) -> String {
  entries
    .iter()
    .map(|identity| concat_string!("import ", to_string_literal(&identities.register(identity)), ";\n"))
    .collect()
}
