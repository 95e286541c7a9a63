use std::{fs, path::Path};

use anyhow::Context;
use arcstr::ArcStr;
use portalpack_bundler::{LibraryModule, Record, RecordSnapshot};
use rustc_hash::FxHashMap;

/// Reads `{ recordId: { tag: value } }`. Tags holding anything but a string are skipped.
pub fn read_snapshot(path: &Path) -> anyhow::Result<RecordSnapshot> {
  let text =
    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
  parse_snapshot(&text).with_context(|| format!("Invalid snapshot {}", path.display()))
}

fn parse_snapshot(text: &str) -> anyhow::Result<RecordSnapshot> {
  let raw: FxHashMap<String, FxHashMap<String, serde_json::Value>> = serde_json::from_str(text)?;
  let records = raw
    .into_iter()
    .map(|(record_id, tags)| {
      let record = tags
        .into_iter()
        .filter_map(|(tag, value)| match value {
          serde_json::Value::String(value) => Some((ArcStr::from(tag), ArcStr::from(value))),
          _ => None,
        })
        .collect::<Record>();
      (ArcStr::from(record_id), record)
    })
    .collect::<FxHashMap<_, _>>();
  Ok(RecordSnapshot::new(records))
}

pub fn read_libraries(path: &Path) -> anyhow::Result<Vec<LibraryModule>> {
  let text =
    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
  serde_json::from_str(&text).with_context(|| format!("Invalid library list {}", path.display()))
}

#[test]
fn non_string_tags_are_skipped() {
  let snapshot = parse_snapshot(r#"{ "a": { "main": "📖run()", "position": 3 } }"#).unwrap();
  let record = snapshot.get("a").unwrap();
  assert_eq!(record.len(), 1);
  assert_eq!(snapshot.tag_value("a", "main").map(ArcStr::as_str), Some("📖run()"));
}
