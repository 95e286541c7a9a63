use arcstr::ArcStr;
use rustc_hash::FxHashMap;
use serde::Deserialize;

/// Tag name to tag text.
pub type Record = FxHashMap<ArcStr, ArcStr>;

/// Read-only view of every record a build may import from.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(from = "FxHashMap<ArcStr, Record>")]
pub struct RecordSnapshot {
  records: FxHashMap<ArcStr, Record>,
  sorted_ids: Vec<ArcStr>,
}

impl RecordSnapshot {
  pub fn new(records: FxHashMap<ArcStr, Record>) -> Self {
    let mut sorted_ids = records.keys().cloned().collect::<Vec<_>>();
    sorted_ids.sort_unstable();
    Self { records, sorted_ids }
  }

  pub fn get(&self, record_id: &str) -> Option<&Record> {
    self.records.get(record_id)
  }

  pub fn tag_value(&self, record_id: &str, tag: &str) -> Option<&ArcStr> {
    self.get(record_id)?.get(tag)
  }

  /// Records in ascending record id order.
  pub fn iter_sorted(&self) -> impl Iterator<Item = (&ArcStr, &Record)> {
    self.sorted_ids.iter().filter_map(|id| self.records.get(id).map(|record| (id, record)))
  }

  pub fn len(&self) -> usize {
    self.records.len()
  }

  pub fn is_empty(&self) -> bool {
    self.records.is_empty()
  }
}

impl From<FxHashMap<ArcStr, Record>> for RecordSnapshot {
  fn from(records: FxHashMap<ArcStr, Record>) -> Self {
    Self::new(records)
  }
}

impl FromIterator<(ArcStr, Record)> for RecordSnapshot {
  fn from_iter<T: IntoIterator<Item = (ArcStr, Record)>>(iter: T) -> Self {
    Self::new(iter.into_iter().collect())
  }
}

#[test]
fn iterates_records_by_ascending_id() {
  let snapshot: RecordSnapshot =
    serde_json::from_str(r#"{ "b": { "main": "f()" }, "a": { "main": "g()" } }"#).unwrap();
  let ids = snapshot.iter_sorted().map(|(id, _)| id.as_str()).collect::<Vec<_>>();
  assert_eq!(ids, ["a", "b"]);
  assert_eq!(snapshot.tag_value("b", "main").map(ArcStr::as_str), Some("f()"));
}
