//! Immutable, ordered record storage.

use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::record::Record;

/// An immutable, ordered collection of records with unique identifiers.
///
/// The store is built once and never mutated. Share it between views with
/// `Arc<RecordStore<R>>`.
#[derive(Debug, Clone)]
pub struct RecordStore<R: Record> {
    records: Vec<R>,
    index: HashMap<R::Id, usize>,
}

impl<R: Record> RecordStore<R> {
    /// Build a store, rejecting duplicate identifiers.
    pub fn new(records: Vec<R>) -> Result<Self> {
        let mut index = HashMap::with_capacity(records.len());
        for (pos, record) in records.iter().enumerate() {
            if index.insert(record.id().clone(), pos).is_some() {
                return Err(Error::DuplicateId {
                    id: record.id().to_string(),
                });
            }
        }
        Ok(Self { records, index })
    }

    /// All records in load order.
    pub fn get_all(&self) -> &[R] {
        &self.records
    }

    /// Look up a record by identifier.
    pub fn get(&self, id: &R::Id) -> Option<&R> {
        self.index.get(id).map(|&pos| &self.records[pos])
    }

    /// Whether a record with this identifier exists.
    pub fn contains(&self, id: &R::Id) -> bool {
        self.index.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, R> {
        self.records.iter()
    }

    /// Other records whose `field` equals the same field on `record`, in load
    /// order, at most `limit` of them. The record itself is excluded.
    pub fn related(&self, record: &R, field: &str, limit: usize) -> Vec<&R> {
        let Some(key) = record.field(field) else {
            return Vec::new();
        };
        let key = key.to_text().into_owned();
        self.records
            .iter()
            .filter(|other| other.id() != record.id())
            .filter(|other| {
                other
                    .field(field)
                    .is_some_and(|v| v.to_text() == key.as_str())
            })
            .take(limit)
            .collect()
    }
}

impl<'a, R: Record> IntoIterator for &'a RecordStore<R> {
    type Item = &'a R;
    type IntoIter = std::slice::Iter<'a, R>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datasets;
    use crate::FaultLog;

    #[test]
    fn test_store_preserves_order_and_indexes() {
        let store = datasets::fault_store().unwrap();
        assert_eq!(store.len(), 8);
        assert_eq!(store.get_all()[0].id, "F001");
        assert_eq!(store.get(&"F004".to_string()).unwrap().asset, "BUS_400_1");
        assert!(store.get(&"F999".to_string()).is_none());
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let mut logs: Vec<FaultLog> = datasets::fault_logs().to_vec();
        logs.push(logs[0].clone());
        let err = RecordStore::new(logs).unwrap_err();
        assert_eq!(
            err,
            Error::DuplicateId {
                id: "F001".to_string()
            }
        );
    }

    #[test]
    fn test_related_excludes_self_and_limits() {
        let mut logs: Vec<FaultLog> = datasets::fault_logs().to_vec();
        for (n, suffix) in ["A", "B", "C"].iter().enumerate() {
            let mut extra = logs[0].clone();
            extra.id = format!("F10{n}{suffix}");
            logs.push(extra);
        }
        let store = RecordStore::new(logs).unwrap();
        let first = &store.get_all()[0];

        let related = store.related(first, "asset", 2);
        assert_eq!(related.len(), 2);
        assert!(related.iter().all(|r| r.asset == "XFMR_400_1"));
        assert!(related.iter().all(|r| r.id != "F001"));
    }

    #[test]
    fn test_related_empty_for_unknown_field() {
        let store = datasets::fault_store().unwrap();
        let first = &store.get_all()[0];
        assert!(store.related(first, "no_such_field", 5).is_empty());
    }
}
