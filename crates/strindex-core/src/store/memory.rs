//! Process-local record store.

use indexmap::map::Entry;
use indexmap::IndexMap;
use parking_lot::RwLock;

use crate::errors::{StrIndexError, StrIndexResult};
use crate::models::Record;
use crate::store::RecordStore;

/// Insertion-ordered map from content hash to record behind a single lock.
#[derive(Default)]
pub struct MemoryStore {
    records: RwLock<IndexMap<String, Record>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl RecordStore for MemoryStore {
    fn put_if_absent(&self, record: Record) -> StrIndexResult<()> {
        let mut records = self.records.write();
        match records.entry(record.id.clone()) {
            Entry::Occupied(entry) => Err(StrIndexError::DuplicateContent(entry.key().clone())),
            Entry::Vacant(entry) => {
                entry.insert(record);
                Ok(())
            }
        }
    }

    fn get(&self, id: &str) -> Option<Record> {
        self.records.read().get(id).cloned()
    }

    fn delete(&self, id: &str) -> StrIndexResult<()> {
        // shift_remove keeps the remaining records in insertion order.
        match self.records.write().shift_remove(id) {
            Some(_) => Ok(()),
            None => Err(StrIndexError::NotFound(id.to_string())),
        }
    }

    fn list_all(&self) -> Vec<Record> {
        self.records.read().values().cloned().collect()
    }

    fn len(&self) -> usize {
        self.records.read().len()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::thread;

    use super::*;
    use crate::errors::ErrorKind;

    fn values(store: &MemoryStore) -> Vec<String> {
        store.list_all().into_iter().map(|r| r.value).collect()
    }

    #[test]
    fn put_then_get() {
        let store = MemoryStore::new();
        let record = Record::new("hello");
        let id = record.id.clone();
        store.put_if_absent(record.clone()).unwrap();
        assert_eq!(store.get(&id), Some(record));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn duplicate_put_is_rejected_and_store_unchanged() {
        let store = MemoryStore::new();
        let original = Record::new("hello");
        store.put_if_absent(original.clone()).unwrap();

        let err = store.put_if_absent(Record::new("hello")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DuplicateContent);
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(&original.id), Some(original));
    }

    #[test]
    fn list_all_is_insertion_ordered_across_deletes() {
        let store = MemoryStore::new();
        for value in ["c", "a", "d", "b"] {
            store.put_if_absent(Record::new(value)).unwrap();
        }
        store.delete(&Record::new("a").id).unwrap();
        assert_eq!(values(&store), vec!["c", "d", "b"]);
    }

    #[test]
    fn delete_twice_is_not_found() {
        let store = MemoryStore::new();
        let record = Record::new("gone");
        let id = record.id.clone();
        store.put_if_absent(record).unwrap();
        store.delete(&id).unwrap();
        assert!(store.get(&id).is_none());
        assert!(store.list_all().is_empty());
        assert_eq!(store.delete(&id).unwrap_err().kind(), ErrorKind::NotFound);
    }

    #[test]
    fn concurrent_inserts_of_same_value_admit_one() {
        let store = Arc::new(MemoryStore::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = Arc::clone(&store);
                thread::spawn(move || store.put_if_absent(Record::new("race")).is_ok())
            })
            .collect();
        let successes = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|ok| *ok)
            .count();
        assert_eq!(successes, 1);
        assert_eq!(store.len(), 1);
    }
}
