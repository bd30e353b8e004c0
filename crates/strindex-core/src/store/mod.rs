//! Record storage abstraction and its in-memory implementation.

pub mod memory;

use crate::errors::StrIndexResult;
use crate::models::Record;

/// Keyed record storage addressed by content hash.
///
/// Each operation is atomic on its own; `list_all` returns an owned snapshot
/// in insertion order.
pub trait RecordStore: Send + Sync {
    /// Insert `record` unless a record with the same id exists, in which case
    /// the store is left untouched and `DuplicateContent` is returned.
    fn put_if_absent(&self, record: Record) -> StrIndexResult<()>;

    fn get(&self, id: &str) -> Option<Record>;

    /// Remove the record with `id`, or fail with `NotFound`.
    fn delete(&self, id: &str) -> StrIndexResult<()>;

    fn list_all(&self) -> Vec<Record>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
