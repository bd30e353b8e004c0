//! Query planner with a bounded in-memory cache of interpretations.

use std::sync::atomic::{AtomicU64, Ordering};

use indexmap::IndexMap;
use parking_lot::Mutex;
use serde::Serialize;
use tracing::debug;

use crate::errors::StrIndexResult;
use crate::models::ParsedQuery;
use crate::query::filter::FilterSpec;
use crate::query::guards::{clamp_planner_entries, DEFAULT_PLANNER_ENTRIES};
use crate::query::interpreter::Interpreter;

/// Cache counters reported by [`QueryPlanner::stats`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct PlannerStats {
    pub entries: usize,
    pub max_entries: usize,
    pub hits: u64,
    pub misses: u64,
}

/// Memoizes successful interpretations keyed by normalized query text.
///
/// Entries are kept in recency order; a hit moves the entry to the back and
/// the front is evicted when capacity is exceeded. Failed interpretations are
/// never cached.
pub struct QueryPlanner {
    interpreter: Interpreter,
    max_entries: usize,
    cache: Mutex<IndexMap<String, FilterSpec>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl Default for QueryPlanner {
    fn default() -> Self {
        Self::new(Interpreter::default(), DEFAULT_PLANNER_ENTRIES)
    }
}

impl QueryPlanner {
    pub fn new(interpreter: Interpreter, max_entries: usize) -> Self {
        Self {
            interpreter,
            max_entries: clamp_planner_entries(i64::try_from(max_entries).unwrap_or(i64::MAX)),
            cache: Mutex::new(IndexMap::new()),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    pub fn interpreter(&self) -> &Interpreter {
        &self.interpreter
    }

    /// Interpret `query`, consulting the cache first.
    pub fn plan(&self, query: &str) -> StrIndexResult<ParsedQuery> {
        let key = self.interpreter.normalize(query)?;

        {
            let mut cache = self.cache.lock();
            if let Some(index) = cache.get_index_of(&key) {
                // Move to end for LRU
                let last = cache.len() - 1;
                cache.move_index(index, last);
                let filters = cache[&key].clone();
                self.hits.fetch_add(1, Ordering::Relaxed);
                debug!(query = %key, "planner cache hit");
                return Ok(ParsedQuery {
                    original: query.to_string(),
                    parsed_filters: filters,
                });
            }
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        debug!(query = %key, "planner cache miss");
        let parsed = self.interpreter.parse(query)?;

        let mut cache = self.cache.lock();
        cache.insert(key, parsed.parsed_filters.clone());
        while cache.len() > self.max_entries {
            cache.shift_remove_index(0);
        }
        Ok(parsed)
    }

    pub fn clear(&self) {
        self.cache.lock().clear();
    }

    pub fn stats(&self) -> PlannerStats {
        PlannerStats {
            entries: self.cache.lock().len(),
            max_entries: self.max_entries,
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }
}
