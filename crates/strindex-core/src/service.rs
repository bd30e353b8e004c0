//! Service facade tying the record store to both query surfaces.

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::config::ServiceConfig;
use crate::errors::{ErrorKind, StrIndexError, StrIndexResult};
use crate::indexer::hashing::compute_content_hash;
use crate::models::{FilterResponse, NaturalLanguageResponse, ParsedQuery, Record};
use crate::query::engine::filter_snapshot;
use crate::query::filter::StructuredQuery;
use crate::query::interpreter::Interpreter;
use crate::query::planner::{PlannerStats, QueryPlanner};
use crate::store::memory::MemoryStore;
use crate::store::RecordStore;

/// Owns an injected [`RecordStore`] and answers ingestion, lookup, deletion
/// and both query surfaces against it.
pub struct StringService<S: RecordStore = MemoryStore> {
    store: S,
    planner: QueryPlanner,
    config: ServiceConfig,
}

impl Default for StringService<MemoryStore> {
    fn default() -> Self {
        Self::new(MemoryStore::new())
    }
}

impl<S: RecordStore> StringService<S> {
    pub fn new(store: S) -> Self {
        Self::with_config(store, ServiceConfig::default())
    }

    pub fn with_config(store: S, config: ServiceConfig) -> Self {
        let interpreter = Interpreter::new(config.max_query_length);
        let planner = QueryPlanner::new(interpreter, config.query_cache_entries);
        Self {
            store,
            planner,
            config,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    pub fn planner_stats(&self) -> PlannerStats {
        self.planner.stats()
    }

    // -----------------------------------------------------------------------
    // Ingestion, lookup, deletion
    // -----------------------------------------------------------------------

    /// Ingest a JSON request body of the form `{"value": "<string>"}`.
    pub fn create(&self, body: &Value) -> StrIndexResult<Record> {
        match body.get("value") {
            None => Err(StrIndexError::MissingField("value")),
            Some(Value::String(value)) => self.create_value(value),
            Some(_) => Err(StrIndexError::InvalidType {
                field: "value",
                expected: "string",
            }),
        }
    }

    pub fn create_value(&self, value: &str) -> StrIndexResult<Record> {
        let record = Record::new(value);
        self.store.put_if_absent(record.clone()).inspect_err(|_| {
            debug!(id = %record.id, "rejected duplicate string");
        })?;
        info!(id = %record.id, length = record.properties.length, "stored string");
        Ok(record)
    }

    /// Look up a record by its original value.
    pub fn get(&self, value: &str) -> StrIndexResult<Record> {
        let id = compute_content_hash(value);
        self.store
            .get(&id)
            .ok_or_else(|| StrIndexError::NotFound(value.to_string()))
    }

    /// Delete a record by its original value.
    pub fn delete(&self, value: &str) -> StrIndexResult<()> {
        let id = compute_content_hash(value);
        match self.store.delete(&id) {
            Ok(()) => {
                info!(id = %id, "deleted string");
                Ok(())
            }
            Err(StrIndexError::NotFound(_)) => Err(StrIndexError::NotFound(value.to_string())),
            Err(err) => Err(err),
        }
    }

    pub fn list(&self) -> Vec<Record> {
        self.store.list_all()
    }

    // -----------------------------------------------------------------------
    // Query surfaces
    // -----------------------------------------------------------------------

    /// Structured query: every supplied parameter narrows the result.
    pub fn filter(&self, query: &StructuredQuery) -> StrIndexResult<FilterResponse> {
        let filters_applied = query.to_filter_spec().inspect_err(|err| {
            warn!(error = %err, "rejected structured query");
        })?;
        let outcome = filter_snapshot(&filters_applied, self.store.list_all());
        Ok(FilterResponse {
            data: outcome.data,
            count: outcome.count,
            filters_applied,
        })
    }

    /// Natural-language query: interpreted, then run through the same engine
    /// as the structured surface.
    pub fn filter_natural_language(&self, query: &str) -> StrIndexResult<NaturalLanguageResponse> {
        let interpreted_query = self.interpret(query).inspect_err(|err| match err.kind() {
            ErrorKind::ConflictingQuery => warn!(query, error = %err, "rejected conflicting query"),
            _ => debug!(query, error = %err, "rejected natural language query"),
        })?;
        let outcome = filter_snapshot(&interpreted_query.parsed_filters, self.store.list_all());
        Ok(NaturalLanguageResponse {
            data: outcome.data,
            count: outcome.count,
            interpreted_query,
        })
    }

    fn interpret(&self, query: &str) -> StrIndexResult<ParsedQuery> {
        if self.config.query_cache_enabled {
            self.planner.plan(query)
        } else {
            self.planner.interpreter().parse(query)
        }
    }
}
