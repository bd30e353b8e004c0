//! Shared typed models used across the store, query and binding layers.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::indexer::properties::analyze;
use crate::query::filter::FilterSpec;

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

/// Properties derived from a string value. Never updated after analysis.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Properties {
    pub length: usize,
    pub is_palindrome: bool,
    pub unique_characters: usize,
    pub word_count: usize,
    pub sha256_hash: String,
    pub character_frequency_map: BTreeMap<char, usize>,
}

// ---------------------------------------------------------------------------
// Record
// ---------------------------------------------------------------------------

/// A stored string together with its content hash and derived properties.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub id: String,
    pub value: String,
    pub properties: Properties,
    pub created_at: DateTime<Utc>,
}

impl Record {
    /// Analyze `value` and stamp the record with the current time.
    pub fn new(value: impl Into<String>) -> Self {
        Self::with_created_at(value, Utc::now())
    }

    pub fn with_created_at(value: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        let value = value.into();
        let properties = analyze(&value);
        Self {
            id: properties.sha256_hash.clone(),
            value,
            properties,
            created_at,
        }
    }
}

// ---------------------------------------------------------------------------
// Query envelopes
// ---------------------------------------------------------------------------

/// A natural-language query alongside the filters derived from it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedQuery {
    pub original: String,
    pub parsed_filters: FilterSpec,
}

/// Response for the structured query surface.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterResponse {
    pub data: Vec<Record>,
    pub count: usize,
    pub filters_applied: FilterSpec,
}

/// Response for the natural-language query surface.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NaturalLanguageResponse {
    pub data: Vec<Record>,
    pub count: usize,
    pub interpreted_query: ParsedQuery,
}
