//! Environment-driven service configuration.

use crate::query::guards::{
    clamp_planner_entries, clamp_query_length, DEFAULT_PLANNER_ENTRIES, MAX_QUERY_LENGTH,
};

pub const ENV_MAX_QUERY_LENGTH: &str = "STRINDEX_MAX_QUERY_LENGTH";
pub const ENV_QUERY_CACHE: &str = "STRINDEX_QUERY_CACHE";
pub const ENV_QUERY_CACHE_SIZE: &str = "STRINDEX_QUERY_CACHE_SIZE";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServiceConfig {
    /// Longest natural-language query accepted, in characters.
    pub max_query_length: usize,
    /// Whether successful interpretations are memoized.
    pub query_cache_enabled: bool,
    pub query_cache_entries: usize,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            max_query_length: MAX_QUERY_LENGTH,
            query_cache_enabled: true,
            query_cache_entries: DEFAULT_PLANNER_ENTRIES,
        }
    }
}

impl ServiceConfig {
    /// Read overrides from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup. Unparsable values fall back
    /// to defaults; numeric values are clamped to the query guards.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let max_query_length = lookup(ENV_MAX_QUERY_LENGTH)
            .and_then(|v| v.trim().parse::<i64>().ok())
            .map(clamp_query_length)
            .unwrap_or(defaults.max_query_length);

        let query_cache_enabled = match lookup(ENV_QUERY_CACHE) {
            Some(val) => {
                let v = val.trim().to_lowercase();
                !matches!(v.as_str(), "0" | "false" | "no" | "off")
            }
            None => defaults.query_cache_enabled,
        };

        let query_cache_entries = lookup(ENV_QUERY_CACHE_SIZE)
            .and_then(|v| v.trim().parse::<i64>().ok())
            .map(clamp_planner_entries)
            .unwrap_or(defaults.query_cache_entries);

        Self {
            max_query_length,
            query_cache_enabled,
            query_cache_entries,
        }
    }
}
