//! Shared guardrails for query payload bounds and cache sizing.

// Natural-language query guards
pub const MAX_QUERY_LENGTH: usize = 512;
pub const MIN_QUERY_LENGTH: usize = 16;

// Interpretation cache guards
pub const DEFAULT_PLANNER_ENTRIES: usize = 256;
pub const MAX_PLANNER_ENTRIES: usize = 4096;

pub fn clamp_int(value: i64, minimum: i64, maximum: i64) -> i64 {
    value.max(minimum).min(maximum)
}

pub fn clamp_query_length(value: i64) -> usize {
    clamp_int(value, MIN_QUERY_LENGTH as i64, MAX_QUERY_LENGTH as i64) as usize
}

pub fn clamp_planner_entries(value: i64) -> usize {
    clamp_int(value, 1, MAX_PLANNER_ENTRIES as i64) as usize
}

/// Trimmed `query`, or `None` when it is longer than `limit` characters.
pub fn bounded_query(query: &str, limit: usize) -> Option<&str> {
    let stripped = query.trim();
    match stripped.char_indices().nth(limit) {
        Some(_) => None,
        None => Some(stripped),
    }
}
