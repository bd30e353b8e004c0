//! Derived string properties computed once at ingestion time.

use std::collections::{BTreeMap, HashSet};

use crate::indexer::hashing::compute_content_hash;
use crate::models::Properties;

/// Case-insensitive palindrome test over characters.
pub fn is_palindrome(value: &str) -> bool {
    let lowered: Vec<char> = value.to_lowercase().chars().collect();
    lowered.iter().eq(lowered.iter().rev())
}

pub fn word_count(value: &str) -> usize {
    value.split_whitespace().count()
}

pub fn unique_characters(value: &str) -> usize {
    value.chars().collect::<HashSet<char>>().len()
}

/// Single-pass occurrence count per distinct character.
pub fn character_frequency_map(value: &str) -> BTreeMap<char, usize> {
    let mut freq = BTreeMap::new();
    for c in value.chars() {
        *freq.entry(c).or_insert(0) += 1;
    }
    freq
}

/// Compute the full property set for `value`.
pub fn analyze(value: &str) -> Properties {
    Properties {
        length: value.chars().count(),
        is_palindrome: is_palindrome(value),
        unique_characters: unique_characters(value),
        word_count: word_count(value),
        sha256_hash: compute_content_hash(value),
        character_frequency_map: character_frequency_map(value),
    }
}
