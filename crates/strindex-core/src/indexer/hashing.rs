//! Content addressing for stored strings.

use sha2::{Digest, Sha256};

/// Length of a content hash in hex characters.
pub const CONTENT_HASH_LEN: usize = 64;

/// SHA-256 hex digest of `value`'s UTF-8 bytes.
pub fn compute_content_hash(value: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(value.as_bytes());
    format!("{:x}", hasher.finalize())
}
