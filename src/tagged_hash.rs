//! BIP-340 tagged hashing: `SHA256(SHA256(tag) || SHA256(tag) || data)`.
//!
//! Distinct tags keep the digests used for auxiliary randomness, nonces, and challenges
//! in separate domains. [TagCache] memoizes the per-tag prefix digest; the uncached
//! [tagged_hash] always produces the same output.

use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::sync::RwLock;

pub const AUX_TAG: &str = "BIP0340/aux";
pub const NONCE_TAG: &str = "BIP0340/nonce";
pub const CHALLENGE_TAG: &str = "BIP0340/challenge";

/// SHA-256 of `tag`, the prefix block of every tagged hash.
pub fn tag_prefix(tag: &str) -> [u8; 32] {
    Sha256::digest(tag.as_bytes()).into()
}

/// Computes the tagged hash of the concatenation of `parts`.
pub fn tagged_hash(tag: &str, parts: &[&[u8]]) -> [u8; 32] {
    hash_with_prefix(&tag_prefix(tag), parts)
}

fn hash_with_prefix(prefix: &[u8; 32], parts: &[&[u8]]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(prefix);
    hasher.update(prefix);
    for part in parts {
        hasher.update(part);
    }
    hasher.finalize().into()
}

/// Shared memo of tag prefix digests.
///
/// Safe to share between threads. A poisoned lock only disables memoization.
#[derive(Debug, Default)]
pub struct TagCache {
    prefixes: RwLock<HashMap<String, [u8; 32]>>,
}

impl TagCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the prefix digest for `tag`, computing and storing it on first use.
    pub fn prefix(&self, tag: &str) -> [u8; 32] {
        if let Ok(prefixes) = self.prefixes.read() {
            if let Some(prefix) = prefixes.get(tag) {
                return *prefix;
            }
        }
        let prefix = tag_prefix(tag);
        if let Ok(mut prefixes) = self.prefixes.write() {
            prefixes.insert(tag.to_string(), prefix);
        }
        prefix
    }

    /// Same output as [tagged_hash], reusing the memoized prefix.
    pub fn hash(&self, tag: &str, parts: &[&[u8]]) -> [u8; 32] {
        hash_with_prefix(&self.prefix(tag), parts)
    }

    /// Number of memoized tags.
    pub fn len(&self) -> usize {
        self.prefixes.read().map(|p| p.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
