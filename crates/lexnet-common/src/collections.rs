//! Collection type aliases used across lexnet.
//!
//! Every hashed collection in the workspace goes through these aliases so
//! hashing stays consistent (FxHash everywhere) and can be swapped in one
//! place.
//!
//! | Type | Use Case |
//! |------|----------|
//! | [`LexMap`] | Single-threaded hash map (indexes built at load time) |
//! | [`LexSet`] | Single-threaded hash set (visited sets during traversal) |
//! | [`LexConcurrentMap`] | Multi-threaded hash map (similarity caches) |
//! | [`LexIndexMap`] | Insertion-order preserving map (query answers) |
//!
//! # Example
//!
//! ```rust
//! use lexnet_common::collections::{lex_map, lex_set};
//!
//! let mut lemmas = lex_map::<&str, u32>();
//! lemmas.insert("taal", 3);
//!
//! let mut seen = lex_set::<u32>();
//! assert!(seen.insert(7));
//! assert!(!seen.insert(7));
//! ```

use rustc_hash::FxBuildHasher;

/// HashMap with FxHash (fast, non-cryptographic).
pub type LexMap<K, V> = hashbrown::HashMap<K, V, FxBuildHasher>;

/// HashSet with FxHash.
pub type LexSet<T> = hashbrown::HashSet<T, FxBuildHasher>;

/// Concurrent HashMap for caches shared between query threads.
pub type LexConcurrentMap<K, V> = dashmap::DashMap<K, V, FxBuildHasher>;

/// Ordered map preserving insertion order.
///
/// Answers are built in discovery order and must serialize in that order.
pub type LexIndexMap<K, V> = indexmap::IndexMap<K, V, FxBuildHasher>;

/// Creates a new empty [`LexMap`].
#[inline]
#[must_use]
pub fn lex_map<K, V>() -> LexMap<K, V> {
    LexMap::with_hasher(FxBuildHasher)
}

/// Creates a new [`LexMap`] with the specified capacity.
#[inline]
#[must_use]
pub fn lex_map_with_capacity<K, V>(capacity: usize) -> LexMap<K, V> {
    LexMap::with_capacity_and_hasher(capacity, FxBuildHasher)
}

/// Creates a new empty [`LexSet`].
#[inline]
#[must_use]
pub fn lex_set<T>() -> LexSet<T> {
    LexSet::with_hasher(FxBuildHasher)
}

/// Creates a new empty [`LexConcurrentMap`].
#[inline]
#[must_use]
pub fn lex_concurrent_map<K, V>() -> LexConcurrentMap<K, V>
where
    K: Eq + std::hash::Hash,
{
    LexConcurrentMap::with_hasher(FxBuildHasher)
}

/// Creates a new empty [`LexIndexMap`].
#[inline]
#[must_use]
pub fn lex_index_map<K, V>() -> LexIndexMap<K, V> {
    LexIndexMap::with_hasher(FxBuildHasher)
}
