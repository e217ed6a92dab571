//! Stable deduplication of merged query results.
//!
//! Expanding a compound selector queries overlapping data, so the same
//! dashboard or alert can arrive through more than one OR-branch.

use std::collections::HashSet;
use std::hash::Hash;

/// Remove duplicates by key, keeping the first occurrence of each key in
/// the original order.
pub fn dedupe_by<T, K, F>(items: impl IntoIterator<Item = T>, mut key: F) -> Vec<T>
where
    K: Eq + Hash,
    F: FnMut(&T) -> K,
{
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(key(item)))
        .collect()
}
