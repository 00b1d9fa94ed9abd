//! Seeded in-memory stores.

use pstore_core::MemoryStore;

/// Build a store with the given plain parameters and page limit.
pub fn seeded_store(page_size: usize, parameters: &[(&str, &str)]) -> MemoryStore {
    MemoryStore::with_page_size(page_size).with_parameters(parameters.iter().copied())
}

/// `count` distinct, zero-padded names under `prefix` (sorted order matches
/// numeric order).
pub fn bulk_names(prefix: &str, count: usize) -> Vec<String> {
    let prefix = prefix.trim_end_matches('/');
    (0..count).map(|i| format!("{}/{:04}", prefix, i)).collect()
}
