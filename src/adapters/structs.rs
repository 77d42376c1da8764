//! Adapter data structures.

/// A single keyed value with hit state and expiration.
pub mod cache_item;

/// Item pool with deferred saves.
pub mod cache_pool;

/// Plain key/value cache.
pub mod simple_cache;
