//! Item pool and simple cache adapters over a variable frontend.
//!
//! `CachePool` speaks the item vocabulary (`get_item`, `save`,
//! `save_deferred`, `commit`, ...) and `SimpleCache` the plain key/value one
//! (`get`, `set`, `get_multiple`, ...). Both validate keys exactly like the
//! frontend does and surface `CacheError::InvalidIdentifier` for bad keys.
//!
//! # Deferred saves
//!
//! `CachePool::commit` persists deferred items in insertion order and stops
//! at the first failure: items already written leave the queue, the failing
//! item and everything after it stay deferred and the error is returned.

/// Implementation blocks for adapter types.
pub mod impls;

/// Adapter data structures.
pub mod structs;
