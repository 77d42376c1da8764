//! Implementation blocks for adapter types.

pub mod cache_item;
pub mod cache_pool;
pub mod simple_cache;
