//! Cache core: validation, storage backends, frontends and factory.
//!
//! A cache is a *frontend* owning exactly one *backend*. The frontend
//! validates entry identifiers and tags, turns values into bytes and hands
//! them to the backend, which stores them together with their tags and
//! expiry.
//!
//! # Backends
//!
//! - **file**: one file per entry under a sharded directory tree, atomic
//!   writes, tag markers, advisory locking for every mutation
//! - **transient_memory**: process local map, gone on restart
//! - **null**: stores nothing, every read misses
//! - **memcache** and **redis**: shared key/value servers
//!
//! # Example
//!
//! ```rust,ignore
//! use tagged_cache::cache::structs::cache_factory::CacheFactory;
//!
//! let factory = CacheFactory::new(environment, locks);
//! let cache = factory.create("Pages", FrontendKind::variable, BackendKind::file, &BackendOptions::new())?;
//! let pages = cache.as_variable()?;
//! pages.set("home", &page, &["navigation".to_string()], None)?;
//! ```

/// Backend, frontend and serializer kind enumerations.
pub mod enums;

/// Error types for cache operations.
pub mod errors;

/// Implementation blocks for cache types.
pub mod impls;

/// Data structures for backends, frontends, factory and manager.
pub mod structs;

/// Backend, frontend and serializer traits.
pub mod traits;

/// Entry identifier and tag grammar.
pub mod validator;

#[cfg(test)]
mod tests;
