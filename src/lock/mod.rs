//! Advisory locking module.
//!
//! Guards concurrent access to shared resources (cache entries, tag indexes,
//! whole cache namespaces) across threads and processes using advisory file
//! locks.
//!
//! # Architecture
//!
//! - `LockStrategy` trait defines acquire/release over a named subject
//! - `FlockLockStrategy` implements it with one lock file per hashed subject
//! - `LockManager` is the injectable entry point handing out `Lock` guards
//! - `Lock` releases its strategy when dropped
//!
//! # Example
//!
//! ```rust,ignore
//! use tagged_cache::lock::structs::lock_manager::LockManager;
//!
//! let locks = LockManager::new("/tmp/cache/locks");
//! {
//!     let _guard = locks.acquire("entries/Pages", true)?;
//!     // critical section
//! }
//! ```

/// Error types for lock operations.
pub mod errors;

/// Implementation blocks for lock types.
pub mod impls;

/// Lock data structures.
pub mod structs;

/// Lock strategy trait definitions.
pub mod traits;
