use std::collections::BTreeSet;
use crate::cache::enums::backend_kind::BackendKind;
use crate::cache::errors::CacheError;
use crate::cache::structs::cache_context::CacheContext;

/// Storage strategy behind a cache frontend.
///
/// Backends store opaque byte payloads keyed by entry identifier, maintain
/// the tag index and enforce expiry. Absence is never an error: `get` yields
/// `Ok(None)` and `has`/`remove` yield `Ok(false)` for unknown identifiers.
///
/// `lifetime` is `None` for entries that never expire, `Some(0)` for the
/// backend's default lifetime and `Some(n)` for `n` seconds from now.
#[cfg_attr(test, mockall::automock)]
pub trait CacheBackend: Send + Sync {
    fn kind(&self) -> BackendKind;

    /// Binds the backend to the cache it serves; derives the cache namespace.
    fn set_cache(&mut self, cache: &CacheContext) -> Result<(), CacheError>;

    /// Stores `data`, replacing any previous entry and its tag associations.
    fn set(&self, entry_identifier: &str, data: &[u8], tags: &[String], lifetime: Option<u32>) -> Result<(), CacheError>;

    fn get(&self, entry_identifier: &str) -> Result<Option<Vec<u8>>, CacheError>;

    fn has(&self, entry_identifier: &str) -> Result<bool, CacheError>;

    /// Removes the entry and its tag associations; `true` if something was removed.
    fn remove(&self, entry_identifier: &str) -> Result<bool, CacheError>;

    fn find_identifiers_by_tag(&self, tag: &str) -> Result<BTreeSet<String>, CacheError>;

    /// Removes every entry of this cache.
    fn flush(&self) -> Result<(), CacheError>;

    /// Removes every entry tagged with `tag`, returning how many were affected.
    fn flush_by_tag(&self, tag: &str) -> Result<u64, CacheError>;

    /// Physically removes expired entries and prunes stale tag associations.
    fn collect_garbage(&self) -> Result<(), CacheError>;

    /// Identifiers of every live entry, in a stable order.
    fn entry_identifiers(&self) -> Result<Vec<String>, CacheError>;

    /// Makes the cache read-only until the next `flush`.
    ///
    /// Entries present at freeze time stop expiring. `set` and `remove` fail
    /// with `CacheError::Frozen`, as does `flush_by_tag` when the tag matches
    /// an entry, and garbage collection does nothing. Freezing an already
    /// frozen cache is an error.
    fn freeze(&self) -> Result<(), CacheError> {
        Err(CacheError::Unsupported { backend: self.kind().to_string(), operation: "freeze".to_string() })
    }

    fn is_frozen(&self) -> Result<bool, CacheError> {
        Ok(false)
    }
}
