use crate::cache::errors::CacheError;
use crate::cache::structs::entry_iterator::EntryIterator;
use crate::cache::traits::cache_backend::CacheBackend;
use crate::cache::validator;

/// Validate-then-delegate operations every frontend offers.
///
/// Implementors only provide their identifier and backend; value typed
/// `set`/`get`/`get_by_tag` live on the concrete frontends.
pub trait CacheFrontend: Send + Sync {
    fn identifier(&self) -> &str;

    fn backend(&self) -> &dyn CacheBackend;

    fn has(&self, entry_identifier: &str) -> Result<bool, CacheError> {
        validator::validate_entry_identifier(entry_identifier)?;
        self.backend().has(entry_identifier)
    }

    fn remove(&self, entry_identifier: &str) -> Result<bool, CacheError> {
        validator::validate_entry_identifier(entry_identifier)?;
        self.backend().remove(entry_identifier)
    }

    fn flush(&self) -> Result<(), CacheError> {
        self.backend().flush()
    }

    fn flush_by_tag(&self, tag: &str) -> Result<u64, CacheError> {
        validator::validate_tag(tag)?;
        self.backend().flush_by_tag(tag)
    }

    fn flush_by_tags(&self, tags: &[String]) -> Result<u64, CacheError> {
        validator::validate_tags(tags)?;
        let mut flushed = 0;
        for tag in tags {
            flushed += self.backend().flush_by_tag(tag)?;
        }
        Ok(flushed)
    }

    fn collect_garbage(&self) -> Result<(), CacheError> {
        self.backend().collect_garbage()
    }

    fn freeze(&self) -> Result<(), CacheError> {
        self.backend().freeze()
    }

    fn is_frozen(&self) -> Result<bool, CacheError> {
        self.backend().is_frozen()
    }

    /// Live entries as raw payloads; see the typed `entries` of each frontend.
    fn raw_entries(&self) -> Result<EntryIterator<'_>, CacheError> {
        EntryIterator::new(self.backend())
    }

    fn is_valid_entry_identifier(&self, entry_identifier: &str) -> bool {
        validator::is_valid_entry_identifier(entry_identifier)
    }

    fn is_valid_tag(&self, tag: &str) -> bool {
        validator::is_valid_tag(tag)
    }
}
