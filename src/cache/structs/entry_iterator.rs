use crate::cache::traits::cache_backend::CacheBackend;

/// Walks a snapshot of a backend's identifiers, reading each entry lazily.
pub struct EntryIterator<'a> {
    pub(crate) backend: &'a dyn CacheBackend,
    pub(crate) identifiers: std::vec::IntoIter<String>,
}
