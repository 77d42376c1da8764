use std::fmt;
use crate::cache::errors::CacheError;
use crate::cache::structs::entry_iterator::EntryIterator;
use crate::cache::traits::cache_backend::CacheBackend;

impl<'a> EntryIterator<'a> {
    pub fn new(backend: &'a dyn CacheBackend) -> Result<EntryIterator<'a>, CacheError> {
        Ok(EntryIterator {
            backend,
            identifiers: backend.entry_identifiers()?.into_iter(),
        })
    }
}

impl Iterator for EntryIterator<'_> {
    type Item = Result<(String, Vec<u8>), CacheError>;

    fn next(&mut self) -> Option<Self::Item> {
        for entry_identifier in self.identifiers.by_ref() {
            // entries removed or expired since the snapshot are skipped
            match self.backend.get(&entry_identifier) {
                Ok(Some(data)) => return Some(Ok((entry_identifier, data))),
                Ok(None) => continue,
                Err(e) => return Some(Err(e)),
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.identifiers.len()))
    }
}

impl fmt::Debug for EntryIterator<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntryIterator")
            .field("backend", &self.backend.kind())
            .field("remaining", &self.identifiers.len())
            .finish()
    }
}
