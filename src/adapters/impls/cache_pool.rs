use std::sync::Arc;
use chrono::Utc;
use log::{debug, warn};
use parking_lot::Mutex;
use serde::Serialize;
use serde::de::DeserializeOwned;
use crate::adapters::structs::cache_item::CacheItem;
use crate::adapters::structs::cache_pool::CachePool;
use crate::cache::enums::frontend::Frontend;
use crate::cache::errors::CacheError;
use crate::cache::structs::variable_frontend::VariableFrontend;
use crate::cache::traits::cache_frontend::CacheFrontend;
use crate::cache::validator;

const LOG_PREFIX: &str = "[CachePool]";

impl<T: Serialize + DeserializeOwned> CachePool<T> {
    pub fn new(frontend: Arc<VariableFrontend>) -> CachePool<T> {
        CachePool {
            frontend,
            deferred: Mutex::new(Vec::new()),
        }
    }

    pub fn from_cache(cache: &Frontend) -> Result<CachePool<T>, CacheError> {
        Ok(Self::new(cache.as_variable()?))
    }

    /// Looks the key up in storage; deferred items are not consulted.
    pub fn get_item(&self, key: &str) -> Result<CacheItem<T>, CacheError> {
        match self.frontend.get::<Option<T>>(key)? {
            Some(value) => Ok(CacheItem::hit(key, value)),
            None => Ok(CacheItem::new(key)),
        }
    }

    /// Items in the order of `keys`.
    pub fn get_items<S: AsRef<str>>(&self, keys: &[S]) -> Result<Vec<CacheItem<T>>, CacheError> {
        keys.iter().map(|key| self.get_item(key.as_ref())).collect()
    }

    pub fn has_item(&self, key: &str) -> Result<bool, CacheError> {
        self.frontend.has(key)
    }

    /// Flushes the underlying cache and drops pending deferred items.
    pub fn clear(&self) -> Result<bool, CacheError> {
        self.deferred.lock().clear();
        self.frontend.flush()?;
        Ok(true)
    }

    pub fn delete_item(&self, key: &str) -> Result<bool, CacheError> {
        self.frontend.remove(key)?;
        Ok(true)
    }

    /// Validates every key before deleting any.
    pub fn delete_items<S: AsRef<str>>(&self, keys: &[S]) -> Result<bool, CacheError> {
        for key in keys {
            validator::validate_entry_identifier(key.as_ref())?;
        }
        for key in keys {
            self.frontend.remove(key.as_ref())?;
        }
        Ok(true)
    }

    pub fn save(&self, item: &CacheItem<T>) -> Result<bool, CacheError> {
        match item.lifetime_at(Utc::now()) {
            Some(lifetime) => self.frontend.set(item.key(), &item.value, &[], lifetime)?,
            None => {
                debug!("{} \"{}\" expired before it was saved, removing it", LOG_PREFIX, item.key());
                self.frontend.remove(item.key())?;
            }
        }
        Ok(true)
    }

    pub fn save_deferred(&self, item: CacheItem<T>) -> Result<bool, CacheError> {
        validator::validate_entry_identifier(item.key())?;
        self.deferred.lock().push(item);
        Ok(true)
    }

    pub fn deferred_count(&self) -> usize {
        self.deferred.lock().len()
    }

    /// Persists deferred items in insertion order, stopping at the first failure.
    pub fn commit(&self) -> Result<bool, CacheError> {
        let mut deferred = self.deferred.lock();
        let mut saved = 0;
        let mut failure = None;
        for item in deferred.iter() {
            if let Err(error) = self.save(item) {
                failure = Some(error);
                break;
            }
            saved += 1;
        }
        deferred.drain(..saved);
        match failure {
            Some(error) => {
                warn!("{} Commit stopped after {} item(s), {} remain deferred: {}", LOG_PREFIX, saved, deferred.len(), error);
                Err(error)
            }
            None => Ok(true),
        }
    }
}

impl<T> Drop for CachePool<T> {
    fn drop(&mut self) {
        let pending = self.deferred.get_mut().len();
        if pending > 0 {
            warn!("{} Dropping {} uncommitted deferred item(s) for cache \"{}\"", LOG_PREFIX, pending, self.frontend.identifier());
        }
    }
}
