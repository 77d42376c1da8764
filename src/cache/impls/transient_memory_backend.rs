use std::collections::BTreeSet;
use log::{debug, info};
use parking_lot::RwLock;
use crate::cache::enums::backend_kind::BackendKind;
use crate::cache::errors::CacheError;
use crate::cache::structs::backend_options::BackendOptions;
use crate::cache::structs::cache_context::CacheContext;
use crate::cache::structs::environment_configuration::EnvironmentConfiguration;
use crate::cache::structs::transient_memory_backend::{MemoryEntry, MemoryStore, TransientMemoryBackend};
use crate::cache::traits::cache_backend::CacheBackend;
use crate::common::common::{current_timestamp, is_expired, resolve_expiry};
use crate::lock::structs::lock_manager::LockManager;

pub const DEFAULT_LIFETIME: u32 = 3600;
pub const ALLOWED_OPTIONS: &[&str] = &["default_lifetime"];
const LOG_PREFIX: &str = "[TransientMemoryBackend]";

impl MemoryStore {
    fn unlink_tags(&mut self, entry_identifier: &str, tags: &BTreeSet<String>) {
        for tag in tags {
            if let Some(identifiers) = self.tags.get_mut(tag) {
                identifiers.remove(entry_identifier);
                if identifiers.is_empty() {
                    self.tags.remove(tag);
                }
            }
        }
    }

    fn expired_identifiers(&self, now: u64) -> Vec<String> {
        self.entries.iter()
            .filter(|(_, entry)| is_expired(entry.expiry, now))
            .map(|(id, _)| id.clone())
            .collect()
    }

    fn remove_entry(&mut self, entry_identifier: &str) -> Option<MemoryEntry> {
        let entry = self.entries.remove(entry_identifier)?;
        self.unlink_tags(entry_identifier, &entry.tags);
        Some(entry)
    }
}

impl TransientMemoryBackend {
    pub fn new(options: &BackendOptions) -> Result<TransientMemoryBackend, CacheError> {
        options.reject_unknown("transient_memory", ALLOWED_OPTIONS)?;
        Ok(TransientMemoryBackend {
            store: RwLock::new(MemoryStore::default()),
            default_lifetime: options.default_lifetime(DEFAULT_LIFETIME)?,
            cache_identifier: None,
        })
    }

    pub fn build(_environment: &EnvironmentConfiguration, options: &BackendOptions, _locks: &LockManager) -> Result<Box<dyn CacheBackend>, CacheError> {
        Ok(Box::new(Self::new(options)?))
    }

    /// Number of stored entries, expired ones included until collected.
    pub fn len(&self) -> usize {
        self.store.read().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn frozen_error(&self) -> CacheError {
        CacheError::Frozen(self.cache_identifier.clone().unwrap_or_default())
    }
}

impl CacheBackend for TransientMemoryBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::transient_memory
    }

    fn set_cache(&mut self, cache: &CacheContext) -> Result<(), CacheError> {
        self.cache_identifier = Some(cache.identifier.clone());
        Ok(())
    }

    fn set(&self, entry_identifier: &str, data: &[u8], tags: &[String], lifetime: Option<u32>) -> Result<(), CacheError> {
        let expiry = resolve_expiry(lifetime, self.default_lifetime, current_timestamp());
        let tags: BTreeSet<String> = tags.iter().cloned().collect();
        let mut store = self.store.write();
        if store.frozen {
            return Err(self.frozen_error());
        }
        store.remove_entry(entry_identifier);
        for tag in &tags {
            store.tags.entry(tag.clone()).or_default().insert(entry_identifier.to_string());
        }
        store.entries.insert(entry_identifier.to_string(), MemoryEntry {
            data: data.to_vec(),
            tags,
            expiry,
        });
        Ok(())
    }

    fn get(&self, entry_identifier: &str) -> Result<Option<Vec<u8>>, CacheError> {
        let now = current_timestamp();
        Ok(self.store.read().entries.get(entry_identifier)
            .filter(|entry| !is_expired(entry.expiry, now))
            .map(|entry| entry.data.clone()))
    }

    fn has(&self, entry_identifier: &str) -> Result<bool, CacheError> {
        let now = current_timestamp();
        Ok(self.store.read().entries.get(entry_identifier).is_some_and(|entry| !is_expired(entry.expiry, now)))
    }

    fn remove(&self, entry_identifier: &str) -> Result<bool, CacheError> {
        let mut store = self.store.write();
        if store.frozen {
            return Err(self.frozen_error());
        }
        Ok(store.remove_entry(entry_identifier).is_some())
    }

    fn find_identifiers_by_tag(&self, tag: &str) -> Result<BTreeSet<String>, CacheError> {
        let now = current_timestamp();
        let store = self.store.read();
        let Some(identifiers) = store.tags.get(tag) else {
            return Ok(BTreeSet::new());
        };
        Ok(identifiers.iter()
            .filter(|id| store.entries.get(id.as_str()).is_some_and(|entry| !is_expired(entry.expiry, now)))
            .cloned()
            .collect())
    }

    fn flush(&self) -> Result<(), CacheError> {
        let mut store = self.store.write();
        store.entries.clear();
        store.tags.clear();
        store.frozen = false;
        info!("{} Flushed cache \"{}\"", LOG_PREFIX, self.cache_identifier.as_deref().unwrap_or_default());
        Ok(())
    }

    fn flush_by_tag(&self, tag: &str) -> Result<u64, CacheError> {
        let mut store = self.store.write();
        if store.frozen && store.tags.get(tag).is_some_and(|identifiers| !identifiers.is_empty()) {
            return Err(self.frozen_error());
        }
        let identifiers = store.tags.remove(tag).unwrap_or_default();
        let mut flushed = 0;
        for entry_identifier in &identifiers {
            if store.remove_entry(entry_identifier).is_some() {
                flushed += 1;
            }
        }
        debug!("{} Flushed {} entries tagged \"{}\"", LOG_PREFIX, flushed, tag);
        Ok(flushed)
    }

    fn collect_garbage(&self) -> Result<(), CacheError> {
        let now = current_timestamp();
        let mut store = self.store.write();
        if store.frozen {
            return Ok(());
        }
        let expired = store.expired_identifiers(now);
        for entry_identifier in &expired {
            store.remove_entry(entry_identifier);
        }
        debug!("{} Garbage collection removed {} expired entries", LOG_PREFIX, expired.len());
        Ok(())
    }

    fn entry_identifiers(&self) -> Result<Vec<String>, CacheError> {
        let now = current_timestamp();
        let mut identifiers: Vec<String> = self.store.read().entries.iter()
            .filter(|(_, entry)| !is_expired(entry.expiry, now))
            .map(|(id, _)| id.clone())
            .collect();
        identifiers.sort();
        Ok(identifiers)
    }

    fn freeze(&self) -> Result<(), CacheError> {
        let now = current_timestamp();
        let mut store = self.store.write();
        if store.frozen {
            return Err(self.frozen_error());
        }
        for entry_identifier in store.expired_identifiers(now) {
            store.remove_entry(&entry_identifier);
        }
        for entry in store.entries.values_mut() {
            entry.expiry = 0;
        }
        store.frozen = true;
        info!("{} Froze cache \"{}\" with {} entries", LOG_PREFIX, self.cache_identifier.as_deref().unwrap_or_default(), store.entries.len());
        Ok(())
    }

    fn is_frozen(&self) -> Result<bool, CacheError> {
        Ok(self.store.read().frozen)
    }
}
