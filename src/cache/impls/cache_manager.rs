use std::collections::{BTreeMap, BTreeSet};
use log::{debug, info, warn};
use parking_lot::RwLock;
use crate::cache::enums::frontend::Frontend;
use crate::cache::errors::CacheError;
use crate::cache::structs::cache_factory::CacheFactory;
use crate::cache::structs::cache_manager::CacheManager;
use crate::cache::traits::cache_frontend::CacheFrontend;
use crate::config::structs::cache_config::CacheConfig;
use crate::config::structs::configuration::Configuration;

/// Section whose settings every other cache inherits.
pub const DEFAULT_CACHE_SECTION: &str = "Default";
const LOG_PREFIX: &str = "[CacheManager]";

impl CacheManager {
    pub fn new(factory: CacheFactory, configurations: BTreeMap<String, CacheConfig>) -> CacheManager {
        CacheManager {
            factory,
            configurations,
            caches: RwLock::new(BTreeMap::new()),
            persistent: RwLock::new(BTreeSet::new()),
        }
    }

    pub fn from_configuration(config: &Configuration) -> CacheManager {
        let environment = config.environment.to_environment();
        let locks = config.lock.to_lock_manager(&environment);
        Self::new(CacheFactory::new(environment, locks), config.caches.clone())
    }

    pub fn factory(&self) -> &CacheFactory {
        &self.factory
    }

    /// Settings of `cache_identifier` with `Default` and built-in fallbacks applied.
    pub fn effective_configuration(&self, cache_identifier: &str) -> CacheConfig {
        let fallback = self.configurations.get(DEFAULT_CACHE_SECTION).cloned().unwrap_or_default();
        match self.configurations.get(cache_identifier) {
            Some(config) => config.merged_with(&fallback).resolved(),
            None => fallback.resolved(),
        }
    }

    pub fn register_cache(&self, cache: Frontend, persistent: bool) -> Result<(), CacheError> {
        let identifier = cache.identifier().to_string();
        let mut caches = self.caches.write();
        if caches.contains_key(&identifier) {
            return Err(CacheError::DuplicateIdentifier(identifier));
        }
        if persistent {
            self.persistent.write().insert(identifier.clone());
        }
        debug!("{} Registered cache \"{}\"", LOG_PREFIX, identifier);
        caches.insert(identifier, cache);
        Ok(())
    }

    /// Returns the cache, creating configured caches on first use.
    pub fn get_cache(&self, cache_identifier: &str) -> Result<Frontend, CacheError> {
        if let Some(cache) = self.caches.read().get(cache_identifier) {
            return Ok(cache.clone());
        }
        if !self.is_configured(cache_identifier) {
            return Err(CacheError::NoSuchCache(cache_identifier.to_string()));
        }
        let mut caches = self.caches.write();
        if let Some(cache) = caches.get(cache_identifier) {
            return Ok(cache.clone());
        }
        let cache = self.create_cache(cache_identifier)?;
        caches.insert(cache_identifier.to_string(), cache.clone());
        Ok(cache)
    }

    pub fn has_cache(&self, cache_identifier: &str) -> bool {
        self.caches.read().contains_key(cache_identifier) || self.is_configured(cache_identifier)
    }

    pub fn is_cache_persistent(&self, cache_identifier: &str) -> bool {
        if self.persistent.read().contains(cache_identifier) {
            return true;
        }
        self.is_configured(cache_identifier) && self.effective_configuration(cache_identifier).persistent.unwrap_or(false)
    }

    /// Configured and registered cache identifiers, `Default` excluded.
    pub fn cache_identifiers(&self) -> Vec<String> {
        let mut identifiers: BTreeSet<String> = self.configurations.keys()
            .filter(|id| id.as_str() != DEFAULT_CACHE_SECTION)
            .cloned()
            .collect();
        identifiers.extend(self.caches.read().keys().cloned());
        identifiers.into_iter().collect()
    }

    pub fn flush_caches(&self, flush_persistent: bool) -> Result<(), CacheError> {
        for cache in self.caches_to_flush(flush_persistent)? {
            cache.flush()?;
        }
        info!("{} Flushed all {}caches", LOG_PREFIX, if flush_persistent { "" } else { "non-persistent " });
        Ok(())
    }

    pub fn flush_caches_by_tag(&self, tag: &str, flush_persistent: bool) -> Result<u64, CacheError> {
        let mut flushed = 0;
        for cache in self.caches_to_flush(flush_persistent)? {
            flushed += cache.flush_by_tag(tag)?;
        }
        info!("{} Flushed {} entries tagged \"{}\"", LOG_PREFIX, flushed, tag);
        Ok(flushed)
    }

    pub fn collect_garbage(&self) -> Result<(), CacheError> {
        for cache in self.all_caches()? {
            cache.collect_garbage()?;
        }
        info!("{} Collected garbage of {} caches", LOG_PREFIX, self.caches.read().len());
        Ok(())
    }

    fn is_configured(&self, cache_identifier: &str) -> bool {
        cache_identifier != DEFAULT_CACHE_SECTION && self.configurations.contains_key(cache_identifier)
    }

    fn create_cache(&self, cache_identifier: &str) -> Result<Frontend, CacheError> {
        let config = self.effective_configuration(cache_identifier);
        let cache = self.factory.create_with_serializer(
            cache_identifier,
            config.frontend.unwrap_or_default(),
            config.backend.unwrap_or_default(),
            &config.backend_options.unwrap_or_default(),
            config.serializer.unwrap_or_default(),
        )?;
        if config.persistent.unwrap_or(false) {
            self.persistent.write().insert(cache_identifier.to_string());
        }
        Ok(cache)
    }

    fn all_caches(&self) -> Result<Vec<Frontend>, CacheError> {
        self.cache_identifiers().iter().map(|id| self.get_cache(id)).collect()
    }

    fn caches_to_flush(&self, flush_persistent: bool) -> Result<Vec<Frontend>, CacheError> {
        let mut caches = Vec::new();
        for cache in self.all_caches()? {
            if !flush_persistent && self.is_cache_persistent(cache.identifier()) {
                warn!("{} Skipping persistent cache \"{}\"", LOG_PREFIX, cache.identifier());
                continue;
            }
            caches.push(cache);
        }
        Ok(caches)
    }
}
