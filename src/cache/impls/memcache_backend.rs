use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;
use log::{debug, info};
use parking_lot::Mutex;
use crate::cache::enums::backend_kind::BackendKind;
use crate::cache::errors::CacheError;
use crate::cache::structs::backend_options::BackendOptions;
use crate::cache::structs::cache_context::CacheContext;
use crate::cache::structs::environment_configuration::EnvironmentConfiguration;
use crate::cache::structs::memcache_backend::MemcacheBackend;
use crate::cache::traits::cache_backend::CacheBackend;
use crate::common::common::{current_timestamp, namespace_hash};
use crate::lock::structs::lock::Lock;
use crate::lock::structs::lock_manager::LockManager;

pub const DEFAULT_LIFETIME: u32 = 3600;
pub const ALLOWED_OPTIONS: &[&str] = &["servers", "default_lifetime"];
pub const MAXIMUM_KEY_LENGTH: usize = 250;
/// Largest value a default memcached slab accepts.
pub const MAXIMUM_BUCKET_SIZE: usize = 1_048_534;
const CHUNK_SIZE: usize = MAXIMUM_BUCKET_SIZE - 1024;
/// Lifetimes above this are interpreted by memcached as unix timestamps.
const RELATIVE_EXPIRATION_LIMIT: u64 = 2_592_000;
const INLINE_HEADER: u8 = 0;
const CHUNKED_HEADER: u8 = 1;
const NAMESPACE_TAG_PREFIX: &str = "%NAMESPACE%";
const LOG_PREFIX: &str = "[MemcacheBackend]";

/// Accepts `host:port`, `tcp://host:port` and `memcache://host:port`.
pub fn normalize_server(server: &str) -> String {
    let server = server.trim();
    if let Some(address) = server.strip_prefix("tcp://") {
        return format!("memcache://{}", address);
    }
    if server.contains("://") {
        return server.to_string();
    }
    format!("memcache://{}", server)
}

/// Translates a lifetime into the expiration value memcached expects.
pub fn memcache_expiration(lifetime: Option<u32>, default_lifetime: u32, now: u64) -> u32 {
    let seconds = match lifetime {
        None => 0,
        Some(0) => default_lifetime as u64,
        Some(seconds) => seconds as u64,
    };
    if seconds > RELATIVE_EXPIRATION_LIMIT {
        return u32::try_from(now + seconds).unwrap_or(u32::MAX);
    }
    seconds as u32
}

/// Rebuilds a payload from the value stored under its main key.
///
/// `chunk` fetches chunk `n` (1-based) of a chunked payload. A missing chunk
/// or an unknown header makes the whole entry a miss.
pub(crate) fn assemble_payload<F>(value: &[u8], mut chunk: F) -> Result<Option<Vec<u8>>, CacheError>
where
    F: FnMut(usize) -> Result<Option<Vec<u8>>, CacheError>,
{
    if let Some(chunks) = chunk_count(value) {
        let mut data = Vec::with_capacity(chunks * CHUNK_SIZE);
        for number in 1..=chunks {
            match chunk(number)? {
                Some(part) => data.extend_from_slice(&part),
                None => return Ok(None),
            }
        }
        return Ok(Some(data));
    }
    match value.split_first() {
        Some((&INLINE_HEADER, data)) => Ok(Some(data.to_vec())),
        _ => Ok(None),
    }
}

fn chunk_count(value: &[u8]) -> Option<usize> {
    let marker = value.strip_prefix(&[CHUNKED_HEADER])?;
    std::str::from_utf8(marker).ok()?.strip_prefix("chunked:")?.parse().ok()
}

fn split_list(value: Option<String>) -> Vec<String> {
    value
        .map(|list| list.split(',').filter(|item| !item.is_empty()).map(String::from).collect())
        .unwrap_or_default()
}

impl MemcacheBackend {
    pub fn new(environment: &EnvironmentConfiguration, options: &BackendOptions, locks: &LockManager) -> Result<MemcacheBackend, CacheError> {
        options.reject_unknown("memcache", ALLOWED_OPTIONS)?;
        let servers: Vec<String> = options.get_str_list("servers")?
            .unwrap_or_default()
            .iter()
            .map(|server| normalize_server(server))
            .collect();
        if servers.is_empty() {
            return Err(CacheError::InvalidBackendOption("the memcache backend requires at least one entry in \"servers\"".to_string()));
        }
        let default_lifetime = options.default_lifetime(DEFAULT_LIFETIME)?;
        let client = memcache::Client::connect(servers.clone())?;
        info!("{} Connected to {}", LOG_PREFIX, servers.join(", "));
        Ok(MemcacheBackend {
            client: Arc::new(Mutex::new(client)),
            environment: environment.clone(),
            locks: locks.clone(),
            servers,
            default_lifetime,
            cache_identifier: None,
            prefix: String::new(),
        })
    }

    pub fn build(environment: &EnvironmentConfiguration, options: &BackendOptions, locks: &LockManager) -> Result<Box<dyn CacheBackend>, CacheError> {
        Ok(Box::new(Self::new(environment, options, locks)?))
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    fn key(&self, suffix: &str) -> Result<String, CacheError> {
        if self.cache_identifier.is_none() {
            return Err(CacheError::BackendError("memcache backend has not been bound to a cache yet".to_string()));
        }
        let key = format!("{}{}", self.prefix, suffix);
        if key.len() > MAXIMUM_KEY_LENGTH {
            return Err(CacheError::BackendError(format!(
                "memcache key exceeds {} characters: {}", MAXIMUM_KEY_LENGTH, key
            )));
        }
        Ok(key)
    }

    fn namespace_tag(&self) -> String {
        format!("{}{}", NAMESPACE_TAG_PREFIX, self.cache_identifier.as_deref().unwrap_or_default())
    }

    fn lock_index(&self) -> Result<Lock, CacheError> {
        Ok(self.locks.acquire(&format!("memcache#{}", self.prefix), true)?)
    }

    fn get_list(&self, key: &str) -> Result<Vec<String>, CacheError> {
        Ok(split_list(self.client.lock().get::<String>(key)?))
    }

    fn set_list(&self, key: &str, values: &[String]) -> Result<(), CacheError> {
        let client = self.client.lock();
        if values.is_empty() {
            client.delete(key)?;
        } else {
            client.set(key, values.join(",").as_str(), 0)?;
        }
        Ok(())
    }

    fn tags_of(&self, entry_identifier: &str) -> Result<Vec<String>, CacheError> {
        self.get_list(&self.key(&format!("ident_{}", entry_identifier))?)
    }

    fn raw_identifiers_by_tag(&self, tag: &str) -> Result<Vec<String>, CacheError> {
        self.get_list(&self.key(&format!("tag_{}", tag))?)
    }

    /// Callers hold the index lock.
    fn add_identifier_to_tags(&self, entry_identifier: &str, tags: &[String]) -> Result<(), CacheError> {
        for tag in tags {
            let mut identifiers = self.raw_identifiers_by_tag(tag)?;
            if !identifiers.iter().any(|id| id == entry_identifier) {
                identifiers.push(entry_identifier.to_string());
                self.set_list(&self.key(&format!("tag_{}", tag))?, &identifiers)?;
            }
        }
        self.set_list(&self.key(&format!("ident_{}", entry_identifier))?, tags)
    }

    /// Callers hold the index lock.
    fn remove_identifier_from_all_tags(&self, entry_identifier: &str) -> Result<(), CacheError> {
        for tag in self.tags_of(entry_identifier)? {
            let mut identifiers = self.raw_identifiers_by_tag(&tag)?;
            let before = identifiers.len();
            identifiers.retain(|id| id != entry_identifier);
            if identifiers.len() != before {
                self.set_list(&self.key(&format!("tag_{}", tag))?, &identifiers)?;
            }
        }
        self.client.lock().delete(&self.key(&format!("ident_{}", entry_identifier))?)?;
        Ok(())
    }

    fn delete_payload(&self, key: &str) -> Result<bool, CacheError> {
        let client = self.client.lock();
        if let Some(value) = client.get::<Vec<u8>>(key)?
            && let Some(chunks) = chunk_count(&value)
        {
            for number in 1..=chunks {
                client.delete(&format!("{}_chunk_{}", key, number))?;
            }
        }
        Ok(client.delete(key)?)
    }

    fn write_payload(&self, key: &str, data: &[u8], expiration: u32) -> Result<(), CacheError> {
        let client = self.client.lock();
        if data.len() < MAXIMUM_BUCKET_SIZE {
            let mut value = Vec::with_capacity(data.len() + 1);
            value.push(INLINE_HEADER);
            value.extend_from_slice(data);
            client.set(key, value.as_slice(), expiration)?;
            return Ok(());
        }
        let last_chunk_key = format!("{}_chunk_{}", key, data.len().div_ceil(CHUNK_SIZE));
        if last_chunk_key.len() > MAXIMUM_KEY_LENGTH {
            return Err(CacheError::BackendError(format!(
                "memcache key exceeds {} characters: {}", MAXIMUM_KEY_LENGTH, last_chunk_key
            )));
        }
        let mut chunks = 0;
        for (index, chunk) in data.chunks(CHUNK_SIZE).enumerate() {
            client.set(&format!("{}_chunk_{}", key, index + 1), chunk, expiration)?;
            chunks = index + 1;
        }
        let mut marker = vec![CHUNKED_HEADER];
        marker.extend_from_slice(format!("chunked:{}", chunks).as_bytes());
        client.set(key, marker.as_slice(), expiration)?;
        debug!("{} Stored {} in {} chunks", LOG_PREFIX, key, chunks);
        Ok(())
    }

    fn read_payload(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        let client = self.client.lock();
        let Some(value) = client.get::<Vec<u8>>(key)? else {
            return Ok(None);
        };
        assemble_payload(&value, |number| Ok(client.get::<Vec<u8>>(&format!("{}_chunk_{}", key, number))?))
    }
}

impl CacheBackend for MemcacheBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::memcache
    }

    fn set_cache(&mut self, cache: &CacheContext) -> Result<(), CacheError> {
        self.prefix = format!("Cache_{}_", namespace_hash(self.environment.application_identifier(), &cache.identifier));
        self.cache_identifier = Some(cache.identifier.clone());
        Ok(())
    }

    #[tracing::instrument(level = "debug", skip_all)]
    fn set(&self, entry_identifier: &str, data: &[u8], tags: &[String], lifetime: Option<u32>) -> Result<(), CacheError> {
        let key = self.key(entry_identifier)?;
        let expiration = memcache_expiration(lifetime, self.default_lifetime, current_timestamp());
        let mut all_tags = tags.to_vec();
        all_tags.push(self.namespace_tag());

        let _lock = self.lock_index()?;
        self.delete_payload(&key)?;
        self.write_payload(&key, data, expiration)?;
        self.remove_identifier_from_all_tags(entry_identifier)?;
        self.add_identifier_to_tags(entry_identifier, &all_tags)?;
        Ok(())
    }

    #[tracing::instrument(level = "debug", skip_all)]
    fn get(&self, entry_identifier: &str) -> Result<Option<Vec<u8>>, CacheError> {
        self.read_payload(&self.key(entry_identifier)?)
    }

    /// Same answer as `get`: an entry whose chunks were evicted is absent.
    fn has(&self, entry_identifier: &str) -> Result<bool, CacheError> {
        Ok(self.read_payload(&self.key(entry_identifier)?)?.is_some())
    }

    fn remove(&self, entry_identifier: &str) -> Result<bool, CacheError> {
        let key = self.key(entry_identifier)?;
        let _lock = self.lock_index()?;
        self.remove_identifier_from_all_tags(entry_identifier)?;
        self.delete_payload(&key)
    }

    fn find_identifiers_by_tag(&self, tag: &str) -> Result<BTreeSet<String>, CacheError> {
        let mut identifiers = BTreeSet::new();
        for entry_identifier in self.raw_identifiers_by_tag(tag)? {
            if self.has(&entry_identifier)? {
                identifiers.insert(entry_identifier);
            }
        }
        Ok(identifiers)
    }

    fn flush(&self) -> Result<(), CacheError> {
        let namespace_tag = self.namespace_tag();
        let flushed = self.flush_by_tag(&namespace_tag)?;
        // expired entries linger in the index until dropped here
        let _lock = self.lock_index()?;
        for entry_identifier in self.raw_identifiers_by_tag(&namespace_tag)? {
            self.remove_identifier_from_all_tags(&entry_identifier)?;
        }
        info!("{} Flushed {} entries of cache \"{}\"", LOG_PREFIX, flushed, self.cache_identifier.as_deref().unwrap_or_default());
        Ok(())
    }

    fn flush_by_tag(&self, tag: &str) -> Result<u64, CacheError> {
        let mut flushed = 0;
        for entry_identifier in self.find_identifiers_by_tag(tag)? {
            if self.remove(&entry_identifier)? {
                flushed += 1;
            }
        }
        Ok(flushed)
    }

    /// Memcached expires entries itself; only the tag index needs pruning.
    fn collect_garbage(&self) -> Result<(), CacheError> {
        let _lock = self.lock_index()?;
        let mut pruned = 0;
        for entry_identifier in self.raw_identifiers_by_tag(&self.namespace_tag())? {
            if !self.has(&entry_identifier)? {
                self.remove_identifier_from_all_tags(&entry_identifier)?;
                pruned += 1;
            }
        }
        debug!("{} Pruned {} expired identifiers from the tag index", LOG_PREFIX, pruned);
        Ok(())
    }

    /// Every entry carries the namespace tag, so its index lists them all.
    fn entry_identifiers(&self) -> Result<Vec<String>, CacheError> {
        Ok(self.find_identifiers_by_tag(&self.namespace_tag())?.into_iter().collect())
    }
}

impl fmt::Debug for MemcacheBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemcacheBackend")
            .field("client", &"<memcache::Client>")
            .field("servers", &self.servers)
            .field("cache_identifier", &self.cache_identifier)
            .field("prefix", &self.prefix)
            .finish()
    }
}
