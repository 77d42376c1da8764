use std::collections::BTreeSet;
use std::fmt;
use log::{debug, info};
use parking_lot::Mutex;
use crate::cache::enums::backend_kind::BackendKind;
use crate::cache::errors::CacheError;
use crate::cache::structs::backend_options::BackendOptions;
use crate::cache::structs::cache_context::CacheContext;
use crate::cache::structs::environment_configuration::EnvironmentConfiguration;
use crate::cache::structs::redis_backend::RedisBackend;
use crate::cache::traits::cache_backend::CacheBackend;
use crate::common::common::namespace_hash;
use crate::lock::structs::lock_manager::LockManager;

pub const DEFAULT_LIFETIME: u32 = 3600;
pub const ALLOWED_OPTIONS: &[&str] = &["hostname", "port", "database", "password", "default_lifetime", "compression_level"];
pub const MAXIMUM_COMPRESSION_LEVEL: u64 = 22;
const SCAN_BATCH: u32 = 500;
const LOG_PREFIX: &str = "[RedisBackend]";

/// Builds the connection url from the backend options.
pub fn redis_url(options: &BackendOptions) -> Result<String, CacheError> {
    let hostname = options.get_str("hostname")?.unwrap_or("127.0.0.1");
    let port = options.get_u64("port")?.unwrap_or(6379);
    let database = options.get_u64("database")?.unwrap_or(0);
    if hostname.is_empty() || port == 0 || port > u16::MAX as u64 {
        return Err(CacheError::InvalidBackendOption(format!("invalid redis address {}:{}", hostname, port)));
    }
    Ok(match options.get_str("password")? {
        Some(password) if !password.is_empty() => format!("redis://:{}@{}:{}/{}", password, hostname, port, database),
        _ => format!("redis://{}:{}/{}", hostname, port, database),
    })
}

/// Reads `compression_level`; 0 (the default) disables compression.
pub fn compression_level(options: &BackendOptions) -> Result<i32, CacheError> {
    let level = options.get_u64("compression_level")?.unwrap_or(0);
    if level > MAXIMUM_COMPRESSION_LEVEL {
        return Err(CacheError::InvalidBackendOption(format!(
            "compression_level must be between 0 and {}, got {}", MAXIMUM_COMPRESSION_LEVEL, level
        )));
    }
    Ok(level as i32)
}

pub fn compress_value(data: &[u8], level: i32) -> Result<Vec<u8>, CacheError> {
    if level == 0 {
        return Ok(data.to_vec());
    }
    zstd::stream::encode_all(data, level).map_err(|e| CacheError::CompressionError(e.to_string()))
}

/// Empty values are stored as-is and never decompressed.
pub fn decompress_value(data: Vec<u8>, level: i32) -> Result<Vec<u8>, CacheError> {
    if level == 0 || data.is_empty() {
        return Ok(data);
    }
    zstd::stream::decode_all(data.as_slice()).map_err(|e| CacheError::CompressionError(e.to_string()))
}

impl RedisBackend {
    pub fn new(environment: &EnvironmentConfiguration, options: &BackendOptions) -> Result<RedisBackend, CacheError> {
        options.reject_unknown("redis", ALLOWED_OPTIONS)?;
        let url = redis_url(options)?;
        let default_lifetime = options.default_lifetime(DEFAULT_LIFETIME)?;
        let compression_level = compression_level(options)?;
        let connection = redis::Client::open(url.as_str())?.get_connection()?;
        info!("{} Connected to {}", LOG_PREFIX, url.split('@').next_back().unwrap_or_default());
        Ok(RedisBackend {
            connection: Mutex::new(connection),
            environment: environment.clone(),
            default_lifetime,
            compression_level,
            cache_identifier: None,
            prefix: String::new(),
            frozen: Mutex::new(None),
        })
    }

    pub fn build(environment: &EnvironmentConfiguration, options: &BackendOptions, _locks: &LockManager) -> Result<Box<dyn CacheBackend>, CacheError> {
        Ok(Box::new(Self::new(environment, options)?))
    }

    fn ensure_bound(&self) -> Result<(), CacheError> {
        if self.cache_identifier.is_none() {
            return Err(CacheError::BackendError("redis backend has not been bound to a cache yet".to_string()));
        }
        Ok(())
    }

    fn entry_key(&self, entry_identifier: &str) -> String {
        format!("{}entry:{}", self.prefix, entry_identifier)
    }

    fn tag_key(&self, tag: &str) -> String {
        format!("{}tag:{}", self.prefix, tag)
    }

    fn tags_key(&self, entry_identifier: &str) -> String {
        format!("{}tags:{}", self.prefix, entry_identifier)
    }

    /// List of every identifier in insertion order; drives iteration.
    fn entries_key(&self) -> String {
        format!("{}entries", self.prefix)
    }

    fn frozen_key(&self) -> String {
        format!("{}frozen", self.prefix)
    }

    fn ensure_writable(&self) -> Result<(), CacheError> {
        if self.is_frozen()? {
            return Err(CacheError::Frozen(self.cache_identifier.clone().unwrap_or_default()));
        }
        Ok(())
    }

    fn listed_identifiers(&self) -> Result<Vec<String>, CacheError> {
        Ok(redis::cmd("LRANGE").arg(self.entries_key()).arg(0).arg(-1).query(&mut *self.connection.lock())?)
    }

    fn expiry_seconds(&self, lifetime: Option<u32>) -> u32 {
        match lifetime {
            None => 0,
            Some(0) => self.default_lifetime,
            Some(seconds) => seconds,
        }
    }

    fn scan(&self, pattern: &str) -> Result<Vec<String>, CacheError> {
        let mut connection = self.connection.lock();
        let mut cursor: u64 = 0;
        let mut keys = Vec::new();
        loop {
            let (next, batch): (u64, Vec<String>) = redis::cmd("SCAN")
                .arg(cursor)
                .arg("MATCH")
                .arg(pattern)
                .arg("COUNT")
                .arg(SCAN_BATCH)
                .query(&mut *connection)?;
            keys.extend(batch);
            if next == 0 {
                return Ok(keys);
            }
            cursor = next;
        }
    }

    fn members(&self, key: &str) -> Result<Vec<String>, CacheError> {
        Ok(redis::cmd("SMEMBERS").arg(key).query(&mut *self.connection.lock())?)
    }

    fn entry_exists(&self, entry_identifier: &str) -> Result<bool, CacheError> {
        Ok(redis::cmd("EXISTS").arg(self.entry_key(entry_identifier)).query(&mut *self.connection.lock())?)
    }
}

impl CacheBackend for RedisBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::redis
    }

    fn set_cache(&mut self, cache: &CacheContext) -> Result<(), CacheError> {
        self.prefix = format!("{}:", namespace_hash(self.environment.application_identifier(), &cache.identifier));
        self.cache_identifier = Some(cache.identifier.clone());
        Ok(())
    }

    #[tracing::instrument(level = "debug", skip_all)]
    fn set(&self, entry_identifier: &str, data: &[u8], tags: &[String], lifetime: Option<u32>) -> Result<(), CacheError> {
        self.ensure_bound()?;
        self.ensure_writable()?;
        let data = compress_value(data, self.compression_level)?;
        let previous_tags = self.members(&self.tags_key(entry_identifier))?;
        let mut pipe = redis::pipe();
        pipe.atomic();
        for tag in &previous_tags {
            pipe.cmd("SREM").arg(self.tag_key(tag)).arg(entry_identifier).ignore();
        }
        pipe.cmd("DEL").arg(self.tags_key(entry_identifier)).ignore();
        let seconds = self.expiry_seconds(lifetime);
        if seconds == 0 {
            pipe.cmd("SET").arg(self.entry_key(entry_identifier)).arg(data.as_slice()).ignore();
        } else {
            pipe.cmd("SET").arg(self.entry_key(entry_identifier)).arg(data.as_slice()).arg("EX").arg(seconds).ignore();
        }
        pipe.cmd("LREM").arg(self.entries_key()).arg(0).arg(entry_identifier).ignore();
        pipe.cmd("RPUSH").arg(self.entries_key()).arg(entry_identifier).ignore();
        for tag in tags {
            pipe.cmd("SADD").arg(self.tag_key(tag)).arg(entry_identifier).ignore();
        }
        if !tags.is_empty() {
            pipe.cmd("SADD").arg(self.tags_key(entry_identifier)).arg(tags).ignore();
        }
        pipe.query::<()>(&mut *self.connection.lock())?;
        debug!("{} Stored \"{}\" ({} bytes)", LOG_PREFIX, entry_identifier, data.len());
        Ok(())
    }

    #[tracing::instrument(level = "debug", skip_all)]
    fn get(&self, entry_identifier: &str) -> Result<Option<Vec<u8>>, CacheError> {
        self.ensure_bound()?;
        let data: Option<Vec<u8>> = redis::cmd("GET").arg(self.entry_key(entry_identifier)).query(&mut *self.connection.lock())?;
        data.map(|data| decompress_value(data, self.compression_level)).transpose()
    }

    fn has(&self, entry_identifier: &str) -> Result<bool, CacheError> {
        self.ensure_bound()?;
        self.entry_exists(entry_identifier)
    }

    fn remove(&self, entry_identifier: &str) -> Result<bool, CacheError> {
        self.ensure_bound()?;
        self.ensure_writable()?;
        let tags = self.members(&self.tags_key(entry_identifier))?;
        let mut pipe = redis::pipe();
        pipe.atomic();
        for tag in &tags {
            pipe.cmd("SREM").arg(self.tag_key(tag)).arg(entry_identifier).ignore();
        }
        pipe.cmd("DEL").arg(self.tags_key(entry_identifier)).ignore();
        pipe.cmd("LREM").arg(self.entries_key()).arg(0).arg(entry_identifier).ignore();
        pipe.cmd("DEL").arg(self.entry_key(entry_identifier));
        let (removed,): (u64,) = pipe.query(&mut *self.connection.lock())?;
        Ok(removed > 0)
    }

    fn find_identifiers_by_tag(&self, tag: &str) -> Result<BTreeSet<String>, CacheError> {
        self.ensure_bound()?;
        let mut identifiers = BTreeSet::new();
        for entry_identifier in self.members(&self.tag_key(tag))? {
            if self.entry_exists(&entry_identifier)? {
                identifiers.insert(entry_identifier);
            }
        }
        Ok(identifiers)
    }

    fn flush(&self) -> Result<(), CacheError> {
        self.ensure_bound()?;
        let keys = self.scan(&format!("{}*", self.prefix))?;
        for batch in keys.chunks(SCAN_BATCH as usize) {
            redis::cmd("DEL").arg(batch).query::<()>(&mut *self.connection.lock())?;
        }
        *self.frozen.lock() = Some(false);
        info!("{} Flushed cache \"{}\" ({} keys)", LOG_PREFIX, self.cache_identifier.as_deref().unwrap_or_default(), keys.len());
        Ok(())
    }

    fn flush_by_tag(&self, tag: &str) -> Result<u64, CacheError> {
        let identifiers = self.find_identifiers_by_tag(tag)?;
        if !identifiers.is_empty() {
            self.ensure_writable()?;
        }
        let mut flushed = 0;
        for entry_identifier in identifiers {
            if self.remove(&entry_identifier)? {
                flushed += 1;
            }
        }
        Ok(flushed)
    }

    /// Redis expires entries itself; stale tag set members are pruned here.
    fn collect_garbage(&self) -> Result<(), CacheError> {
        self.ensure_bound()?;
        if self.is_frozen()? {
            return Ok(());
        }
        let tag_prefix = self.tag_key("");
        let mut pruned = 0u64;
        for key in self.scan(&format!("{}*", tag_prefix))? {
            for entry_identifier in self.members(&key)? {
                if !self.entry_exists(&entry_identifier)? {
                    redis::cmd("SREM").arg(&key).arg(&entry_identifier).query::<()>(&mut *self.connection.lock())?;
                    pruned += 1;
                }
            }
        }
        let tags_prefix = self.tags_key("");
        for key in self.scan(&format!("{}*", tags_prefix))? {
            let entry_identifier = key.trim_start_matches(tags_prefix.as_str());
            if !self.entry_exists(entry_identifier)? {
                redis::cmd("DEL").arg(&key).query::<()>(&mut *self.connection.lock())?;
            }
        }
        for entry_identifier in self.listed_identifiers()? {
            if !self.entry_exists(&entry_identifier)? {
                redis::cmd("LREM").arg(self.entries_key()).arg(0).arg(&entry_identifier).query::<()>(&mut *self.connection.lock())?;
            }
        }
        debug!("{} Pruned {} stale tag memberships", LOG_PREFIX, pruned);
        Ok(())
    }

    /// Entries expired since they were listed are skipped.
    fn entry_identifiers(&self) -> Result<Vec<String>, CacheError> {
        self.ensure_bound()?;
        let mut identifiers = Vec::new();
        for entry_identifier in self.listed_identifiers()? {
            if self.entry_exists(&entry_identifier)? {
                identifiers.push(entry_identifier);
            }
        }
        Ok(identifiers)
    }

    fn freeze(&self) -> Result<(), CacheError> {
        self.ensure_bound()?;
        self.ensure_writable()?;
        let identifiers = self.listed_identifiers()?;
        let mut pipe = redis::pipe();
        pipe.atomic();
        for entry_identifier in &identifiers {
            pipe.cmd("PERSIST").arg(self.entry_key(entry_identifier)).ignore();
        }
        pipe.cmd("SET").arg(self.frozen_key()).arg(1).ignore();
        pipe.query::<()>(&mut *self.connection.lock())?;
        *self.frozen.lock() = Some(true);
        info!("{} Froze cache \"{}\" with {} entries", LOG_PREFIX, self.cache_identifier.as_deref().unwrap_or_default(), identifiers.len());
        Ok(())
    }

    fn is_frozen(&self) -> Result<bool, CacheError> {
        self.ensure_bound()?;
        if let Some(frozen) = *self.frozen.lock() {
            return Ok(frozen);
        }
        let frozen: bool = redis::cmd("EXISTS").arg(self.frozen_key()).query(&mut *self.connection.lock())?;
        *self.frozen.lock() = Some(frozen);
        Ok(frozen)
    }
}

impl fmt::Debug for RedisBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RedisBackend")
            .field("connection", &"<redis::Connection>")
            .field("compression_level", &self.compression_level)
            .field("cache_identifier", &self.cache_identifier)
            .field("prefix", &self.prefix)
            .finish()
    }
}
