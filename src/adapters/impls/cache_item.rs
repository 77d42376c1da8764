use chrono::{DateTime, TimeDelta, Utc};
use crate::adapters::structs::cache_item::CacheItem;

impl<T> CacheItem<T> {
    /// A fresh item that was not found in the pool.
    pub fn new(key: &str) -> CacheItem<T> {
        CacheItem {
            key: key.to_string(),
            value: None,
            is_hit: false,
            expiration: None,
        }
    }

    pub(crate) fn hit(key: &str, value: Option<T>) -> CacheItem<T> {
        CacheItem {
            key: key.to_string(),
            value,
            is_hit: true,
            expiration: None,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn get(&self) -> Option<&T> {
        self.value.as_ref()
    }

    pub fn into_value(self) -> Option<T> {
        self.value
    }

    pub fn is_hit(&self) -> bool {
        self.is_hit
    }

    /// Replaces the value; the hit state reflects the last lookup only.
    pub fn set(&mut self, value: T) -> &mut Self {
        self.value = Some(value);
        self
    }

    /// `None` falls back to the backend's default lifetime.
    pub fn expires_at(&mut self, expiration: Option<DateTime<Utc>>) -> &mut Self {
        self.expiration = expiration;
        self
    }

    pub fn expires_after(&mut self, time: Option<TimeDelta>) -> &mut Self {
        self.expiration = time.map(|delta| Utc::now() + delta);
        self
    }

    pub fn expiration(&self) -> Option<DateTime<Utc>> {
        self.expiration
    }

    /// Lifetime to hand to the frontend, `None` once the expiration has passed.
    pub(crate) fn lifetime_at(&self, now: DateTime<Utc>) -> Option<Option<u32>> {
        match self.expiration {
            None => Some(Some(0)),
            Some(expiration) if expiration <= now => None,
            Some(expiration) => {
                // sub-second remainders round up so the entry is never born expired
                let milliseconds = (expiration - now).num_milliseconds();
                let seconds = (milliseconds + 999) / 1000;
                Some(Some(u32::try_from(seconds).unwrap_or(u32::MAX).max(1)))
            }
        }
    }
}
