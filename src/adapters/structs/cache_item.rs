use chrono::{DateTime, Utc};

#[derive(Debug, Clone, PartialEq)]
pub struct CacheItem<T> {
    pub(crate) key: String,
    pub(crate) value: Option<T>,
    pub(crate) is_hit: bool,
    pub(crate) expiration: Option<DateTime<Utc>>,
}
