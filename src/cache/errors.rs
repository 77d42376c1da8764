use std::path::PathBuf;
use thiserror::Error;
use crate::lock::errors::LockError;

#[derive(Error, Debug)]
pub enum CacheError {
    #[error("Invalid entry identifier: \"{0}\"")]
    InvalidIdentifier(String),

    #[error("Invalid tag: \"{0}\"")]
    InvalidTag(String),

    #[error("Invalid backend option: {0}")]
    InvalidBackendOption(String),

    #[error("Invalid backend: {0}")]
    InvalidBackend(String),

    #[error(transparent)]
    Lock(#[from] LockError),

    #[error("Backend error: {0}")]
    BackendError(String),

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Path \"{path}\" exceeds the maximum path length of {maximum}")]
    PathTooLong {
        path: PathBuf,
        maximum: usize,
    },

    #[error("File name \"{name}\" exceeds the maximum name length of {maximum}")]
    NameTooLong {
        name: String,
        maximum: usize,
    },

    #[error("Cannot add or modify cache entry because the backend of cache \"{0}\" is frozen")]
    Frozen(String),

    #[error("The {backend} backend does not support {operation}")]
    Unsupported {
        backend: String,
        operation: String,
    },

    #[error("Compression error: {0}")]
    CompressionError(String),

    #[error("No cache with identifier \"{0}\" exists")]
    NoSuchCache(String),

    #[error("A cache with identifier \"{0}\" has already been registered")]
    DuplicateIdentifier(String),

    #[error("Cache \"{0}\" does not use a frontend suitable for this operation")]
    IncompatibleFrontend(String),

    #[error("Memcache error: {0}")]
    MemcacheError(#[from] memcache::MemcacheError),

    #[error("Redis error: {0}")]
    RedisError(#[from] redis::RedisError),
}

impl CacheError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> CacheError {
        CacheError::Io { path: path.into(), source }
    }

    pub fn is_lock_not_acquired(&self) -> bool {
        matches!(self, CacheError::Lock(LockError::LockNotAcquired { .. }))
    }
}
