//! Cache structures.

/// Option map handed to backend constructors.
pub mod backend_options;

/// Identity of the cache a backend serves.
pub mod cache_context;

/// Builds backend + frontend pairs from a backend kind and options.
pub mod cache_factory;

/// Registry of configured caches.
pub mod cache_manager;

/// Lazy walk over the live entries of a cache.
pub mod entry_iterator;

/// Immutable application wide storage settings.
pub mod environment_configuration;

/// On-disk entry layout used by the file backend.
pub mod file_entry;

/// Filesystem backend with tag index and expiry.
pub mod file_backend;

/// JSON value serializer.
pub mod json_serializer;

/// Memcache backend.
pub mod memcache_backend;

/// MessagePack value serializer.
pub mod message_pack_serializer;

/// Backend that never stores anything.
pub mod null_backend;

/// Redis backend.
pub mod redis_backend;

/// Frontend passing UTF-8 strings through verbatim.
pub mod string_frontend;

/// Process local in-memory backend.
pub mod transient_memory_backend;

/// Frontend storing any serializable value.
pub mod variable_frontend;
