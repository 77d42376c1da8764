//! Implementation blocks for cache types.

pub mod backend_options;
pub mod cache_factory;
pub mod cache_manager;
pub mod entry_iterator;
pub mod environment_configuration;
pub mod file_backend;
pub mod file_entry;
pub mod frontend;
pub mod json_serializer;
/// `Display`/`FromStr` for the kind enums.
pub mod kinds;
pub mod memcache_backend;
pub mod message_pack_serializer;
pub mod null_backend;
pub mod redis_backend;
pub mod serializer_kind;
pub mod string_frontend;
pub mod transient_memory_backend;
pub mod variable_frontend;
