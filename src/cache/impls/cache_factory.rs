use std::collections::BTreeMap;
use log::info;
use crate::cache::enums::backend_kind::BackendKind;
use crate::cache::enums::frontend::Frontend;
use crate::cache::enums::frontend_kind::FrontendKind;
use crate::cache::enums::serializer_kind::SerializerKind;
use crate::cache::errors::CacheError;
use crate::cache::structs::backend_options::BackendOptions;
use crate::cache::structs::cache_factory::{BackendConstructor, CacheFactory};
use crate::cache::structs::environment_configuration::EnvironmentConfiguration;
use crate::cache::structs::file_backend::FileBackend;
use crate::cache::structs::memcache_backend::MemcacheBackend;
use crate::cache::structs::null_backend::NullBackend;
use crate::cache::structs::redis_backend::RedisBackend;
use crate::cache::structs::string_frontend::StringFrontend;
use crate::cache::structs::transient_memory_backend::TransientMemoryBackend;
use crate::cache::structs::variable_frontend::VariableFrontend;
use crate::cache::traits::cache_backend::CacheBackend;
use crate::lock::structs::lock_manager::LockManager;

impl CacheFactory {
    /// A factory knowing every built-in backend.
    pub fn new(environment: EnvironmentConfiguration, locks: LockManager) -> CacheFactory {
        let mut factory = Self::empty(environment, locks);
        factory.register(BackendKind::file, FileBackend::build);
        factory.register(BackendKind::transient_memory, TransientMemoryBackend::build);
        factory.register(BackendKind::null, NullBackend::build);
        factory.register(BackendKind::memcache, MemcacheBackend::build);
        factory.register(BackendKind::redis, RedisBackend::build);
        factory
    }

    pub fn empty(environment: EnvironmentConfiguration, locks: LockManager) -> CacheFactory {
        CacheFactory {
            environment,
            locks,
            constructors: BTreeMap::new(),
        }
    }

    /// Registers or replaces the constructor used for `kind`.
    pub fn register(&mut self, kind: BackendKind, constructor: BackendConstructor) {
        self.constructors.insert(kind, constructor);
    }

    pub fn environment(&self) -> &EnvironmentConfiguration {
        &self.environment
    }

    pub fn locks(&self) -> &LockManager {
        &self.locks
    }

    pub fn create_backend(&self, kind: BackendKind, options: &BackendOptions) -> Result<Box<dyn CacheBackend>, CacheError> {
        let constructor = self.constructors.get(&kind).ok_or_else(|| {
            CacheError::InvalidBackend(format!("no constructor registered for backend \"{}\"", kind))
        })?;
        constructor(&self.environment, options, &self.locks)
    }

    pub fn create(&self, cache_identifier: &str, frontend: FrontendKind, backend: BackendKind, options: &BackendOptions) -> Result<Frontend, CacheError> {
        self.create_with_serializer(cache_identifier, frontend, backend, options, SerializerKind::default())
    }

    pub fn create_with_serializer(
        &self,
        cache_identifier: &str,
        frontend: FrontendKind,
        backend: BackendKind,
        options: &BackendOptions,
        serializer: SerializerKind,
    ) -> Result<Frontend, CacheError> {
        let backend_instance = self.create_backend(backend, options)?;
        let cache = match frontend {
            FrontendKind::variable => Frontend::from(VariableFrontend::new(cache_identifier, backend_instance, serializer)?),
            FrontendKind::string => Frontend::from(StringFrontend::new(cache_identifier, backend_instance)?),
        };
        info!("[CacheFactory] Created cache \"{}\" ({} frontend, {} backend)", cache_identifier, frontend, backend);
        Ok(cache)
    }
}
