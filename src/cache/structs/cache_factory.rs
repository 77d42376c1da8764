use std::collections::BTreeMap;
use crate::cache::enums::backend_kind::BackendKind;
use crate::cache::errors::CacheError;
use crate::cache::structs::backend_options::BackendOptions;
use crate::cache::structs::environment_configuration::EnvironmentConfiguration;
use crate::cache::traits::cache_backend::CacheBackend;
use crate::lock::structs::lock_manager::LockManager;

/// Constructor contract every backend registers with the factory.
pub type BackendConstructor =
    fn(&EnvironmentConfiguration, &BackendOptions, &LockManager) -> Result<Box<dyn CacheBackend>, CacheError>;

#[derive(Debug, Clone)]
pub struct CacheFactory {
    pub(crate) environment: EnvironmentConfiguration,
    pub(crate) locks: LockManager,
    pub(crate) constructors: BTreeMap<BackendKind, BackendConstructor>,
}
