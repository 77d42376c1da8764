use std::sync::Arc;
use parking_lot::Mutex;
use crate::cache::structs::environment_configuration::EnvironmentConfiguration;
use crate::lock::structs::lock_manager::LockManager;

#[derive(Clone)]
pub struct MemcacheBackend {
    pub(crate) client: Arc<Mutex<memcache::Client>>,
    pub(crate) environment: EnvironmentConfiguration,
    pub(crate) locks: LockManager,
    pub(crate) servers: Vec<String>,
    pub(crate) default_lifetime: u32,
    pub(crate) cache_identifier: Option<String>,
    pub(crate) prefix: String,
}
