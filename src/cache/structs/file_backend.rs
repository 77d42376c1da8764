use std::collections::BTreeSet;
use std::path::PathBuf;
use parking_lot::RwLock;
use crate::cache::structs::environment_configuration::EnvironmentConfiguration;
use crate::lock::structs::lock_manager::LockManager;

#[derive(Debug)]
pub struct FileBackend {
    pub(crate) environment: EnvironmentConfiguration,
    pub(crate) locks: LockManager,
    pub(crate) default_lifetime: u32,
    pub(crate) configured_directory: Option<PathBuf>,
    pub(crate) cache_identifier: Option<String>,
    pub(crate) cache_directory: Option<PathBuf>,
    /// Identifiers recorded by `freeze`; `None` while the cache is writable.
    pub(crate) frozen: RwLock<Option<BTreeSet<String>>>,
}
