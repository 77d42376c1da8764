use std::collections::BTreeSet;
use crate::cache::enums::backend_kind::BackendKind;
use crate::cache::errors::CacheError;
use crate::cache::structs::backend_options::BackendOptions;
use crate::cache::structs::cache_context::CacheContext;
use crate::cache::structs::environment_configuration::EnvironmentConfiguration;
use crate::cache::structs::null_backend::NullBackend;
use crate::cache::traits::cache_backend::CacheBackend;
use crate::lock::structs::lock_manager::LockManager;

impl NullBackend {
    pub fn new(options: &BackendOptions) -> Result<NullBackend, CacheError> {
        options.reject_unknown("null", &[])?;
        Ok(NullBackend::default())
    }

    pub fn build(_environment: &EnvironmentConfiguration, options: &BackendOptions, _locks: &LockManager) -> Result<Box<dyn CacheBackend>, CacheError> {
        Ok(Box::new(Self::new(options)?))
    }
}

/// Accepts every write and forgets it.
impl CacheBackend for NullBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::null
    }

    fn set_cache(&mut self, cache: &CacheContext) -> Result<(), CacheError> {
        self.cache_identifier = Some(cache.identifier.clone());
        Ok(())
    }

    fn set(&self, _entry_identifier: &str, _data: &[u8], _tags: &[String], _lifetime: Option<u32>) -> Result<(), CacheError> {
        Ok(())
    }

    fn get(&self, _entry_identifier: &str) -> Result<Option<Vec<u8>>, CacheError> {
        Ok(None)
    }

    fn has(&self, _entry_identifier: &str) -> Result<bool, CacheError> {
        Ok(false)
    }

    fn remove(&self, _entry_identifier: &str) -> Result<bool, CacheError> {
        Ok(false)
    }

    fn find_identifiers_by_tag(&self, _tag: &str) -> Result<BTreeSet<String>, CacheError> {
        Ok(BTreeSet::new())
    }

    fn flush(&self) -> Result<(), CacheError> {
        Ok(())
    }

    fn flush_by_tag(&self, _tag: &str) -> Result<u64, CacheError> {
        Ok(0)
    }

    fn collect_garbage(&self) -> Result<(), CacheError> {
        Ok(())
    }

    fn entry_identifiers(&self) -> Result<Vec<String>, CacheError> {
        Ok(Vec::new())
    }
}
