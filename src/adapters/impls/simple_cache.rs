use std::collections::BTreeMap;
use std::marker::PhantomData;
use std::sync::Arc;
use serde::Serialize;
use serde::de::DeserializeOwned;
use crate::adapters::structs::simple_cache::SimpleCache;
use crate::cache::enums::frontend::Frontend;
use crate::cache::errors::CacheError;
use crate::cache::structs::variable_frontend::VariableFrontend;
use crate::cache::traits::cache_frontend::CacheFrontend;
use crate::cache::validator;

impl<T: Serialize + DeserializeOwned> SimpleCache<T> {
    pub fn new(frontend: Arc<VariableFrontend>) -> SimpleCache<T> {
        SimpleCache {
            frontend,
            value_type: PhantomData,
        }
    }

    pub fn from_cache(cache: &Frontend) -> Result<SimpleCache<T>, CacheError> {
        Ok(Self::new(cache.as_variable()?))
    }

    pub fn get(&self, key: &str) -> Result<Option<T>, CacheError> {
        Ok(self.frontend.get::<Option<T>>(key)?.flatten())
    }

    pub fn get_or(&self, key: &str, default: T) -> Result<T, CacheError> {
        Ok(self.get(key)?.unwrap_or(default))
    }

    /// `ttl` in seconds; `None` uses the backend default, `Some(0)` deletes the key.
    pub fn set(&self, key: &str, value: &T, ttl: Option<u32>) -> Result<bool, CacheError> {
        match ttl {
            Some(0) => {
                self.frontend.remove(key)?;
            }
            Some(seconds) => self.frontend.set(key, value, &[], Some(seconds))?,
            None => self.frontend.set(key, value, &[], Some(0))?,
        }
        Ok(true)
    }

    pub fn delete(&self, key: &str) -> Result<bool, CacheError> {
        self.frontend.remove(key)?;
        Ok(true)
    }

    pub fn clear(&self) -> Result<bool, CacheError> {
        self.frontend.flush()?;
        Ok(true)
    }

    /// Every requested key, misses mapped to `None`.
    pub fn get_multiple<S: AsRef<str>>(&self, keys: &[S]) -> Result<BTreeMap<String, Option<T>>, CacheError> {
        Self::validate_keys(keys.iter().map(|key| key.as_ref()))?;
        let mut values = BTreeMap::new();
        for key in keys {
            values.insert(key.as_ref().to_string(), self.get(key.as_ref())?);
        }
        Ok(values)
    }

    pub fn set_multiple(&self, values: &BTreeMap<String, T>, ttl: Option<u32>) -> Result<bool, CacheError> {
        Self::validate_keys(values.keys().map(String::as_str))?;
        for (key, value) in values {
            self.set(key, value, ttl)?;
        }
        Ok(true)
    }

    pub fn delete_multiple<S: AsRef<str>>(&self, keys: &[S]) -> Result<bool, CacheError> {
        Self::validate_keys(keys.iter().map(|key| key.as_ref()))?;
        for key in keys {
            self.frontend.remove(key.as_ref())?;
        }
        Ok(true)
    }

    pub fn has(&self, key: &str) -> Result<bool, CacheError> {
        self.frontend.has(key)
    }

    fn validate_keys<'a>(mut keys: impl Iterator<Item = &'a str>) -> Result<(), CacheError> {
        keys.try_for_each(validator::validate_entry_identifier)
    }
}
