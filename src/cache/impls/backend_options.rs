use std::collections::BTreeMap;
use std::path::PathBuf;
use serde_json::Value;
use crate::cache::errors::CacheError;
use crate::cache::structs::backend_options::BackendOptions;

impl BackendOptions {
    pub fn new() -> BackendOptions {
        BackendOptions(BTreeMap::new())
    }

    pub fn with<V: Into<Value>>(mut self, key: &str, value: V) -> Self {
        self.0.insert(key.to_string(), value.into());
        self
    }

    pub fn insert<V: Into<Value>>(&mut self, key: &str, value: V) {
        self.0.insert(key.to_string(), value.into());
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Fails on the first key not listed in `allowed`.
    pub fn reject_unknown(&self, backend: &str, allowed: &[&str]) -> Result<(), CacheError> {
        match self.0.keys().find(|key| !allowed.contains(&key.as_str())) {
            None => Ok(()),
            Some(key) => Err(CacheError::InvalidBackendOption(format!(
                "unknown option \"{}\" for the {} backend, expected one of: {}",
                key, backend, allowed.join(", ")
            ))),
        }
    }

    pub fn get_str(&self, key: &str) -> Result<Option<&str>, CacheError> {
        match self.0.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(value)) => Ok(Some(value.as_str())),
            Some(other) => Err(Self::wrong_type(key, "a string", other)),
        }
    }

    pub fn get_path(&self, key: &str) -> Result<Option<PathBuf>, CacheError> {
        match self.get_str(key)? {
            Some("") => Err(CacheError::InvalidBackendOption(format!("option \"{}\" must not be empty", key))),
            Some(value) => Ok(Some(PathBuf::from(value))),
            None => Ok(None),
        }
    }

    pub fn get_u64(&self, key: &str) -> Result<Option<u64>, CacheError> {
        match self.0.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Number(number)) => number
                .as_u64()
                .map(Some)
                .ok_or_else(|| Self::wrong_type(key, "a non-negative integer", &Value::Number(number.clone()))),
            Some(other) => Err(Self::wrong_type(key, "a non-negative integer", other)),
        }
    }

    pub fn get_u32(&self, key: &str) -> Result<Option<u32>, CacheError> {
        match self.get_u64(key)? {
            None => Ok(None),
            Some(value) => u32::try_from(value)
                .map(Some)
                .map_err(|_| CacheError::InvalidBackendOption(format!("option \"{}\" is out of range: {}", key, value))),
        }
    }

    /// Accepts either a list of strings or a single comma separated string.
    pub fn get_str_list(&self, key: &str) -> Result<Option<Vec<String>>, CacheError> {
        match self.0.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(value)) => Ok(Some(
                value.split(',').map(str::trim).filter(|s| !s.is_empty()).map(String::from).collect(),
            )),
            Some(Value::Array(values)) => values
                .iter()
                .map(|value| match value {
                    Value::String(s) => Ok(s.clone()),
                    other => Err(Self::wrong_type(key, "a list of strings", other)),
                })
                .collect::<Result<Vec<String>, CacheError>>()
                .map(Some),
            Some(other) => Err(Self::wrong_type(key, "a list of strings", other)),
        }
    }

    /// Reads `default_lifetime`, falling back to `fallback` seconds.
    pub fn default_lifetime(&self, fallback: u32) -> Result<u32, CacheError> {
        Ok(self.get_u32("default_lifetime")?.unwrap_or(fallback))
    }

    fn wrong_type(key: &str, expected: &str, found: &Value) -> CacheError {
        CacheError::InvalidBackendOption(format!("option \"{}\" must be {}, found {}", key, expected, found))
    }
}

impl From<BTreeMap<String, Value>> for BackendOptions {
    fn from(map: BTreeMap<String, Value>) -> Self {
        BackendOptions(map)
    }
}
