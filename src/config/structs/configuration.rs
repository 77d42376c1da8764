use std::collections::BTreeMap;
use serde::{Deserialize, Serialize};
use crate::config::structs::cache_config::CacheConfig;
use crate::config::structs::environment_config::EnvironmentConfig;
use crate::config::structs::lock_config::LockConfig;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Configuration {
    pub log_level: String,
    pub environment: EnvironmentConfig,
    #[serde(default)]
    pub lock: LockConfig,
    #[serde(default)]
    pub caches: BTreeMap<String, CacheConfig>,
}
