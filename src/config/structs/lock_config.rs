use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct LockConfig {
    pub max_attempts: u32,
    pub backoff_min_micros: u64,
    pub backoff_max_micros: u64,
    /// Defaults to `<file_cache_base_path>/locks`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lock_directory: Option<String>,
}
