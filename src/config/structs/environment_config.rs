use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct EnvironmentConfig {
    pub application_identifier: String,
    pub file_cache_base_path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maximum_path_length: Option<usize>,
}
