use crate::cache::impls::environment_configuration::PLATFORM_MAXIMUM_PATH_LENGTH;
use crate::cache::structs::environment_configuration::EnvironmentConfiguration;
use crate::config::structs::environment_config::EnvironmentConfig;

impl EnvironmentConfig {
    pub fn to_environment(&self) -> EnvironmentConfiguration {
        EnvironmentConfiguration::with_maximum_path_length(
            self.application_identifier.as_str(),
            self.file_cache_base_path.as_str(),
            self.maximum_path_length.unwrap_or(PLATFORM_MAXIMUM_PATH_LENGTH),
        )
    }
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            application_identifier: String::from("tagged-cache"),
            file_cache_base_path: String::from("data/cache"),
            maximum_path_length: Some(PLATFORM_MAXIMUM_PATH_LENGTH),
        }
    }
}
