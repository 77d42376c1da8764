use std::path::{Path, PathBuf};
use crate::cache::structs::environment_configuration::EnvironmentConfiguration;

#[cfg(unix)]
pub const PLATFORM_MAXIMUM_PATH_LENGTH: usize = 4096;
#[cfg(not(unix))]
pub const PLATFORM_MAXIMUM_PATH_LENGTH: usize = 260;

impl EnvironmentConfiguration {
    pub fn new<A: Into<String>, P: Into<PathBuf>>(application_identifier: A, file_cache_base_path: P) -> EnvironmentConfiguration {
        Self::with_maximum_path_length(application_identifier, file_cache_base_path, PLATFORM_MAXIMUM_PATH_LENGTH)
    }

    pub fn with_maximum_path_length<A: Into<String>, P: Into<PathBuf>>(
        application_identifier: A,
        file_cache_base_path: P,
        maximum_path_length: usize,
    ) -> EnvironmentConfiguration {
        EnvironmentConfiguration {
            application_identifier: application_identifier.into(),
            file_cache_base_path: file_cache_base_path.into(),
            maximum_path_length,
        }
    }

    pub fn application_identifier(&self) -> &str {
        &self.application_identifier
    }

    pub fn file_cache_base_path(&self) -> &Path {
        &self.file_cache_base_path
    }

    pub fn maximum_path_length(&self) -> usize {
        self.maximum_path_length
    }

    /// Directory holding the lock files of every cache of this application.
    pub fn lock_directory(&self) -> PathBuf {
        self.file_cache_base_path.join("locks")
    }
}
