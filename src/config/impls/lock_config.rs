use crate::cache::structs::environment_configuration::EnvironmentConfiguration;
use crate::config::structs::lock_config::LockConfig;
use crate::lock::impls::flock_lock_strategy::{DEFAULT_BACKOFF_MAX_MICROS, DEFAULT_BACKOFF_MIN_MICROS, DEFAULT_MAX_ATTEMPTS};
use crate::lock::structs::lock_manager::LockManager;

impl LockConfig {
    pub fn to_lock_manager(&self, environment: &EnvironmentConfiguration) -> LockManager {
        let directory = match &self.lock_directory {
            Some(directory) => directory.into(),
            None => environment.lock_directory(),
        };
        LockManager::new(directory).with_retry_policy(self.max_attempts, self.backoff_min_micros, self.backoff_max_micros)
    }
}

impl Default for LockConfig {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            backoff_min_micros: DEFAULT_BACKOFF_MIN_MICROS,
            backoff_max_micros: DEFAULT_BACKOFF_MAX_MICROS,
            lock_directory: None,
        }
    }
}
