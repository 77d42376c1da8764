#![allow(dead_code)]
use rand::RngExt;
use tempfile::TempDir;
use tagged_cache::cache::enums::backend_kind::BackendKind;
use tagged_cache::cache::enums::frontend_kind::FrontendKind;
use tagged_cache::cache::structs::backend_options::BackendOptions;
use tagged_cache::cache::structs::cache_factory::CacheFactory;
use tagged_cache::cache::structs::environment_configuration::EnvironmentConfiguration;
use tagged_cache::cache::structs::file_backend::FileBackend;
use tagged_cache::cache::structs::variable_frontend::VariableFrontend;
use tagged_cache::config::structs::configuration::Configuration;
use tagged_cache::lock::structs::lock_manager::LockManager;

pub const APPLICATION: &str = "tagged-cache-tests";

pub fn create_test_environment(base: &TempDir) -> EnvironmentConfiguration {
    EnvironmentConfiguration::new(APPLICATION, base.path())
}

pub fn create_test_locks(environment: &EnvironmentConfiguration) -> LockManager {
    LockManager::new(environment.lock_directory())
}

pub fn create_test_factory(base: &TempDir) -> CacheFactory {
    let environment = create_test_environment(base);
    let locks = create_test_locks(&environment);
    CacheFactory::new(environment, locks)
}

pub fn create_file_backend(base: &TempDir) -> FileBackend {
    let environment = create_test_environment(base);
    let locks = create_test_locks(&environment);
    FileBackend::new(&environment, &BackendOptions::new(), &locks).unwrap()
}

pub fn create_variable_cache(base: &TempDir, cache_identifier: &str, backend: BackendKind) -> std::sync::Arc<VariableFrontend> {
    create_test_factory(base)
        .create(cache_identifier, FrontendKind::variable, backend, &BackendOptions::new())
        .unwrap()
        .as_variable()
        .unwrap()
}

/// Default configuration rooted in `base`.
pub fn create_test_config(base: &TempDir) -> Configuration {
    let mut config = Configuration::init();
    config.environment.application_identifier = APPLICATION.to_string();
    config.environment.file_cache_base_path = base.path().to_string_lossy().to_string();
    config
}

pub fn tags(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

pub fn random_identifier(prefix: &str) -> String {
    let mut rng = rand::rng();
    format!("{}_{}", prefix, rng.random_range(0..u32::MAX))
}

pub fn random_payload(size: usize) -> Vec<u8> {
    let mut rng = rand::rng();
    (0..size).map(|_| rng.random::<u8>()).collect()
}
