#[cfg(test)]
mod config_tests {
    mod configuration_tests {
        use crate::cache::enums::backend_kind::BackendKind;
        use crate::config::enums::configuration_error::ConfigurationError;
        use crate::config::structs::configuration::Configuration;

        #[test]
        fn test_init_is_valid() {
            let config = Configuration::init();
            assert_eq!(config.log_level, "info");
            assert!(config.caches.contains_key("Default"));
            assert!(config.validate().is_ok());
        }

        #[test]
        fn test_init_survives_toml() {
            let config = Configuration::init();
            let encoded = toml::to_string(&config).unwrap();
            let decoded = Configuration::load(encoded.as_bytes()).unwrap();
            assert_eq!(decoded, config);
        }

        #[test]
        fn test_minimal_file() {
            let config = Configuration::load(br#"
log_level = "debug"

[environment]
application_identifier = "app"
file_cache_base_path = "/tmp/cache"

[caches.Pages]
backend = "null"
"#).unwrap();
            assert_eq!(config.lock.max_attempts, 10_000);
            assert_eq!(config.environment.maximum_path_length, None);
            assert_eq!(config.caches["Pages"].backend, Some(BackendKind::null));
            assert_eq!(config.caches["Pages"].frontend, None);
            assert!(config.validate().is_ok());
        }

        #[test]
        fn test_unknown_backend_is_parse_error() {
            let result = Configuration::load(br#"
log_level = "info"
[environment]
application_identifier = "app"
file_cache_base_path = "/tmp"
[caches.Pages]
backend = "apcu"
"#);
            assert!(result.is_err());
        }

        #[test]
        fn test_validation_failures() {
            let mut config = Configuration::init();
            config.log_level = String::from("loud");
            assert!(matches!(config.validate(), Err(ConfigurationError::ValidationError(_))));

            let mut config = Configuration::init();
            config.caches.insert(String::from("bad name"), Default::default());
            assert!(matches!(config.validate(), Err(ConfigurationError::ValidationError(message)) if message.contains("bad name")));

            let mut config = Configuration::init();
            config.lock.backoff_min_micros = 1000;
            config.lock.backoff_max_micros = 10;
            assert!(config.validate().is_err());

            let mut config = Configuration::init();
            config.lock.max_attempts = 0;
            assert!(config.validate().is_err());

            let mut config = Configuration::init();
            config.environment.application_identifier = String::new();
            assert!(config.validate().is_err());
        }

        #[test]
        fn test_validation_error_display() {
            let error = ConfigurationError::ValidationError(String::from("boom"));
            assert_eq!(format!("{}", error), "[VALIDATE CONFIG] boom");
        }
    }

    mod cache_config_tests {
        use crate::cache::enums::backend_kind::BackendKind;
        use crate::cache::enums::frontend_kind::FrontendKind;
        use crate::cache::enums::serializer_kind::SerializerKind;
        use crate::cache::structs::backend_options::BackendOptions;
        use crate::config::structs::cache_config::CacheConfig;

        fn fallback() -> CacheConfig {
            CacheConfig {
                frontend: Some(FrontendKind::string),
                backend: Some(BackendKind::file),
                serializer: Some(SerializerKind::msgpack),
                persistent: Some(true),
                backend_options: Some(BackendOptions::new().with("default_lifetime", 5)),
            }
        }

        #[test]
        fn test_merge_inherits_unset_keys() {
            let merged = CacheConfig::default().merged_with(&fallback());
            assert_eq!(merged, fallback());
        }

        #[test]
        fn test_merge_keeps_own_values() {
            let own = CacheConfig { persistent: Some(false), frontend: Some(FrontendKind::variable), ..Default::default() };
            let merged = own.merged_with(&fallback());
            assert_eq!(merged.persistent, Some(false));
            assert_eq!(merged.frontend, Some(FrontendKind::variable));
            assert_eq!(merged.serializer, Some(SerializerKind::msgpack));
        }

        #[test]
        fn test_backend_options_follow_backend() {
            let own = CacheConfig { backend: Some(BackendKind::null), ..Default::default() };
            assert_eq!(own.merged_with(&fallback()).backend_options, None);
        }

        #[test]
        fn test_resolved_defaults() {
            let resolved = CacheConfig::default().resolved();
            assert_eq!(resolved.frontend, Some(FrontendKind::variable));
            assert_eq!(resolved.backend, Some(BackendKind::file));
            assert_eq!(resolved.serializer, Some(SerializerKind::json));
            assert_eq!(resolved.persistent, Some(false));
            assert_eq!(resolved.backend_options, Some(BackendOptions::new()));
        }
    }

    mod conversion_tests {
        use std::path::Path;
        use crate::config::structs::environment_config::EnvironmentConfig;
        use crate::config::structs::lock_config::LockConfig;

        #[test]
        fn test_environment_conversion() {
            let config = EnvironmentConfig {
                application_identifier: String::from("app"),
                file_cache_base_path: String::from("/srv/cache"),
                maximum_path_length: Some(1024),
            };
            let environment = config.to_environment();
            assert_eq!(environment.application_identifier(), "app");
            assert_eq!(environment.file_cache_base_path(), Path::new("/srv/cache"));
            assert_eq!(environment.maximum_path_length(), 1024);
        }

        #[test]
        fn test_lock_conversion() {
            let environment = EnvironmentConfig::default().to_environment();
            let locks = LockConfig::default().to_lock_manager(&environment);
            assert_eq!(locks.lock_directory(), &environment.lock_directory());
            let custom = LockConfig { max_attempts: 3, lock_directory: Some(String::from("/run/locks")), ..Default::default() };
            let locks = custom.to_lock_manager(&environment);
            assert_eq!(locks.max_attempts(), 3);
            assert_eq!(locks.lock_directory(), Path::new("/run/locks"));
        }
    }
}
