use std::collections::BTreeMap;
use std::fs::File;
use std::io::Write;
use regex::Regex;
use crate::cache::enums::backend_kind::BackendKind;
use crate::cache::impls::cache_manager::DEFAULT_CACHE_SECTION;
use crate::cache::structs::backend_options::BackendOptions;
use crate::cache::validator::PATTERN_ENTRY_IDENTIFIER;
use crate::common::common::parse_log_level;
use crate::common::structs::custom_error::CustomError;
use crate::config::enums::configuration_error::ConfigurationError;
use crate::config::structs::cache_config::CacheConfig;
use crate::config::structs::configuration::Configuration;
use crate::config::structs::environment_config::EnvironmentConfig;
use crate::config::structs::lock_config::LockConfig;

impl Configuration {
    pub fn init() -> Configuration {
        let mut caches = BTreeMap::new();
        caches.insert(String::from(DEFAULT_CACHE_SECTION), CacheConfig {
            frontend: Some(Default::default()),
            backend: Some(BackendKind::file),
            serializer: Some(Default::default()),
            persistent: Some(false),
            backend_options: None,
        });
        caches.insert(String::from("Pages"), CacheConfig {
            backend: Some(BackendKind::transient_memory),
            backend_options: Some(BackendOptions::new().with("default_lifetime", 600)),
            ..Default::default()
        });
        Configuration {
            log_level: String::from("info"),
            environment: EnvironmentConfig::default(),
            lock: LockConfig::default(),
            caches,
        }
    }

    pub fn load(data: &[u8]) -> Result<Configuration, toml::de::Error> {
        toml::from_str(&String::from_utf8_lossy(data))
    }

    pub fn load_file(path: &str) -> Result<Configuration, ConfigurationError> {
        match std::fs::read(path) {
            Err(e) => Err(ConfigurationError::IOError(e)),
            Ok(data) => {
                match Self::load(data.as_slice()) {
                    Ok(cfg) => Ok(cfg),
                    Err(e) => Err(ConfigurationError::ParseError(e)),
                }
            }
        }
    }

    pub fn save_file(path: &str, data: String) -> Result<(), ConfigurationError> {
        match File::create(path) {
            Ok(mut file) => {
                match file.write_all(data.as_ref()) {
                    Ok(_) => Ok(()),
                    Err(e) => Err(ConfigurationError::IOError(e))
                }
            }
            Err(e) => Err(ConfigurationError::IOError(e))
        }
    }

    pub fn save_from_config(path: &str, config: &Configuration) -> Result<(), ConfigurationError> {
        let config_toml = toml::to_string(config).map_err(ConfigurationError::SerializeError)?;
        Self::save_file(path, config_toml)
    }

    /// Loads `path`, or writes the defaults there when `create` is set and the file is unusable.
    ///
    /// Runs before logging is set up, so problems go to stderr.
    pub fn load_from_file(path: &str, create: bool) -> Result<Configuration, CustomError> {
        let config = match Configuration::load_file(path) {
            Ok(c) => c,
            Err(error) => {
                eprintln!("No config file found or corrupt.");
                eprintln!("[ERROR] {}", error);

                if !create {
                    eprintln!("You can either create your own {} file, or start this app using '--create-config' as parameter.", path);
                    return Err(CustomError::new(&format!("will not create automatically {} file", path)));
                }
                eprintln!("Creating config file..");

                return match Configuration::save_from_config(path, &Configuration::init()) {
                    Ok(_) => {
                        eprintln!("Please edit {} and start again, exiting now...", path);
                        Err(CustomError::new(&format!("create {} file", path)))
                    }
                    Err(e) => {
                        eprintln!("{} file could not be created, check permissions...", path);
                        eprintln!("{e}");
                        Err(CustomError::new(&format!("could not create {} file", path)))
                    }
                };
            }
        };

        if let Err(error) = config.validate() {
            return Err(CustomError::new(&error.to_string()));
        }
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigurationError> {
        parse_log_level(self.log_level.as_str())
            .map_err(|e| ConfigurationError::ValidationError(e.message().to_string()))?;

        let mut check_map = vec![
            ("[Environment] application_identifier", self.environment.application_identifier.clone(), r"^\S.*$"),
            ("[Environment] file_cache_base_path", self.environment.file_cache_base_path.clone(), r"^\S.*$"),
        ];
        for identifier in self.caches.keys() {
            check_map.push(("[Caches] identifier", identifier.clone(), PATTERN_ENTRY_IDENTIFIER));
        }
        for (name, value, regex) in check_map {
            Self::validate_value(name, value, regex)?;
        }

        if self.environment.maximum_path_length == Some(0) {
            return Err(ConfigurationError::ValidationError(String::from("[Environment] maximum_path_length must be positive")));
        }
        if self.lock.max_attempts == 0 {
            return Err(ConfigurationError::ValidationError(String::from("[Lock] max_attempts must be positive")));
        }
        if self.lock.backoff_min_micros > self.lock.backoff_max_micros {
            return Err(ConfigurationError::ValidationError(format!(
                "[Lock] backoff_min_micros ({}) exceeds backoff_max_micros ({})",
                self.lock.backoff_min_micros, self.lock.backoff_max_micros
            )));
        }
        Ok(())
    }

    pub fn validate_value(name: &str, value: String, regex: &str) -> Result<(), ConfigurationError> {
        let regex_check = Regex::new(regex)
            .map_err(|e| ConfigurationError::ValidationError(format!("invalid pattern for {}: {}", name, e)))?;
        if !regex_check.is_match(value.as_str()) {
            return Err(ConfigurationError::ValidationError(format!(
                "Error checking {} [:] Name: \"{}\" [:] Regex: \"{}\"", name, value, regex_check
            )));
        }
        Ok(())
    }
}
