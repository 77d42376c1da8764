//! Configuration management module.
//!
//! Loads, validates and saves the TOML configuration describing the storage
//! environment, the lock retry policy and the configured caches.
//!
//! # Configuration Structure
//!
//! - **log_level**: `off`, `trace`, `debug`, `info`, `warn` or `error`
//! - **environment**: application identifier, base path for file caches and
//!   the maximum path length
//! - **lock**: retry budget and backoff of the advisory lock strategy
//! - **caches**: one section per cache; `caches.Default` supplies fallbacks
//!
//! # Example
//!
//! ```rust,ignore
//! use tagged_cache::config::structs::configuration::Configuration;
//!
//! let config = Configuration::load_from_file("config.toml", false)?;
//! let manager = CacheManager::from_configuration(&config);
//! ```

/// Configuration enumerations.
pub mod enums;

/// Configuration data structures.
pub mod structs;

/// Implementation blocks for configuration loading/saving.
pub mod impls;

#[cfg(test)]
mod tests;
