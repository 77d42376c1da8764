//! Configuration data structures.
//!
//! Each struct corresponds to a section in the TOML configuration file.

/// Per cache settings (`[caches.<identifier>]`).
pub mod cache_config;

/// Root configuration structure containing all settings.
pub mod configuration;

/// Storage environment shared by every cache (`[environment]`).
pub mod environment_config;

/// Lock retry policy (`[lock]`).
pub mod lock_config;
