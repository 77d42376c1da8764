//! Implementation blocks for configuration types.

pub mod cache_config;
pub mod configuration;
pub mod configuration_error;
pub mod environment_config;
pub mod lock_config;
