//! Configuration enumerations.

/// Errors raised while reading, writing or validating configuration.
pub mod configuration_error;
