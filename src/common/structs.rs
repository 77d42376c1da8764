/// Simple string carrying error used by the configuration bootstrap.
pub mod custom_error;
