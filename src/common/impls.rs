/// Display and Error implementations for `CustomError`.
pub mod custom_error;
