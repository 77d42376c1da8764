//! Cache capability traits.

/// Raw byte storage contract implemented by every backend.
pub mod cache_backend;

/// Operations shared by every frontend variant.
pub mod cache_frontend;

/// Pluggable value serialization.
pub mod value_serializer;
