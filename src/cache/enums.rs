//! Cache enumeration types.

/// Storage strategies a cache can be backed by.
pub mod backend_kind;

/// Frontend variants (variable, string).
pub mod frontend_kind;

/// Frontend handle returned by the factory.
pub mod frontend;

/// Value serialization formats of the variable frontend.
pub mod serializer_kind;
