//! Common utilities and shared functionality.
//!
//! This module contains helper functions and data structures used across
//! all other modules in the cache codebase.
//!
//! # Utilities
//!
//! - Logging setup
//! - Timestamp utilities
//! - Namespace hashing
//!
//! # Data Structures
//!
//! - `CustomError` - Custom error type
//!
//! # Example
//!
//! ```rust,ignore
//! use tagged_cache::common::common::{current_timestamp, sha1_hex};
//!
//! let now = current_timestamp();
//! let digest = sha1_hex("some/lock/subject");
//! ```

/// Common data structures (errors).
pub mod structs;

/// Core utility functions.
#[allow(clippy::module_inception)]
pub mod common;

/// Implementation blocks for common types.
pub mod impls;
