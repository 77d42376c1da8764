//! # Tagged Cache
//!
//! A pluggable cache with a frontend/backend split, tag based invalidation,
//! per-entry expiry and advisory file locking for safe concurrent access.
//!
//! ## Overview
//!
//! Callers talk to a *frontend* ([`cache::structs::variable_frontend::VariableFrontend`]
//! or [`cache::structs::string_frontend::StringFrontend`]) which validates identifiers and
//! tags, serializes values and delegates raw byte storage to a *backend*
//! implementing [`cache::traits::cache_backend::CacheBackend`].
//!
//! ## Features
//!
//! - **Backends**: file, transient memory, null, memcache and redis
//! - **Tagging**: associate entries with tags and flush them in bulk
//! - **Expiry**: per-entry lifetimes with a configurable default
//! - **Locking**: advisory file locks with RAII release and bounded retries
//! - **Adapters**: item pool with deferred commits and a simple key/value cache
//! - **Management**: a cache manager and CLI to list, flush and garbage collect caches
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use tagged_cache::cache::enums::backend_kind::BackendKind;
//! use tagged_cache::cache::enums::frontend_kind::FrontendKind;
//! use tagged_cache::cache::structs::backend_options::BackendOptions;
//! use tagged_cache::cache::structs::cache_factory::CacheFactory;
//! use tagged_cache::cache::structs::environment_configuration::EnvironmentConfiguration;
//! use tagged_cache::lock::structs::lock_manager::LockManager;
//!
//! let environment = EnvironmentConfiguration::new("my-app", "/tmp/cache");
//! let locks = LockManager::new(environment.lock_directory());
//! let factory = CacheFactory::new(environment, locks);
//! let cache = factory.create("Pages", FrontendKind::variable, BackendKind::file, &BackendOptions::new())?;
//! cache.as_variable()?.set("front", &vec![1, 2, 3], &["menu".to_string()], None)?;
//! ```
//!
//! ## Modules
//!
//! - [`adapters`] - Item pool and simple cache adapters over a variable frontend
//! - [`cache`] - Validator, backends, frontends, factory and cache manager
//! - [`common`] - Logging setup and shared helpers
//! - [`config`] - Configuration management and TOML parsing
//! - [`lock`] - Advisory lock strategy and lock manager
//! - [`structs`] - CLI argument parsing

/// Item pool and simple cache adapters.
///
/// Translate the frontend API into the standard pool/item vocabulary,
/// including deferred saves and batch commits.
pub mod adapters;

/// Cache core: identifier validation, backends, frontends and factory.
pub mod cache;

/// Common utilities and shared functionality.
///
/// Contains logging setup, hashing and time helpers used across all modules.
pub mod common;

/// Configuration management module.
///
/// Handles loading, parsing, and validating configuration from TOML files.
pub mod config;

/// Advisory locking module.
///
/// Provides file-lock based mutual exclusion over named subjects with
/// shared and exclusive modes.
pub mod lock;

/// CLI argument parsing.
pub mod structs;
