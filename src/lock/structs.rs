//! Lock structures.

/// File lock based strategy, one lock file per hashed subject.
pub mod flock_lock_strategy;

/// Guard holding an acquired lock until released or dropped.
pub mod lock;

/// Factory for locks sharing one lock directory and retry policy.
pub mod lock_manager;
