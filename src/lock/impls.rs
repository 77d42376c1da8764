/// Acquire/release logic of the file lock strategy.
pub mod flock_lock_strategy;

/// Guard release and drop handling.
pub mod lock;

/// Lock manager construction and acquisition.
pub mod lock_manager;
