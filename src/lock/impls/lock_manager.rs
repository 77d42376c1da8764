use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use crate::lock::errors::LockError;
use crate::lock::impls::flock_lock_strategy::{DEFAULT_BACKOFF_MAX_MICROS, DEFAULT_BACKOFF_MIN_MICROS, DEFAULT_MAX_ATTEMPTS};
use crate::lock::structs::flock_lock_strategy::FlockLockStrategy;
use crate::lock::structs::lock::Lock;
use crate::lock::structs::lock_manager::LockManager;
use crate::lock::traits::lock_strategy::LockStrategy;

impl LockManager {
    pub fn new<P: Into<PathBuf>>(lock_directory: P) -> LockManager {
        LockManager {
            lock_directory: lock_directory.into(),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            backoff_min_micros: DEFAULT_BACKOFF_MIN_MICROS,
            backoff_max_micros: DEFAULT_BACKOFF_MAX_MICROS,
            cancellation: None,
        }
    }

    pub fn with_retry_policy(mut self, max_attempts: u32, backoff_min_micros: u64, backoff_max_micros: u64) -> Self {
        self.max_attempts = max_attempts.max(1);
        self.backoff_min_micros = backoff_min_micros.min(backoff_max_micros);
        self.backoff_max_micros = backoff_max_micros.max(backoff_min_micros);
        self
    }

    /// Shares a flag which, once set, aborts every pending retry loop with `LockNotAcquired`.
    pub fn with_cancellation(mut self, cancellation: Arc<AtomicBool>) -> Self {
        self.cancellation = Some(cancellation);
        self
    }

    pub fn lock_directory(&self) -> &PathBuf {
        &self.lock_directory
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn strategy(&self) -> FlockLockStrategy {
        FlockLockStrategy::new(self.lock_directory.clone())
            .with_retry_policy(self.max_attempts, self.backoff_min_micros, self.backoff_max_micros)
            .with_cancellation(self.cancellation.clone())
    }

    /// Blocks (within the retry budget) until the lock on `subject` is held.
    pub fn acquire(&self, subject: &str, exclusive: bool) -> Result<Lock, LockError> {
        self.acquire_with(subject, exclusive, false)
    }

    /// Fails immediately with `LockNotAcquired` when `subject` is locked elsewhere.
    pub fn try_acquire(&self, subject: &str, exclusive: bool) -> Result<Lock, LockError> {
        self.acquire_with(subject, exclusive, true)
    }

    fn acquire_with(&self, subject: &str, exclusive: bool, nonblocking: bool) -> Result<Lock, LockError> {
        let mut strategy = self.strategy();
        strategy.acquire(subject, exclusive, nonblocking)?;
        Ok(Lock {
            subject: subject.to_string(),
            exclusive,
            strategy: Box::new(strategy),
            released: false,
        })
    }
}
