use crate::lock::errors::LockError;

/// Mutual exclusion over a named subject.
///
/// A strategy instance holds at most one lock at a time.
pub trait LockStrategy: Send {
    /// Acquires the lock for `subject`, shared or exclusive.
    ///
    /// Blocking mode retries until the lock is held or the retry budget is
    /// spent; non-blocking mode fails immediately on contention. Both fail
    /// with [`LockError::LockNotAcquired`].
    fn acquire(&mut self, subject: &str, exclusive: bool, nonblocking: bool) -> Result<(), LockError>;

    /// Releases the lock if one is held. Calling it twice is harmless.
    fn release(&mut self) -> bool;
}
