use std::fs::{self, File, OpenOptions, TryLockError};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use log::{debug, warn};
use rand::RngExt;
use crate::common::common::sha1_hex;
use crate::lock::errors::LockError;
use crate::lock::structs::flock_lock_strategy::FlockLockStrategy;
use crate::lock::traits::lock_strategy::LockStrategy;

pub const DEFAULT_MAX_ATTEMPTS: u32 = 10_000;
pub const DEFAULT_BACKOFF_MIN_MICROS: u64 = 10;
pub const DEFAULT_BACKOFF_MAX_MICROS: u64 = 500;
const LOG_PREFIX: &str = "[Lock]";

impl FlockLockStrategy {
    pub fn new(lock_directory: PathBuf) -> FlockLockStrategy {
        FlockLockStrategy {
            lock_directory,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            backoff_min_micros: DEFAULT_BACKOFF_MIN_MICROS,
            backoff_max_micros: DEFAULT_BACKOFF_MAX_MICROS,
            cancellation: None,
            file: None,
            lock_path: None,
            exclusive: false,
        }
    }

    pub fn with_retry_policy(mut self, max_attempts: u32, backoff_min_micros: u64, backoff_max_micros: u64) -> Self {
        self.max_attempts = max_attempts.max(1);
        self.backoff_min_micros = backoff_min_micros.min(backoff_max_micros);
        self.backoff_max_micros = backoff_max_micros.max(backoff_min_micros);
        self
    }

    pub fn with_cancellation(mut self, cancellation: Option<Arc<AtomicBool>>) -> Self {
        self.cancellation = cancellation;
        self
    }

    /// Deterministic lock file location for a subject.
    pub fn lock_file_path(&self, subject: &str) -> PathBuf {
        self.lock_directory.join(format!("{}.lock", sha1_hex(subject)))
    }

    pub fn is_locked(&self) -> bool {
        self.file.is_some()
    }

    fn is_cancelled(&self) -> bool {
        self.cancellation.as_ref().is_some_and(|flag| flag.load(Ordering::SeqCst))
    }

    fn backoff(&self) {
        let micros = rand::rng().random_range(self.backoff_min_micros..=self.backoff_max_micros);
        std::thread::sleep(Duration::from_micros(micros));
    }

    fn ensure_lock_directory(&self) -> Result<(), LockError> {
        if self.lock_directory.is_dir() {
            return Ok(());
        }
        fs::create_dir_all(&self.lock_directory).map_err(|source| LockError::Io {
            path: self.lock_directory.clone(),
            source,
        })
    }

    fn not_acquired(subject: &str, attempts: u32) -> LockError {
        LockError::LockNotAcquired {
            subject: subject.to_string(),
            attempts,
        }
    }
}

/// Whether the locked descriptor still refers to the file currently linked at `path`.
///
/// A lock file unlinked (and possibly recreated) between open and lock leaves us holding
/// a lock nobody else will ever look at.
pub(crate) fn still_linked(file: &File, path: &Path) -> io::Result<bool> {
    let held = file.metadata()?;
    match fs::metadata(path) {
        Ok(current) => Ok(same_file(&held, &current)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e),
    }
}

#[cfg(unix)]
fn same_file(held: &fs::Metadata, current: &fs::Metadata) -> bool {
    use std::os::unix::fs::MetadataExt;
    held.dev() == current.dev() && held.ino() == current.ino()
}

// Open files cannot be unlinked on this platform, so the path always names the held file.
#[cfg(not(unix))]
fn same_file(_held: &fs::Metadata, _current: &fs::Metadata) -> bool {
    true
}

impl LockStrategy for FlockLockStrategy {
    fn acquire(&mut self, subject: &str, exclusive: bool, nonblocking: bool) -> Result<(), LockError> {
        if self.is_locked() {
            self.release();
        }
        self.ensure_lock_directory()?;
        let lock_path = self.lock_file_path(subject);

        for attempt in 1..=self.max_attempts {
            if self.is_cancelled() {
                debug!("{} Acquisition of \"{}\" cancelled", LOG_PREFIX, subject);
                return Err(Self::not_acquired(subject, attempt - 1));
            }

            let file = OpenOptions::new()
                .read(true)
                .write(true)
                .create(true)
                .truncate(false)
                .open(&lock_path)
                .map_err(|source| LockError::Io { path: lock_path.clone(), source })?;

            let locked = if exclusive { file.try_lock() } else { file.try_lock_shared() };
            match locked {
                Ok(()) => {
                    let linked = still_linked(&file, &lock_path)
                        .map_err(|source| LockError::Io { path: lock_path.clone(), source })?;
                    if linked {
                        debug!("{} Acquired {} lock on \"{}\" after {} attempt(s)", LOG_PREFIX, if exclusive { "exclusive" } else { "shared" }, subject, attempt);
                        self.file = Some(file);
                        self.lock_path = Some(lock_path);
                        self.exclusive = exclusive;
                        return Ok(());
                    }
                    let _ = file.unlock();
                    if attempt % 1000 == 0 {
                        warn!("{} Lock file for \"{}\" keeps being replaced, attempt {}", LOG_PREFIX, subject, attempt);
                    }
                }
                Err(TryLockError::WouldBlock) => {
                    if nonblocking {
                        return Err(Self::not_acquired(subject, attempt));
                    }
                }
                Err(TryLockError::Error(source)) => {
                    return Err(LockError::Io { path: lock_path, source });
                }
            }
            drop(file);
            self.backoff();
        }

        warn!("{} Giving up on \"{}\" after {} attempts", LOG_PREFIX, subject, self.max_attempts);
        Err(Self::not_acquired(subject, self.max_attempts))
    }

    fn release(&mut self) -> bool {
        let Some(file) = self.file.take() else {
            return false;
        };
        let lock_path = self.lock_path.take();
        // Only an exclusive holder may unlink: other shared holders still sit on this inode.
        if self.exclusive
            && let Some(path) = lock_path.as_ref()
        {
            let _ = fs::remove_file(path);
        }
        let unlocked = file.unlock().is_ok();
        self.exclusive = false;
        unlocked
    }
}

impl Drop for FlockLockStrategy {
    fn drop(&mut self) {
        self.release();
    }
}
