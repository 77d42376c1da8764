use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;

#[derive(Debug, Clone)]
pub struct LockManager {
    pub(crate) lock_directory: PathBuf,
    pub(crate) max_attempts: u32,
    pub(crate) backoff_min_micros: u64,
    pub(crate) backoff_max_micros: u64,
    pub(crate) cancellation: Option<Arc<AtomicBool>>,
}
