use std::fs::File;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;

#[derive(Debug)]
pub struct FlockLockStrategy {
    pub(crate) lock_directory: PathBuf,
    pub(crate) max_attempts: u32,
    pub(crate) backoff_min_micros: u64,
    pub(crate) backoff_max_micros: u64,
    pub(crate) cancellation: Option<Arc<AtomicBool>>,
    pub(crate) file: Option<File>,
    pub(crate) lock_path: Option<PathBuf>,
    pub(crate) exclusive: bool,
}
