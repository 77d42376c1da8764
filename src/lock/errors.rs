use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LockError {
    #[error("Lock not acquired for subject \"{subject}\" after {attempts} attempt(s)")]
    LockNotAcquired {
        subject: String,
        attempts: u32,
    },

    #[error("Lock file error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
