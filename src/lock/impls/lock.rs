use std::fmt;
use crate::lock::structs::lock::Lock;

impl Lock {
    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn is_exclusive(&self) -> bool {
        self.exclusive
    }

    pub fn is_released(&self) -> bool {
        self.released
    }

    /// Releases the lock early. Returns `false` when it was already released.
    pub fn release(&mut self) -> bool {
        if self.released {
            return false;
        }
        self.released = true;
        self.strategy.release()
    }
}

impl Drop for Lock {
    fn drop(&mut self) {
        self.release();
    }
}

impl fmt::Debug for Lock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Lock")
            .field("subject", &self.subject)
            .field("exclusive", &self.exclusive)
            .field("released", &self.released)
            .finish()
    }
}
