//! In-flight guard shared by controllers that reject re-entrant calls.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::ClientError;

/// Holds the in-flight flag for the duration of one call.
pub(crate) struct InFlight<'a> {
    flag: &'a AtomicBool,
}

impl<'a> InFlight<'a> {
    /// Set `flag`, or fail with [`ClientError::Busy`] if it is already set.
    pub(crate) fn acquire(flag: &'a AtomicBool) -> Result<Self, ClientError> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| ClientError::Busy)?;
        Ok(Self { flag })
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}
