use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use crate::Error;

use super::cancel::CancelToken;

// How often a blocked submitter re-checks the cancellation flag
const POLL: Duration = Duration::from_millis(5);

/// Counting semaphore bounding the number of alignment instances in flight.
#[derive(Debug)]
pub struct Admission {
    limit: usize,
    in_flight: Mutex<usize>,
    released: Condvar,
}

impl Admission {
    pub fn new(limit: usize) -> Arc<Self> {
        Arc::new(Self {
            limit: limit.max(1),
            in_flight: Mutex::new(0),
            released: Condvar::new(),
        })
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn in_flight(&self) -> usize {
        *self.lock()
    }

    fn lock(&self) -> MutexGuard<'_, usize> {
        // The counter stays consistent even if a holder panicked
        self.in_flight.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Take a slot without blocking, fails with [`Error::Busy`] when every slot is in use.
    pub fn try_acquire(self: &Arc<Self>) -> Result<Permit, Error> {
        let mut in_flight = self.lock();
        if *in_flight >= self.limit {
            return Err(Error::Busy);
        }
        *in_flight += 1;
        Ok(Permit {
            admission: Arc::clone(self),
        })
    }

    /// Block until a slot is free. Returns `None` if cancellation was requested while waiting.
    pub fn acquire(self: &Arc<Self>, cancel: &CancelToken) -> Option<Permit> {
        let mut in_flight = self.lock();
        loop {
            if cancel.is_cancelled() {
                return None;
            }
            if *in_flight < self.limit {
                *in_flight += 1;
                return Some(Permit {
                    admission: Arc::clone(self),
                });
            }
            in_flight = self
                .released
                .wait_timeout(in_flight, POLL)
                .unwrap_or_else(PoisonError::into_inner)
                .0;
        }
    }

    fn release(&self) {
        let mut in_flight = self.lock();
        debug_assert!(*in_flight > 0);
        *in_flight = in_flight.saturating_sub(1);
        drop(in_flight);
        self.released.notify_one();
    }
}

/// Admission slot, released on drop.
#[derive(Debug)]
pub struct Permit {
    admission: Arc<Admission>,
}

impl Drop for Permit {
    fn drop(&mut self) {
        self.admission.release();
    }
}
