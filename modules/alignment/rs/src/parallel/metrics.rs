use std::sync::atomic::{AtomicUsize, Ordering};

use impl_tools::autoimpl;

use super::report::{InstanceId, Status};

/// Scheduler callbacks. Implementations must be cheap and thread-safe:
/// they are invoked from pool threads while alignments are in flight.
#[autoimpl(for<T: trait + ?Sized> &T, Box<T>, std::sync::Arc<T>)]
pub trait Metrics: Send + Sync {
    /// A unit of work (wavefront block or lane bucket) finished for the instance.
    fn block_done(&self, _id: InstanceId) {}

    /// The instance reached its final outcome.
    fn instance_done(&self, _id: InstanceId, _status: Status) {}
}

/// Metrics sink that ignores everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoMetrics;

impl Metrics for NoMetrics {}

/// Atomic event counters.
#[derive(Debug, Default)]
pub struct Counters {
    blocks: AtomicUsize,
    done: AtomicUsize,
    cancelled: AtomicUsize,
    failed: AtomicUsize,
}

impl Counters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn blocks(&self) -> usize {
        self.blocks.load(Ordering::Relaxed)
    }

    pub fn done(&self) -> usize {
        self.done.load(Ordering::Relaxed)
    }

    pub fn cancelled(&self) -> usize {
        self.cancelled.load(Ordering::Relaxed)
    }

    pub fn failed(&self) -> usize {
        self.failed.load(Ordering::Relaxed)
    }
}

impl Metrics for Counters {
    fn block_done(&self, _: InstanceId) {
        self.blocks.fetch_add(1, Ordering::Relaxed);
    }

    fn instance_done(&self, _: InstanceId, status: Status) {
        let counter = match status {
            Status::Done => &self.done,
            Status::Cancelled => &self.cancelled,
            Status::Failed => &self.failed,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }
}
