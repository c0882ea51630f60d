use derive_getters::{Dissolve, Getters};
use derive_more::Constructor;

use crate::Error;

/// Largest number of alignments packed into one lane bucket (bits of [`super::LaneMask`]).
pub const MAX_LANES: usize = 64;

/// What a submitter does when every admission slot is taken.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash, Default)]
pub enum Backpressure {
    /// Wait until an in-flight instance completes
    #[default]
    Block,
    /// Fail the instance with [`Error::Busy`]
    Reject,
}

#[derive(Clone, Eq, PartialEq, Debug, Hash, Getters, Dissolve, Constructor)]
pub struct SchedulerConfig {
    /// Worker threads: `> 0` exact (capped by the hardware), `0` a single thread,
    /// `< 0` all hardware threads but `|threads| - 1`.
    threads: isize,
    /// Side of the square wavefront blocks
    block_size: usize,
    /// Alignments packed into a single batch bucket
    lane_width: usize,
    /// Wavefront instances allowed in flight at once
    max_in_flight: usize,
    backpressure: Backpressure,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self::new(-1, 64, 16, 4, Backpressure::Block)
    }
}

impl SchedulerConfig {
    pub fn with_threads(mut self, threads: isize) -> Self {
        self.threads = threads;
        self
    }

    pub fn with_block_size(mut self, block_size: usize) -> Self {
        self.block_size = block_size;
        self
    }

    pub fn with_lane_width(mut self, lane_width: usize) -> Self {
        self.lane_width = lane_width;
        self
    }

    pub fn with_max_in_flight(mut self, max_in_flight: usize) -> Self {
        self.max_in_flight = max_in_flight;
        self
    }

    pub fn with_backpressure(mut self, backpressure: Backpressure) -> Self {
        self.backpressure = backpressure;
        self
    }

    pub fn validate(&self) -> Result<(), Error> {
        let reason = if self.block_size == 0 {
            "block size must be positive"
        } else if self.lane_width == 0 || self.lane_width > MAX_LANES {
            "lane width must be within 1..=64"
        } else if self.max_in_flight == 0 {
            "at least one instance must be allowed in flight"
        } else {
            return Ok(());
        };
        Err(Error::InvalidSchedulerConfig { reason })
    }
}
