use derive_more::{Display, Error};

use crate::pairwise::config::Mode;

/// Errors reported by the alignment core.
///
/// Configuration errors are raised before any DP cell is computed, `Busy` is a resource
/// condition that the caller may retry, and `NoAlignment` is the numeric edge case where the
/// terminal cell is unreachable under the requested constraints.
#[derive(Clone, PartialEq, Eq, Debug, Display, Error)]
pub enum Error {
    #[display("Band lower diagonal ({lower}) must not exceed the upper diagonal ({upper})")]
    InvalidBand { lower: isize, upper: isize },

    #[display(
        "Band [{lower}, {upper}] does not admit any alignment path for sequences of length {len1} and {len2}"
    )]
    InfeasibleBand {
        lower: isize,
        upper: isize,
        len1: usize,
        len2: usize,
    },

    #[display("Local alignment requires non-empty sequences")]
    EmptySequence,

    #[display("Free end gaps are inconsistent with the {mode:?} alignment mode")]
    InconsistentEndGaps { mode: Mode },

    #[display("Gap scores must satisfy gap_open <= gap_extend <= 0")]
    NonMonotonicGaps,

    #[display("Invalid seed chain at anchor {anchor}: {reason}")]
    InvalidSeedChain { anchor: usize, reason: &'static str },

    #[display("Invalid scheduler configuration: {reason}")]
    InvalidSchedulerConfig { reason: &'static str },

    #[display("All admission slots are in use, try again later")]
    Busy,

    #[display("No alignment satisfies the configured constraints")]
    NoAlignment,
}
