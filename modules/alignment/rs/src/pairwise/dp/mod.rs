pub use cell::Cell;
pub use kernel::{AffineGaps, Kernel, LinearGaps, Origin, Recurrence};
pub use trace::{Source, Trace};

mod cell;
mod kernel;
mod trace;
