pub use alignment::{Alignment, Offset, Op, Step, StepWithOffset};
pub use config::{AlignConfig, Band, EndGaps, Mode};
pub use engine::{solve, Aligner, Solution};
pub use matrix::Workspace;

pub mod alignment;
pub mod chain;
pub mod config;
pub mod dp;
mod engine;
mod fill;
pub mod matrix;
pub mod scoring;
pub mod scout;
pub mod traceback;

pub(crate) use engine::{finish, solve_window};
pub(crate) use fill::fill;
