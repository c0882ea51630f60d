pub use error::Error;
pub use seqalign_core_rs::{Alignable, Reversed};

mod error;
pub mod pairwise;
pub mod parallel;
