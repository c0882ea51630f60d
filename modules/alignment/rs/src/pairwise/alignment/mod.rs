pub use alignment::Alignment;
pub use offset::Offset;
pub use op::Op;
pub use step::{Step, StepWithOffset};

pub mod alignment;
mod offset;
mod op;
pub mod step;
pub mod utils;
