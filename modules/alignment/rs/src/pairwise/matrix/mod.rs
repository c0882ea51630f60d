pub use dpmatrix::{DPMatrix, Workspace};
pub use layout::{Banded, Full, Layout, Tiled};
pub use traces::TraceMatrix;

pub(crate) use layout::band_span;

mod dpmatrix;
mod layout;
mod traces;
