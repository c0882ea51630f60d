pub use admission::{Admission, Permit};
pub use cancel::CancelToken;
pub use config::{Backpressure, SchedulerConfig, MAX_LANES};
pub use lanes::LaneMask;
pub use metrics::{Counters, Metrics, NoMetrics};
pub use report::{InstanceId, Outcome, Report, Status};
pub use scheduler::{Job, Scheduler};
pub use wavefront::BlockState;

mod admission;
mod batch;
mod cancel;
mod config;
mod lanes;
mod metrics;
mod report;
mod scheduler;
mod wavefront;
