//! The polling/detection engine
//!
//! One `LivenessMonitor` owns the cycle state and drives quorum calls
//! (latest header, validator check, block range scan) once per cycle,
//! publishing the verdict through the shared `HealthState`.

pub mod liveness;
pub mod scanner;
pub mod validator;

pub use liveness::{CycleState, LivenessMonitor};
pub use scanner::ValidatorBlockTracker;
