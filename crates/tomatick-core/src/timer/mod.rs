mod engine;
mod service;

pub use engine::{CyclePosition, Mode, RunState, Snapshot, TimerEngine};
pub use service::TimerService;
