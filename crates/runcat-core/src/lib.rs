pub mod animation;
pub mod config;
pub mod log;
pub mod menu;
pub mod runner;
pub mod sampler;
pub mod speed;
pub mod sprite;
pub mod startup;

pub use animation::{AnimationDriver, Effect, SAMPLE_INTERVAL, Tick, timer_millis};
pub use config::Config;
pub use menu::{MenuCommand, MenuEntry, MenuState};
pub use runner::{Runner, Theme};
pub use sampler::{CpuSampler, CpuTimes, SampleError, SystemTimes};
pub use speed::SpeedCurve;

/// A boxed error type for host operations.
///
/// Any error type that implements the `Error` trait can be boxed into this.
pub type AppResult<T> = Result<T, Box<dyn std::error::Error>>;
