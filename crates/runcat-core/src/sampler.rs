//! CPU usage sampling from cumulative system time counters.
//!
//! The OS exposes three monotonically increasing counters (idle, kernel,
//! user). Usage is derived from the delta between two reads, so the
//! sampler keeps exactly one previous reading. Kernel time includes idle
//! time, which is why idle is subtracted from the busy total.

use std::fmt;

/// One reading of the cumulative idle, kernel, and user time counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CpuTimes {
    pub idle: u64,
    pub kernel: u64,
    pub user: u64,
}

/// Errors produced while reading CPU counters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SampleError {
    /// The OS call that provides the counters failed.
    Unavailable(String),
}

impl fmt::Display for SampleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable(reason) => write!(f, "CPU counters unavailable: {reason}"),
        }
    }
}

impl std::error::Error for SampleError {}

/// Source of cumulative CPU time counters.
///
/// The Windows host implements this with `GetSystemTimes`.
pub trait SystemTimes {
    /// Reads the current counters.
    fn read(&mut self) -> Result<CpuTimes, SampleError>;
}

/// Computes usage between two counter readings as a percentage.
///
/// The result is `ceil(100 * busy / total)` where `total = kernel + user`
/// and `busy = total - idle`. It is not clamped, so measurement noise can
/// push it outside `0..=100`. A zero `total` (no elapsed time) yields 0.
pub fn usage_percent(prev: CpuTimes, now: CpuTimes) -> f64 {
    let idle = now.idle.saturating_sub(prev.idle) as f64;
    let kernel = now.kernel.saturating_sub(prev.kernel) as f64;
    let user = now.user.saturating_sub(prev.user) as f64;

    let total = kernel + user;
    if total == 0.0 {
        return 0.0;
    }

    // Adding 0.0 turns a negative zero from ceil(-0.x) into 0.
    (100.0 * (total - idle) / total).ceil() + 0.0
}

/// Tracks the previous counter reading and yields usage on each call.
pub struct CpuSampler<S> {
    source: S,
    prev: Option<CpuTimes>,
}

impl<S: SystemTimes> CpuSampler<S> {
    /// Creates a sampler without a baseline. The first
    /// [`sample`](Self::sample) call establishes it.
    pub fn new(source: S) -> Self {
        Self { source, prev: None }
    }

    /// Reads the counters and returns usage since the previous reading.
    ///
    /// Returns `Ok(None)` for the first successful reading, which only
    /// establishes the baseline. A failed read leaves the previous
    /// reading in place.
    pub fn sample(&mut self) -> Result<Option<f64>, SampleError> {
        let now = self.source.read()?;
        let usage = self.prev.map(|prev| usage_percent(prev, now));
        self.prev = Some(now);
        Ok(usage)
    }

    /// Returns `true` once a baseline reading has been taken.
    #[cfg(test)]
    fn has_baseline(&self) -> bool {
        self.prev.is_some()
    }
}
