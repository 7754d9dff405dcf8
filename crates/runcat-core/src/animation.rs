//! Animation driver for the tray icon.
//!
//! The host owns two timers: a frame timer whose period changes with CPU
//! load, and a fixed sample timer. Each timer posts a [`Tick`] to the
//! driver, which updates its state and returns the [`Effect`]s the host
//! must apply (change the icon, change the tooltip, re-arm the frame
//! timer). The driver never touches the OS itself.

use std::time::Duration;

use crate::runner::Runner;
use crate::sampler::SampleError;
use crate::speed::SpeedCurve;

/// Fixed period of the sample timer.
pub const SAMPLE_INTERVAL: Duration = Duration::from_millis(3000);

/// A timer event delivered to the driver.
#[derive(Debug, Clone, PartialEq)]
pub enum Tick {
    /// The frame timer fired.
    Frame,
    /// The sample timer fired and the sampler produced this result.
    Sample(Result<Option<f64>, SampleError>),
}

/// An action the host must perform.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Show frame `frame` of `runner` in the tray.
    SetIcon { runner: Runner, frame: usize },
    /// Replace the tray tooltip.
    SetTooltip(String),
    /// Re-arm the frame timer with a new period, discarding the pending
    /// countdown.
    RestartFrameTimer(Duration),
}

/// Shortest period OS timers honour, in milliseconds.
pub const MIN_TIMER_MS: u32 = 10;

/// Converts an interval to whole timer milliseconds, rounding to the
/// nearest value and never going below [`MIN_TIMER_MS`].
pub fn timer_millis(interval: Duration) -> u32 {
    let ms = (interval.as_secs_f64() * 1000.0).round();
    ms.clamp(f64::from(MIN_TIMER_MS), f64::from(u32::MAX)) as u32
}

/// Formats the tray tooltip for a usage percentage.
pub fn tooltip(percent: f64) -> String {
    format!("CPU:{percent}%")
}

/// Owns the frame index, frame interval, and selected runner.
#[derive(Debug, Clone)]
pub struct AnimationDriver {
    curve: SpeedCurve,
    runner: Runner,
    frame: usize,
    interval: Duration,
    last_usage: Option<f64>,
}

impl AnimationDriver {
    pub fn new(runner: Runner, curve: SpeedCurve) -> Self {
        Self {
            curve,
            runner,
            frame: 0,
            interval: curve.initial_interval(),
            last_usage: None,
        }
    }

    /// Handles one timer event and returns the effects to apply.
    pub fn handle(&mut self, tick: Tick) -> Vec<Effect> {
        match tick {
            Tick::Frame => vec![self.advance()],
            Tick::Sample(Ok(Some(percent))) => self.apply_usage(percent),
            Tick::Sample(Ok(None)) => Vec::new(),
            Tick::Sample(Err(e)) => {
                crate::log_warn!("Skipping sample: {e}");
                Vec::new()
            }
        }
    }

    /// Switches the animated character.
    ///
    /// Keeps the frame index when it is valid for the new runner and
    /// resets it to 0 otherwise. Returns the icon to show right away.
    pub fn select_runner(&mut self, runner: Runner) -> Effect {
        self.runner = runner;
        if self.frame >= runner.frame_count() {
            self.frame = 0;
        }
        Effect::SetIcon {
            runner,
            frame: self.frame,
        }
    }

    pub fn runner(&self) -> Runner {
        self.runner
    }

    /// Index of the frame the next frame tick will show.
    pub fn frame(&self) -> usize {
        self.frame
    }

    /// Current frame timer period.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Most recent successfully measured usage, if any.
    pub fn last_usage(&self) -> Option<f64> {
        self.last_usage
    }

    /// Tooltip for the most recent usage, if any has been measured.
    pub fn tooltip(&self) -> Option<String> {
        self.last_usage.map(tooltip)
    }

    fn advance(&mut self) -> Effect {
        let count = self.runner.frame_count();
        if self.frame >= count {
            self.frame = 0;
        }
        let shown = self.frame;
        self.frame = (self.frame + 1) % count;
        Effect::SetIcon {
            runner: self.runner,
            frame: shown,
        }
    }

    fn apply_usage(&mut self, percent: f64) -> Vec<Effect> {
        self.last_usage = Some(percent);
        self.interval = self.curve.interval(percent);
        crate::log_debug!(
            "CPU {percent}% -> frame interval {:.1} ms",
            self.curve.interval_ms(percent)
        );
        vec![
            Effect::SetTooltip(tooltip(percent)),
            Effect::RestartFrameTimer(self.interval),
        ]
    }
}
