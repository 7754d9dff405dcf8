//! Maps CPU usage to the frame interval of the tray animation.
//!
//! Usage is divided by `divisor` and clamped to `min_scale..=max_scale`;
//! the base interval is then divided by that scale. With the defaults an
//! idle machine animates every 200 ms and a saturated one every 10 ms.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Parameters of the usage-to-interval mapping.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeedCurve {
    /// Frame interval in milliseconds at the lowest scale.
    pub base_interval_ms: f64,
    /// Usage percentage is divided by this before clamping.
    pub divisor: f64,
    /// Lower clamp of the scale factor.
    pub min_scale: f64,
    /// Upper clamp of the scale factor.
    pub max_scale: f64,
}

impl Default for SpeedCurve {
    fn default() -> Self {
        Self {
            base_interval_ms: 200.0,
            divisor: 5.0,
            min_scale: 1.0,
            max_scale: 20.0,
        }
    }
}

impl SpeedCurve {
    /// Returns the bounded scale factor for a usage percentage.
    ///
    /// A NaN percentage maps to `min_scale`.
    pub fn scale(&self, percent: f64) -> f64 {
        let scaled = percent / self.divisor;
        if scaled.is_nan() {
            return self.min_scale;
        }
        scaled.clamp(self.min_scale, self.max_scale)
    }

    /// Returns the frame interval in milliseconds for a usage percentage.
    pub fn interval_ms(&self, percent: f64) -> f64 {
        self.base_interval_ms / self.scale(percent)
    }

    /// Returns the frame interval for a usage percentage.
    pub fn interval(&self, percent: f64) -> Duration {
        Duration::from_secs_f64(self.interval_ms(percent) / 1000.0)
    }

    /// The interval used before any usage has been measured.
    pub fn initial_interval(&self) -> Duration {
        Duration::from_secs_f64(self.base_interval_ms / 1000.0)
    }

    /// Clamps the parameters to ranges that keep the interval finite
    /// and positive. Non-finite values are replaced by the defaults.
    pub fn validate(&mut self) {
        let defaults = Self::default();
        for (value, fallback) in [
            (&mut self.base_interval_ms, defaults.base_interval_ms),
            (&mut self.divisor, defaults.divisor),
            (&mut self.min_scale, defaults.min_scale),
            (&mut self.max_scale, defaults.max_scale),
        ] {
            if !value.is_finite() {
                *value = fallback;
            }
        }

        self.base_interval_ms = self.base_interval_ms.clamp(10.0, 5000.0);
        self.divisor = self.divisor.clamp(0.1, 100.0);
        self.min_scale = self.min_scale.clamp(0.1, 100.0);
        self.max_scale = self.max_scale.clamp(self.min_scale, 100.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eighty_percent_runs_at_twelve_and_a_half_ms() {
        // Arrange
        let curve = SpeedCurve::default();

        // Act / Assert
        assert_eq!(curve.scale(80.0), 16.0);
        assert_eq!(curve.interval_ms(80.0), 12.5);
    }

    #[test]
    fn idle_runs_at_base_interval() {
        // Arrange
        let curve = SpeedCurve::default();

        // Act / Assert
        assert_eq!(curve.scale(0.0), 1.0);
        assert_eq!(curve.interval_ms(0.0), 200.0);
        assert_eq!(curve.interval(0.0), Duration::from_millis(200));
    }

    #[test]
    fn saturated_cpu_runs_at_ten_ms() {
        let curve = SpeedCurve::default();
        assert_eq!(curve.interval_ms(100.0), 10.0);
        assert_eq!(curve.interval_ms(250.0), 10.0);
    }

    #[test]
    fn scale_is_monotonic_in_usage() {
        // Arrange
        let curve = SpeedCurve::default();
        let mut prev = curve.scale(-50.0);

        // Act / Assert
        for step in -50..=300 {
            let scale = curve.scale(step as f64 * 0.5);
            assert!(scale >= prev, "scale decreased at {step}");
            prev = scale;
        }
    }

    #[test]
    fn interval_stays_within_bounds() {
        let curve = SpeedCurve::default();
        for percent in 0..=1000 {
            let ms = curve.interval_ms(percent as f64 / 4.0);
            assert!((10.0..=200.0).contains(&ms), "{ms} out of range");
        }
    }

    #[test]
    fn negative_and_nan_usage_fall_back_to_slowest() {
        let curve = SpeedCurve::default();
        assert_eq!(curve.interval_ms(-12.0), 200.0);
        assert_eq!(curve.interval_ms(f64::NAN), 200.0);
    }

    #[test]
    fn validate_clamps_degenerate_values() {
        // Arrange
        let mut curve = SpeedCurve {
            base_interval_ms: 0.0,
            divisor: 0.0,
            min_scale: 50.0,
            max_scale: 2.0,
        };

        // Act
        curve.validate();

        // Assert
        assert_eq!(curve.base_interval_ms, 10.0);
        assert_eq!(curve.divisor, 0.1);
        assert_eq!(curve.max_scale, 50.0);
        assert!(curve.interval_ms(0.0).is_finite());
    }

    #[test]
    fn validate_replaces_non_finite_values_with_defaults() {
        for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            // Arrange
            let mut curve = SpeedCurve {
                base_interval_ms: bad,
                divisor: bad,
                min_scale: bad,
                max_scale: bad,
            };

            // Act
            curve.validate();

            // Assert
            assert_eq!(curve, SpeedCurve::default(), "input {bad}");
            for percent in [0.0, 50.0, 100.0] {
                let ms = curve.interval_ms(percent);
                assert!(ms.is_finite() && ms > 0.0, "{ms} for {percent}% with {bad}");
            }
            assert_eq!(curve.initial_interval(), Duration::from_millis(200));
        }
    }
}
