//! Jerk classification
//!
//! A jerk is a sample whose magnitude on any single axis exceeds its
//! threshold. The checks are independent and OR-ed together; there is no
//! hysteresis, debouncing, or minimum duration, so one sample over threshold
//! is flagged.
//!
//! A sample carrying `NAN` on an axis is never flagged by that axis, since
//! every comparison against `NAN` is false. That follows from the loader's
//! non-numeric pass-through and is intentional.

use serde::{Deserialize, Serialize};

use crate::types::Sample;

/// Accelerometer magnitude threshold (g), x and y axes.
pub const ACCEL_THRESHOLD_G: f64 = 1.5;
/// At-rest baseline on the vertical axis (g).
pub const VERTICAL_BASELINE_G: f64 = 1.0;
/// Allowed deviation from the vertical baseline (g).
pub const VERTICAL_DEVIATION_G: f64 = 0.5;
/// Gyroscope magnitude threshold (deg/s), all axes.
pub const GYRO_THRESHOLD_DPS: f64 = 100.0;

/// Per-axis thresholds for jerk detection.
///
/// The fields are a configuration surface for per-device tuning; the default
/// values are the fixed policy the system ships with.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct JerkDetector {
    /// Threshold for `|ax|` and `|ay|` (g)
    pub accel_g: f64,
    /// At-rest baseline for `az` (g)
    pub vertical_baseline_g: f64,
    /// Threshold for `|az - baseline|` (g)
    pub vertical_deviation_g: f64,
    /// Threshold for `|gx|`, `|gy|`, `|gz|` (deg/s)
    pub gyro_dps: f64,
}

impl Default for JerkDetector {
    fn default() -> Self {
        Self {
            accel_g: ACCEL_THRESHOLD_G,
            vertical_baseline_g: VERTICAL_BASELINE_G,
            vertical_deviation_g: VERTICAL_DEVIATION_G,
            gyro_dps: GYRO_THRESHOLD_DPS,
        }
    }
}

impl JerkDetector {
    /// Whether a single sample is a jerk under these thresholds.
    pub fn is_jerk(&self, sample: &Sample) -> bool {
        sample.ax.abs() > self.accel_g
            || sample.ay.abs() > self.accel_g
            || (sample.az - self.vertical_baseline_g).abs() > self.vertical_deviation_g
            || sample.gx.abs() > self.gyro_dps
            || sample.gy.abs() > self.gyro_dps
            || sample.gz.abs() > self.gyro_dps
    }

    /// All jerks in a displayed buffer, recomputed from scratch.
    pub fn scan<'a>(&self, samples: &'a [Sample]) -> Vec<&'a Sample> {
        samples.iter().filter(|s| self.is_jerk(s)).collect()
    }
}

/// Whether a sample is a jerk under the default thresholds.
pub fn is_jerk(sample: &Sample) -> bool {
    JerkDetector::default().is_jerk(sample)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at_rest() -> Sample {
        Sample { timestamp: 0.0, ax: 0.2, ay: 0.1, az: 0.95, gx: 10.0, gy: 5.0, gz: 3.0 }
    }

    #[test]
    fn test_quiet_sample_is_not_a_jerk() {
        assert!(!is_jerk(&at_rest()));
    }

    #[test]
    fn test_accel_spike_is_a_jerk() {
        let sample = Sample { ax: 2.0, ..at_rest() };
        assert!(is_jerk(&sample));
    }

    #[test]
    fn test_gyro_spike_is_a_jerk() {
        let sample = Sample {
            timestamp: 0.0,
            ax: 0.0,
            ay: 0.0,
            az: 1.0,
            gx: 150.0,
            gy: 0.0,
            gz: 0.0,
        };
        assert!(is_jerk(&sample));
    }

    #[test]
    fn test_vertical_axis_is_gravity_offset() {
        // az = 1.0 is at rest; the deviation, not the magnitude, is checked
        let resting = Sample { az: 1.0, ..at_rest() };
        assert!(!is_jerk(&resting));

        let dropped = Sample { az: 0.4, ..at_rest() };
        assert!(is_jerk(&dropped));

        let lifted = Sample { az: 1.6, ..at_rest() };
        assert!(is_jerk(&lifted));
    }

    #[test]
    fn test_negative_magnitudes_trigger() {
        let sample = Sample { ay: -1.6, ..at_rest() };
        assert!(is_jerk(&sample));

        let sample = Sample { gz: -101.0, ..at_rest() };
        assert!(is_jerk(&sample));
    }

    #[test]
    fn test_values_at_threshold_do_not_trigger() {
        let sample = Sample {
            timestamp: 0.0,
            ax: 1.5,
            ay: -1.5,
            az: 1.5,
            gx: 100.0,
            gy: -100.0,
            gz: 100.0,
        };
        assert!(!is_jerk(&sample));
    }

    #[test]
    fn test_nan_axis_never_flags() {
        let sample = Sample { ax: f64::NAN, ..at_rest() };
        assert!(!is_jerk(&sample));
    }

    #[test]
    fn test_scan_filters_displayed_buffer() {
        let buffer = vec![
            at_rest(),
            Sample { timestamp: 1.0, ax: 2.0, ..at_rest() },
            Sample { timestamp: 2.0, ..at_rest() },
        ];
        let jerks = JerkDetector::default().scan(&buffer);

        assert_eq!(jerks.len(), 1);
        assert_eq!(jerks[0].timestamp, 1.0);
    }

    #[test]
    fn test_custom_thresholds() {
        let detector = JerkDetector { accel_g: 0.15, ..Default::default() };
        assert!(detector.is_jerk(&at_rest()));
    }
}
