//! Core types for the replay pipeline
//!
//! This module defines the data that flows through each stage: one six-axis
//! sample, the immutable loaded series, and the playback phase.

use serde::{Deserialize, Serialize};

/// One time-stamped six-axis motion reading.
///
/// Accelerometer axes are in g; gyroscope axes in degrees per second. The
/// vertical axis (`az`) carries the gravity offset, so 1.0 is the at-rest
/// baseline. Fields that failed numeric parsing upstream arrive as `NAN` and
/// are forwarded unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Time of the reading, in seconds from session start
    pub timestamp: f64,
    /// Linear acceleration, x axis (g)
    pub ax: f64,
    /// Linear acceleration, y axis (g)
    pub ay: f64,
    /// Linear acceleration, z axis (g, gravity-offset)
    pub az: f64,
    /// Angular rate, x axis (deg/s)
    pub gx: f64,
    /// Angular rate, y axis (deg/s)
    pub gy: f64,
    /// Angular rate, z axis (deg/s)
    pub gz: f64,
}

/// Column names the loader expects in the source header, in field order.
pub const SAMPLE_COLUMNS: [&str; 7] = ["timestamp", "ax", "ay", "az", "gx", "gy", "gz"];

/// The full, static, time-ordered sample set for one playback session.
///
/// Created once by the loader and never mutated afterwards. Row order in the
/// source is the authoritative time order; the series is not re-sorted by
/// timestamp.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Series {
    samples: Vec<Sample>,
}

impl Series {
    /// Build a series from already-ordered samples.
    pub fn new(samples: Vec<Sample>) -> Self {
        Self { samples }
    }

    /// A series with no samples. Playback over it is inert.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Sample> {
        self.samples.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Sample> {
        self.samples.iter()
    }

    /// The full sample slice, in time order.
    pub fn as_slice(&self) -> &[Sample] {
        &self.samples
    }
}

/// Playback lifecycle phase.
///
/// End-of-stream is not a distinct state: exhausting the series auto-pauses,
/// so `Paused` covers both "user paused" and "ran out of samples".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaybackPhase {
    /// Never started since construction or the last reset
    Idle,
    /// Ticks advance the cursor
    Playing,
    /// Started at some point, not currently advancing
    Paused,
}

impl PlaybackPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlaybackPhase::Idle => "idle",
            PlaybackPhase::Playing => "playing",
            PlaybackPhase::Paused => "paused",
        }
    }
}
