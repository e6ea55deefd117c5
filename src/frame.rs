//! Chart frame encoding
//!
//! The presentation boundary: whatever renders the chart consumes a
//! [`ChartFrame`] snapshot instead of linking against the player. A frame
//! carries the displayed buffer, the timestamps of flagged jerks, and enough
//! provenance to trace which producer instance emitted it.
//!
//! Encoding is pull-based and side-effect free, so the renderer can take
//! frames at its own pace without ever blocking a tick.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::classifier::JerkDetector;
use crate::error::ReplayError;
use crate::player::Playback;
use crate::types::{PlaybackPhase, Sample};
use crate::{ENGINE_VERSION, PRODUCER_NAME};

/// Identity of the engine instance that produced a frame.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameProducer {
    pub name: String,
    pub version: String,
    pub instance_id: String,
}

/// One snapshot of playback state for rendering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartFrame {
    pub producer: FrameProducer,
    /// When this frame was encoded (UTC, RFC 3339)
    pub computed_at_utc: String,
    pub phase: PlaybackPhase,
    pub cursor: usize,
    /// The displayed buffer, in series order
    pub samples: Vec<Sample>,
    /// Timestamps of displayed samples flagged as jerks
    pub jerk_timestamps: Vec<f64>,
}

/// Encoder holding producer identity and detection thresholds.
pub struct FrameEncoder {
    producer: FrameProducer,
    detector: JerkDetector,
}

impl Default for FrameEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameEncoder {
    /// Create an encoder with default thresholds and a fresh instance id.
    pub fn new() -> Self {
        Self::with_detector(JerkDetector::default())
    }

    /// Create an encoder with custom detection thresholds.
    pub fn with_detector(detector: JerkDetector) -> Self {
        Self {
            producer: FrameProducer {
                name: PRODUCER_NAME.to_string(),
                version: ENGINE_VERSION.to_string(),
                instance_id: Uuid::new_v4().to_string(),
            },
            detector,
        }
    }

    /// Snapshot the current playback state into a frame.
    ///
    /// Jerk marks are recomputed over the whole displayed buffer on every
    /// call; nothing is cached between frames.
    pub fn encode(&self, player: &Playback) -> ChartFrame {
        let displayed = player.displayed();
        let jerk_timestamps = self
            .detector
            .scan(displayed)
            .iter()
            .map(|s| s.timestamp)
            .collect();

        ChartFrame {
            producer: self.producer.clone(),
            computed_at_utc: Utc::now().to_rfc3339(),
            phase: player.phase(),
            cursor: player.cursor(),
            samples: displayed.to_vec(),
            jerk_timestamps,
        }
    }

    /// Snapshot and serialize to a JSON string.
    pub fn encode_to_json(&self, player: &Playback) -> Result<String, ReplayError> {
        Ok(serde_json::to_string(&self.encode(player))?)
    }
}
