//! Motion Replay - On-device replay engine for six-axis rehabilitation sensor streams
//!
//! Motion Replay turns a recorded motion-sensor series into a simulated live
//! feed through a deterministic pipeline: CSV loading → tick-driven playback
//! → jerk classification → chart frame encoding.
//!
//! ## Modules
//!
//! - **Loader**: Parse a header-driven CSV time series into typed samples
//! - **Player**: Replay the series one sample per tick with start/pause/reset
//! - **Classifier**: Flag samples whose per-axis magnitude exceeds threshold
//! - **Frame**: Encode playback snapshots to JSON for a renderer
//! - **Session**: Tick-driven therapy countdown timer

pub mod classifier;
pub mod error;
pub mod frame;
pub mod loader;
pub mod player;
pub mod session;
pub mod types;

pub use classifier::{is_jerk, JerkDetector};
pub use error::ReplayError;
pub use frame::{ChartFrame, FrameEncoder};
pub use loader::{load_path, load_path_or_empty, parse_csv};
pub use player::{Playback, TICK_PERIOD};
pub use session::TherapySession;
pub use types::{PlaybackPhase, Sample, Series};

/// Engine version embedded in all chart frames
pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Producer name for chart frames
pub const PRODUCER_NAME: &str = "motion-replay";
