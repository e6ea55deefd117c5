//! Error types for motion-replay

use thiserror::Error;

/// Errors that can occur while loading a series.
///
/// Playback itself is infallible: a failed load yields an empty series and an
/// inert player, never a fault mid-replay.
#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("Failed to read series source: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Source has no header row")]
    EmptyHeader,

    #[error("Missing required column: {0}")]
    MissingColumn(String),

    #[error("Encoding error: {0}")]
    EncodingError(#[from] serde_json::Error),
}
