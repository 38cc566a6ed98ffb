//! Error types for track reward composition

use thiserror::Error;

/// Result type for reward operations
pub type Result<T> = std::result::Result<T, RewardError>;

/// Reward composition error types
///
/// Every variant is a caller contract violation: the snapshot handed to the
/// composer was malformed. Out-of-range telemetry values are not errors.
#[derive(Debug, Error, PartialEq)]
pub enum RewardError {
    /// Track centerline has fewer than two waypoints
    #[error("Too few waypoints: need at least 2, got {count}")]
    TooFewWaypoints { count: usize },

    /// A closest-waypoint index does not address the waypoint list
    #[error("Waypoint index {index} out of bounds for {len} waypoints")]
    WaypointIndexOutOfBounds { index: usize, len: usize },

    /// Snapshot could not be decoded (missing field, wrong type)
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for RewardError {
    fn from(err: serde_json::Error) -> Self {
        RewardError::SerializationError(err.to_string())
    }
}
