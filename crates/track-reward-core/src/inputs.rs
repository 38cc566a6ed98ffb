//! Input extraction: the subset of telemetry the factor evaluators read

use crate::config::RewardConfig;
use crate::error::Result;
use crate::geometry::{heading_difference, track_direction};
use crate::telemetry::TelemetrySnapshot;

/// Values extracted from one validated snapshot
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepInputs {
    pub on_track: bool,
    pub distance_from_center: f64,
    pub track_width: f64,
    /// Absolute steering angle in degrees
    pub steering: f64,
    pub speed: f64,
    pub keep_left: bool,
    pub progress: f64,
    /// Track direction of the closest segment, in degrees
    pub direction: f64,
    /// Heading vs track direction, measured per the configured mode
    pub direction_diff: f64,
}

impl StepInputs {
    /// Validate the snapshot and extract the factor inputs
    pub fn extract(snapshot: &TelemetrySnapshot, config: &RewardConfig) -> Result<Self> {
        snapshot.validate()?;
        let (behind, ahead) = snapshot.closest_segment()?;
        let direction = track_direction(behind, ahead);

        Ok(Self {
            on_track: snapshot.all_wheels_on_track,
            distance_from_center: snapshot.distance_from_center,
            track_width: snapshot.track_width,
            steering: snapshot.steering_angle.abs(),
            speed: snapshot.speed,
            keep_left: snapshot.is_left_of_center,
            progress: snapshot.progress,
            direction,
            direction_diff: heading_difference(
                direction,
                snapshot.heading,
                config.angle_difference,
            ),
        })
    }
}
