//! Telemetry snapshot supplied by the simulator on every step

use serde::{Deserialize, Serialize};

use crate::error::{Result, RewardError};

/// A track centerline milestone, `[x, y]` in meters
pub type Waypoint = [f64; 2];

/// Vehicle pose, kinematics and track-relative telemetry for one step
///
/// Field names match the simulator's parameter dictionary, so a snapshot
/// decodes directly from its JSON form. Every field is required.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetrySnapshot {
    /// All four wheels are inside the track borders
    pub all_wheels_on_track: bool,
    /// Vehicle x position in meters
    pub x: f64,
    /// Vehicle y position in meters
    pub y: f64,
    /// Distance from the centerline in meters
    pub distance_from_center: f64,
    /// Vehicle is on the left side of the centerline
    pub is_left_of_center: bool,
    /// Vehicle yaw in degrees, conventionally (-180, 180]
    pub heading: f64,
    /// Percent of the track completed, 0-100
    pub progress: f64,
    /// Steps completed in the episode
    pub steps: u64,
    /// Vehicle speed in m/s
    pub speed: f64,
    /// Steering angle in degrees
    pub steering_angle: f64,
    /// Track width in meters
    pub track_width: f64,
    /// Centerline milestones
    pub waypoints: Vec<Waypoint>,
    /// Indices of the waypoints behind and ahead of the vehicle
    pub closest_waypoints: [usize; 2],
}

impl TelemetrySnapshot {
    /// Decode a snapshot from its JSON parameter form
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Check the caller contract: two or more waypoints, in-bounds closest indices
    pub fn validate(&self) -> Result<()> {
        let len = self.waypoints.len();
        if len < 2 {
            return Err(RewardError::TooFewWaypoints { count: len });
        }
        for &index in &self.closest_waypoints {
            if index >= len {
                return Err(RewardError::WaypointIndexOutOfBounds { index, len });
            }
        }
        Ok(())
    }

    /// The (behind, ahead) waypoint pair bracketing the vehicle
    pub fn closest_segment(&self) -> Result<(Waypoint, Waypoint)> {
        let [behind, ahead] = self.closest_waypoints;
        Ok((self.waypoint(behind)?, self.waypoint(ahead)?))
    }

    fn waypoint(&self, index: usize) -> Result<Waypoint> {
        self.waypoints
            .get(index)
            .copied()
            .ok_or(RewardError::WaypointIndexOutOfBounds {
                index,
                len: self.waypoints.len(),
            })
    }
}
