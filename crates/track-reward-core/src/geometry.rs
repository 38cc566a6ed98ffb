//! Track direction and heading comparison

use crate::config::AngleDifference;
use crate::telemetry::Waypoint;

/// Direction of the centerline segment `behind -> ahead`, in degrees (-180, 180]
pub fn track_direction(behind: Waypoint, ahead: Waypoint) -> f64 {
    let dx = ahead[0] - behind[0];
    let dy = ahead[1] - behind[1];
    dy.atan2(dx).to_degrees()
}

/// Difference between the track direction and the vehicle heading, in degrees
pub fn heading_difference(direction: f64, heading: f64, mode: AngleDifference) -> f64 {
    let raw = (direction - heading).abs();
    match mode {
        AngleDifference::Raw => raw,
        AngleDifference::Wrapped => {
            let turns = raw % 360.0;
            if turns > 180.0 { 360.0 - turns } else { turns }
        }
    }
}
