//! Reward thresholds and multipliers
//!
//! All values are compiled in. [`RewardConfig::default`] assembles the named
//! constants below; the composer owns an immutable copy.

use serde::{Deserialize, Serialize};

/// Running reward after the on-track gate when all wheels are on track
pub const INITIAL_REWARD: f64 = 1.0;
/// Floor written by the on-track gate and the outermost distance band
pub const MIN_REWARD: f64 = 0.001;
/// Decay rate of the centerline base term `exp(-k * distance)`
pub const CENTERLINE_DECAY: f64 = 6.0;
/// Heading vs track direction difference, in degrees, above which the heading is penalised
pub const DIRECTION_THRESHOLD: f64 = 10.0;
/// Absolute steering angle, in degrees, above which steering is penalised
pub const ABS_STEERING_THRESHOLD: f64 = 30.0;

/// Distance band edges as fractions of track width
pub const PRECISION_BAND_FRACTION: f64 = 0.1;
pub const NEAR_BAND_FRACTION: f64 = 0.25;
pub const EDGE_BAND_FRACTION: f64 = 0.5;

/// Progress percentage above which the late-lap bonus applies
pub const PROGRESS_THRESHOLD: f64 = 75.0;

/// How the heading vs track direction difference is measured
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AngleDifference {
    /// Plain `|direction - heading|`, no wraparound (179 vs -179 gives 358)
    #[default]
    Raw,
    /// Shortest angular distance, always within [0, 180]
    Wrapped,
}

/// Distance-from-center bands, checked in ascending order with inclusive upper bounds
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DistanceBands {
    pub precision_fraction: f64,
    pub precision_multiplier: f64,
    pub near_fraction: f64,
    pub near_multiplier: f64,
    pub edge_fraction: f64,
    pub edge_multiplier: f64,
}

impl Default for DistanceBands {
    fn default() -> Self {
        Self {
            precision_fraction: PRECISION_BAND_FRACTION,
            precision_multiplier: 1.2,
            near_fraction: NEAR_BAND_FRACTION,
            near_multiplier: 0.8,
            edge_fraction: EDGE_BAND_FRACTION,
            edge_multiplier: 0.5,
        }
    }
}

/// One straight-and-fast tier: steering strictly below, speed strictly above
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StraightLineTier {
    pub max_steering: f64,
    pub min_speed: f64,
    pub multiplier: f64,
}

/// Two-tier straight-and-fast bonus, first match wins
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StraightLineTiers {
    pub fast: StraightLineTier,
    pub brisk: StraightLineTier,
}

impl Default for StraightLineTiers {
    fn default() -> Self {
        Self {
            fast: StraightLineTier {
                max_steering: 0.1,
                min_speed: 6.0,
                multiplier: 1.5,
            },
            brisk: StraightLineTier {
                max_steering: 0.2,
                min_speed: 5.0,
                multiplier: 1.2,
            },
        }
    }
}

/// Sustainable speed line `intercept - slope * |steering|`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThrottleLine {
    pub intercept: f64,
    pub slope: f64,
    pub multiplier: f64,
}

impl Default for ThrottleLine {
    fn default() -> Self {
        Self {
            intercept: 3.0,
            slope: 0.4,
            multiplier: 0.8,
        }
    }
}

/// Speed bands: slow below `slow_below`, fast above `fast_above`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeedBands {
    pub slow_below: f64,
    pub slow_multiplier: f64,
    pub fast_above: f64,
    pub fast_multiplier: f64,
}

impl Default for SpeedBands {
    fn default() -> Self {
        Self {
            slow_below: 4.0,
            slow_multiplier: 0.75,
            fast_above: 6.0,
            fast_multiplier: 1.25,
        }
    }
}

/// Complete reward configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RewardConfig {
    pub initial_reward: f64,
    pub min_reward: f64,
    pub centerline_decay: f64,
    pub distance_bands: DistanceBands,
    pub straight_line: StraightLineTiers,
    pub direction_threshold: f64,
    pub direction_multiplier: f64,
    pub angle_difference: AngleDifference,
    pub steering_threshold: f64,
    pub steering_multiplier: f64,
    pub throttle: ThrottleLine,
    pub left_lane_multiplier: f64,
    pub right_lane_multiplier: f64,
    pub progress_threshold: f64,
    pub progress_multiplier: f64,
    pub speed_bands: SpeedBands,
}

impl Default for RewardConfig {
    fn default() -> Self {
        Self {
            initial_reward: INITIAL_REWARD,
            min_reward: MIN_REWARD,
            centerline_decay: CENTERLINE_DECAY,
            distance_bands: DistanceBands::default(),
            straight_line: StraightLineTiers::default(),
            direction_threshold: DIRECTION_THRESHOLD,
            direction_multiplier: 0.75,
            angle_difference: AngleDifference::default(),
            steering_threshold: ABS_STEERING_THRESHOLD,
            steering_multiplier: 0.9,
            throttle: ThrottleLine::default(),
            left_lane_multiplier: 1.2,
            right_lane_multiplier: 0.9,
            progress_threshold: PROGRESS_THRESHOLD,
            progress_multiplier: 1.1,
            speed_bands: SpeedBands::default(),
        }
    }
}

impl RewardConfig {
    /// Same thresholds, different angle-difference mode
    pub fn with_angle_difference(mut self, mode: AngleDifference) -> Self {
        self.angle_difference = mode;
        self
    }
}
