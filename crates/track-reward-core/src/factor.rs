//! Factor evaluators
//!
//! Each factor is a pure function of [`StepInputs`] that yields an
//! [`Adjustment`] to the running reward. Scale factors multiply; override
//! factors can replace the running value outright, so their position in
//! [`Factor::ORDER`] matters.

use serde::{Deserialize, Serialize};

use crate::config::RewardConfig;
use crate::inputs::StepInputs;

/// What a factor does to the running reward
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Adjustment {
    /// Leave the running reward unchanged
    Keep,
    /// Multiply the running reward
    Scale(f64),
    /// Replace the running reward
    Override(f64),
}

impl Adjustment {
    /// Apply to the running reward
    pub fn apply(self, running: f64) -> f64 {
        match self {
            Adjustment::Keep => running,
            Adjustment::Scale(multiplier) => running * multiplier,
            Adjustment::Override(value) => value,
        }
    }

    /// Value recorded in the reward decomposition
    pub fn component_value(self) -> f64 {
        match self {
            Adjustment::Keep => 1.0,
            Adjustment::Scale(multiplier) => multiplier,
            Adjustment::Override(value) => value,
        }
    }
}

/// Descriptor tag for a factor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FactorKind {
    /// Only ever multiplies
    Scale,
    /// May overwrite the running reward
    Override,
}

/// The nine factor evaluators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Factor {
    OnTrack,
    DistanceBand,
    StraightLine,
    Direction,
    Steering,
    Throttle,
    KeepLeft,
    Progress,
    Speed,
}

impl Factor {
    /// Application order
    pub const ORDER: [Factor; 9] = [
        Factor::OnTrack,
        Factor::DistanceBand,
        Factor::StraightLine,
        Factor::Direction,
        Factor::Steering,
        Factor::Throttle,
        Factor::KeepLeft,
        Factor::Progress,
        Factor::Speed,
    ];

    /// Component name used in the reward decomposition
    pub fn name(&self) -> &'static str {
        match self {
            Factor::OnTrack => "on_track",
            Factor::DistanceBand => "distance_band",
            Factor::StraightLine => "straight_line",
            Factor::Direction => "direction",
            Factor::Steering => "steering",
            Factor::Throttle => "throttle",
            Factor::KeepLeft => "keep_left",
            Factor::Progress => "progress",
            Factor::Speed => "speed",
        }
    }

    pub fn kind(&self) -> FactorKind {
        match self {
            Factor::OnTrack | Factor::DistanceBand => FactorKind::Override,
            _ => FactorKind::Scale,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Factor::OnTrack => "Resets the reward: initial value on track, floor off track",
            Factor::DistanceBand => {
                "Bonus near the centerline, penalties further out, floor beyond half the track width"
            }
            Factor::StraightLine => "Bonus for driving straight and fast",
            Factor::Direction => "Penalty when heading strays from the local track direction",
            Factor::Steering => "Penalty for excessive steering",
            Factor::Throttle => "Penalty for speed above the line sustainable at the current steering",
            Factor::KeepLeft => "Left lane preference",
            Factor::Progress => "Bonus late in the lap",
            Factor::Speed => "Penalty when slow, bonus when fast",
        }
    }

    /// Evaluate this factor for one step
    pub fn evaluate(&self, inputs: &StepInputs, config: &RewardConfig) -> Adjustment {
        match self {
            Factor::OnTrack => on_track(inputs, config),
            Factor::DistanceBand => distance_band(inputs, config),
            Factor::StraightLine => straight_line(inputs, config),
            Factor::Direction => direction(inputs, config),
            Factor::Steering => steering(inputs, config),
            Factor::Throttle => throttle(inputs, config),
            Factor::KeepLeft => keep_left(inputs, config),
            Factor::Progress => progress(inputs, config),
            Factor::Speed => speed(inputs, config),
        }
    }
}

fn on_track(inputs: &StepInputs, config: &RewardConfig) -> Adjustment {
    if inputs.on_track {
        Adjustment::Override(config.initial_reward)
    } else {
        Adjustment::Override(config.min_reward)
    }
}

fn distance_band(inputs: &StepInputs, config: &RewardConfig) -> Adjustment {
    let bands = &config.distance_bands;
    let distance = inputs.distance_from_center;
    let width = inputs.track_width;

    if distance <= bands.precision_fraction * width {
        Adjustment::Scale(bands.precision_multiplier)
    } else if distance <= bands.near_fraction * width {
        Adjustment::Scale(bands.near_multiplier)
    } else if distance <= bands.edge_fraction * width {
        Adjustment::Scale(bands.edge_multiplier)
    } else {
        // likely off track
        Adjustment::Override(config.min_reward)
    }
}

fn straight_line(inputs: &StepInputs, config: &RewardConfig) -> Adjustment {
    let tiers = &config.straight_line;
    [&tiers.fast, &tiers.brisk]
        .into_iter()
        .find(|tier| inputs.steering < tier.max_steering && inputs.speed > tier.min_speed)
        .map_or(Adjustment::Keep, |tier| Adjustment::Scale(tier.multiplier))
}

fn direction(inputs: &StepInputs, config: &RewardConfig) -> Adjustment {
    if inputs.direction_diff > config.direction_threshold {
        Adjustment::Scale(config.direction_multiplier)
    } else {
        Adjustment::Keep
    }
}

fn steering(inputs: &StepInputs, config: &RewardConfig) -> Adjustment {
    if inputs.steering > config.steering_threshold {
        Adjustment::Scale(config.steering_multiplier)
    } else {
        Adjustment::Keep
    }
}

fn throttle(inputs: &StepInputs, config: &RewardConfig) -> Adjustment {
    let line = &config.throttle;
    if inputs.speed > line.intercept - line.slope * inputs.steering {
        Adjustment::Scale(line.multiplier)
    } else {
        Adjustment::Keep
    }
}

fn keep_left(inputs: &StepInputs, config: &RewardConfig) -> Adjustment {
    if inputs.keep_left {
        Adjustment::Scale(config.left_lane_multiplier)
    } else {
        Adjustment::Scale(config.right_lane_multiplier)
    }
}

fn progress(inputs: &StepInputs, config: &RewardConfig) -> Adjustment {
    if inputs.progress > config.progress_threshold {
        Adjustment::Scale(config.progress_multiplier)
    } else {
        Adjustment::Keep
    }
}

fn speed(inputs: &StepInputs, config: &RewardConfig) -> Adjustment {
    let bands = &config.speed_bands;
    if inputs.speed < bands.slow_below {
        Adjustment::Scale(bands.slow_multiplier)
    } else if inputs.speed > bands.fast_above {
        Adjustment::Scale(bands.fast_multiplier)
    } else {
        Adjustment::Keep
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs() -> StepInputs {
        StepInputs {
            on_track: true,
            distance_from_center: 0.0,
            track_width: 1.0,
            steering: 0.0,
            speed: 5.0,
            keep_left: true,
            progress: 10.0,
            direction: 0.0,
            direction_diff: 0.0,
        }
    }

    fn eval(factor: Factor, inputs: &StepInputs) -> Adjustment {
        factor.evaluate(inputs, &RewardConfig::default())
    }

    #[test]
    fn test_adjustment_apply() {
        assert_eq!(Adjustment::Keep.apply(0.5), 0.5);
        assert_eq!(Adjustment::Scale(2.0).apply(0.5), 1.0);
        assert_eq!(Adjustment::Override(0.001).apply(0.5), 0.001);
    }

    #[test]
    fn test_order_and_kinds() {
        let names: Vec<_> = Factor::ORDER.iter().map(Factor::name).collect();
        assert_eq!(
            names,
            [
                "on_track",
                "distance_band",
                "straight_line",
                "direction",
                "steering",
                "throttle",
                "keep_left",
                "progress",
                "speed"
            ]
        );
        let overrides: Vec<_> = Factor::ORDER
            .iter()
            .filter(|f| f.kind() == FactorKind::Override)
            .collect();
        assert_eq!(overrides, [&Factor::OnTrack, &Factor::DistanceBand]);
    }

    #[test]
    fn test_on_track_gate_overwrites() {
        let mut step = inputs();
        assert_eq!(eval(Factor::OnTrack, &step), Adjustment::Override(1.0));
        step.on_track = false;
        assert_eq!(eval(Factor::OnTrack, &step), Adjustment::Override(0.001));
    }

    #[test]
    fn test_distance_bands_inclusive_upper_bounds() {
        let mut step = inputs();
        for (distance, expected) in [
            (0.0, Adjustment::Scale(1.2)),
            (0.1, Adjustment::Scale(1.2)),
            (0.11, Adjustment::Scale(0.8)),
            (0.25, Adjustment::Scale(0.8)),
            (0.3, Adjustment::Scale(0.5)),
            (0.5, Adjustment::Scale(0.5)),
            (0.51, Adjustment::Override(0.001)),
        ] {
            step.distance_from_center = distance;
            assert_eq!(eval(Factor::DistanceBand, &step), expected, "distance {distance}");
        }
    }

    #[test]
    fn test_zero_track_width_only_centerline_in_band() {
        let mut step = inputs();
        step.track_width = 0.0;
        assert_eq!(eval(Factor::DistanceBand, &step), Adjustment::Scale(1.2));
        step.distance_from_center = 0.01;
        assert_eq!(eval(Factor::DistanceBand, &step), Adjustment::Override(0.001));
    }

    #[test]
    fn test_straight_line_tiers() {
        let mut step = inputs();
        step.steering = 0.05;
        step.speed = 6.5;
        assert_eq!(eval(Factor::StraightLine, &step), Adjustment::Scale(1.5));

        step.speed = 5.5;
        assert_eq!(eval(Factor::StraightLine, &step), Adjustment::Scale(1.2));

        step.steering = 0.15;
        step.speed = 6.5;
        assert_eq!(eval(Factor::StraightLine, &step), Adjustment::Scale(1.2));

        step.speed = 5.0;
        assert_eq!(eval(Factor::StraightLine, &step), Adjustment::Keep);

        step.steering = 0.2;
        step.speed = 9.0;
        assert_eq!(eval(Factor::StraightLine, &step), Adjustment::Keep);
    }

    #[test]
    fn test_direction_threshold_is_strict() {
        let mut step = inputs();
        step.direction_diff = 10.0;
        assert_eq!(eval(Factor::Direction, &step), Adjustment::Keep);
        step.direction_diff = 10.5;
        assert_eq!(eval(Factor::Direction, &step), Adjustment::Scale(0.75));
    }

    #[test]
    fn test_excess_steering() {
        let mut step = inputs();
        step.steering = 30.0;
        assert_eq!(eval(Factor::Steering, &step), Adjustment::Keep);
        step.steering = 30.5;
        assert_eq!(eval(Factor::Steering, &step), Adjustment::Scale(0.9));
    }

    #[test]
    fn test_throttle_line_drops_with_steering() {
        let mut step = inputs();
        step.speed = 2.0;
        step.steering = 0.0;
        assert_eq!(eval(Factor::Throttle, &step), Adjustment::Keep);

        // 3.0 - 0.4 * 5.0 = 1.0
        step.steering = 5.0;
        assert_eq!(eval(Factor::Throttle, &step), Adjustment::Scale(0.8));

        step.speed = 1.0;
        assert_eq!(eval(Factor::Throttle, &step), Adjustment::Keep);
    }

    #[test]
    fn test_lane_preference() {
        let mut step = inputs();
        assert_eq!(eval(Factor::KeepLeft, &step), Adjustment::Scale(1.2));
        step.keep_left = false;
        assert_eq!(eval(Factor::KeepLeft, &step), Adjustment::Scale(0.9));
    }

    #[test]
    fn test_progress_bonus() {
        let mut step = inputs();
        step.progress = 75.0;
        assert_eq!(eval(Factor::Progress, &step), Adjustment::Keep);
        step.progress = 75.1;
        assert_eq!(eval(Factor::Progress, &step), Adjustment::Scale(1.1));
    }

    #[test]
    fn test_speed_bands() {
        let mut step = inputs();
        step.speed = 3.9;
        assert_eq!(eval(Factor::Speed, &step), Adjustment::Scale(0.75));
        step.speed = 4.0;
        assert_eq!(eval(Factor::Speed, &step), Adjustment::Keep);
        step.speed = 6.0;
        assert_eq!(eval(Factor::Speed, &step), Adjustment::Keep);
        step.speed = 6.1;
        assert_eq!(eval(Factor::Speed, &step), Adjustment::Scale(1.25));
    }
}
