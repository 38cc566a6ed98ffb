//! The reward composer: base term followed by the ordered factor fold

use tracing::{debug, trace};

use crate::config::RewardConfig;
use crate::error::Result;
use crate::factor::{Factor, FactorKind};
use crate::inputs::StepInputs;
use crate::reward::{Reward, RewardComponentDef, RewardComponents, RewardFunction};
use crate::telemetry::TelemetrySnapshot;

/// Component name of the centerline base term
pub const BASE_COMPONENT: &str = "base";

/// Combines the factor evaluators into one reward per snapshot
#[derive(Debug, Clone, Default)]
pub struct RewardComposer {
    config: RewardConfig,
}

impl RewardComposer {
    pub fn new(config: RewardConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RewardConfig {
        &self.config
    }

    /// Score one snapshot
    ///
    /// Fails only when the snapshot breaks the caller contract (too few
    /// waypoints, closest-waypoint index out of bounds).
    pub fn compose(&self, snapshot: &TelemetrySnapshot) -> Result<Reward> {
        let inputs = StepInputs::extract(snapshot, &self.config)?;
        let base = (-self.config.centerline_decay * inputs.distance_from_center).exp();

        let mut components = RewardComponents::with_capacity(Factor::ORDER.len() + 1);
        components.insert(BASE_COMPONENT.to_string(), base);

        let value = Factor::ORDER.iter().fold(base, |running, factor| {
            let adjustment = factor.evaluate(&inputs, &self.config);
            let next = adjustment.apply(running);
            trace!(factor = factor.name(), ?adjustment, running, next, "Applied factor");
            components.insert(factor.name().to_string(), adjustment.component_value());
            next
        });

        debug!(
            reward = value,
            steps = snapshot.steps,
            progress = snapshot.progress,
            "Composed reward"
        );

        Ok(Reward { value, components })
    }

    /// Component definitions for the base term and every factor
    pub fn component_defs(&self) -> Vec<RewardComponentDef> {
        let base = RewardComponentDef {
            name: BASE_COMPONENT.to_string(),
            description: Some("Centerline proximity, exp(-k * distance_from_center)".to_string()),
            range: Some([0.0, 1.0]),
            default_weight: 1.0,
        };

        std::iter::once(base)
            .chain(Factor::ORDER.iter().map(|factor| RewardComponentDef {
                name: factor.name().to_string(),
                description: Some(factor.description().to_string()),
                range: Some(self.factor_range(*factor)),
                default_weight: 1.0,
            }))
            .collect()
    }

    /// Smallest and largest value a factor can record
    fn factor_range(&self, factor: Factor) -> [f64; 2] {
        let c = &self.config;
        let values: Vec<f64> = match factor {
            Factor::OnTrack => vec![c.min_reward, c.initial_reward],
            Factor::DistanceBand => vec![
                c.min_reward,
                c.distance_bands.precision_multiplier,
                c.distance_bands.near_multiplier,
                c.distance_bands.edge_multiplier,
            ],
            Factor::StraightLine => vec![
                1.0,
                c.straight_line.fast.multiplier,
                c.straight_line.brisk.multiplier,
            ],
            Factor::Direction => vec![1.0, c.direction_multiplier],
            Factor::Steering => vec![1.0, c.steering_multiplier],
            Factor::Throttle => vec![1.0, c.throttle.multiplier],
            Factor::KeepLeft => vec![c.left_lane_multiplier, c.right_lane_multiplier],
            Factor::Progress => vec![1.0, c.progress_multiplier],
            Factor::Speed => vec![
                1.0,
                c.speed_bands.slow_multiplier,
                c.speed_bands.fast_multiplier,
            ],
        };
        let low = values.iter().copied().fold(f64::INFINITY, f64::min);
        let high = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        [low, high]
    }

    /// Factors that can overwrite the running reward
    pub fn override_factors() -> impl Iterator<Item = Factor> {
        Factor::ORDER
            .into_iter()
            .filter(|factor| factor.kind() == FactorKind::Override)
    }
}

impl RewardFunction for RewardComposer {
    type State = TelemetrySnapshot;

    fn compute(&self, state: &TelemetrySnapshot) -> Result<Reward> {
        self.compose(state)
    }

    fn components(&self) -> Vec<RewardComponentDef> {
        self.component_defs()
    }
}

/// Score one snapshot with the default configuration
pub fn reward_function(snapshot: &TelemetrySnapshot) -> Result<f64> {
    RewardComposer::default()
        .compose(snapshot)
        .map(|reward| reward.value)
}

/// Decode a JSON snapshot and score it with the default configuration
pub fn reward_from_json(json: &str) -> Result<Reward> {
    let snapshot = TelemetrySnapshot::from_json(json)?;
    RewardComposer::default().compose(&snapshot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RewardError;

    fn snapshot() -> TelemetrySnapshot {
        TelemetrySnapshot {
            all_wheels_on_track: true,
            x: 0.5,
            y: 0.0,
            distance_from_center: 0.0,
            is_left_of_center: true,
            heading: 0.0,
            progress: 80.0,
            steps: 42,
            speed: 7.0,
            steering_angle: 0.05,
            track_width: 1.0,
            waypoints: vec![[0.0, 0.0], [1.0, 0.0]],
            closest_waypoints: [0, 1],
        }
    }

    #[test]
    fn test_components_record_every_factor() {
        let reward = RewardComposer::default().compose(&snapshot()).unwrap();

        assert_eq!(reward.components.len(), Factor::ORDER.len() + 1);
        assert_eq!(reward.components[BASE_COMPONENT], 1.0);
        assert_eq!(reward.components["on_track"], 1.0);
        assert_eq!(reward.components["distance_band"], 1.2);
        assert_eq!(reward.components["straight_line"], 1.5);
        assert_eq!(reward.components["direction"], 1.0);
        assert_eq!(reward.components["throttle"], 0.8);
        assert_eq!(reward.components["speed"], 1.25);
    }

    #[test]
    fn test_base_term_is_overwritten_by_gate() {
        let mut near = snapshot();
        near.distance_from_center = 0.01;
        let mut nearer = snapshot();
        nearer.distance_from_center = 0.001;

        let composer = RewardComposer::default();
        let near = composer.compose(&near).unwrap();
        let nearer = composer.compose(&nearer).unwrap();

        assert!(nearer.components[BASE_COMPONENT] > near.components[BASE_COMPONENT]);
        assert_eq!(near.value, nearer.value);
    }

    #[test]
    fn test_later_factors_can_push_below_floor() {
        let mut step = snapshot();
        step.all_wheels_on_track = false;
        step.distance_from_center = 2.0;
        step.heading = 90.0;
        step.steering_angle = 31.0;
        step.speed = 3.0;
        step.is_left_of_center = false;
        step.progress = 10.0;

        let value = reward_function(&step).unwrap();
        let expected = 0.001 * 0.75 * 0.9 * 0.8 * 0.9 * 0.75;
        assert!((value - expected).abs() < 1e-15, "got {value}");
        assert!(value < crate::config::MIN_REWARD);
    }

    #[test]
    fn test_contract_violation_propagates() {
        let mut step = snapshot();
        step.closest_waypoints = [0, 5];

        assert_eq!(
            reward_function(&step),
            Err(RewardError::WaypointIndexOutOfBounds { index: 5, len: 2 })
        );
    }

    #[test]
    fn test_component_defs_cover_decomposition() {
        let composer = RewardComposer::default();
        let defs = composer.components();
        let reward = composer.compute(&snapshot()).unwrap();

        assert_eq!(defs.len(), reward.components.len());
        for def in &defs {
            let value = reward.components[&def.name];
            let [low, high] = def.range.unwrap();
            assert!(low <= value && value <= high, "{} = {value}", def.name);
        }
    }

    #[test]
    fn test_override_factors() {
        let overrides: Vec<_> = RewardComposer::override_factors().collect();
        assert_eq!(overrides, [Factor::OnTrack, Factor::DistanceBand]);
    }

    #[test]
    fn test_reward_from_json() {
        let json = serde_json::to_string(&snapshot()).unwrap();
        let reward = reward_from_json(&json).unwrap();
        assert!((reward.value - 2.376).abs() < 1e-12);
    }
}
