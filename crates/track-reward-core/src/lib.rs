//! # track-reward-core
//!
//! Per-step reward composition for a simulated autonomous racing agent.
//!
//! This crate provides:
//! - The telemetry snapshot the simulator hands over on every step
//! - Named reward thresholds and multipliers
//! - Nine independent factor evaluators
//! - The reward composer that folds them, in order, into one scalar reward
//!
//! Composition is pure and stateless; a [`RewardComposer`] can be shared
//! freely between threads.

pub mod composer;
pub mod config;
pub mod error;
pub mod factor;
pub mod geometry;
pub mod inputs;
pub mod reward;
pub mod telemetry;

pub use composer::{RewardComposer, reward_from_json, reward_function};
pub use config::{AngleDifference, MIN_REWARD, RewardConfig};
pub use error::{Result, RewardError};
pub use factor::{Adjustment, Factor, FactorKind};
pub use inputs::StepInputs;
pub use reward::{Reward, RewardComponentDef, RewardComponents, RewardFunction};
pub use telemetry::{TelemetrySnapshot, Waypoint};
