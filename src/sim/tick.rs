//! Single simulation tick
//!
//! Moves the car, checks contacts, scores the new pose.

use serde::{Deserialize, Serialize};

use super::collision::detect;
use super::reward::{RewardBreakdown, evaluate};
use super::state::EpisodeState;
use crate::settings::Settings;

/// Control input for a single tick
///
/// Both values are nominally in [-1, 1] but are not clamped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Action {
    /// Positive accelerates forward, negative brakes/reverses
    pub throttle: f32,
    /// Positive turns left (heading increases), negative turns right
    pub steer: f32,
}

/// Arrow-key state as polled by a front end
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Keys {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl Action {
    pub fn new(throttle: f32, steer: f32) -> Self {
        Self { throttle, steer }
    }

    /// Opposing keys cancel out
    pub fn from_keys(keys: Keys) -> Self {
        let axis = |pos: bool, neg: bool| pos as i8 as f32 - neg as i8 as f32;
        Self {
            throttle: axis(keys.up, keys.down),
            steer: axis(keys.left, keys.right),
        }
    }
}

/// Advance the episode by one tick
pub fn tick(state: &mut EpisodeState, action: &Action, settings: &Settings) -> RewardBreakdown {
    state.car.update(action, &settings.car);
    state.tick_count += 1;
    state.trajectory.push(state.car.position);

    let contacts = detect(&state.car, &state.world);
    if !contacts.obstacle_hits.is_empty() {
        log::trace!("Obstacle contact: {:?}", contacts.obstacle_hits);
    }

    let breakdown = evaluate(
        &mut state.progress,
        &mut state.car,
        &mut state.world,
        &contacts,
        &settings.reward,
    );
    state.last_reward = breakdown.total;
    breakdown
}
