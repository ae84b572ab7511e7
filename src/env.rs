//! Gym-style environment facade
//!
//! `reset()` starts a fresh episode, `step()` advances it by one tick and
//! returns `(observation, reward, done)`. Front ends (renderers, keyboard
//! loops, training code) call these and read the state back for display.

use serde::{Deserialize, Serialize};

use crate::error::EnvError;
use crate::settings::Settings;
use crate::sim::{
    Action, AxisEdgeHeuristic, Car, ClearanceModel, EpisodeState, Progress, RewardBreakdown,
    RewardMap, World, reward_map, tick,
};

/// Agent-visible state: four probe distances, heading, speed
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
    /// Degrees in [0, 360)
    pub heading: f32,
    pub speed: f32,
}

impl Observation {
    pub const LEN: usize = 6;

    pub fn to_array(self) -> [f32; Self::LEN] {
        [
            self.left,
            self.right,
            self.top,
            self.bottom,
            self.heading,
            self.speed,
        ]
    }
}

/// Result of one `step`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transition {
    pub observation: Observation,
    pub reward: f32,
    pub done: bool,
    /// Reward terms behind `reward`
    pub breakdown: RewardBreakdown,
}

impl Action {
    /// Validate a raw `[throttle, steer]` slice
    pub fn from_slice(values: &[f32]) -> Result<Self, EnvError> {
        let &[throttle, steer] = values else {
            return Err(EnvError::InvalidAction { len: values.len() });
        };
        if !(throttle.is_finite() && steer.is_finite()) {
            return Err(EnvError::NonFiniteAction);
        }
        Ok(Self { throttle, steer })
    }
}

/// The racing environment
pub struct RaceEnv {
    settings: Settings,
    state: EpisodeState,
    clearance: Box<dyn ClearanceModel + Send + Sync>,
}

impl Default for RaceEnv {
    /// Standard track
    fn default() -> Self {
        let settings = Settings::default();
        Self {
            state: EpisodeState::new(&settings),
            settings,
            clearance: Box::new(AxisEdgeHeuristic),
        }
    }
}

impl RaceEnv {
    pub fn new(settings: Settings) -> Result<Self, EnvError> {
        settings.validate()?;
        Ok(Self {
            state: EpisodeState::new(&settings),
            settings,
            clearance: Box::new(AxisEdgeHeuristic),
        })
    }

    /// Replace the probe-distance model used for observations
    pub fn with_clearance_model(
        mut self,
        model: impl ClearanceModel + Send + Sync + 'static,
    ) -> Self {
        self.clearance = Box::new(model);
        self
    }

    /// Start a new episode and return its first observation
    pub fn reset(&mut self) -> Observation {
        self.state = EpisodeState::new(&self.settings);
        self.observation()
    }

    /// Advance one tick with a raw `[throttle, steer]` action
    pub fn step(&mut self, action: &[f32]) -> Result<Transition, EnvError> {
        let action = Action::from_slice(action)?;
        self.step_action(action)
    }

    /// Advance one tick with a typed action
    pub fn step_action(&mut self, action: Action) -> Result<Transition, EnvError> {
        if !(action.throttle.is_finite() && action.steer.is_finite()) {
            return Err(EnvError::NonFiniteAction);
        }
        if self.state.is_done() {
            return Err(EnvError::EpisodeTerminated);
        }

        let breakdown = tick(&mut self.state, &action, &self.settings);
        let done = self.state.is_done();
        if done {
            log::info!(
                "Episode ended after {} ticks: {:?} (reward {})",
                self.state.tick_count,
                self.state.progress.termination,
                breakdown.total
            );
        }

        Ok(Transition {
            observation: self.observation(),
            reward: breakdown.total,
            done,
            breakdown,
        })
    }

    /// Current observation without stepping
    pub fn observation(&self) -> Observation {
        let car = &self.state.car;
        let c = self.clearance.clearances(car.position, &self.state.world);
        Observation {
            left: c.left,
            right: c.right,
            top: c.top,
            bottom: c.bottom,
            heading: car.heading,
            speed: car.speed,
        }
    }

    pub fn is_done(&self) -> bool {
        self.state.is_done()
    }

    /// Shaped reward sampled every `stride` pixels for the current episode
    pub fn reward_map(&self, stride: u32) -> RewardMap {
        reward_map(&self.state, &self.settings, stride)
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn state(&self) -> &EpisodeState {
        &self.state
    }

    pub fn world(&self) -> &World {
        &self.state.world
    }

    pub fn car(&self) -> &Car {
        &self.state.car
    }

    pub fn progress(&self) -> &Progress {
        &self.state.progress
    }
}
