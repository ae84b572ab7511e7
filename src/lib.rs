//! Race Env - A top-down racing environment for reinforcement learning
//!
//! Core modules:
//! - `sim`: Deterministic simulation (kinematics, collisions, rewards)
//! - `env`: Gym-style `reset`/`step` facade over the simulation
//! - `settings`: Data-driven tuning, loadable from JSON
//! - `records`: Episode records and best-run leaderboard

pub mod env;
pub mod error;
pub mod records;
pub mod settings;
pub mod sim;

pub use env::{Observation, RaceEnv, Transition};
pub use error::EnvError;
pub use records::{EpisodeRecord, Leaderboard};
pub use settings::Settings;

use glam::Vec2;

/// Default configuration constants (the standard track)
pub mod consts {
    /// Screen dimensions (playable area)
    pub const SCREEN_WIDTH: f32 = 1020.0;
    pub const SCREEN_HEIGHT: f32 = 770.0;

    /// Car defaults
    pub const MAX_SPEED: f32 = 8.0;
    pub const ACCELERATION: f32 = 0.5;
    /// Degrees per tick at full steer
    pub const TURN_ACCELERATION: f32 = 5.0;
    pub const CAR_WIDTH: f32 = 20.0;
    pub const CAR_LENGTH: f32 = 40.0;
    pub const CAR_START: (f32, f32) = (60.0, 710.0);
    pub const CAR_START_HEADING: f32 = 320.0;

    /// Reward shaping
    pub const MAX_REWARD: f32 = 20.0;
    pub const CHECKPOINT_REWARD: f32 = MAX_REWARD / 8.0;
    /// Buffered car = car footprint * BUFFER_RATIO
    pub const BUFFER_RATIO: f32 = 2.0;
    /// Applied when the safety buffer touches walls or obstacles
    pub const BUFFER_PENALTY: f32 = -2.0;

    /// Track geometry
    pub const PAD_HEIGHT: f32 = 25.0;
    pub const CHECKPOINT_WIDTH: f32 = 150.0;
    pub const CHECKPOINT_HEIGHT: f32 = 25.0;
    pub const GOAL_SIZE: f32 = 50.0;
}

/// Wrap a heading in degrees to [0, 360)
#[inline]
pub fn wrap_degrees(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Displacement for moving `speed` units along `heading` degrees
///
/// Screen convention: heading 0 points up (-y), heading 90 points left (-x).
#[inline]
pub fn heading_to_displacement(heading: f32, speed: f32) -> Vec2 {
    let rad = heading.to_radians();
    Vec2::new(-speed * rad.sin(), -speed * rad.cos())
}
