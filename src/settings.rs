//! Environment tuning
//!
//! Everything the simulation reads lives here and is passed in at construction,
//! so two environments never share hidden tunables. Defaults are the standard
//! track; any subset can be overridden from a JSON file.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::EnvError;
use crate::sim::{Bounds, Rect};

/// Largest accepted screen width or height
pub const MAX_SCREEN_EXTENT: f32 = 100_000.0;

/// Car physics and start pose
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarTuning {
    /// Speed change per tick at full throttle
    pub acceleration: f32,
    /// Heading change per tick at full steer (degrees)
    pub turn_acceleration: f32,
    pub max_speed: f32,
    /// Car body size before rotation
    pub width: f32,
    pub length: f32,
    pub start: Vec2,
    /// Degrees, 0 = up
    pub start_heading: f32,
}

impl Default for CarTuning {
    fn default() -> Self {
        Self {
            acceleration: ACCELERATION,
            turn_acceleration: TURN_ACCELERATION,
            max_speed: MAX_SPEED,
            width: CAR_WIDTH,
            length: CAR_LENGTH,
            start: Vec2::new(CAR_START.0, CAR_START.1),
            start_heading: CAR_START_HEADING,
        }
    }
}

/// Reward shaping parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RewardTuning {
    /// Magnitude of the terminal reward (negative on failure, positive on success)
    pub max_reward: f32,
    /// Bonus unit; checkpoint `i` (0-based) is worth `(i + 1) * checkpoint_reward`
    pub checkpoint_reward: f32,
    /// Safety buffer scale relative to the car footprint
    pub buffer_ratio: f32,
    /// Added when the buffer touches an obstacle (twice that for screen edges)
    pub buffer_penalty: f32,
}

impl Default for RewardTuning {
    fn default() -> Self {
        Self {
            max_reward: MAX_REWARD,
            checkpoint_reward: CHECKPOINT_REWARD,
            buffer_ratio: BUFFER_RATIO,
            buffer_penalty: BUFFER_PENALTY,
        }
    }
}

/// Static geometry of the track
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackLayout {
    pub obstacles: Vec<Rect>,
    /// Must be passed in order
    pub checkpoints: Vec<Rect>,
    pub goal: Rect,
}

impl Default for TrackLayout {
    fn default() -> Self {
        // (center, width) of each pad
        const PADS: [((f32, f32), f32); 9] = [
            ((50.0, 10.0), 400.0),
            ((740.0, 10.0), 800.0),
            ((400.0, 150.0), 900.0),
            ((150.0, 300.0), 400.0),
            ((800.0, 300.0), 500.0),
            ((600.0, 450.0), 900.0),
            ((50.0, 600.0), 800.0),
            ((850.0, 600.0), 400.0),
            ((600.0, 750.0), 900.0),
        ];
        const CHECKPOINTS: [(f32, f32); 4] =
            [(550.0, 600.0), (50.0, 450.0), (450.0, 300.0), (950.0, 150.0)];

        Self {
            obstacles: PADS
                .iter()
                .map(|&((x, y), w)| Rect::new(Vec2::new(x, y), w, PAD_HEIGHT))
                .collect(),
            checkpoints: CHECKPOINTS
                .iter()
                .map(|&(x, y)| Rect::new(Vec2::new(x, y), CHECKPOINT_WIDTH, CHECKPOINT_HEIGHT))
                .collect(),
            goal: Rect::from_top_left(Vec2::new(280.0, 0.0), GOAL_SIZE, GOAL_SIZE),
        }
    }
}

/// Complete environment configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub screen: Bounds,
    pub car: CarTuning,
    pub reward: RewardTuning,
    pub track: TrackLayout,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            screen: Bounds::new(SCREEN_WIDTH, SCREEN_HEIGHT),
            car: CarTuning::default(),
            reward: RewardTuning::default(),
            track: TrackLayout::default(),
        }
    }
}

impl Settings {
    /// Parse settings from JSON; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, EnvError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, EnvError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Save settings as pretty-printed JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), EnvError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), EnvError> {
        // NaN fails both checks
        let positive = |v: f32| v > 0.0;
        let non_negative = |v: f32| v >= 0.0;
        let invalid = |msg: &str| Err(EnvError::InvalidSettings(msg.to_string()));

        let screen_ok = |v: f32| positive(v) && v <= MAX_SCREEN_EXTENT;
        if !screen_ok(self.screen.width) || !screen_ok(self.screen.height) {
            return invalid("screen width and height must be positive and at most 100000");
        }
        if !non_negative(self.car.max_speed) {
            return invalid("car.max_speed must be non-negative");
        }
        if !non_negative(self.car.acceleration) || !non_negative(self.car.turn_acceleration) {
            return invalid("car accelerations must be non-negative");
        }
        if !non_negative(self.car.width) || !non_negative(self.car.length) {
            return invalid("car size must be non-negative");
        }
        if !positive(self.reward.buffer_ratio) {
            return invalid("reward.buffer_ratio must be positive");
        }
        if self.track.checkpoints.is_empty() {
            return invalid("track needs at least one checkpoint");
        }
        Ok(())
    }
}
