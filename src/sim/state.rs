//! Episode state and car kinematics
//!
//! Everything that changes during an episode lives here. A reset replaces the
//! whole [`EpisodeState`] at once.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use super::tick::Action;
use super::world::World;
use crate::settings::{CarTuning, Settings};
use crate::{heading_to_displacement, wrap_degrees};

/// Why an episode failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FailureCause {
    /// Car footprint touched an obstacle
    Crash,
    /// Car center left the screen
    OutOfBounds,
}

/// Episode outcome so far
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Termination {
    #[default]
    Ongoing,
    Failed(FailureCause),
    Succeeded,
}

impl Termination {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Termination::Ongoing)
    }
}

/// The car: a point model with a rotated rectangular footprint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Car {
    pub position: Vec2,
    /// Degrees in [0, 360), 0 = up
    pub heading: f32,
    /// Signed; negative drives backwards
    pub speed: f32,
    /// Speed clamp; forced to 0 when the episode ends
    pub max_speed: f32,
    /// Body size before rotation
    pub width: f32,
    pub length: f32,
    /// Screen-space bounds of the rotated body
    pub footprint: Rect,
}

impl Car {
    pub fn new(tuning: &CarTuning) -> Self {
        let mut car = Self {
            position: tuning.start,
            heading: wrap_degrees(tuning.start_heading),
            speed: 0.0,
            max_speed: tuning.max_speed,
            width: tuning.width,
            length: tuning.length,
            footprint: Rect::new(tuning.start, 0.0, 0.0),
        };
        car.refresh_footprint();
        car
    }

    /// Advance one tick
    ///
    /// Inputs are not clamped, so `throttle = 2.0` accelerates twice as hard.
    /// Overlap with obstacles is not resolved here, only detected later.
    pub fn update(&mut self, action: &Action, tuning: &CarTuning) {
        self.speed += action.throttle * tuning.acceleration;
        self.speed = self.speed.clamp(-self.max_speed, self.max_speed);

        self.heading = wrap_degrees(self.heading + action.steer * tuning.turn_acceleration);

        self.position += heading_to_displacement(self.heading, self.speed);
        self.refresh_footprint();
    }

    /// Stop the car for good (until reset)
    pub fn freeze(&mut self) {
        self.max_speed = 0.0;
        self.speed = 0.0;
    }

    /// Move the car without integrating physics (reward maps, tests)
    pub fn place(&mut self, position: Vec2) {
        self.position = position;
        self.refresh_footprint();
    }

    pub fn refresh_footprint(&mut self) {
        self.footprint = Rect::rotated_bounds(self.position, self.width, self.length, self.heading);
    }
}

/// Checkpoint progress and outcome
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Progress {
    /// Next checkpoint to reach; never decreases, stops at the last one
    pub checkpoint_index: usize,
    /// Bonus earned so far; paid every tick, never decreases
    pub checkpoint_bonus: f32,
    /// Distinct checkpoints reached, including the last one
    pub checkpoints_passed: usize,
    pub termination: Termination,
}

/// Complete episode state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EpisodeState {
    pub world: World,
    pub car: Car,
    pub progress: Progress,
    /// Ticks taken this episode
    pub tick_count: u64,
    /// Reward returned by the latest tick
    pub last_reward: f32,
    /// Car positions, start position first
    pub trajectory: Vec<Vec2>,
}

impl EpisodeState {
    pub fn new(settings: &Settings) -> Self {
        let car = Car::new(&settings.car);
        Self {
            world: World::new(settings),
            trajectory: vec![car.position],
            car,
            progress: Progress::default(),
            tick_count: 0,
            last_reward: 0.0,
        }
    }

    pub fn is_done(&self) -> bool {
        self.progress.termination.is_terminal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn action(throttle: f32, steer: f32) -> Action {
        Action { throttle, steer }
    }

    #[test]
    fn test_first_tick_from_start() {
        let tuning = CarTuning::default();
        let mut car = Car::new(&tuning);
        car.update(&action(1.0, 0.0), &tuning);

        assert_eq!(car.speed, 0.5);
        assert_eq!(car.heading, 320.0);
        assert!((car.position.x - 60.321).abs() < 1e-3);
        assert!((car.position.y - 709.617).abs() < 1e-3);
        assert_eq!(car.footprint.center, car.position);
    }

    #[test]
    fn test_speed_clamped_both_ways() {
        let tuning = CarTuning::default();
        let mut car = Car::new(&tuning);
        for _ in 0..50 {
            car.update(&action(1.0, 0.0), &tuning);
        }
        assert_eq!(car.speed, tuning.max_speed);

        for _ in 0..50 {
            car.update(&action(-1.0, 0.0), &tuning);
        }
        assert_eq!(car.speed, -tuning.max_speed);
    }

    #[test]
    fn test_out_of_range_input_scales() {
        let tuning = CarTuning::default();
        let mut car = Car::new(&tuning);
        car.update(&action(2.0, 0.0), &tuning);
        assert_eq!(car.speed, 1.0);
    }

    #[test]
    fn test_heading_wraps() {
        let tuning = CarTuning::default();
        let mut car = Car::new(&tuning);
        // 320 + 9 * 5 = 365 -> 5
        for _ in 0..9 {
            car.update(&action(0.0, 1.0), &tuning);
        }
        assert!((car.heading - 5.0).abs() < 1e-3);

        for _ in 0..2 {
            car.update(&action(0.0, -1.0), &tuning);
        }
        assert!((car.heading - 355.0).abs() < 1e-3);
    }

    #[test]
    fn test_frozen_car_does_not_move() {
        let tuning = CarTuning::default();
        let mut car = Car::new(&tuning);
        car.update(&action(1.0, 0.0), &tuning);
        car.freeze();
        let before = car.position;
        for _ in 0..10 {
            car.update(&action(1.0, 1.0), &tuning);
        }
        assert_eq!(car.position, before);
        assert_eq!(car.speed, 0.0);
    }

    #[test]
    fn test_new_episode() {
        let state = EpisodeState::new(&Settings::default());
        assert_eq!(state.progress.checkpoint_index, 0);
        assert_eq!(state.progress.checkpoint_bonus, 0.0);
        assert_eq!(state.progress.checkpoints_passed, 0);
        assert_eq!(state.progress.termination, Termination::Ongoing);
        assert_eq!(state.trajectory, vec![Vec2::new(60.0, 710.0)]);
        assert!(!state.is_done());
    }
}
