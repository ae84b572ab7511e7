//! Reward shaping and episode progress
//!
//! Per tick, in order: update termination from contacts, add near-miss
//! penalties, pay the checkpoint bonus, add checkpoint-distance shaping, round,
//! then replace everything with the terminal reward if the episode just ended.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{Contacts, detect};
use super::state::{Car, EpisodeState, FailureCause, Progress, Termination};
use super::world::World;
use crate::settings::{RewardTuning, Settings};

/// Individual reward terms for one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RewardBreakdown {
    /// Safety buffer past the left, right or bottom screen edge
    pub edge_buffer: f32,
    /// Safety buffer touching any obstacle
    pub obstacle_buffer: f32,
    pub checkpoint_bonus: f32,
    /// `1 - normalized distance` to the current checkpoint
    pub checkpoint_distance: f32,
    /// Rounded reward actually returned
    pub total: f32,
    /// Set when `total` is the terminal reward
    pub terminal: bool,
}

/// Terminal reward with self-consistent signs
pub fn terminal_reward(termination: Termination, tuning: &RewardTuning) -> Option<f32> {
    match termination {
        Termination::Ongoing => None,
        Termination::Failed(_) => Some(-tuning.max_reward),
        Termination::Succeeded => Some(tuning.max_reward),
    }
}

/// Round to one decimal, ties to even
#[inline]
fn round_tenth(value: f32) -> f32 {
    (value * 10.0).round_ties_even() / 10.0
}

/// Apply this tick's contacts to the termination state
///
/// Checks run obstacle, goal, bounds; a later check overrides an earlier one
/// within the same tick. Once terminal, the outcome is kept until reset.
pub fn update_termination(
    progress: &mut Progress,
    car: &mut Car,
    world: &mut World,
    contacts: &Contacts,
) {
    if progress.termination.is_terminal() {
        return;
    }

    let mut outcome = Termination::Ongoing;
    if contacts.crashed() {
        outcome = Termination::Failed(FailureCause::Crash);
    }
    if contacts.goal {
        world.consume_goal();
        log::debug!("Goal reached at ({:.1}, {:.1})", car.position.x, car.position.y);
        outcome = Termination::Succeeded;
    }
    if contacts.out_of_bounds {
        outcome = Termination::Failed(FailureCause::OutOfBounds);
    }

    if outcome.is_terminal() {
        progress.termination = outcome;
        car.freeze();
    }
}

/// Shaped reward for the current pose; updates checkpoint progress
pub fn shaped_reward(
    progress: &mut Progress,
    car: &Car,
    world: &World,
    tuning: &RewardTuning,
) -> RewardBreakdown {
    let mut breakdown = RewardBreakdown::default();
    let bounds = world.bounds;

    let buffered = car.footprint.scaled(tuning.buffer_ratio);
    if buffered.left() < 0.0
        || buffered.right() > bounds.width
        || buffered.bottom() > bounds.height
    {
        breakdown.edge_buffer = 2.0 * tuning.buffer_penalty;
    }
    if world.obstacles.iter().any(|o| buffered.intersects(o)) {
        breakdown.obstacle_buffer = tuning.buffer_penalty;
    }

    let center = car.position;
    let index = progress.checkpoint_index;
    if world
        .checkpoints
        .get(index)
        .is_some_and(|checkpoint| checkpoint.contains_point(center))
    {
        let bonus = tuning.checkpoint_reward * (index + 1) as f32;
        progress.checkpoint_bonus = progress.checkpoint_bonus.max(bonus);
        progress.checkpoints_passed = progress.checkpoints_passed.max(index + 1);
        if index < world.last_checkpoint() {
            progress.checkpoint_index += 1;
            log::debug!("Checkpoint {} reached, next is {}", index, progress.checkpoint_index);
        }
    }
    breakdown.checkpoint_bonus = progress.checkpoint_bonus;

    // A track without checkpoints has no distance shaping
    if let Some(target) = world.checkpoints.get(progress.checkpoint_index) {
        let offset = (center - target.center).abs();
        breakdown.checkpoint_distance =
            1.0 - (offset.x / bounds.width + offset.y / bounds.height);
    }

    breakdown.total = round_tenth(
        breakdown.edge_buffer
            + breakdown.obstacle_buffer
            + breakdown.checkpoint_bonus
            + breakdown.checkpoint_distance,
    );
    breakdown
}

/// Run the full reward step for one tick
pub fn evaluate(
    progress: &mut Progress,
    car: &mut Car,
    world: &mut World,
    contacts: &Contacts,
    tuning: &RewardTuning,
) -> RewardBreakdown {
    update_termination(progress, car, world, contacts);

    let mut breakdown = shaped_reward(progress, car, world, tuning);
    if let Some(reward) = terminal_reward(progress.termination, tuning) {
        breakdown.total = reward;
        breakdown.terminal = true;
    }
    breakdown
}

/// Most samples taken along either axis of a reward map
pub const MAX_MAP_SAMPLES: usize = 4096;

/// Shaped reward sampled over the screen
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RewardMap {
    /// Pixels between samples
    pub stride: u32,
    pub columns: usize,
    pub rows: usize,
    /// Row-major; `None` where the car center would sit inside an obstacle
    pub values: Vec<Option<f32>>,
}

impl RewardMap {
    pub fn get(&self, column: usize, row: usize) -> Option<f32> {
        if column >= self.columns || row >= self.rows {
            return None;
        }
        self.values[row * self.columns + column]
    }
}

/// Sample the non-terminal reward with the car centered at every grid point
///
/// Each axis is sampled at most `MAX_MAP_SAMPLES` times from the origin.
/// The car keeps its current heading and the episode's current checkpoint
/// progress. Each sample starts from that same progress, so sweeping across a
/// checkpoint does not leak into neighbouring samples. The live state is not
/// modified.
pub fn reward_map(state: &EpisodeState, settings: &Settings, stride: u32) -> RewardMap {
    let stride = stride.max(1);
    let bounds = state.world.bounds;
    // NaN casts to 0, huge extents clamp to the per-axis cap
    let samples = |extent: f32| {
        let steps = (extent / stride as f32).floor().max(0.0);
        (steps as usize).min(MAX_MAP_SAMPLES - 1) + 1
    };
    let columns = samples(bounds.width);
    let rows = samples(bounds.height);

    let mut car = state.car.clone();
    let mut values = Vec::with_capacity(columns * rows);
    for row in 0..rows {
        for column in 0..columns {
            let point = Vec2::new(
                column as f32 * stride as f32,
                row as f32 * stride as f32,
            );
            if state.world.obstacles.iter().any(|o| o.contains_point(point)) {
                values.push(None);
                continue;
            }
            car.place(point);
            let mut progress = state.progress.clone();
            let breakdown = shaped_reward(&mut progress, &car, &state.world, &settings.reward);
            values.push(Some(breakdown.total));
        }
    }

    RewardMap {
        stride,
        columns,
        rows,
        values,
    }
}

/// Convenience for callers that only hold the state: contacts + reward in one go
pub fn evaluate_state(state: &mut EpisodeState, tuning: &RewardTuning) -> RewardBreakdown {
    let contacts = detect(&state.car, &state.world);
    evaluate(
        &mut state.progress,
        &mut state.car,
        &mut state.world,
        &contacts,
        tuning,
    )
}
