//! Deterministic simulation module
//!
//! All environment logic lives here. This module must be pure and deterministic:
//! - One fixed tick per action
//! - No randomness
//! - Stable iteration order (obstacles and checkpoints by index)
//! - No rendering or platform dependencies

pub mod collision;
pub mod rect;
pub mod reward;
pub mod state;
pub mod tick;
pub mod world;

pub use collision::{
    AxisEdgeHeuristic, ClearanceModel, Clearances, Contacts, axis_edge_clearances, clearances,
    detect,
};
pub use rect::{Rect, scale_rect};
pub use reward::{RewardBreakdown, RewardMap, evaluate, reward_map, terminal_reward};
pub use state::{Car, EpisodeState, FailureCause, Progress, Termination};
pub use tick::{Action, Keys, tick};
pub use world::{Bounds, World};
