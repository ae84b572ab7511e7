//! Static track geometry
//!
//! Built once per episode from [`Settings`]. Only the goal changes after
//! construction: it is consumed the first time the car reaches it.

use serde::{Deserialize, Serialize};

use super::rect::Rect;
use crate::settings::Settings;

/// Playable area `[0, width] x [0, height]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Closed-interval containment of a point
    pub fn contains(&self, x: f32, y: f32) -> bool {
        (0.0..=self.width).contains(&x) && (0.0..=self.height).contains(&y)
    }
}

/// Obstacles, checkpoints and goal for one episode
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct World {
    pub bounds: Bounds,
    pub obstacles: Vec<Rect>,
    /// Ordered; never empty
    pub checkpoints: Vec<Rect>,
    /// `None` once the goal has been reached
    pub goal: Option<Rect>,
}

impl World {
    pub fn new(settings: &Settings) -> Self {
        Self {
            bounds: settings.screen,
            obstacles: settings.track.obstacles.clone(),
            checkpoints: settings.track.checkpoints.clone(),
            goal: Some(settings.track.goal),
        }
    }

    pub fn last_checkpoint(&self) -> usize {
        self.checkpoints.len().saturating_sub(1)
    }

    /// Remove the goal so it can't be won twice in one episode
    pub fn consume_goal(&mut self) -> Option<Rect> {
        self.goal.take()
    }
}
