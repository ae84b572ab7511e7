//! Episode records and best-run leaderboard
//!
//! Kept by drivers across many episodes, saved as JSON.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::EnvError;
use crate::sim::{EpisodeState, Termination};

/// Maximum number of runs to keep
pub const MAX_RECORDS: usize = 10;

/// Summary of one finished (or truncated) episode
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpisodeRecord {
    /// Seed of the policy that drove the episode
    pub seed: u64,
    /// Sum of per-tick rewards
    pub total_reward: f32,
    pub steps: u64,
    pub outcome: Termination,
    pub checkpoints_reached: usize,
    pub final_position: Vec2,
}

impl EpisodeRecord {
    pub fn from_state(seed: u64, total_reward: f32, state: &EpisodeState) -> Self {
        Self {
            seed,
            total_reward,
            steps: state.tick_count,
            outcome: state.progress.termination,
            checkpoints_reached: state.progress.checkpoints_passed,
            final_position: state.car.position,
        }
    }
}

/// Best runs, highest total reward first
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Leaderboard {
    pub entries: Vec<EpisodeRecord>,
}

impl Leaderboard {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Check if a run would make the board
    pub fn qualifies(&self, total_reward: f32) -> bool {
        if self.entries.len() < MAX_RECORDS {
            return true;
        }
        self.entries
            .last()
            .map(|e| total_reward > e.total_reward)
            .unwrap_or(true)
    }

    /// Insert a record; returns its rank (1-indexed) or None if it didn't qualify
    pub fn add(&mut self, record: EpisodeRecord) -> Option<usize> {
        if !self.qualifies(record.total_reward) {
            return None;
        }

        // Ties keep the earlier run ahead
        let pos = self
            .entries
            .iter()
            .position(|e| record.total_reward > e.total_reward)
            .unwrap_or(self.entries.len());
        self.entries.insert(pos, record);
        self.entries.truncate(MAX_RECORDS);

        Some(pos + 1)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn best(&self) -> Option<&EpisodeRecord> {
        self.entries.first()
    }

    /// Load from a JSON file; a missing file gives an empty board
    pub fn load(path: impl AsRef<Path>) -> Result<Self, EnvError> {
        let path = path.as_ref();
        if !path.exists() {
            log::info!("No leaderboard at {}, starting fresh", path.display());
            return Ok(Self::new());
        }
        let json = std::fs::read_to_string(path)?;
        let board: Leaderboard = serde_json::from_str(&json)?;
        log::info!("Loaded {} records", board.entries.len());
        Ok(board)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), EnvError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        log::info!("Leaderboard saved ({} entries)", self.entries.len());
        Ok(())
    }
}
