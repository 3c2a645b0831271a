//! The serialized save payload.
//!
//! Every field carries `#[serde(default)]` so a loader accepts files
//! written before that field existed: missing collections come back
//! empty, a missing phase comes back `Normal`, counters come back zero.
//! Restoring rebuilds all transient state (obstacle index, camera) from
//! the loaded data, so nothing in the file is trusted as derived truth.

use crate::camera::{camera_for, Camera};
use crate::combat::types::Enemy;
use crate::core::game_state::{GameState, Hero};
use crate::progression::GamePhase;
use crate::world::grid::{GridPos, ObstacleField};
use serde::{Deserialize, Serialize};

/// Complete persistent state of one session.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SaveData {
    #[serde(default)]
    pub hero: Hero,
    #[serde(default)]
    pub enemies: Vec<Enemy>,
    #[serde(default)]
    pub coins: Vec<GridPos>,
    #[serde(default)]
    pub foods: Vec<GridPos>,
    #[serde(default)]
    pub obstacles: ObstacleField,
    #[serde(default)]
    pub phase: GamePhase,
    #[serde(default)]
    pub milestone_kills: u32,
    /// Cached for resume convenience; recomputed on restore.
    #[serde(default)]
    pub camera: Camera,
}

impl SaveData {
    /// Snapshots the live state. Cheap clones of plain data; taken on
    /// the simulation thread so the copy is a consistent point in time.
    pub fn capture(state: &GameState) -> Self {
        Self {
            hero: state.hero.clone(),
            enemies: state.enemies.clone(),
            coins: state.coins.clone(),
            foods: state.foods.clone(),
            obstacles: state.obstacles.clone(),
            phase: state.phase,
            milestone_kills: state.milestone_kills,
            camera: state.camera,
        }
    }

    /// Builds a live state from loaded data: transient fields reset,
    /// occupancy index rebuilt, camera recomputed from the hero.
    pub fn restore(self) -> GameState {
        let mut state = GameState {
            hero: self.hero,
            enemies: self.enemies,
            coins: self.coins,
            foods: self.foods,
            obstacles: self.obstacles,
            phase: self.phase,
            milestone_kills: self.milestone_kills,
            camera: self.camera,
            messages: Vec::new(),
            shake_until_ms: 0,
            last_move_ms: 0,
        };
        state.obstacles.rebuild_index();
        state.camera = camera_for(state.hero.pos());
        state
    }
}
