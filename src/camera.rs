//! Viewport camera: a pure function of the hero's position.
//!
//! The camera is derived state. A cached copy rides along in saves for
//! resume convenience, but every mutation path recomputes it from the
//! hero's position, so the cache is never authoritative.

use crate::core::constants::{VIEWPORT_HEIGHT, VIEWPORT_WIDTH, WORLD_HEIGHT, WORLD_WIDTH};
use crate::world::grid::GridPos;
use serde::{Deserialize, Serialize};

/// Top-left corner of the visible world window, in world pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Camera {
    pub x: i32,
    pub y: i32,
}

/// Centers the viewport on the hero, clamped to world bounds.
pub fn camera_for(hero: GridPos) -> Camera {
    Camera {
        x: (hero.x - VIEWPORT_WIDTH / 2).clamp(0, WORLD_WIDTH - VIEWPORT_WIDTH),
        y: (hero.y - VIEWPORT_HEIGHT / 2).clamp(0, WORLD_HEIGHT - VIEWPORT_HEIGHT),
    }
}
