//! Unit-grid geometry and the obstacle occupancy field.
//!
//! Every entity sits on a cell of a fixed 48-pixel grid. Positions are
//! stored in world pixels, always UNIT_SIZE-aligned; a cell is addressed
//! by snapping pixel coordinates down to the grid.

use crate::core::constants::{UNIT_SIZE, WORLD_HEIGHT, WORLD_WIDTH};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A grid-aligned world position (pixels, multiples of UNIT_SIZE).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct GridPos {
    pub x: i32,
    pub y: i32,
}

impl GridPos {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Cardinal movement direction, one cell per step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Returns the (dx, dy) pixel delta for one step.
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Self::Up => (0, -UNIT_SIZE),
            Self::Down => (0, UNIT_SIZE),
            Self::Left => (-UNIT_SIZE, 0),
            Self::Right => (UNIT_SIZE, 0),
        }
    }
}

/// World width in whole cells.
pub fn cells_wide() -> i32 {
    WORLD_WIDTH / UNIT_SIZE
}

/// World height in whole cells.
pub fn cells_high() -> i32 {
    WORLD_HEIGHT / UNIT_SIZE
}

/// Snaps a pixel coordinate down to its cell origin.
pub fn snap(v: i32) -> i32 {
    (v / UNIT_SIZE) * UNIT_SIZE
}

/// The cell at the center of the world.
pub fn world_center() -> GridPos {
    GridPos::new(snap(WORLD_WIDTH / 2), snap(WORLD_HEIGHT / 2))
}

/// True if the position lies inside world bounds (walkable area).
pub fn in_bounds(pos: GridPos) -> bool {
    pos.x >= 0 && pos.x < WORLD_WIDTH && pos.y >= 0 && pos.y < WORLD_HEIGHT
}

/// True if the position is at least one cell away from every world edge.
///
/// Placement never targets the outermost ring, so spawned entities are
/// always reachable from all four sides.
pub fn in_interior(pos: GridPos) -> bool {
    let ux = pos.x / UNIT_SIZE;
    let uy = pos.y / UNIT_SIZE;
    ux >= 1 && ux < cells_wide() - 1 && uy >= 1 && uy < cells_high() - 1
}

/// The immutable obstacle set: rocks and stumps, generated once per
/// world and never mutated afterwards.
///
/// Storage is two position lists (serialized, and the renderer needs to
/// know the kind), backed by a hash index for O(1) occupancy tests. The
/// index is transient and rebuilt after deserialization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ObstacleField {
    pub rocks: Vec<GridPos>,
    pub stumps: Vec<GridPos>,
    #[serde(skip)]
    index: HashSet<(i32, i32)>,
}

impl ObstacleField {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_rock(&mut self, pos: GridPos) {
        self.rocks.push(pos);
        self.index.insert((pos.x, pos.y));
    }

    pub fn add_stump(&mut self, pos: GridPos) {
        self.stumps.push(pos);
        self.index.insert((pos.x, pos.y));
    }

    /// Rebuilds the occupancy index from the position lists.
    /// Must be called after loading a saved world.
    pub fn rebuild_index(&mut self) {
        self.index = self
            .rocks
            .iter()
            .chain(self.stumps.iter())
            .map(|p| (p.x, p.y))
            .collect();
    }

    /// True iff the cell coincides with any obstacle.
    pub fn is_occupied(&self, pos: GridPos) -> bool {
        self.index.contains(&(pos.x, pos.y))
    }

    pub fn len(&self) -> usize {
        self.rocks.len() + self.stumps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rocks.is_empty() && self.stumps.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_delta() {
        assert_eq!(Direction::Up.delta(), (0, -UNIT_SIZE));
        assert_eq!(Direction::Down.delta(), (0, UNIT_SIZE));
        assert_eq!(Direction::Left.delta(), (-UNIT_SIZE, 0));
        assert_eq!(Direction::Right.delta(), (UNIT_SIZE, 0));
    }

    #[test]
    fn test_snap_aligns_to_grid() {
        assert_eq!(snap(0), 0);
        assert_eq!(snap(47), 0);
        assert_eq!(snap(48), 48);
        assert_eq!(snap(100), 96);
    }

    #[test]
    fn test_world_center_is_aligned() {
        let center = world_center();
        assert_eq!(center.x % UNIT_SIZE, 0);
        assert_eq!(center.y % UNIT_SIZE, 0);
        assert!(in_bounds(center));
        assert!(in_interior(center));
    }

    #[test]
    fn test_interior_excludes_edges() {
        assert!(!in_interior(GridPos::new(0, UNIT_SIZE)));
        assert!(!in_interior(GridPos::new(UNIT_SIZE, 0)));
        assert!(in_interior(GridPos::new(UNIT_SIZE, UNIT_SIZE)));
        let last_x = (cells_wide() - 1) * UNIT_SIZE;
        assert!(!in_interior(GridPos::new(last_x, UNIT_SIZE)));
        assert!(in_interior(GridPos::new(last_x - UNIT_SIZE, UNIT_SIZE)));
    }

    #[test]
    fn test_occupancy_tracks_both_kinds() {
        let mut field = ObstacleField::new();
        field.add_rock(GridPos::new(48, 48));
        field.add_stump(GridPos::new(96, 48));

        assert!(field.is_occupied(GridPos::new(48, 48)));
        assert!(field.is_occupied(GridPos::new(96, 48)));
        assert!(!field.is_occupied(GridPos::new(144, 48)));
        assert_eq!(field.len(), 2);
    }

    #[test]
    fn test_rebuild_index_restores_occupancy() {
        let mut field = ObstacleField::new();
        field.add_rock(GridPos::new(48, 96));
        field.add_stump(GridPos::new(240, 192));

        // Round-trip through serde drops the transient index
        let json = serde_json::to_string(&field).unwrap();
        let mut loaded: ObstacleField = serde_json::from_str(&json).unwrap();
        assert!(!loaded.is_occupied(GridPos::new(48, 96)));

        loaded.rebuild_index();
        assert!(loaded.is_occupied(GridPos::new(48, 96)));
        assert!(loaded.is_occupied(GridPos::new(240, 192)));
    }
}
