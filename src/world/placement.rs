//! Procedural placement: the two teleport policies.
//!
//! Both policies rejection-sample grid cells under constraints and are
//! attempt-budgeted so they terminate even in a densely packed world.
//! Constraint exhaustion is handled here and never surfaces as an error.

use crate::core::constants::{NEARBY_TELEPORT_RANGE, PLACEMENT_ATTEMPT_BUDGET, UNIT_SIZE};
use crate::world::grid::{cells_high, cells_wide, in_interior, GridPos, ObstacleField};
use rand::Rng;

/// Everything a placement decision needs from the world, passed
/// explicitly so entities never hold a back-reference to their owner.
pub struct PlacementContext<'a> {
    pub obstacles: &'a ObstacleField,
    pub hero: GridPos,
}

/// Uniform placement over the interior of the world grid.
///
/// Rejects obstacle cells and the hero's cell. The outermost ring of
/// cells is never sampled. After the attempt budget is spent, falls
/// back to a deterministic scan for any obstacle-free interior cell.
pub fn teleport_anywhere<R: Rng>(ctx: &PlacementContext, rng: &mut R) -> GridPos {
    for _ in 0..PLACEMENT_ATTEMPT_BUDGET {
        let pos = sample_interior(rng);
        if !ctx.obstacles.is_occupied(pos) && pos != ctx.hero {
            return pos;
        }
    }
    fallback_scan(ctx, rng)
}

/// Placement near a reference cell: independent uniform offsets of up
/// to NEARBY_TELEPORT_RANGE cells on each axis.
///
/// Rejects the reference cell itself, obstacle cells, and the outer
/// margin. Falls back to [`teleport_anywhere`] when the budget runs out
/// (a reference boxed in by obstacles, or sitting near a world edge).
pub fn teleport_nearby<R: Rng>(ctx: &PlacementContext, from: GridPos, rng: &mut R) -> GridPos {
    let span = NEARBY_TELEPORT_RANGE * 2 + 1;
    for _ in 0..PLACEMENT_ATTEMPT_BUDGET {
        let dx = (rng.gen_range(0..span) - NEARBY_TELEPORT_RANGE) * UNIT_SIZE;
        let dy = (rng.gen_range(0..span) - NEARBY_TELEPORT_RANGE) * UNIT_SIZE;
        let pos = GridPos::new(from.x + dx, from.y + dy);
        if pos != from && in_interior(pos) && !ctx.obstacles.is_occupied(pos) {
            return pos;
        }
    }
    teleport_anywhere(ctx, rng)
}

/// One uniform draw over the interior cells.
fn sample_interior<R: Rng>(rng: &mut R) -> GridPos {
    let ux = rng.gen_range(1..cells_wide() - 1);
    let uy = rng.gen_range(1..cells_high() - 1);
    GridPos::new(ux * UNIT_SIZE, uy * UNIT_SIZE)
}

/// Budget-exhaustion fallback: walk every interior cell from a random
/// starting offset and take the first obstacle-free one. Only the
/// obstacle constraint is kept. The interior always has more cells than
/// the world has obstacles, so the scan finds one; the start offset is
/// returned unfiltered in the unreachable worst case.
fn fallback_scan<R: Rng>(ctx: &PlacementContext, rng: &mut R) -> GridPos {
    let w = cells_wide() - 2;
    let h = cells_high() - 2;
    let total = w * h;
    let start = rng.gen_range(0..total);
    for i in 0..total {
        let n = (start + i) % total;
        let pos = GridPos::new((n % w + 1) * UNIT_SIZE, (n / w + 1) * UNIT_SIZE);
        if !ctx.obstacles.is_occupied(pos) {
            return pos;
        }
    }
    GridPos::new((start % w + 1) * UNIT_SIZE, (start / w + 1) * UNIT_SIZE)
}
