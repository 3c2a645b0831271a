//! Per-tick orchestration.
//!
//! `game_tick()` is the single entry point the shell calls at the fixed
//! simulation rate. It consumes the queued movement intent, resolves
//! collisions, polls the boost timers and the boss trigger, and prunes
//! the message feed. All randomness comes in through the `Rng`
//! parameter and all time through `now_ms`, so ticks are fully
//! deterministic under test.

use crate::camera::camera_for;
use crate::combat::logic::{expire_boosts, resolve_collisions, trigger_boss_fight};
use crate::combat::types::CombatEvent;
use crate::core::constants::BASE_MOVE_COOLDOWN_MS;
use crate::core::game_state::GameState;
use crate::progression::poll_boss_trigger;
use crate::world::grid::{in_bounds, Direction, GridPos};
use rand::Rng;

/// What one tick did, for the shell and for tests.
#[derive(Debug, Clone, Default)]
pub struct TickResult {
    /// Events in chronological order.
    pub events: Vec<CombatEvent>,
    /// True if the hero actually stepped to a new cell.
    pub moved: bool,
}

/// Attempts a one-cell step. Steps into obstacles or out of the world
/// are silently ignored.
fn try_move(state: &mut GameState, direction: Direction) -> bool {
    let (dx, dy) = direction.delta();
    let next = GridPos::new(state.hero.x + dx, state.hero.y + dy);
    if in_bounds(next) && !state.obstacles.is_occupied(next) {
        state.hero.set_pos(next);
        true
    } else {
        false
    }
}

/// Processes a single simulation tick.
///
/// `held` is the movement intent reported by the input layer for this
/// tick (None when no direction is held). The move cooldown lives here,
/// not in the input layer; a speed boost halves it.
pub fn game_tick<R: Rng>(
    state: &mut GameState,
    now_ms: i64,
    held: Option<Direction>,
    rng: &mut R,
) -> TickResult {
    let mut result = TickResult::default();

    // ── 1. Movement ─────────────────────────────────────────────
    if let Some(direction) = held {
        let cooldown = if state.hero.boosts.speed_active(now_ms) {
            BASE_MOVE_COOLDOWN_MS / 2
        } else {
            BASE_MOVE_COOLDOWN_MS
        };
        if now_ms - state.last_move_ms > cooldown {
            result.moved = try_move(state, direction);
            state.last_move_ms = now_ms;
            result.events.extend(resolve_collisions(state, now_ms, rng));
            state.camera = camera_for(state.hero.pos());
        }
    }

    // ── 2. Boost expiry ─────────────────────────────────────────
    result.events.extend(expire_boosts(state, now_ms));

    // ── 3. Boss trigger ─────────────────────────────────────────
    let (phase, spawn_boss) = poll_boss_trigger(state.phase);
    state.phase = phase;
    if spawn_boss {
        result.events.extend(trigger_boss_fight(state, now_ms));
    }

    // ── 4. Message upkeep ───────────────────────────────────────
    state.prune_messages(now_ms);

    result
}
