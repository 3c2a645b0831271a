//! New-game world construction.
//!
//! Obstacles are generated once and never mutate for the session; every
//! later placement decision tests against them. Collectibles only avoid
//! obstacles and the hero, not each other.

use crate::camera::camera_for;
use crate::combat::types::Enemy;
use crate::core::constants::{NUM_COINS, NUM_ENEMIES, NUM_FOODS, NUM_ROCKS, NUM_STUMPS};
use crate::core::game_state::GameState;
use crate::progression::GamePhase;
use crate::world::grid::world_center;
use crate::world::placement::{teleport_anywhere, PlacementContext};
use rand::Rng;

/// Builds a fresh world: obstacle field, collectibles, a level-1 enemy
/// roster, and the hero at the world-center cell.
pub fn new_game<R: Rng>(rng: &mut R) -> GameState {
    let mut state = GameState::default();
    let hero_start = world_center();

    // Obstacles first, mutually exclusive across both kinds: the field
    // grows as it is sampled against.
    for i in 0..NUM_ROCKS + NUM_STUMPS {
        let pos = {
            let ctx = PlacementContext {
                obstacles: &state.obstacles,
                hero: hero_start,
            };
            teleport_anywhere(&ctx, rng)
        };
        if i < NUM_ROCKS {
            state.obstacles.add_rock(pos);
        } else {
            state.obstacles.add_stump(pos);
        }
    }

    // Collectibles may share cells with each other, just not with
    // obstacles or the hero.
    for _ in 0..NUM_COINS {
        let ctx = PlacementContext {
            obstacles: &state.obstacles,
            hero: hero_start,
        };
        state.coins.push(teleport_anywhere(&ctx, rng));
    }
    for _ in 0..NUM_FOODS {
        let ctx = PlacementContext {
            obstacles: &state.obstacles,
            hero: hero_start,
        };
        state.foods.push(teleport_anywhere(&ctx, rng));
    }

    for _ in 0..NUM_ENEMIES {
        let enemy = {
            let ctx = PlacementContext {
                obstacles: &state.obstacles,
                hero: hero_start,
            };
            Enemy::spawn(&ctx, GamePhase::Normal, rng)
        };
        state.enemies.push(enemy);
    }

    // Deterministic center start. Obstacle placement excluded the
    // hero's cell, so this only ever retries if that guarantee is lost.
    let mut start = hero_start;
    while state.obstacles.is_occupied(start) {
        let ctx = PlacementContext {
            obstacles: &state.obstacles,
            hero: hero_start,
        };
        start = teleport_anywhere(&ctx, rng);
    }
    state.hero.set_pos(start);
    state.camera = camera_for(state.hero.pos());

    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::grid::in_interior;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn generated() -> GameState {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        new_game(&mut rng)
    }

    #[test]
    fn test_entity_counts() {
        let state = generated();
        assert_eq!(state.obstacles.rocks.len(), NUM_ROCKS);
        assert_eq!(state.obstacles.stumps.len(), NUM_STUMPS);
        assert_eq!(state.enemies.len(), NUM_ENEMIES);
        assert_eq!(state.coins.len(), NUM_COINS);
        assert_eq!(state.foods.len(), NUM_FOODS);
    }

    #[test]
    fn test_obstacles_are_mutually_exclusive() {
        let state = generated();
        let mut seen = std::collections::HashSet::new();
        for pos in state.obstacles.rocks.iter().chain(&state.obstacles.stumps) {
            assert!(seen.insert((pos.x, pos.y)), "two obstacles share {:?}", pos);
        }
    }

    #[test]
    fn test_nothing_spawns_on_an_obstacle_or_the_hero() {
        let state = generated();
        for pos in state.coins.iter().chain(&state.foods) {
            assert!(!state.obstacles.is_occupied(*pos));
            assert_ne!(*pos, state.hero.pos());
            assert!(in_interior(*pos));
        }
        for enemy in &state.enemies {
            assert!(!state.obstacles.is_occupied(enemy.pos()));
            assert_ne!(enemy.pos(), state.hero.pos());
            assert_eq!(enemy.level, 1);
        }
    }

    #[test]
    fn test_hero_starts_at_center_off_obstacle() {
        let state = generated();
        assert!(!state.obstacles.is_occupied(state.hero.pos()));
        assert_eq!(state.hero.pos(), world_center());
        assert_eq!(state.camera, camera_for(world_center()));
    }

    #[test]
    fn test_fresh_state_machine() {
        let state = generated();
        assert_eq!(state.phase, GamePhase::Normal);
        assert_eq!(state.milestone_kills, 0);
        assert!(state.messages.is_empty());
    }
}
