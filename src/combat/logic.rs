//! Encounter and pickup resolution.
//!
//! Runs after every accepted hero step. At most one enemy encounter is
//! resolved per tick: the first roster entry on the hero's cell, in
//! roster order. Several enemies stacked on one cell resolve one per
//! tick by design; changing that would change game balance.

use crate::combat::types::{CombatEvent, Enemy};
use crate::core::constants::{
    COIN_DROP_TIER_ONE_MAX_LEVEL, COIN_DROP_TIER_TWO_MAX_LEVEL, CRIT_CHANCE,
    EVASION_CHANCE_PER_LEVEL, FOOD_HEAL_AMOUNT, LEVEL_UP_HEALTH_GAIN, NUM_ENEMIES,
    SHAKE_DURATION_MS, XP_PER_ENEMY_LEVEL,
};
use crate::core::game_state::GameState;
use crate::progression::{self, DefeatOutcome};
use crate::world::placement::{teleport_anywhere, teleport_nearby, PlacementContext};
use rand::Rng;

/// Resolves everything the hero's current cell touches: one enemy
/// encounter, then coin and food pickups. Ends early if the hero dies;
/// the death tick grants no counter-attack and no pickups.
pub fn resolve_collisions<R: Rng>(
    state: &mut GameState,
    now_ms: i64,
    rng: &mut R,
) -> Vec<CombatEvent> {
    let mut events = Vec::new();

    let hero_pos = state.hero.pos();
    if let Some(idx) = state.enemies.iter().position(|e| e.pos() == hero_pos) {
        let survived = resolve_encounter(state, idx, now_ms, rng, &mut events);
        if !survived {
            return events;
        }
    }

    resolve_coin_pickup(state, now_ms, rng, &mut events);
    resolve_food_pickup(state, now_ms, rng, &mut events);
    events
}

/// Strictly ordered encounter: evasion, shield, damage, death check,
/// counter-attack, defeat or relocation. Returns false iff the hero
/// died.
fn resolve_encounter<R: Rng>(
    state: &mut GameState,
    idx: usize,
    now_ms: i64,
    rng: &mut R,
    events: &mut Vec<CombatEvent>,
) -> bool {
    let enemy_level = state.enemies[idx].level;

    let dodge_chance =
        state.hero.upgrades.evasiveness.saturating_sub(1) as f64 * EVASION_CHANCE_PER_LEVEL;
    let dodged = rng.gen::<f64>() < dodge_chance;

    if dodged {
        state.push_message(now_ms, "Dodged!");
        events.push(CombatEvent::Dodged);
    } else if state.hero.boosts.shield_active(now_ms) {
        state.push_message(now_ms, "Shield blocked!");
        events.push(CombatEvent::ShieldBlocked);
    } else {
        let damage = (enemy_level as i32 - (state.hero.upgrades.defense as i32 - 1)).max(1);
        state.hero.health -= damage;
        state.push_message(now_ms, format!("Ouch! -{} HP", damage));
        events.push(CombatEvent::HeroDamaged { damage });

        if state.hero.health <= 0 {
            state.push_message(now_ms, "You died! Resetting...");
            state.apply_death_reset();
            events.push(CombatEvent::HeroDied);
            return false;
        }
    }

    // Counter-attack: the hero always swings back after surviving,
    // including after a dodge or a shield block.
    let mut damage = 1 + (state.hero.upgrades.attack as i32 - 1);
    if state.hero.boosts.critical_active(now_ms) && rng.gen_bool(CRIT_CHANCE) {
        damage *= 2;
        state.push_message(now_ms, "Critical Hit!");
        events.push(CombatEvent::CriticalHit);
    }
    state.enemies[idx].health -= damage;

    if state.enemies[idx].health <= 0 {
        resolve_defeat(state, idx, now_ms, rng, events);
    } else {
        events.push(CombatEvent::EnemyDamaged { damage });
        // Survivor keeps the pressure on: relocate near its own cell.
        let from = state.enemies[idx].pos();
        let pos = {
            let ctx = PlacementContext {
                obstacles: &state.obstacles,
                hero: state.hero.pos(),
            };
            teleport_nearby(&ctx, from, rng)
        };
        state.enemies[idx].x = pos.x;
        state.enemies[idx].y = pos.y;
    }

    true
}

/// Rewards for a kill, then the state-machine verdict on the slot.
fn resolve_defeat<R: Rng>(
    state: &mut GameState,
    idx: usize,
    now_ms: i64,
    rng: &mut R,
    events: &mut Vec<CombatEvent>,
) {
    let level = state.enemies[idx].level;
    let xp = level * XP_PER_ENEMY_LEVEL;
    let coins = if level <= COIN_DROP_TIER_ONE_MAX_LEVEL {
        1
    } else if level <= COIN_DROP_TIER_TWO_MAX_LEVEL {
        2
    } else {
        3
    };
    events.push(CombatEvent::EnemyDefeated { level, xp, coins });

    state.push_message(now_ms, format!("+{} XP", xp));
    for new_level in state.hero.grant_xp(xp) {
        state.push_message(
            now_ms,
            format!("Max Health increased by {}", LEVEL_UP_HEALTH_GAIN),
        );
        state.push_message(now_ms, "LEVEL UP!");
        events.push(CombatEvent::LeveledUp { new_level });
    }

    state.hero.coins += coins;
    state.push_message(now_ms, format!("+{} Coin(s)!", coins));

    let step = progression::on_enemy_defeated(state.phase, state.milestone_kills, level);
    state.phase = step.phase;
    state.milestone_kills = step.milestone_kills;

    match step.outcome {
        DefeatOutcome::RemoveAndRefillRoster => {
            state.push_message(now_ms, "You defeated the boss!");
            events.push(CombatEvent::BossDefeated);
            state.enemies.remove(idx);
            for _ in 0..NUM_ENEMIES {
                let enemy = {
                    let ctx = PlacementContext {
                        obstacles: &state.obstacles,
                        hero: state.hero.pos(),
                    };
                    Enemy::spawn(&ctx, state.phase, rng)
                };
                state.enemies.push(enemy);
            }
        }
        DefeatOutcome::RemovePermanently => {
            state.enemies.remove(idx);
        }
        DefeatOutcome::Respawn => {
            let ctx = PlacementContext {
                obstacles: &state.obstacles,
                hero: state.hero.pos(),
            };
            state.enemies[idx].respawn(&ctx, step.phase, rng);
        }
    }
}

fn resolve_coin_pickup<R: Rng>(
    state: &mut GameState,
    now_ms: i64,
    rng: &mut R,
    events: &mut Vec<CombatEvent>,
) {
    let hero_pos = state.hero.pos();
    if let Some(i) = state.coins.iter().position(|c| *c == hero_pos) {
        state.hero.coins += 1;
        state.push_message(now_ms, "+1 Coin!");
        events.push(CombatEvent::CoinCollected);
        state.coins[i] = {
            let ctx = PlacementContext {
                obstacles: &state.obstacles,
                hero: hero_pos,
            };
            teleport_anywhere(&ctx, rng)
        };
    }
}

fn resolve_food_pickup<R: Rng>(
    state: &mut GameState,
    now_ms: i64,
    rng: &mut R,
    events: &mut Vec<CombatEvent>,
) {
    let hero_pos = state.hero.pos();
    if let Some(i) = state.foods.iter().position(|f| *f == hero_pos) {
        let healed =
            (state.hero.health + FOOD_HEAL_AMOUNT).min(state.hero.max_health) - state.hero.health;
        state.hero.health += healed;
        state.push_message(now_ms, format!("+{} HP!", FOOD_HEAL_AMOUNT));
        events.push(CombatEvent::FoodEaten { healed });
        state.foods[i] = {
            let ctx = PlacementContext {
                obstacles: &state.obstacles,
                hero: hero_pos,
            };
            teleport_anywhere(&ctx, rng)
        };
    }
}

/// Expires any finished boost timers, once each.
pub fn expire_boosts(state: &mut GameState, now_ms: i64) -> Vec<CombatEvent> {
    let expired = state.hero.boosts.take_expired(now_ms);
    let mut events = Vec::with_capacity(expired.len());
    for kind in expired {
        state.push_message(now_ms, kind.expiry_message());
        events.push(CombatEvent::BoostExpired { boost: kind });
    }
    events
}

/// Fires the armed boss sequence: rumble notice, screen-shake hint, and
/// the boss itself at the world center. The caller has already moved
/// the phase to `BossFightActive`.
pub fn trigger_boss_fight(state: &mut GameState, now_ms: i64) -> Vec<CombatEvent> {
    state.push_message(now_ms, "The ground rumbles violently!");
    state.shake_until_ms = now_ms + SHAKE_DURATION_MS;
    state.push_message(now_ms, "A powerful enemy appears!");
    state.enemies.push(Enemy::boss());
    vec![CombatEvent::BossSpawned]
}
