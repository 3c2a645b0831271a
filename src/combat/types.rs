//! Enemy records and the events produced by combat resolution.

use crate::core::constants::{BOSS_HEALTH, BOSS_LEVEL, POST_BOSS_MIN_ENEMY_LEVEL};
use crate::progression::GamePhase;
use crate::world::grid::{world_center, GridPos};
use crate::world::placement::{teleport_anywhere, PlacementContext};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// One enemy in the roster.
///
/// Health is signed so a killing blow can push it below zero before the
/// defeat branch runs; a live enemy always has `health > 0`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enemy {
    pub x: i32,
    pub y: i32,
    pub level: u32,
    pub health: i32,
    pub max_health: i32,
}

impl Enemy {
    /// Creates a roster enemy: level 0, immediately bumped to level 1
    /// by its first respawn.
    pub fn spawn<R: Rng>(ctx: &PlacementContext, phase: GamePhase, rng: &mut R) -> Self {
        let mut enemy = Self {
            x: 0,
            y: 0,
            level: 0,
            health: 0,
            max_health: 0,
        };
        enemy.respawn(ctx, phase, rng);
        enemy
    }

    /// The boss: fixed level and health, placed at the world center.
    pub fn boss() -> Self {
        let center = world_center();
        Self {
            x: center.x,
            y: center.y,
            level: BOSS_LEVEL,
            health: BOSS_HEALTH,
            max_health: BOSS_HEALTH,
        }
    }

    pub fn pos(&self) -> GridPos {
        GridPos::new(self.x, self.y)
    }

    /// Levels up, refills health to the new level, and relocates.
    ///
    /// After the boss falls, respawns never produce a trivial enemy:
    /// any level at or below 20 is forced to 21.
    pub fn respawn<R: Rng>(&mut self, ctx: &PlacementContext, phase: GamePhase, rng: &mut R) {
        self.level += 1;
        if phase == GamePhase::PostBoss && self.level < POST_BOSS_MIN_ENEMY_LEVEL {
            self.level = POST_BOSS_MIN_ENEMY_LEVEL;
        }
        self.max_health = self.level as i32;
        self.health = self.max_health;
        let pos = teleport_anywhere(ctx, rng);
        self.x = pos.x;
        self.y = pos.y;
    }
}

/// A single event produced while resolving the hero's tick.
///
/// The presentation layer already sees the message feed on the state;
/// these carry the structured data tests and logs care about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CombatEvent {
    /// The hero dodged the enemy's attack.
    Dodged,
    /// An active shield absorbed the enemy's attack.
    ShieldBlocked,
    /// The enemy hit the hero.
    HeroDamaged { damage: i32 },
    /// The hero's health reached zero: full reset applied.
    HeroDied,
    /// The counter-attack rolled a critical hit.
    CriticalHit,
    /// The counter-attack landed but the enemy survived.
    EnemyDamaged { damage: i32 },
    /// An enemy fell; rewards already granted.
    EnemyDefeated { level: u32, xp: u32, coins: u32 },
    /// The boss fell.
    BossDefeated,
    /// The hero leveled up (repeated for multi-level XP grants).
    LeveledUp { new_level: u32 },
    /// Picked up a coin.
    CoinCollected,
    /// Ate a food pickup.
    FoodEaten { healed: i32 },
    /// A timed boost ran out.
    BoostExpired { boost: BoostKind },
    /// The pending boss fight became active and the boss spawned.
    BossSpawned,
}

/// The three purchasable timed boosts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoostKind {
    Critical,
    Speed,
    Shield,
}

impl BoostKind {
    pub fn expiry_message(&self) -> &'static str {
        match self {
            Self::Critical => "Critical Boost wore off!",
            Self::Speed => "Speed Boost wore off!",
            Self::Shield => "Shield wore off!",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::grid::ObstacleField;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn ctx(obstacles: &ObstacleField) -> PlacementContext<'_> {
        PlacementContext {
            obstacles,
            hero: world_center(),
        }
    }

    #[test]
    fn test_fresh_enemy_starts_at_level_one() {
        let obstacles = ObstacleField::new();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let enemy = Enemy::spawn(&ctx(&obstacles), GamePhase::Normal, &mut rng);
        assert_eq!(enemy.level, 1);
        assert_eq!(enemy.health, 1);
        assert_eq!(enemy.max_health, 1);
    }

    #[test]
    fn test_respawn_increments_level_and_refills() {
        let obstacles = ObstacleField::new();
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let mut enemy = Enemy::spawn(&ctx(&obstacles), GamePhase::Normal, &mut rng);
        enemy.health = 0;
        enemy.respawn(&ctx(&obstacles), GamePhase::Normal, &mut rng);
        assert_eq!(enemy.level, 2);
        assert_eq!(enemy.health, 2);
        assert_eq!(enemy.max_health, 2);
    }

    #[test]
    fn test_post_boss_respawn_is_never_trivial() {
        let obstacles = ObstacleField::new();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut enemy = Enemy::spawn(&ctx(&obstacles), GamePhase::PostBoss, &mut rng);
        assert_eq!(enemy.level, POST_BOSS_MIN_ENEMY_LEVEL);
        assert_eq!(enemy.health, POST_BOSS_MIN_ENEMY_LEVEL as i32);

        // Already past the floor: respawn advances normally
        enemy.respawn(&ctx(&obstacles), GamePhase::PostBoss, &mut rng);
        assert_eq!(enemy.level, POST_BOSS_MIN_ENEMY_LEVEL + 1);
    }

    #[test]
    fn test_boss_stats() {
        let boss = Enemy::boss();
        assert_eq!(boss.level, BOSS_LEVEL);
        assert_eq!(boss.health, BOSS_HEALTH);
        assert_eq!(boss.max_health, BOSS_HEALTH);
        assert_eq!(boss.pos(), world_center());
    }
}
