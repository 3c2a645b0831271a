//! The authoritative simulation state.
//!
//! One `GameState` owns everything the tick loop mutates: the hero, the
//! enemy roster, collectibles, the obstacle field, the boss-sequence
//! phase, and the derived camera. The tick loop is the sole writer; the
//! view reads it as a per-frame snapshot.

use crate::camera::{camera_for, Camera};
use crate::combat::types::{BoostKind, Enemy};
use crate::core::constants::{HERO_START_MAX_HEALTH, HERO_START_XP_TO_NEXT, LEVEL_UP_HEALTH_GAIN, MESSAGE_LIFETIME_MS};
use crate::progression::GamePhase;
use crate::world::grid::{world_center, GridPos, ObstacleField};
use serde::{Deserialize, Serialize};

/// Levels of the four persistent upgrades. Level 1 is the unupgraded
/// base; levels never decrease.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpgradeLevels {
    pub attack: u32,
    pub defense: u32,
    pub evasiveness: u32,
    pub health: u32,
}

impl Default for UpgradeLevels {
    fn default() -> Self {
        Self {
            attack: 1,
            defense: 1,
            evasiveness: 1,
            health: 1,
        }
    }
}

/// Expiry timestamps (epoch ms) for the three timed boosts. Zero means
/// inactive; an expired timer is reset to zero exactly once so its
/// wear-off notice cannot re-fire.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoostTimers {
    pub critical_until_ms: i64,
    pub speed_until_ms: i64,
    pub shield_until_ms: i64,
}

impl BoostTimers {
    pub fn critical_active(&self, now_ms: i64) -> bool {
        now_ms < self.critical_until_ms
    }

    pub fn speed_active(&self, now_ms: i64) -> bool {
        now_ms < self.speed_until_ms
    }

    pub fn shield_active(&self, now_ms: i64) -> bool {
        now_ms < self.shield_until_ms
    }

    /// Resets any timer that has run out and reports which ones did.
    pub fn take_expired(&mut self, now_ms: i64) -> Vec<BoostKind> {
        let mut expired = Vec::new();
        if self.critical_until_ms > 0 && now_ms > self.critical_until_ms {
            self.critical_until_ms = 0;
            expired.push(BoostKind::Critical);
        }
        if self.speed_until_ms > 0 && now_ms > self.speed_until_ms {
            self.speed_until_ms = 0;
            expired.push(BoostKind::Speed);
        }
        if self.shield_until_ms > 0 && now_ms > self.shield_until_ms {
            self.shield_until_ms = 0;
            expired.push(BoostKind::Shield);
        }
        expired
    }
}

/// The player character.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hero {
    pub x: i32,
    pub y: i32,
    pub level: u32,
    pub xp: u32,
    pub xp_to_next_level: u32,
    pub health: i32,
    pub max_health: i32,
    pub coins: u32,
    pub upgrades: UpgradeLevels,
    /// Wall-clock deadlines; not persisted, so boosts end with the session.
    #[serde(skip)]
    pub boosts: BoostTimers,
}

impl Default for Hero {
    fn default() -> Self {
        let center = world_center();
        Self {
            x: center.x,
            y: center.y,
            level: 1,
            xp: 0,
            xp_to_next_level: HERO_START_XP_TO_NEXT,
            health: HERO_START_MAX_HEALTH,
            max_health: HERO_START_MAX_HEALTH,
            coins: 0,
            upgrades: UpgradeLevels::default(),
            boosts: BoostTimers::default(),
        }
    }
}

impl Hero {
    pub fn pos(&self) -> GridPos {
        GridPos::new(self.x, self.y)
    }

    pub fn set_pos(&mut self, pos: GridPos) {
        self.x = pos.x;
        self.y = pos.y;
    }

    /// Raises max health and heals by the same amount. Level-ups and
    /// the health upgrade both route through here, so the heal applies
    /// on top of whatever the old cap was.
    pub fn add_max_health(&mut self, amount: i32) {
        self.max_health += amount;
        self.health += amount;
    }

    /// Adds XP and resolves every level-up it pays for. Returns the new
    /// levels reached, in order; multi-level grants loop rather than
    /// branching once.
    pub fn grant_xp(&mut self, amount: u32) -> Vec<u32> {
        self.xp += amount;
        let mut reached = Vec::new();
        while self.xp >= self.xp_to_next_level {
            self.level += 1;
            self.xp -= self.xp_to_next_level;
            self.add_max_health(LEVEL_UP_HEALTH_GAIN);
            self.xp_to_next_level = self.xp_to_next_level * 3 / 2;
            reached.push(self.level);
        }
        reached
    }
}

/// A transient floating message above the hero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FloatingMessage {
    pub text: String,
    pub expires_at_ms: i64,
}

impl FloatingMessage {
    pub fn remaining_ms(&self, now_ms: i64) -> i64 {
        (self.expires_at_ms - now_ms).max(0)
    }
}

/// Full mutable game state. Everything the save file captures lives
/// here, plus transient presentation hints (`#[serde(skip)]` fields)
/// that reset on load.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameState {
    pub hero: Hero,
    pub enemies: Vec<Enemy>,
    pub coins: Vec<GridPos>,
    pub foods: Vec<GridPos>,
    pub obstacles: ObstacleField,
    pub phase: GamePhase,
    pub milestone_kills: u32,
    pub camera: Camera,

    /// Message feed with per-message expiry (view-facing, not saved).
    #[serde(skip)]
    pub messages: Vec<FloatingMessage>,
    /// Screen-shake hint deadline (view-facing, not saved).
    #[serde(skip)]
    pub shake_until_ms: i64,
    /// Last accepted movement step, for the move cooldown.
    #[serde(skip)]
    pub last_move_ms: i64,
}

impl GameState {
    pub fn push_message(&mut self, now_ms: i64, text: impl Into<String>) {
        self.messages.push(FloatingMessage {
            text: text.into(),
            expires_at_ms: now_ms + MESSAGE_LIFETIME_MS,
        });
    }

    /// Drops messages whose lifetime has elapsed.
    pub fn prune_messages(&mut self, now_ms: i64) {
        self.messages.retain(|m| now_ms <= m.expires_at_ms);
    }

    pub fn shake_active(&self, now_ms: i64) -> bool {
        now_ms < self.shake_until_ms
    }

    /// Death penalty: refill health, forfeit coins, return to the world
    /// center, re-aim the camera. Level, XP and upgrades are kept.
    pub fn apply_death_reset(&mut self) {
        self.hero.health = self.hero.max_health;
        self.hero.coins = 0;
        self.hero.set_pos(world_center());
        self.camera = camera_for(self.hero.pos());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_hero_defaults() {
        let hero = Hero::default();
        assert_eq!(hero.level, 1);
        assert_eq!(hero.xp, 0);
        assert_eq!(hero.xp_to_next_level, 100);
        assert_eq!(hero.health, 10);
        assert_eq!(hero.max_health, 10);
        assert_eq!(hero.coins, 0);
        assert_eq!(hero.upgrades, UpgradeLevels::default());
        assert_eq!(hero.pos(), world_center());
    }

    #[test]
    fn test_exact_xp_grant_levels_once_with_zero_leftover() {
        let mut hero = Hero::default();
        let reached = hero.grant_xp(100);
        assert_eq!(reached, vec![2]);
        assert_eq!(hero.xp, 0);
        assert_eq!(hero.xp_to_next_level, 150);
        assert_eq!(hero.max_health, 15);
        assert_eq!(hero.health, 15);
    }

    #[test]
    fn test_multi_level_xp_grant_loops() {
        // 250 XP pays for level 2 (100) and level 3 (150) exactly
        let mut hero = Hero::default();
        let reached = hero.grant_xp(250);
        assert_eq!(reached, vec![2, 3]);
        assert_eq!(hero.level, 3);
        assert_eq!(hero.xp, 0);
        assert_eq!(hero.xp_to_next_level, 225);
        assert_eq!(hero.max_health, 20);
    }

    #[test]
    fn test_xp_curve_truncates() {
        let mut hero = Hero::default();
        hero.xp_to_next_level = 225;
        hero.grant_xp(225);
        // 225 * 3 / 2 = 337 (floor), not 338
        assert_eq!(hero.xp_to_next_level, 337);
    }

    #[test]
    fn test_level_up_heals_past_old_cap() {
        let mut hero = Hero::default();
        hero.health = 1;
        hero.grant_xp(100);
        assert_eq!(hero.max_health, 15);
        assert_eq!(hero.health, 6);
    }

    #[test]
    fn test_boost_expiry_fires_once() {
        let mut boosts = BoostTimers {
            critical_until_ms: 1000,
            speed_until_ms: 0,
            shield_until_ms: 5000,
        };

        assert!(boosts.critical_active(500));
        assert_eq!(boosts.take_expired(500), vec![]);

        let expired = boosts.take_expired(1500);
        assert_eq!(expired, vec![BoostKind::Critical]);
        assert_eq!(boosts.critical_until_ms, 0);

        // Timer already cleared: no second notice
        assert_eq!(boosts.take_expired(1600), vec![]);
        assert!(boosts.shield_active(1600));
    }

    #[test]
    fn test_death_reset_keeps_progression() {
        let mut state = GameState::default();
        state.hero.grant_xp(100);
        state.hero.coins = 42;
        state.hero.health = 0;
        state.hero.set_pos(GridPos::new(96, 96));

        state.apply_death_reset();

        assert_eq!(state.hero.health, state.hero.max_health);
        assert_eq!(state.hero.coins, 0);
        assert_eq!(state.hero.pos(), world_center());
        assert_eq!(state.hero.level, 2);
        assert_eq!(state.camera, camera_for(world_center()));
    }

    #[test]
    fn test_message_pruning() {
        let mut state = GameState::default();
        state.push_message(0, "first");
        state.push_message(2000, "second");
        assert_eq!(state.messages.len(), 2);

        state.prune_messages(3500);
        assert_eq!(state.messages.len(), 1);
        assert_eq!(state.messages[0].text, "second");
        assert_eq!(state.messages[0].remaining_ms(3500), 1500);
    }
}
