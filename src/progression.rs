//! The boss-sequence state machine.
//!
//! One phase value plus a milestone-kill counter, owned by the
//! simulation state and advanced only through the pure transition
//! functions in this module. Transitions return the new phase and the
//! effects the caller must apply; they never touch world state.

use crate::core::constants::{BOSS_LEVEL, MILESTONE_ENEMY_LEVEL, MILESTONE_KILLS_FOR_BOSS};
use serde::{Deserialize, Serialize};

/// Where the session stands in the boss sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    #[default]
    Normal,
    BossFightPending,
    BossFightActive,
    PostBoss,
}

/// What happens to a defeated enemy's roster slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefeatOutcome {
    /// Regular kill: the enemy respawns one level higher elsewhere.
    Respawn,
    /// Milestone kill: the enemy leaves the roster for good.
    RemovePermanently,
    /// Boss kill: the boss leaves the roster and a fresh replacement
    /// roster is spawned.
    RemoveAndRefillRoster,
}

/// Result of feeding an enemy defeat through the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DefeatStep {
    pub phase: GamePhase,
    pub milestone_kills: u32,
    pub outcome: DefeatOutcome,
}

/// Advances the phase for a defeated enemy of the given level.
///
/// - A level-25 kill during an active boss fight ends the fight.
/// - A level-20 kill during the normal phase counts toward the boss
///   trigger; the fourth arms it.
/// - Everything else is a regular respawning kill, including level-20
///   kills outside the normal phase and level-25 kills of enemies that
///   merely climbed there.
pub fn on_enemy_defeated(phase: GamePhase, milestone_kills: u32, enemy_level: u32) -> DefeatStep {
    if enemy_level == BOSS_LEVEL && phase == GamePhase::BossFightActive {
        return DefeatStep {
            phase: GamePhase::PostBoss,
            milestone_kills,
            outcome: DefeatOutcome::RemoveAndRefillRoster,
        };
    }

    if enemy_level == MILESTONE_ENEMY_LEVEL && phase == GamePhase::Normal {
        let milestone_kills = milestone_kills + 1;
        let phase = if milestone_kills >= MILESTONE_KILLS_FOR_BOSS {
            GamePhase::BossFightPending
        } else {
            GamePhase::Normal
        };
        return DefeatStep {
            phase,
            milestone_kills,
            outcome: DefeatOutcome::RemovePermanently,
        };
    }

    DefeatStep {
        phase,
        milestone_kills,
        outcome: DefeatOutcome::Respawn,
    }
}

/// Polled once per tick: a pending boss fight becomes active. Returns
/// the new phase and whether the caller must spawn the boss now.
pub fn poll_boss_trigger(phase: GamePhase) -> (GamePhase, bool) {
    match phase {
        GamePhase::BossFightPending => (GamePhase::BossFightActive, true),
        other => (other, false),
    }
}
