//! Market catalogue: upgrade kinds and consumables.
//!
//! Each kind carries its own cost schedule and level cap so purchase
//! logic never dispatches on names.

use crate::core::constants::{
    CRIT_BOOST_COST, CRIT_BOOST_DURATION_MS, FOOD_COST, SHIELD_BOOST_COST,
    SHIELD_BOOST_DURATION_MS, SPEED_BOOST_COST, SPEED_BOOST_DURATION_MS, UPGRADE_CAP,
    UPGRADE_CAP_POST_BOSS, UPGRADE_COSTS, UPGRADE_FLAT_COST,
};
use crate::progression::GamePhase;
use serde::{Deserialize, Serialize};

/// The four persistent upgrades.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UpgradeKind {
    Attack,
    Defense,
    Evasiveness,
    Health,
}

impl UpgradeKind {
    pub const ALL: [UpgradeKind; 4] = [
        UpgradeKind::Attack,
        UpgradeKind::Defense,
        UpgradeKind::Evasiveness,
        UpgradeKind::Health,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Attack => "Attack",
            Self::Defense => "Defense",
            Self::Evasiveness => "Evasiveness",
            Self::Health => "Max Health",
        }
    }

    /// Cost of buying the next level from `current_level`. Early levels
    /// follow the table, everything past it is flat.
    pub fn cost(&self, current_level: u32) -> u32 {
        if current_level < 5 {
            UPGRADE_COSTS[(current_level - 1) as usize]
        } else {
            UPGRADE_FLAT_COST
        }
    }

    /// Level cap. Attack, defense and health open up to 20 once the
    /// boss is down; evasiveness is always capped at 5.
    pub fn max_level(&self, phase: GamePhase) -> u32 {
        match self {
            Self::Evasiveness => UPGRADE_CAP,
            Self::Attack | Self::Defense | Self::Health => {
                if phase == GamePhase::PostBoss {
                    UPGRADE_CAP_POST_BOSS
                } else {
                    UPGRADE_CAP
                }
            }
        }
    }
}

/// Single-use market goods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Consumable {
    Food,
    CriticalBoost,
    SpeedBoost,
    Shield,
}

impl Consumable {
    pub const ALL: [Consumable; 4] = [
        Consumable::Food,
        Consumable::CriticalBoost,
        Consumable::SpeedBoost,
        Consumable::Shield,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Food => "Food",
            Self::CriticalBoost => "Critical Boost",
            Self::SpeedBoost => "Speed Boost",
            Self::Shield => "Shield",
        }
    }

    pub fn cost(&self) -> u32 {
        match self {
            Self::Food => FOOD_COST,
            Self::CriticalBoost => CRIT_BOOST_COST,
            Self::SpeedBoost => SPEED_BOOST_COST,
            Self::Shield => SHIELD_BOOST_COST,
        }
    }

    /// Boost duration; food has none.
    pub fn duration_ms(&self) -> Option<i64> {
        match self {
            Self::Food => None,
            Self::CriticalBoost => Some(CRIT_BOOST_DURATION_MS),
            Self::SpeedBoost => Some(SPEED_BOOST_DURATION_MS),
            Self::Shield => Some(SHIELD_BOOST_DURATION_MS),
        }
    }
}

/// Result of a purchase attempt. Rejections are normal outcomes
/// reported through the message feed, never errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PurchaseOutcome {
    Purchased,
    AtMaxLevel,
    NotEnoughCoins,
    AlreadyFullHealth,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cost_schedule() {
        for kind in UpgradeKind::ALL {
            assert_eq!(kind.cost(1), 3);
            assert_eq!(kind.cost(2), 8);
            assert_eq!(kind.cost(3), 15);
            assert_eq!(kind.cost(4), 25);
            assert_eq!(kind.cost(5), 15);
            assert_eq!(kind.cost(12), 15);
        }
    }

    #[test]
    fn test_caps_by_phase() {
        for phase in [
            GamePhase::Normal,
            GamePhase::BossFightPending,
            GamePhase::BossFightActive,
        ] {
            assert_eq!(UpgradeKind::Attack.max_level(phase), 5);
            assert_eq!(UpgradeKind::Health.max_level(phase), 5);
        }
        assert_eq!(UpgradeKind::Attack.max_level(GamePhase::PostBoss), 20);
        assert_eq!(UpgradeKind::Defense.max_level(GamePhase::PostBoss), 20);
        assert_eq!(UpgradeKind::Health.max_level(GamePhase::PostBoss), 20);
        // Evasiveness never rises
        assert_eq!(UpgradeKind::Evasiveness.max_level(GamePhase::PostBoss), 5);
    }

    #[test]
    fn test_consumable_catalogue() {
        assert_eq!(Consumable::Food.cost(), 5);
        assert_eq!(Consumable::CriticalBoost.cost(), 25);
        assert_eq!(Consumable::SpeedBoost.cost(), 15);
        assert_eq!(Consumable::Shield.cost(), 25);

        assert_eq!(Consumable::Food.duration_ms(), None);
        assert_eq!(Consumable::CriticalBoost.duration_ms(), Some(30_000));
        assert_eq!(Consumable::SpeedBoost.duration_ms(), Some(60_000));
        assert_eq!(Consumable::Shield.duration_ms(), Some(15_000));
    }
}
