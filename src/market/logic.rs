//! Purchase rules for upgrades and consumables.

use crate::core::constants::{FOOD_HEAL_AMOUNT, HEALTH_UPGRADE_GAIN};
use crate::core::game_state::GameState;
use crate::market::types::{Consumable, PurchaseOutcome, UpgradeKind};

/// Current level of an upgrade on the hero.
pub fn upgrade_level(state: &GameState, kind: UpgradeKind) -> u32 {
    match kind {
        UpgradeKind::Attack => state.hero.upgrades.attack,
        UpgradeKind::Defense => state.hero.upgrades.defense,
        UpgradeKind::Evasiveness => state.hero.upgrades.evasiveness,
        UpgradeKind::Health => state.hero.upgrades.health,
    }
}

fn bump_upgrade(state: &mut GameState, kind: UpgradeKind) -> u32 {
    let level = match kind {
        UpgradeKind::Attack => {
            state.hero.upgrades.attack += 1;
            state.hero.upgrades.attack
        }
        UpgradeKind::Defense => {
            state.hero.upgrades.defense += 1;
            state.hero.upgrades.defense
        }
        UpgradeKind::Evasiveness => {
            state.hero.upgrades.evasiveness += 1;
            state.hero.upgrades.evasiveness
        }
        UpgradeKind::Health => {
            state.hero.upgrades.health += 1;
            state.hero.upgrades.health
        }
    };
    if kind == UpgradeKind::Health {
        state.hero.add_max_health(HEALTH_UPGRADE_GAIN);
    }
    level
}

/// Buys the next level of an upgrade, if the cap and the purse allow.
pub fn purchase_upgrade(state: &mut GameState, kind: UpgradeKind, now_ms: i64) -> PurchaseOutcome {
    let current = upgrade_level(state, kind);

    if current >= kind.max_level(state.phase) {
        state.push_message(now_ms, format!("{} is already max level!", kind.name()));
        return PurchaseOutcome::AtMaxLevel;
    }

    let cost = kind.cost(current);
    if state.hero.coins < cost {
        state.push_message(now_ms, "Not enough coins!");
        return PurchaseOutcome::NotEnoughCoins;
    }

    state.hero.coins -= cost;
    let new_level = bump_upgrade(state, kind);
    let message = match kind {
        UpgradeKind::Attack => format!("Attack upgraded to Lvl {}!", new_level),
        UpgradeKind::Defense => format!("Defense upgraded to Lvl {}!", new_level),
        UpgradeKind::Evasiveness => format!("Evasion upgraded to Lvl {}!", new_level),
        UpgradeKind::Health => "Max Health upgraded!".to_string(),
    };
    state.push_message(now_ms, message);
    PurchaseOutcome::Purchased
}

/// Buys a consumable. Boosts set their expiry to `now + duration`, so
/// re-buying an active boost restarts it rather than stacking.
pub fn purchase_consumable(
    state: &mut GameState,
    item: Consumable,
    now_ms: i64,
) -> PurchaseOutcome {
    if item == Consumable::Food && state.hero.health >= state.hero.max_health {
        state.push_message(now_ms, "You are already at full health!");
        return PurchaseOutcome::AlreadyFullHealth;
    }

    let cost = item.cost();
    if state.hero.coins < cost {
        state.push_message(now_ms, "Not enough coins!");
        return PurchaseOutcome::NotEnoughCoins;
    }
    state.hero.coins -= cost;

    match item {
        Consumable::Food => {
            state.hero.health = (state.hero.health + FOOD_HEAL_AMOUNT).min(state.hero.max_health);
            state.push_message(now_ms, format!("Healed for {} HP!", FOOD_HEAL_AMOUNT));
        }
        Consumable::CriticalBoost => {
            state.hero.boosts.critical_until_ms = now_ms + item.duration_ms().unwrap_or(0);
            state.push_message(now_ms, "Critical Boost activated!");
        }
        Consumable::SpeedBoost => {
            state.hero.boosts.speed_until_ms = now_ms + item.duration_ms().unwrap_or(0);
            state.push_message(now_ms, "Speed Boost activated!");
        }
        Consumable::Shield => {
            state.hero.boosts.shield_until_ms = now_ms + item.duration_ms().unwrap_or(0);
            state.push_message(now_ms, "Shield activated!");
        }
    }
    PurchaseOutcome::Purchased
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progression::GamePhase;

    #[test]
    fn test_purchase_rejected_without_coins() {
        let mut state = GameState::default();
        let outcome = purchase_upgrade(&mut state, UpgradeKind::Attack, 0);

        assert_eq!(outcome, PurchaseOutcome::NotEnoughCoins);
        assert_eq!(state.hero.upgrades.attack, 1);
        assert_eq!(state.hero.coins, 0);
        assert!(state.messages.iter().any(|m| m.text == "Not enough coins!"));
    }

    #[test]
    fn test_purchase_deducts_and_bumps() {
        let mut state = GameState::default();
        state.hero.coins = 10;

        let outcome = purchase_upgrade(&mut state, UpgradeKind::Attack, 0);
        assert_eq!(outcome, PurchaseOutcome::Purchased);
        assert_eq!(state.hero.upgrades.attack, 2);
        assert_eq!(state.hero.coins, 7);
    }

    #[test]
    fn test_upgrade_cap_blocks_purchase() {
        let mut state = GameState::default();
        state.hero.coins = 1000;
        state.hero.upgrades.evasiveness = 5;

        let outcome = purchase_upgrade(&mut state, UpgradeKind::Evasiveness, 0);
        assert_eq!(outcome, PurchaseOutcome::AtMaxLevel);
        assert_eq!(state.hero.upgrades.evasiveness, 5);
        assert_eq!(state.hero.coins, 1000);
    }

    #[test]
    fn test_post_boss_raises_cap() {
        let mut state = GameState::default();
        state.hero.coins = 1000;
        state.hero.upgrades.attack = 5;

        assert_eq!(
            purchase_upgrade(&mut state, UpgradeKind::Attack, 0),
            PurchaseOutcome::AtMaxLevel
        );

        state.phase = GamePhase::PostBoss;
        assert_eq!(
            purchase_upgrade(&mut state, UpgradeKind::Attack, 0),
            PurchaseOutcome::Purchased
        );
        assert_eq!(state.hero.upgrades.attack, 6);
        // Flat cost past the table
        assert_eq!(state.hero.coins, 1000 - 15);
    }

    #[test]
    fn test_health_upgrade_also_raises_max_health() {
        let mut state = GameState::default();
        state.hero.coins = 10;
        state.hero.health = 4;

        purchase_upgrade(&mut state, UpgradeKind::Health, 0);

        assert_eq!(state.hero.upgrades.health, 2);
        assert_eq!(state.hero.max_health, 15);
        assert_eq!(state.hero.health, 9);
    }

    #[test]
    fn test_food_rejected_at_full_health() {
        let mut state = GameState::default();
        state.hero.coins = 50;

        let outcome = purchase_consumable(&mut state, Consumable::Food, 0);
        assert_eq!(outcome, PurchaseOutcome::AlreadyFullHealth);
        assert_eq!(state.hero.coins, 50);
    }

    #[test]
    fn test_food_heals_up_to_cap() {
        let mut state = GameState::default();
        state.hero.coins = 50;
        state.hero.health = 3;

        let outcome = purchase_consumable(&mut state, Consumable::Food, 0);
        assert_eq!(outcome, PurchaseOutcome::Purchased);
        assert_eq!(state.hero.health, 10);
        assert_eq!(state.hero.coins, 45);
    }

    #[test]
    fn test_boost_purchase_sets_expiry() {
        let mut state = GameState::default();
        state.hero.coins = 100;

        purchase_consumable(&mut state, Consumable::Shield, 1000);
        assert_eq!(state.hero.boosts.shield_until_ms, 16_000);
        assert_eq!(state.hero.coins, 75);

        // Re-buying restarts the timer instead of stacking
        purchase_consumable(&mut state, Consumable::Shield, 5000);
        assert_eq!(state.hero.boosts.shield_until_ms, 20_000);
        assert_eq!(state.hero.coins, 50);
    }

    #[test]
    fn test_boost_purchase_without_coins_rejected() {
        let mut state = GameState::default();
        state.hero.coins = 10;

        let outcome = purchase_consumable(&mut state, Consumable::CriticalBoost, 0);
        assert_eq!(outcome, PurchaseOutcome::NotEnoughCoins);
        assert_eq!(state.hero.boosts.critical_until_ms, 0);
        assert_eq!(state.hero.coins, 10);
    }
}
