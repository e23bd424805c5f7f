//! Card instances: per-copy runtime state.
//!
//! Every physical card in a game has exactly one `CardInstance`, stored in
//! the arena on `GameState` and keyed by `EntityId`. Its zone is tracked by
//! the `ZoneManager`, not here.
//!
//! The runtime fields (tapped, sickness, counters, damage, boosts) only mean
//! something while the card is on the field or in the resource zone, and
//! [`CardInstance::reset`] wipes them whenever the card leaves those zones.

use serde::{Deserialize, Serialize};

use crate::core::{EntityId, PlayerId};

use super::definition::{CardDefinition, CardId, CardKind};
use super::elements::Element;

/// A physical card in a game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardInstance {
    pub entity_id: EntityId,
    pub card_id: CardId,
    pub kind: CardKind,
    pub owner: PlayerId,

    pub tapped: bool,
    pub summoning_sick: bool,
    pub attacked_this_turn: bool,
    pub blocked_this_turn: bool,
    pub used_effect_this_turn: bool,

    /// +1/+1 counters.
    pub counters: u32,
    pub power_boost: i64,
    pub health_boost: i64,
    /// Damage marked since entering the field.
    pub damage: i64,

    base_power: i64,
    base_health: i64,

    /// Element locked in by a committed resource card.
    pub committed_element: Option<Element>,
}

impl CardInstance {
    /// Create the instance for one copy of `definition`.
    #[must_use]
    pub fn new(entity_id: EntityId, definition: &CardDefinition, owner: PlayerId) -> Self {
        Self {
            entity_id,
            card_id: definition.id,
            kind: definition.kind,
            owner,
            tapped: false,
            summoning_sick: false,
            attacked_this_turn: false,
            blocked_this_turn: false,
            used_effect_this_turn: false,
            counters: 0,
            power_boost: 0,
            health_boost: 0,
            damage: 0,
            base_power: definition.base_power(),
            base_health: definition.base_health(),
            committed_element: None,
        }
    }

    /// Power including boosts and counters.
    #[must_use]
    pub fn power(&self) -> i64 {
        self.base_power + self.power_boost + i64::from(self.counters)
    }

    /// Highest health this card can be healed to.
    #[must_use]
    pub fn max_health(&self) -> i64 {
        self.base_health + self.health_boost + i64::from(self.counters)
    }

    /// Current health after marked damage.
    #[must_use]
    pub fn health(&self) -> i64 {
        self.max_health() - self.damage
    }

    #[must_use]
    pub fn is_destroyed(&self) -> bool {
        self.health() <= 0
    }

    /// Whether this card can be declared as an attacker right now.
    #[must_use]
    pub fn can_attack(&self) -> bool {
        self.kind == CardKind::Familiar && !self.tapped && !self.summoning_sick
    }

    /// Remove up to `amount` damage without exceeding max health.
    /// Returns the health actually restored.
    pub fn heal(&mut self, amount: i64) -> i64 {
        let restored = amount.clamp(0, self.damage.max(0));
        self.damage -= restored;
        restored
    }

    /// Clear the per-turn flags touched during a turn.
    pub fn clear_turn_flags(&mut self) {
        self.attacked_this_turn = false;
        self.blocked_this_turn = false;
        self.used_effect_this_turn = false;
    }

    /// Wipe all runtime state, as when the card leaves play.
    pub fn reset(&mut self) {
        self.tapped = false;
        self.summoning_sick = false;
        self.clear_turn_flags();
        self.counters = 0;
        self.power_boost = 0;
        self.health_boost = 0;
        self.damage = 0;
        self.committed_element = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Cost;

    fn familiar() -> CardDefinition {
        CardDefinition::new(CardId::new(3), "Stone Golem", CardKind::Familiar)
            .with_element(Element::Earth)
            .with_cost(Cost::generic(3))
            .with_stats(2, 4)
    }

    #[test]
    fn test_stats_include_counters_and_boosts() {
        let mut card = CardInstance::new(EntityId(10), &familiar(), PlayerId::new(0));
        card.counters = 2;
        card.power_boost = 1;
        card.health_boost = -1;

        assert_eq!(card.power(), 5);
        assert_eq!(card.max_health(), 5);
        assert_eq!(card.health(), 5);
    }

    #[test]
    fn test_damage_and_heal_cap() {
        let mut card = CardInstance::new(EntityId(10), &familiar(), PlayerId::new(0));
        card.damage = 3;
        assert_eq!(card.health(), 1);

        assert_eq!(card.heal(10), 3);
        assert_eq!(card.health(), 4);
        assert_eq!(card.heal(1), 0);
    }

    #[test]
    fn test_destroyed_at_zero() {
        let mut card = CardInstance::new(EntityId(10), &familiar(), PlayerId::new(0));
        card.damage = 4;
        assert!(card.is_destroyed());
    }

    #[test]
    fn test_can_attack() {
        let mut card = CardInstance::new(EntityId(10), &familiar(), PlayerId::new(1));
        assert!(card.can_attack());
        card.summoning_sick = true;
        assert!(!card.can_attack());
        card.summoning_sick = false;
        card.tapped = true;
        assert!(!card.can_attack());
    }

    #[test]
    fn test_reset_wipes_runtime_state() {
        let mut card = CardInstance::new(EntityId(10), &familiar(), PlayerId::new(0));
        card.tapped = true;
        card.counters = 3;
        card.damage = 2;
        card.attacked_this_turn = true;
        card.committed_element = Some(Element::Fire);

        card.reset();

        assert_eq!(card, CardInstance::new(EntityId(10), &familiar(), PlayerId::new(0)));
    }
}
