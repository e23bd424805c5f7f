//! Changes to cards on the field.
//!
//! These are the primitives effects and combat share. Each returns whether
//! it changed anything, and each ignores cards that are no longer where it
//! expects them.

use serde_json::json;

use crate::core::EntityId;
use crate::events::GameEvent;
use crate::triggers::TriggerKind;
use crate::zones::Zone;

use super::engine::GameEngine;

impl GameEngine {
    /// Mark damage on a creature; destroy it at zero health.
    pub(crate) fn damage_creature(&mut self, card: EntityId, amount: i64) -> bool {
        if amount <= 0 || !self.state.is_on_field(card) {
            return false;
        }
        let Some(instance) = self.state.card_mut(card) else {
            return false;
        };
        instance.damage += amount;
        let health = instance.health();

        self.log_event("Creature damaged", json!({ "card": card.0, "amount": amount, "health": health }));
        if health <= 0 {
            self.destroy_card(card);
        }
        true
    }

    /// Permanent power/health change. A negative health boost can destroy.
    pub(crate) fn boost_creature(&mut self, card: EntityId, power: i64, health: i64) -> bool {
        if !self.state.is_on_field(card) {
            return false;
        }
        let Some(instance) = self.state.card_mut(card) else {
            return false;
        };
        instance.power_boost += power;
        instance.health_boost += health;
        let destroyed = instance.is_destroyed();

        self.log_event("Creature boosted", json!({ "card": card.0, "power": power, "health": health }));
        if destroyed {
            self.destroy_card(card);
        }
        true
    }

    /// Remove up to `amount` damage. Returns the health restored.
    pub(crate) fn heal_creature(&mut self, card: EntityId, amount: i64) -> i64 {
        if !self.state.is_on_field(card) {
            return 0;
        }
        let Some(instance) = self.state.card_mut(card) else {
            return 0;
        };
        let owner = instance.owner;
        let restored = instance.heal(amount);

        if restored > 0 {
            self.log_event("Creature healed", json!({ "card": card.0, "amount": restored }));
            self.emit(GameEvent::CardHealed {
                player: owner,
                card: Some(card),
                amount: u32::try_from(restored).unwrap_or(u32::MAX),
            });
        }
        restored
    }

    /// Destroy a field card: its OnDestroy effects resolve while it is still
    /// on the field, then it goes to its owner's graveyard.
    ///
    /// Re-entrant destruction of the same card is ignored.
    pub(crate) fn destroy_card(&mut self, card: EntityId) -> bool {
        if !self.state.is_on_field(card) || !self.destroying.insert(card) {
            return false;
        }

        self.fire_card_trigger(TriggerKind::OnDestroy, card);

        let destroyed = self.state.is_on_field(card);
        if destroyed {
            let owner = self.state.card(card).map(|c| c.owner);
            self.relocate(card, Zone::Graveyard);
            if let Some(player) = owner {
                self.log_event("Familiar destroyed", json!({ "player": player.0, "card": card.0 }));
                self.emit(GameEvent::CardDestroyed { player, card });
            }
        }

        self.destroying.remove(&card);
        destroyed
    }

    /// Return a field card to its owner's hand.
    pub(crate) fn return_to_hand(&mut self, card: EntityId) -> bool {
        if !self.state.is_on_field(card) {
            return false;
        }
        self.relocate(card, Zone::Hand);
        self.log_event("Card returned to hand", json!({ "card": card.0 }));
        true
    }

    /// Remove a field or graveyard card from the game.
    pub(crate) fn banish_card(&mut self, card: EntityId) -> bool {
        let Some((player, from)) = self.state.zones.location(card) else {
            return false;
        };
        if !matches!(from, Zone::Field | Zone::Graveyard) {
            return false;
        }
        self.relocate(card, Zone::Removed);
        self.log_event(
            "Card banished",
            json!({ "player": player.0, "card": card.0, "from": from.to_string() }),
        );
        self.emit(GameEvent::CardBanished { player, card, from });
        true
    }
}
