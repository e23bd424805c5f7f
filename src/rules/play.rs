//! Playing cards from hand, and burst windows.
//!
//! Five play modes:
//!
//! | Mode     | From      | Cost                       | Phase |
//! |----------|-----------|----------------------------|-------|
//! | resource | hand      | one per turn, no azoth     | Main  |
//! | summon   | hand      | azoth; excess is counters  | Main  |
//! | tribute  | hand      | azoth less tribute value   | Main  |
//! | spell    | hand      | azoth; excess is X         | Main  |
//! | burst    | hand/life | free; X is life cards left | any   |

use rustc_hash::FxHashSet;
use serde_json::json;
use tracing::info;

use crate::azoth::{AzothLedger, PaymentPlan};
use crate::cards::{CardDefinition, CardKind};
use crate::core::{Action, EntityId, GameError, GameResult, PendingBurst, PlayerId};
use crate::effects::TargetSelector;
use crate::events::GameEvent;
use crate::triggers::TriggerKind;
use crate::zones::Zone;

use super::engine::GameEngine;

/// Where a burst is being played from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum BurstSource {
    Hand,
    /// A life card just lost to damage, still in the graveyard.
    LifeCard,
}

impl GameEngine {
    /// Put a resource card from hand into the resource zone.
    pub fn play_resource(&mut self, player: PlayerId, card: EntityId) -> GameResult<()> {
        self.ensure_main_phase(player, "playing azoth")?;
        let max = self.options.max_azoth_per_turn;
        if self.state.players[player].azoth_played_this_turn >= max {
            return Err(GameError::AzothLimitReached { max });
        }
        self.require_in_zone(card, player, Zone::Hand)?;
        self.require_kind(card, CardKind::Resource)?;

        self.relocate(card, Zone::ResourceZone);
        let ledger = &mut self.state.players[player];
        ledger.azoth_played_this_turn += 1;
        ledger.azoth_available += 1;

        self.log_event("Azoth played", json!({ "player": player.0, "card": card.0 }));
        self.emit(GameEvent::ResourcePlayed { player, card });
        self.record(player, Action::PlayResource { card });
        Ok(())
    }

    /// Summon a familiar by paying its cost with the named azoth.
    ///
    /// Azoth named beyond the cost becomes +1 counters on the familiar.
    pub fn summon_familiar(&mut self, player: PlayerId, card: EntityId, azoth: &[EntityId]) -> GameResult<()> {
        self.ensure_main_phase(player, "summoning")?;
        self.require_in_zone(card, player, Zone::Hand)?;
        let cost = self.require_kind(card, CardKind::Familiar)?.cost.clone();
        self.ensure_field_room(player, 0)?;
        let plan = AzothLedger::plan(&self.state, &self.registry, player, &cost, azoth)?;

        AzothLedger::execute(&mut self.state, player, &plan);
        self.enter_field(player, card, &[], plan.excess, true);
        self.record(player, Action::SummonFamiliar { card, azoth: azoth.to_vec() });
        Ok(())
    }

    /// Summon a familiar by sacrificing familiars already on the field.
    ///
    /// Each tribute discounts the cost by its own cost total plus its
    /// counters. Generic cost is discounted first, then elemental.
    pub fn tribute_summon(
        &mut self,
        player: PlayerId,
        card: EntityId,
        tributes: &[EntityId],
        azoth: &[EntityId],
    ) -> GameResult<()> {
        if !self.options.enable_tribute_system {
            return Err(GameError::FeatureDisabled { feature: "tribute summoning" });
        }
        self.ensure_main_phase(player, "tribute summoning")?;
        self.require_in_zone(card, player, Zone::Hand)?;
        let cost = self.require_kind(card, CardKind::Familiar)?.cost.clone();

        if tributes.is_empty() {
            return Err(GameError::NoTributes);
        }
        let mut seen = FxHashSet::default();
        let mut discount = 0u32;
        for &tribute in tributes {
            if !seen.insert(tribute) {
                return Err(GameError::DuplicateCard { card: tribute });
            }
            self.require_in_zone(tribute, player, Zone::Field)?;
            let counters = self.state.card(tribute).map_or(0, |c| c.counters);
            let paid = self.definition_of(tribute).map_or(0, |d| d.cost.total());
            discount = discount.saturating_add(paid + counters);
        }
        self.ensure_field_room(player, tributes.len())?;

        let residual = cost.reduced_by(discount);
        let plan = AzothLedger::plan(&self.state, &self.registry, player, &residual, azoth)?;

        for &tribute in tributes {
            self.relocate(tribute, Zone::Graveyard);
            self.log_event("Familiar tributed", json!({ "player": player.0, "card": tribute.0 }));
        }
        AzothLedger::execute(&mut self.state, player, &plan);
        self.enter_field(player, card, tributes, plan.excess, true);
        self.record(
            player,
            Action::TributeSummon { card, tributes: tributes.to_vec(), azoth: azoth.to_vec() },
        );
        Ok(())
    }

    /// Cast a spell: pay, resolve every effect in order, then discard it.
    ///
    /// Azoth named beyond the cost sets X for scaled amounts.
    pub fn cast_spell(
        &mut self,
        player: PlayerId,
        card: EntityId,
        azoth: &[EntityId],
        targets: &[EntityId],
    ) -> GameResult<()> {
        self.ensure_main_phase(player, "casting spells")?;
        self.require_in_zone(card, player, Zone::Hand)?;
        let definition = self.require_kind(card, CardKind::Spell)?;
        let cost = definition.cost.clone();
        self.validate_targets(card, definition, targets)?;
        let plan: PaymentPlan = AzothLedger::plan(&self.state, &self.registry, player, &cost, azoth)?;

        AzothLedger::execute(&mut self.state, player, &plan);
        info!(%player, %card, x = plan.excess, "spell cast");
        self.log_event(
            "Spell cast",
            json!({ "player": player.0, "card": card.0, "x": plan.excess, "targets": ids(targets) }),
        );
        self.resolve_card_effects(card, player, targets, i64::from(plan.excess));
        if self.state.zones.is_in(card, player, Zone::Hand) {
            self.relocate(card, Zone::Graveyard);
        }

        self.emit(GameEvent::SpellCast { player, card, targets: targets.to_vec() });
        self.record(
            player,
            Action::CastSpell { card, azoth: azoth.to_vec(), targets: targets.to_vec() },
        );
        Ok(())
    }

    /// Play a burst for free, at any point in the game.
    ///
    /// Works on a burst card in hand, or on a life card just lost to damage
    /// while its window is open. X is the player's remaining life cards. A
    /// familiar played from a life card enters with X counters.
    pub fn activate_burst(&mut self, player: PlayerId, card: EntityId, targets: &[EntityId]) -> GameResult<()> {
        if !self.options.enable_burst_cards {
            return Err(GameError::FeatureDisabled { feature: "burst cards" });
        }
        self.ensure_in_progress()?;
        self.ensure_player(player)?;

        let source = if self.state.zones.is_in(card, player, Zone::Hand) {
            self.require_kind(card, CardKind::Burst)?;
            BurstSource::Hand
        } else if self.has_burst_window(player, card) {
            BurstSource::LifeCard
        } else {
            return Err(GameError::NoBurstWindow { card, player });
        };

        let definition = self
            .definition_of(card)
            .ok_or(GameError::UnknownCard { card })?;
        let kind = definition.kind;
        match kind {
            CardKind::Familiar if source == BurstSource::LifeCard => self.ensure_field_room(player, 0)?,
            CardKind::Spell | CardKind::Burst => {}
            actual => {
                return Err(GameError::WrongCardKind { card, expected: CardKind::Burst, actual });
            }
        }
        self.validate_targets(card, definition, targets)?;

        let x = self.state.life_cards(player) as u32;
        self.state.pending_bursts.retain(|burst| burst.card != card);
        info!(%player, %card, x, "burst activated");
        self.log_event(
            "Burst activated",
            json!({
                "player": player.0,
                "card": card.0,
                "from": if source == BurstSource::Hand { "hand" } else { "life cards" },
                "x": x,
            }),
        );

        if kind == CardKind::Familiar {
            self.enter_field(player, card, &[], x, false);
        } else {
            self.resolve_card_effects(card, player, targets, i64::from(x));
            if self.state.zones.is_in(card, player, Zone::Hand) {
                self.relocate(card, Zone::Graveyard);
            }
        }

        self.emit(GameEvent::BurstActivated { player, card, targets: targets.to_vec() });
        self.record(player, Action::ActivateBurst { card, targets: targets.to_vec() });
        Ok(())
    }

    /// Take a lost life card with an open burst window into hand instead.
    pub fn claim_burst(&mut self, player: PlayerId, card: EntityId) -> GameResult<()> {
        if !self.options.enable_burst_cards {
            return Err(GameError::FeatureDisabled { feature: "burst cards" });
        }
        self.ensure_in_progress()?;
        self.ensure_player(player)?;
        if !self.has_burst_window(player, card) {
            return Err(GameError::NoBurstWindow { card, player });
        }

        self.relocate(card, Zone::Hand);
        self.log_event("Burst card claimed", json!({ "player": player.0, "card": card.0 }));
        self.record(player, Action::ClaimBurst { card });
        Ok(())
    }

    /// Open burst windows for a player, oldest first.
    #[must_use]
    pub fn burst_windows(&self, player: PlayerId) -> Vec<EntityId> {
        self.state
            .pending_bursts
            .iter()
            .filter(|burst| burst.player == player)
            .map(|burst| burst.card)
            .collect()
    }

    fn has_burst_window(&self, player: PlayerId, card: EntityId) -> bool {
        self.state.pending_bursts.contains(&PendingBurst { player, card })
            && self.state.zones.is_in(card, player, Zone::Graveyard)
    }

    /// Room on the field once `leaving` familiars have gone.
    fn ensure_field_room(&self, player: PlayerId, leaving: usize) -> GameResult<()> {
        let max = self.options.max_field_size;
        let after = self.state.zones.len(player, Zone::Field) - leaving + 1;
        if after > max {
            return Err(GameError::ZoneFull { player, zone: Zone::Field, max });
        }
        Ok(())
    }

    /// Caller-named targets: required ones present, every one legal for
    /// at least one effect that takes explicit targets.
    fn validate_targets(&self, card: EntityId, definition: &CardDefinition, targets: &[EntityId]) -> GameResult<()> {
        if definition.requires_target && targets.is_empty() {
            return Err(GameError::MissingTargets { card });
        }
        let mut seen = FxHashSet::default();
        for &target in targets {
            if !seen.insert(target) {
                return Err(GameError::DuplicateCard { card: target });
            }
            let legal = definition
                .effects
                .iter()
                .filter(|effect| effect.uses_explicit_targets())
                .any(|effect| TargetSelector::is_legal(&self.state, effect.kind.scope(), target));
            if !legal {
                return Err(GameError::InvalidTarget { target });
            }
        }
        Ok(())
    }

    /// Put a familiar onto the field with summoning sickness.
    fn enter_field(&mut self, player: PlayerId, card: EntityId, tributes: &[EntityId], counters: u32, fire_summon: bool) {
        self.relocate(card, Zone::Field);
        if let Some(instance) = self.state.card_mut(card) {
            instance.summoning_sick = true;
            instance.counters = counters;
        }

        info!(%player, %card, counters, "familiar summoned");
        self.log_event(
            "Familiar summoned",
            json!({ "player": player.0, "card": card.0, "tributes": ids(tributes), "counters": counters }),
        );
        self.emit(GameEvent::FamiliarSummoned {
            player,
            card,
            tributes: tributes.to_vec(),
            counters,
        });

        if fire_summon {
            self.fire_card_trigger(TriggerKind::OnSummon, card);
        }
    }
}

fn ids(cards: &[EntityId]) -> Vec<u32> {
    cards.iter().map(|card| card.0).collect()
}
