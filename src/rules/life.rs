//! Draws, life cards and the win monitor.
//!
//! A player's life total is the stack of face-down life cards dealt at
//! setup. Each point of damage moves the top life card to the graveyard,
//! where (with bursts enabled) it opens a burst window until the end of the
//! turn. Healing returns the oldest eligible graveyard card to the stack.
//!
//! A game ends on the first loss: drawing from an empty deck, concession,
//! or, under [`LifeLossRule::DamageOnEmptyStack`], damage with no life
//! cards left.

use serde_json::json;
use tracing::info;

use crate::cards::CardKind;
use crate::core::{
    Action, EntityId, GameOutcome, GameResult, GameStatus, LifeLossRule, LossReason,
    PendingBurst, PlayerId,
};
use crate::events::GameEvent;
use crate::zones::Zone;

use super::engine::GameEngine;

impl GameEngine {
    /// Draw cards for a player. Drawing from an empty deck loses the game.
    pub fn draw_card(&mut self, player: PlayerId, count: usize) -> GameResult<Vec<EntityId>> {
        self.ensure_in_progress()?;
        self.ensure_player(player)?;

        let drawn = self.draw_cards(player, count);

        self.record(player, Action::DrawCard { count });
        Ok(drawn)
    }

    pub(crate) fn draw_cards(&mut self, player: PlayerId, count: usize) -> Vec<EntityId> {
        let mut drawn = Vec::with_capacity(count);
        let mut decked = false;
        for _ in 0..count {
            match self.state.zones.move_top(player, Zone::Deck, Zone::Hand) {
                Some(card) => drawn.push(card),
                None => {
                    decked = true;
                    break;
                }
            }
        }

        if !drawn.is_empty() {
            self.log_event(
                "Cards drawn",
                json!({ "player": player.0, "count": drawn.len(), "deck": self.state.zones.len(player, Zone::Deck) }),
            );
            self.emit(GameEvent::CardsDrawn { player, cards: drawn.clone() });
        }
        if decked {
            self.declare_loss(player, LossReason::DeckOut);
        }
        drawn
    }

    /// Move `amount` life cards to the graveyard, one at a time.
    pub(crate) fn damage_player(&mut self, player: PlayerId, amount: u32) {
        if amount == 0 || self.state.game_over {
            return;
        }

        let mut lost = Vec::new();
        let mut exhausted = false;
        for _ in 0..amount {
            match self.state.zones.move_top(player, Zone::LifeCards, Zone::Graveyard) {
                Some(card) => lost.push(card),
                None => {
                    exhausted = true;
                    break;
                }
            }
        }

        let remaining = self.state.life_cards(player);
        self.log_event(
            "Player damaged",
            json!({
                "player": player.0,
                "amount": amount,
                "lost": lost.iter().map(|c| c.0).collect::<Vec<_>>(),
                "remaining": remaining,
            }),
        );
        for &card in &lost {
            self.reveal_life_card(player, card);
        }
        self.emit(GameEvent::PlayerDamaged { player, amount, lost, remaining });

        if exhausted && self.options.life_loss_rule == LifeLossRule::DamageOnEmptyStack {
            self.declare_loss(player, LossReason::LifeCardsExhausted);
        }
    }

    fn reveal_life_card(&mut self, player: PlayerId, card: EntityId) {
        let Some(definition) = self.definition_of(card) else {
            return;
        };
        let name = definition.name.clone();
        let kind = definition.kind;
        let window = self.options.enable_burst_cards;
        if window {
            self.state.pending_bursts.push(PendingBurst { player, card });
        }
        self.log_event(
            "Life card revealed",
            json!({ "player": player.0, "card": card.0, "name": name, "kind": kind, "burst_window": window }),
        );
    }

    /// Restore up to `amount` life cards from the graveyard.
    ///
    /// The oldest graveyard card that is neither a spell nor a familiar goes
    /// onto the top of the life stack, once per point. Returns how many came back.
    pub(crate) fn heal_player(&mut self, player: PlayerId, amount: u32) -> u32 {
        let mut restored = 0;
        for _ in 0..amount {
            let candidate = self
                .state
                .cards_in(player, Zone::Graveyard)
                .find(|card| !matches!(card.kind, CardKind::Spell | CardKind::Familiar))
                .map(|card| card.entity_id);
            let Some(card) = candidate else {
                break;
            };
            self.relocate(card, Zone::LifeCards);
            restored += 1;
        }

        if restored > 0 {
            self.log_event(
                "Life cards restored",
                json!({ "player": player.0, "amount": restored, "life_cards": self.state.life_cards(player) }),
            );
            self.emit(GameEvent::CardHealed { player, card: None, amount: restored });
        }
        restored
    }

    /// Concede the game.
    pub fn concede(&mut self, player: PlayerId) -> GameResult<()> {
        self.ensure_in_progress()?;
        self.ensure_player(player)?;

        self.declare_loss(player, LossReason::Concession);

        self.record(player, Action::Concede);
        Ok(())
    }

    /// Record a loss. Only the first loss of a game counts.
    pub(crate) fn declare_loss(&mut self, loser: PlayerId, reason: LossReason) {
        if self.state.game_over {
            return;
        }
        let winner = loser.opponent();
        self.state.game_over = true;
        self.state.winner = Some(winner);
        self.state.status = GameStatus::Finished;
        self.state.outcome = Some(GameOutcome { winner, loser, reason });

        info!(%winner, %loser, %reason, "game over");
        self.log_event(
            "Game over",
            json!({ "winner": winner.0, "loser": loser.0, "reason": reason }),
        );
        self.emit(GameEvent::GameOver { winner, loser, reason });
    }
}
