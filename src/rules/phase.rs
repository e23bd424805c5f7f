//! Turn and phase state machine.
//!
//! ```text
//! Start -> Main -> Combat -> PostCombat -> Refresh -> (other player) Start
//! ```
//!
//! Start and Refresh run to completion on their own: Start draws and then
//! enters Main, and Refresh untaps and then hands the turn over. Main,
//! Combat and PostCombat fire their entry triggers and wait for the caller.

use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, info};

use crate::core::{Action, GameResult};
use crate::events::GameEvent;
use crate::triggers::TriggerKind;
use crate::zones::Zone;

use super::engine::GameEngine;

/// A phase of a turn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    #[default]
    Start,
    Main,
    Combat,
    PostCombat,
    Refresh,
}

impl Phase {
    /// The phase that follows this one.
    #[must_use]
    pub const fn next(self) -> Phase {
        match self {
            Phase::Start => Phase::Main,
            Phase::Main => Phase::Combat,
            Phase::Combat => Phase::PostCombat,
            Phase::PostCombat => Phase::Refresh,
            Phase::Refresh => Phase::Start,
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Phase::Start => "Start",
            Phase::Main => "Main",
            Phase::Combat => "Combat",
            Phase::PostCombat => "PostCombat",
            Phase::Refresh => "Refresh",
        })
    }
}

impl GameEngine {
    /// Advance to the next phase and run its handler.
    ///
    /// Leaving Combat with declared attackers resolves that combat first.
    /// Ending PostCombat runs Refresh, which starts the other player's turn.
    pub fn end_phase(&mut self) -> GameResult<()> {
        self.ensure_in_progress()?;
        let player = self.state.active_player;

        match self.state.phase {
            Phase::Start => self.enter_phase(Phase::Main),
            Phase::Main => self.enter_phase(Phase::Combat),
            Phase::Combat if self.state.combat.is_pending() => self.run_combat(),
            Phase::Combat => self.enter_phase(Phase::PostCombat),
            Phase::PostCombat | Phase::Refresh => self.run_refresh(),
        }

        self.record(player, Action::EndPhase);
        Ok(())
    }

    /// Skip straight to Refresh, abandoning any unresolved combat.
    pub fn end_turn(&mut self) -> GameResult<()> {
        self.ensure_in_progress()?;
        let player = self.state.active_player;

        if self.state.combat.is_pending() {
            debug!(%player, "unresolved combat abandoned");
        }
        self.run_refresh();

        self.record(player, Action::EndTurn);
        Ok(())
    }

    /// Begin the active player's turn.
    pub(crate) fn start_turn(&mut self) {
        let player = self.state.active_player;
        let turn = self.state.turn;
        info!(turn, %player, "turn started");
        self.log_event("Turn started", json!({ "turn": turn, "player": player.0 }));
        self.emit(GameEvent::TurnStarted { turn, player });

        self.set_phase(Phase::Start);
        self.run_start_phase();
    }

    fn run_start_phase(&mut self) {
        let player = self.state.active_player;

        // Familiars held since the turn began may attack, including ones
        // burst in during the opponent's turn.
        let field = self.state.zones.cards(player, Zone::Field).to_vec();
        for id in field {
            if let Some(card) = self.state.card_mut(id) {
                card.summoning_sick = false;
            }
        }

        if self.state.opening_turn_done {
            self.draw_cards(player, 1);
            if self.state.game_over {
                return;
            }
        } else {
            self.state.opening_turn_done = true;
            self.log_event("Opening draw skipped", json!({ "player": player.0 }));
        }

        self.state.players[player].azoth_played_this_turn = 0;

        self.fire_global(TriggerKind::TurnStart);
        if self.state.game_over {
            return;
        }
        self.enter_phase(Phase::Main);
    }

    /// Switch to a waiting phase and fire its entry trigger.
    pub(crate) fn enter_phase(&mut self, phase: Phase) {
        self.set_phase(phase);
        match phase {
            Phase::Main => self.fire_global(TriggerKind::MainPhaseStart),
            Phase::Combat => {
                self.state.combat = Default::default();
                self.fire_global(TriggerKind::CombatPhaseStart);
            }
            Phase::PostCombat => self.fire_global(TriggerKind::PostCombatPhaseStart),
            Phase::Start | Phase::Refresh => {}
        }
    }

    fn set_phase(&mut self, phase: Phase) {
        let player = self.state.active_player;
        self.state.phase = phase;
        debug!(%phase, %player, "phase changed");
        self.log_event("Phase changed", json!({ "phase": phase.to_string(), "player": player.0 }));
        self.emit(GameEvent::PhaseChanged { phase, player });
    }

    /// Untap, clean up, hand the turn to the other player.
    pub(crate) fn run_refresh(&mut self) {
        self.set_phase(Phase::Refresh);
        let player = self.state.active_player;

        let in_play: Vec<_> = [Zone::Field, Zone::ResourceZone]
            .into_iter()
            .flat_map(|zone| self.state.zones.cards(player, zone).to_vec())
            .collect();
        for id in in_play {
            if let Some(card) = self.state.card_mut(id) {
                card.tapped = false;
                card.clear_turn_flags();
            }
        }
        self.state.players[player].azoth_available =
            self.state.zones.len(player, Zone::ResourceZone) as u32;
        self.state.combat = Default::default();

        self.discard_hand_overflow(player);

        self.fire_global(TriggerKind::TurnEnd);
        if self.state.game_over {
            return;
        }

        self.state.pending_bursts.clear();
        let next = player.opponent();
        self.state.active_player = next;
        if next.index() == 0 {
            self.state.turn += 1;
        }

        self.start_turn();
    }

    fn discard_hand_overflow(&mut self, player: crate::core::PlayerId) {
        let limit = self.options.max_hand_size;
        let mut discarded = Vec::new();
        while self.state.hand_size(player) > limit {
            match self.state.zones.move_top(player, Zone::Hand, Zone::Graveyard) {
                Some(card) => discarded.push(card.0),
                None => break,
            }
        }
        if !discarded.is_empty() {
            self.log_event(
                "Hand size enforced",
                json!({ "player": player.0, "discarded": discarded }),
            );
        }
    }
}
