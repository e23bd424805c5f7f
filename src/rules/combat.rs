//! Combat: attacks, blocks and damage.
//!
//! The active player declares attackers once per combat, the defender may
//! then declare blockers once, and resolution walks attackers in
//! declaration order. Blocked pairs deal damage to each other
//! simultaneously; an unblocked attacker strips its power in life cards
//! from the defender.
//!
//! Declarations live in [`CombatState`](crate::core::CombatState), an
//! attacker -> blocker map rebuilt every combat.

use rustc_hash::FxHashSet;
use serde_json::json;
use tracing::debug;

use crate::core::{Action, Block, EntityId, GameError, GameResult, PlayerId};
use crate::events::GameEvent;
use crate::triggers::TriggerKind;
use crate::zones::Zone;

use super::engine::GameEngine;
use super::phase::Phase;

impl GameEngine {
    /// Declare the active player's attackers. An empty list declares no attack.
    pub fn declare_attackers(&mut self, player: PlayerId, attackers: &[EntityId]) -> GameResult<()> {
        self.ensure_in_progress()?;
        self.ensure_active(player)?;
        self.ensure_combat_phase("declaring attackers")?;
        if self.state.combat.attackers_declared {
            return Err(GameError::AttackersAlreadyDeclared);
        }

        let mut seen = FxHashSet::default();
        for &attacker in attackers {
            if !seen.insert(attacker) {
                return Err(GameError::DuplicateCard { card: attacker });
            }
            self.require_in_zone(attacker, player, Zone::Field)?;
            let instance = self
                .state
                .card(attacker)
                .ok_or(GameError::UnknownCard { card: attacker })?;
            if !instance.can_attack() {
                return Err(if instance.tapped {
                    GameError::CardTapped { card: attacker }
                } else {
                    GameError::SummoningSick { card: attacker }
                });
            }
        }

        for &attacker in attackers {
            if let Some(instance) = self.state.card_mut(attacker) {
                instance.tapped = true;
                instance.attacked_this_turn = true;
            }
        }
        self.state.combat.attackers = attackers.to_vec();
        self.state.combat.attackers_declared = true;

        self.log_event(
            "Attackers declared",
            json!({ "player": player.0, "attackers": attackers.iter().map(|a| a.0).collect::<Vec<_>>() }),
        );
        self.emit(GameEvent::AttackersDeclared { player, attackers: attackers.to_vec() });
        for &attacker in attackers {
            if self.state.game_over {
                break;
            }
            self.fire_card_trigger(TriggerKind::OnAttack, attacker);
        }

        self.record(player, Action::DeclareAttackers { attackers: attackers.to_vec() });
        Ok(())
    }

    /// Declare the defending player's blockers, at most one per attacker.
    pub fn declare_blockers(&mut self, player: PlayerId, blocks: &[Block]) -> GameResult<()> {
        self.ensure_in_progress()?;
        self.ensure_player(player)?;
        if player == self.state.active_player {
            return Err(GameError::ActivePlayerCannotBlock);
        }
        self.ensure_combat_phase("declaring blockers")?;
        if !self.state.combat.attackers_declared {
            return Err(GameError::NoAttackersDeclared);
        }
        if self.state.combat.blockers_declared {
            return Err(GameError::BlockersAlreadyDeclared);
        }

        let mut blockers = FxHashSet::default();
        let mut blocked = FxHashSet::default();
        for block in blocks {
            if !blockers.insert(block.blocker) {
                return Err(GameError::DuplicateCard { card: block.blocker });
            }
            self.require_in_zone(block.blocker, player, Zone::Field)?;
            if self.state.card(block.blocker).is_some_and(|c| c.tapped) {
                return Err(GameError::CardTapped { card: block.blocker });
            }
            if !self.state.combat.is_attacking(block.attacker) {
                return Err(GameError::NotAttacking { card: block.attacker });
            }
            if !blocked.insert(block.attacker) {
                return Err(GameError::AlreadyBlocked { card: block.attacker });
            }
        }

        for block in blocks {
            if let Some(instance) = self.state.card_mut(block.blocker) {
                instance.tapped = true;
                instance.blocked_this_turn = true;
            }
            self.state.combat.blocks.insert(block.attacker, block.blocker);
        }
        self.state.combat.blockers_declared = true;

        self.log_event(
            "Blockers declared",
            json!({
                "player": player.0,
                "blocks": blocks.iter().map(|b| [b.blocker.0, b.attacker.0]).collect::<Vec<_>>(),
            }),
        );
        self.emit(GameEvent::BlockersDeclared { player, blocks: blocks.to_vec() });
        for block in blocks {
            if self.state.game_over {
                break;
            }
            self.fire_card_trigger(TriggerKind::OnBlock, block.blocker);
        }

        self.record(player, Action::DeclareBlockers { blocks: blocks.to_vec() });
        Ok(())
    }

    /// Deal combat damage and move to PostCombat.
    pub fn resolve_combat(&mut self) -> GameResult<()> {
        self.ensure_in_progress()?;
        self.ensure_combat_phase("resolving combat")?;
        let player = self.state.active_player;

        self.run_combat();

        self.record(player, Action::ResolveCombat);
        Ok(())
    }

    fn ensure_combat_phase(&self, action: &'static str) -> GameResult<()> {
        if self.state.phase != Phase::Combat {
            return Err(GameError::WrongPhase { action, phase: self.state.phase });
        }
        Ok(())
    }

    pub(crate) fn run_combat(&mut self) {
        let attackers = self.state.combat.attackers.clone();
        let defender = self.state.defending_player();

        for attacker in attackers {
            if self.state.game_over {
                break;
            }
            if !self.state.is_on_field(attacker) {
                debug!(%attacker, "attacker left the field before damage");
                continue;
            }
            match self.state.combat.blocker_of(attacker) {
                Some(blocker) => self.resolve_blocked(attacker, blocker),
                None => {
                    let power = self.power_of(attacker);
                    self.log_event(
                        "Unblocked attack",
                        json!({ "attacker": attacker.0, "defender": defender.0, "power": power }),
                    );
                    self.damage_player(defender, u32::try_from(power).unwrap_or(0));
                }
            }
        }

        if !self.state.game_over {
            self.fire_global(TriggerKind::AfterCombat);
        }
        self.state.combat = Default::default();
        if !self.state.game_over {
            self.enter_phase(Phase::PostCombat);
        }
    }

    fn resolve_blocked(&mut self, attacker: EntityId, blocker: EntityId) {
        // A blocked attacker stays blocked even if its blocker is gone.
        if !self.state.is_on_field(blocker) {
            debug!(%attacker, %blocker, "blocker left the field; no damage dealt");
            return;
        }

        self.fire_card_trigger(TriggerKind::BeforeDamage, attacker);
        self.fire_card_trigger(TriggerKind::BeforeDamage, blocker);
        if self.state.game_over || !self.state.is_on_field(attacker) || !self.state.is_on_field(blocker) {
            return;
        }

        let dealt = self.power_of(attacker);
        let taken = self.power_of(blocker);
        for (card, damage) in [(blocker, dealt), (attacker, taken)] {
            if let Some(instance) = self.state.card_mut(card) {
                instance.damage += damage;
            }
        }
        self.log_event(
            "Combat damage",
            json!({ "attacker": attacker.0, "blocker": blocker.0, "dealt": dealt, "taken": taken }),
        );

        for card in [blocker, attacker] {
            let destroyed = self.state.is_on_field(card)
                && self.state.card(card).is_some_and(|c| c.is_destroyed());
            if destroyed {
                self.destroy_card(card);
            }
        }
    }

    /// Combat power, never below zero.
    fn power_of(&self, card: EntityId) -> i64 {
        self.state.card(card).map_or(0, |c| c.power().max(0))
    }
}
