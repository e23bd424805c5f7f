//! Trigger dispatch.
//!
//! Raising a trigger snapshots the effects that answer it, then resolves
//! them one at a time. Before each one the source is checked again: a card
//! that left the field (flags excepted) no longer resolves, and nothing
//! resolves once the game is over.

use serde_json::json;
use tracing::trace;

use crate::core::{EntityId, PlayerId};
use crate::effects::{CardEffect, EffectContext, EffectResolver, ResolveResult};
use crate::triggers::{collect_triggers, ConditionContext, TriggerKind, TriggeredEffect};
use crate::zones::Zone;

use super::engine::GameEngine;

impl GameEngine {
    /// Raise a global trigger (turn and phase boundaries, combat end).
    pub(crate) fn fire_global(&mut self, trigger: TriggerKind) {
        self.fire(trigger, None);
    }

    /// Raise a trigger on one card (summon, attack, block, damage, destroy).
    pub(crate) fn fire_card_trigger(&mut self, trigger: TriggerKind, card: EntityId) {
        self.fire(trigger, Some(card));
    }

    fn fire(&mut self, trigger: TriggerKind, subject: Option<EntityId>) {
        if self.state.game_over {
            return;
        }
        let pending = collect_triggers(
            &self.state,
            &self.registry,
            trigger,
            subject,
            self.options.enable_flag_cards,
        );
        if pending.is_empty() {
            return;
        }
        trace!(trigger = trigger.name(), count = pending.len(), "trigger raised");

        for TriggeredEffect { source, controller, effect, .. } in pending {
            if self.state.game_over {
                break;
            }
            if !matches!(self.state.zones.zone_of(source), Some(Zone::Field | Zone::Flag)) {
                trace!(%source, "trigger source left play");
                continue;
            }
            let ctx = EffectContext { source, controller, targets: &[], x: 0 };
            if self.resolve_effect(&effect, &ctx) == ResolveResult::Success {
                if let Some(instance) = self.state.card_mut(source) {
                    instance.used_effect_this_turn = true;
                }
            }
        }
    }

    /// Resolve every effect of a spell or burst, in card order.
    pub(crate) fn resolve_card_effects(&mut self, card: EntityId, controller: PlayerId, targets: &[EntityId], x: i64) {
        let effects: Vec<CardEffect> = self
            .definition_of(card)
            .map(|definition| definition.effects.clone())
            .unwrap_or_default();

        for effect in &effects {
            if self.state.game_over {
                break;
            }
            let ctx = EffectContext { source: card, controller, targets, x };
            self.resolve_effect(effect, &ctx);
        }
    }

    /// Check the effect's condition, then hand it to the resolver.
    fn resolve_effect(&mut self, effect: &CardEffect, ctx: &EffectContext<'_>) -> ResolveResult {
        if let Some(condition) = &effect.condition {
            let check = ConditionContext { controller: ctx.controller, source: ctx.source };
            if !condition.evaluate(&self.state, &check) {
                self.log_event(
                    "Effect skipped",
                    json!({ "source": ctx.source.0, "effect": effect.kind.name(), "reason": "condition" }),
                );
                return ResolveResult::Skipped;
            }
        }
        EffectResolver::resolve(self, effect, ctx)
    }
}
