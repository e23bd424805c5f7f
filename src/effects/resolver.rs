//! Effect resolution - executing effects against a live game.
//!
//! The `EffectResolver` is a dispatcher over [`EffectKind`]. It selects
//! targets, then hands each one to the engine primitive for that kind of
//! change, so every effect goes through the same destroy, damage and zone
//! rules as combat and card play.

use serde_json::json;

use crate::core::EntityId;
use crate::rules::GameEngine;

use super::effect::{CardEffect, EffectKind};
use super::targeting::{Target, TargetSelector};

/// Who is resolving an effect, and with what inputs.
#[derive(Clone, Copy, Debug)]
pub struct EffectContext<'a> {
    pub source: EntityId,
    pub controller: crate::core::PlayerId,
    /// Caller-named targets, consumed by `TargetSpec::Explicit`.
    pub targets: &'a [EntityId],
    /// Value of X for scaled amounts.
    pub x: i64,
}

/// Result of resolving an effect.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ResolveResult {
    /// Effect resolved successfully.
    Success,
    /// Effect could not apply (e.g., targets of the wrong kind).
    Failed(String),
    /// Effect was skipped (condition false, or nothing to target).
    Skipped,
}

/// Resolves effects through the engine.
pub struct EffectResolver;

impl EffectResolver {
    /// Resolve one effect. The condition, if any, has already been checked.
    pub fn resolve(engine: &mut GameEngine, effect: &CardEffect, ctx: &EffectContext<'_>) -> ResolveResult {
        let targets = TargetSelector::select(
            effect.target,
            effect.kind.scope(),
            engine.game_state(),
            ctx.source,
            ctx.controller,
            ctx.targets,
        );

        if let EffectKind::Search { query } = &effect.kind {
            // Choosing from a hidden zone needs outside input.
            engine.log_event(
                "Search requested",
                json!({ "source": ctx.source.0, "player": ctx.controller.0, "query": query }),
            );
            return ResolveResult::Success;
        }

        if targets.is_empty() {
            return ResolveResult::Skipped;
        }

        let mut applied = 0;
        for target in &targets {
            if engine.game_state().game_over {
                break;
            }
            if Self::apply(engine, &effect.kind, *target, ctx.x) {
                applied += 1;
            }
        }

        engine.log_event(
            "Effect resolved",
            json!({
                "source": ctx.source.0,
                "effect": effect.kind.name(),
                "targets": targets.len(),
                "applied": applied,
            }),
        );

        if applied == 0 {
            ResolveResult::Failed(format!("{} had no effect", effect.kind.name()))
        } else {
            ResolveResult::Success
        }
    }

    /// Apply one effect kind to one target. Returns whether anything changed.
    fn apply(engine: &mut GameEngine, kind: &EffectKind, target: Target, x: i64) -> bool {
        match (kind, target) {
            (EffectKind::Damage { amount }, Target::Player(player)) => {
                engine.damage_player(player, to_count(amount.value(x)));
                true
            }
            (EffectKind::Damage { amount }, Target::Card(card)) => {
                engine.damage_creature(card, amount.value(x))
            }
            (EffectKind::Draw { count }, Target::Player(player)) => {
                let count = to_count(count.value(x)) as usize;
                count > 0 && !engine.draw_cards(player, count).is_empty()
            }
            (EffectKind::Boost { power, health }, Target::Card(card)) => {
                engine.boost_creature(card, *power, *health)
            }
            (EffectKind::Destroy, Target::Card(card)) => engine.destroy_card(card),
            (EffectKind::Return, Target::Card(card)) => engine.return_to_hand(card),
            (EffectKind::Banish, Target::Card(card)) => engine.banish_card(card),
            (EffectKind::Heal { amount }, Target::Player(player)) => {
                engine.heal_player(player, to_count(amount.value(x))) > 0
            }
            (EffectKind::Heal { amount }, Target::Card(card)) => {
                engine.heal_creature(card, amount.value(x)) > 0
            }
            _ => false,
        }
    }
}

fn to_count(value: i64) -> u32 {
    u32::try_from(value.max(0)).unwrap_or(u32::MAX)
}
