//! Effect conditions.
//!
//! A `CardEffect` may carry a `Condition`; the dispatcher evaluates it
//! against the current state right before resolving the effect and skips
//! the effect when it is false.

use serde::{Deserialize, Serialize};

use crate::core::{EntityId, GameState, PlayerId};
use crate::zones::Zone;

/// A state predicate gating an effect.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    /// It is the controller's turn.
    ControllerIsActive,
    ControllerLifeCardsAtMost(u32),
    OpponentLifeCardsAtMost(u32),
    ControllerFieldAtLeast(u32),
    OpponentFieldAtLeast(u32),
    ControllerHandAtLeast(u32),
    /// The source card has damage marked on it.
    SourceDamaged,

    // === Combinators ===

    All(Vec<Condition>),
    Any(Vec<Condition>),
    Not(Box<Condition>),
}

/// Who is asking.
#[derive(Clone, Copy, Debug)]
pub struct ConditionContext {
    pub controller: PlayerId,
    pub source: EntityId,
}

impl Condition {
    /// Evaluate against the current state.
    #[must_use]
    pub fn evaluate(&self, state: &GameState, ctx: &ConditionContext) -> bool {
        let me = ctx.controller;
        let them = me.opponent();
        let count = |player, zone| state.zones.len(player, zone) as u32;

        match self {
            Condition::ControllerIsActive => state.active_player == me,
            Condition::ControllerLifeCardsAtMost(n) => count(me, Zone::LifeCards) <= *n,
            Condition::OpponentLifeCardsAtMost(n) => count(them, Zone::LifeCards) <= *n,
            Condition::ControllerFieldAtLeast(n) => count(me, Zone::Field) >= *n,
            Condition::OpponentFieldAtLeast(n) => count(them, Zone::Field) >= *n,
            Condition::ControllerHandAtLeast(n) => count(me, Zone::Hand) >= *n,
            Condition::SourceDamaged => state.card(ctx.source).is_some_and(|c| c.damage > 0),
            Condition::All(conditions) => conditions.iter().all(|c| c.evaluate(state, ctx)),
            Condition::Any(conditions) => conditions.iter().any(|c| c.evaluate(state, ctx)),
            Condition::Not(inner) => !inner.evaluate(state, ctx),
        }
    }
}
