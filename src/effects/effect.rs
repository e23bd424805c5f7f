//! Effect definitions.
//!
//! A `CardEffect` is authored data: when it fires (`TriggerKind`), what it
//! targets (`TargetSpec`), what it does (`EffectKind`) and an optional
//! `Condition`. `EffectKind` is a closed sum type with one variant per
//! handler, each carrying only the fields that handler needs.

use serde::{Deserialize, Serialize};

use crate::triggers::{Condition, TriggerKind};

use super::targeting::{TargetScope, TargetSpec};

/// A numeric effect value.
///
/// `Scaled` values grow with X: the excess azoth paid for a spell, or the
/// remaining life cards of a burst's player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Amount {
    Fixed(i64),
    Scaled { base: i64 },
}

impl Amount {
    /// Resolve against X. Never negative.
    #[must_use]
    pub fn value(self, x: i64) -> i64 {
        match self {
            Amount::Fixed(n) => n.max(0),
            Amount::Scaled { base } => (base + x).max(0),
        }
    }
}

impl From<i64> for Amount {
    fn from(n: i64) -> Self {
        Amount::Fixed(n)
    }
}

/// What an effect does.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EffectKind {
    /// Damage creatures, or strip life cards from players.
    Damage { amount: Amount },
    Draw { count: Amount },
    /// Permanent power/health deltas.
    Boost { power: i64, health: i64 },
    Destroy,
    /// Needs a choice from outside the engine; only logged.
    Search { query: String },
    /// Field card back to its owner's hand.
    Return,
    /// Field or graveyard card to removed-from-game.
    Banish,
    /// Heal creatures, or restore life cards from the graveyard.
    Heal { amount: Amount },
}

impl EffectKind {
    #[must_use]
    pub fn damage(amount: i64) -> Self {
        EffectKind::Damage { amount: Amount::Fixed(amount) }
    }

    #[must_use]
    pub fn draw(count: i64) -> Self {
        EffectKind::Draw { count: Amount::Fixed(count) }
    }

    #[must_use]
    pub fn boost(power: i64, health: i64) -> Self {
        EffectKind::Boost { power, health }
    }

    #[must_use]
    pub fn heal(amount: i64) -> Self {
        EffectKind::Heal { amount: Amount::Fixed(amount) }
    }

    #[must_use]
    pub fn search(query: impl Into<String>) -> Self {
        EffectKind::Search { query: query.into() }
    }

    /// Handler name, as written to the game log.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            EffectKind::Damage { .. } => "damage",
            EffectKind::Draw { .. } => "draw",
            EffectKind::Boost { .. } => "boost",
            EffectKind::Destroy => "destroy",
            EffectKind::Search { .. } => "search",
            EffectKind::Return => "return",
            EffectKind::Banish => "banish",
            EffectKind::Heal { .. } => "heal",
        }
    }

    /// What kinds of thing this effect can land on.
    #[must_use]
    pub fn scope(&self) -> TargetScope {
        match self {
            EffectKind::Damage { .. } | EffectKind::Heal { .. } => TargetScope::PLAYERS_AND_FIELD,
            EffectKind::Draw { .. } => TargetScope::PLAYERS,
            EffectKind::Boost { .. } | EffectKind::Destroy | EffectKind::Return => {
                TargetScope::FIELD
            }
            EffectKind::Banish => TargetScope::FIELD_AND_GRAVEYARD,
            EffectKind::Search { .. } => TargetScope::NONE,
        }
    }
}

/// An authored card effect.
///
/// ```
/// use konivrer_engine::effects::{Amount, CardEffect, EffectKind, TargetSpec};
/// use konivrer_engine::triggers::{Condition, TriggerKind};
///
/// // "When played, deal 1 + X damage to the opponent if they have 2 or fewer life cards."
/// let finisher = CardEffect::new(
///     TriggerKind::OnPlay,
///     TargetSpec::Opponent,
///     EffectKind::Damage { amount: Amount::Scaled { base: 1 } },
/// )
/// .when(Condition::OpponentLifeCardsAtMost(2));
///
/// assert!(finisher.condition.is_some());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardEffect {
    pub trigger: TriggerKind,
    pub target: TargetSpec,
    pub kind: EffectKind,
    #[serde(default)]
    pub condition: Option<Condition>,
}

impl CardEffect {
    #[must_use]
    pub fn new(trigger: TriggerKind, target: TargetSpec, kind: EffectKind) -> Self {
        Self { trigger, target, kind, condition: None }
    }

    /// Gate this effect on a condition (builder pattern).
    #[must_use]
    pub fn when(mut self, condition: Condition) -> Self {
        self.condition = Some(condition);
        self
    }

    /// Whether this effect consumes caller-chosen targets.
    #[must_use]
    pub fn uses_explicit_targets(&self) -> bool {
        self.target == TargetSpec::Explicit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_amount_values() {
        assert_eq!(Amount::Fixed(3).value(10), 3);
        assert_eq!(Amount::Scaled { base: 1 }.value(2), 3);
        assert_eq!(Amount::Fixed(-2).value(0), 0);
    }

    #[test]
    fn test_scopes() {
        assert!(EffectKind::damage(1).scope().players);
        assert!(EffectKind::damage(1).scope().field);
        assert!(!EffectKind::draw(1).scope().field);
        assert!(EffectKind::Banish.scope().graveyard);
        assert_eq!(EffectKind::search("any").scope(), TargetScope::NONE);
    }

    #[test]
    fn test_effect_json_shape() {
        let effect = CardEffect::new(TriggerKind::OnSummon, TargetSpec::AllEnemy, EffectKind::damage(2));
        let json = serde_json::to_value(&effect).unwrap();

        assert_eq!(json["trigger"], "on_summon");
        assert_eq!(json["target"], "all_enemy");
        assert_eq!(json["kind"]["type"], "damage");
        assert_eq!(json["kind"]["amount"]["fixed"], 2);

        let back: CardEffect = serde_json::from_value(json).unwrap();
        assert_eq!(back, effect);
    }
}
