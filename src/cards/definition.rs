//! Card definitions: static card data.
//!
//! `CardDefinition` holds the authored, immutable properties of a card:
//! kind, elements, cost, combat stats and effects. Everything that changes
//! during a game lives on `CardInstance` instead.

use serde::{Deserialize, Serialize};

use crate::effects::CardEffect;

use super::elements::{Cost, Element, ElementSet};

/// Identifier of an authored card (a "card type"), not a physical copy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// What a card is, which decides how it can be played.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardKind {
    /// Creature that occupies the field and fights.
    Familiar,
    /// One-shot effect, goes to the graveyard after resolving.
    Spell,
    /// Azoth source, played into the resource zone.
    Resource,
    /// Reactive card, playable free from hand or from a lost life card.
    Burst,
    /// Deck identity card, set aside at game start.
    Flag,
}

impl std::fmt::Display for CardKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            CardKind::Familiar => "familiar",
            CardKind::Spell => "spell",
            CardKind::Resource => "resource",
            CardKind::Burst => "burst",
            CardKind::Flag => "flag",
        })
    }
}

/// How a multi-element resource card supplies azoth.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AzothSupply {
    /// Each tap may pick any of the card's elements.
    #[default]
    Flexible,
    /// The element picked on first use is kept while the card stays in play.
    Committed,
}

/// Static card definition.
///
/// ## Example
///
/// ```
/// use konivrer_engine::cards::{CardDefinition, CardId, CardKind, Cost, Element};
/// use konivrer_engine::effects::{CardEffect, EffectKind, TargetSpec};
/// use konivrer_engine::triggers::TriggerKind;
///
/// let salamander = CardDefinition::new(CardId::new(1), "Salamander", CardKind::Familiar)
///     .with_element(Element::Fire)
///     .with_cost(Cost::generic(1).with(Element::Fire, 1))
///     .with_stats(3, 2)
///     .with_effect(CardEffect::new(
///         TriggerKind::OnSummon,
///         TargetSpec::Opponent,
///         EffectKind::damage(1),
///     ));
///
/// assert_eq!(salamander.cost.total(), 2);
/// assert!(salamander.validate().is_ok());
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CardDefinition {
    pub id: CardId,
    pub name: String,
    pub kind: CardKind,
    pub elements: ElementSet,
    #[serde(default)]
    pub cost: Cost,
    #[serde(default)]
    pub power: Option<i64>,
    #[serde(default)]
    pub health: Option<i64>,
    #[serde(default)]
    pub effects: Vec<CardEffect>,
    #[serde(default)]
    pub description: String,
    /// Spells and bursts that cannot be played without explicit targets.
    #[serde(default)]
    pub requires_target: bool,
    /// Only meaningful for resource cards.
    #[serde(default)]
    pub supply: AzothSupply,
}

impl CardDefinition {
    /// Create a new definition with no elements, cost or effects.
    #[must_use]
    pub fn new(id: CardId, name: impl Into<String>, kind: CardKind) -> Self {
        Self {
            id,
            name: name.into(),
            kind,
            elements: ElementSet::new(),
            cost: Cost::free(),
            power: None,
            health: None,
            effects: Vec::new(),
            description: String::new(),
            requires_target: false,
            supply: AzothSupply::Flexible,
        }
    }

    #[must_use]
    pub fn with_element(mut self, element: Element) -> Self {
        self.elements.push(element);
        self
    }

    #[must_use]
    pub fn with_cost(mut self, cost: Cost) -> Self {
        self.cost = cost;
        self
    }

    #[must_use]
    pub fn with_stats(mut self, power: i64, health: i64) -> Self {
        self.power = Some(power);
        self.health = Some(health);
        self
    }

    #[must_use]
    pub fn with_effect(mut self, effect: CardEffect) -> Self {
        self.effects.push(effect);
        self
    }

    #[must_use]
    pub fn with_description(mut self, text: impl Into<String>) -> Self {
        self.description = text.into();
        self
    }

    #[must_use]
    pub fn requiring_target(mut self) -> Self {
        self.requires_target = true;
        self
    }

    #[must_use]
    pub fn with_supply(mut self, supply: AzothSupply) -> Self {
        self.supply = supply;
        self
    }

    /// Base power, zero for cards without combat stats.
    #[must_use]
    pub fn base_power(&self) -> i64 {
        self.power.unwrap_or(0)
    }

    /// Base health, zero for cards without combat stats.
    #[must_use]
    pub fn base_health(&self) -> i64 {
        self.health.unwrap_or(0)
    }

    /// Check the authored data is playable.
    pub fn validate(&self) -> Result<(), String> {
        if self.elements.is_empty() {
            return Err("a card needs at least one element".into());
        }
        if self.kind == CardKind::Familiar && self.health.map_or(true, |h| h <= 0) {
            return Err("a familiar needs positive health".into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::{EffectKind, TargetSpec};
    use crate::triggers::TriggerKind;

    #[test]
    fn test_card_id() {
        let id = CardId::new(42);
        assert_eq!(id.raw(), 42);
        assert_eq!(id.to_string(), "Card(42)");
    }

    #[test]
    fn test_builder() {
        let card = CardDefinition::new(CardId::new(5), "Tidecaller", CardKind::Familiar)
            .with_element(Element::Water)
            .with_cost(Cost::generic(2))
            .with_stats(2, 3)
            .with_description("Draws on arrival.")
            .with_effect(CardEffect::new(
                TriggerKind::OnSummon,
                TargetSpec::Controller,
                EffectKind::draw(1),
            ));

        assert_eq!(card.base_power(), 2);
        assert_eq!(card.base_health(), 3);
        assert_eq!(card.effects.len(), 1);
        assert!(card.validate().is_ok());
    }

    #[test]
    fn test_validate_requires_element() {
        let card = CardDefinition::new(CardId::new(1), "Blank", CardKind::Spell);
        assert!(card.validate().is_err());
    }

    #[test]
    fn test_validate_familiar_health() {
        let card = CardDefinition::new(CardId::new(1), "Wisp", CardKind::Familiar)
            .with_element(Element::Air)
            .with_stats(1, 0);
        assert!(card.validate().is_err());
    }

    #[test]
    fn test_deserialize_minimal() {
        let json = r#"{"id": 9, "name": "Ember", "kind": "resource", "elements": ["fire"]}"#;
        let card: CardDefinition = serde_json::from_str(json).unwrap();
        assert_eq!(card.kind, CardKind::Resource);
        assert_eq!(card.supply, AzothSupply::Flexible);
        assert!(card.cost.is_free());
    }
}
