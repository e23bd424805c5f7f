//! Card registry for looking up definitions.
//!
//! The registry is the engine's view of the card-data source: whatever
//! loads authored cards hands them over here, and each game reads from it.

use rustc_hash::FxHashMap;

use crate::core::ConfigError;

use super::definition::{CardDefinition, CardId};

/// Registry of card definitions.
///
/// ```
/// use konivrer_engine::cards::{CardDefinition, CardId, CardKind, CardRegistry, Element};
///
/// let mut registry = CardRegistry::new();
/// registry
///     .register(CardDefinition::new(CardId::new(1), "Ember", CardKind::Resource)
///         .with_element(Element::Fire))
///     .unwrap();
///
/// assert_eq!(registry.get(CardId::new(1)).unwrap().name, "Ember");
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardRegistry {
    cards: FxHashMap<CardId, CardDefinition>,
}

impl CardRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from a batch of definitions.
    pub fn from_definitions(
        definitions: impl IntoIterator<Item = CardDefinition>,
    ) -> Result<Self, ConfigError> {
        let mut registry = Self::new();
        for definition in definitions {
            registry.register(definition)?;
        }
        Ok(registry)
    }

    /// Register a definition, rejecting duplicate ids and unplayable data.
    pub fn register(&mut self, definition: CardDefinition) -> Result<(), ConfigError> {
        if self.cards.contains_key(&definition.id) {
            return Err(ConfigError::DuplicateDefinition { card: definition.id });
        }
        definition
            .validate()
            .map_err(|reason| ConfigError::InvalidDefinition { card: definition.id, reason })?;
        self.cards.insert(definition.id, definition);
        Ok(())
    }

    /// Get a card definition by ID.
    #[must_use]
    pub fn get(&self, id: CardId) -> Option<&CardDefinition> {
        self.cards.get(&id)
    }

    #[must_use]
    pub fn contains(&self, id: CardId) -> bool {
        self.cards.contains_key(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Iterate over all definitions, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &CardDefinition> {
        self.cards.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardKind, Element};

    fn ember(id: u32) -> CardDefinition {
        CardDefinition::new(CardId::new(id), "Ember", CardKind::Resource).with_element(Element::Fire)
    }

    #[test]
    fn test_register_and_get() {
        let registry = CardRegistry::from_definitions([ember(1), ember(2)]).unwrap();
        assert_eq!(registry.len(), 2);
        assert!(registry.contains(CardId::new(2)));
        assert!(registry.get(CardId::new(3)).is_none());
    }

    #[test]
    fn test_duplicate_rejected() {
        let mut registry = CardRegistry::new();
        registry.register(ember(1)).unwrap();
        let err = registry.register(ember(1)).unwrap_err();
        assert_eq!(err, ConfigError::DuplicateDefinition { card: CardId::new(1) });
    }

    #[test]
    fn test_invalid_definition_rejected() {
        let mut registry = CardRegistry::new();
        let blank = CardDefinition::new(CardId::new(4), "Blank", CardKind::Spell);
        assert!(matches!(
            registry.register(blank),
            Err(ConfigError::InvalidDefinition { .. })
        ));
        assert!(registry.is_empty());
    }
}
