//! Zone manager for card locations and movement.
//!
//! The `ZoneManager` is the single source of truth for where every card is.
//! It keeps two views in sync:
//! - a location index: entity -> (owner, zone)
//! - an ordered list per (owner, zone); the top of a zone is the end of its list
//!
//! Cards only ever move within their owner's zones, and every move is a
//! single relocation, so a player's card count never changes after setup.
//! Cards in [`Zone::Removed`] are frozen: they never move again.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::core::{EntityId, GameRng, PlayerId, PlayerMap};

/// A per-player card container.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Zone {
    Deck,
    Hand,
    Field,
    ResourceZone,
    LifeCards,
    Graveyard,
    Removed,
    Flag,
}

impl Zone {
    pub const COUNT: usize = 8;

    pub const ALL: [Zone; Zone::COUNT] = [
        Zone::Deck,
        Zone::Hand,
        Zone::Field,
        Zone::ResourceZone,
        Zone::LifeCards,
        Zone::Graveyard,
        Zone::Removed,
        Zone::Flag,
    ];

    const fn index(self) -> usize {
        self as usize
    }

    /// Zones where card instances carry meaningful runtime state.
    #[must_use]
    pub const fn tracks_instance_state(self) -> bool {
        matches!(self, Zone::Field | Zone::ResourceZone)
    }
}

impl std::fmt::Display for Zone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Zone::Deck => "deck",
            Zone::Hand => "hand",
            Zone::Field => "field",
            Zone::ResourceZone => "resource zone",
            Zone::LifeCards => "life cards",
            Zone::Graveyard => "graveyard",
            Zone::Removed => "removed-from-game",
            Zone::Flag => "flag zone",
        })
    }
}

/// Position for inserting a card into a zone.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ZonePosition {
    /// End of the list.
    Top,
    /// Start of the list.
    Bottom,
    /// Insert at specific index (0 = bottom).
    Index(usize),
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
struct PlayerZones {
    lists: [Vec<EntityId>; Zone::COUNT],
}

/// Tracks which zone every card is in.
///
/// ```
/// use konivrer_engine::core::{EntityId, PlayerId};
/// use konivrer_engine::zones::{Zone, ZoneManager, ZonePosition};
///
/// let p0 = PlayerId::new(0);
/// let mut zones = ZoneManager::new();
/// zones.add(EntityId(10), p0, Zone::Deck, ZonePosition::Top);
/// zones.add(EntityId(11), p0, Zone::Deck, ZonePosition::Top);
///
/// // Drawing takes from the top
/// assert_eq!(zones.move_top(p0, Zone::Deck, Zone::Hand), Some(EntityId(11)));
/// assert_eq!(zones.cards(p0, Zone::Hand), &[EntityId(11)]);
/// assert_eq!(zones.owned_count(p0), 2);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneManager {
    locations: FxHashMap<EntityId, (PlayerId, Zone)>,
    zones: PlayerMap<PlayerZones>,
}

impl ZoneManager {
    /// Create a new empty zone manager.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Place a card for the first time.
    ///
    /// Panics if the entity is already placed; cards enter play once, at setup.
    pub fn add(&mut self, entity: EntityId, owner: PlayerId, zone: Zone, position: ZonePosition) {
        if self.locations.contains_key(&entity) {
            panic!("{entity} already placed in a zone");
        }
        self.locations.insert(entity, (owner, zone));
        insert_at(self.list_mut(owner, zone), entity, position);
    }

    /// Move a card to another zone of its owner.
    ///
    /// Returns the zone it left, or `None` if the card is unknown or has
    /// been removed from the game.
    pub fn move_card(&mut self, entity: EntityId, to: Zone, position: ZonePosition) -> Option<Zone> {
        let (owner, from) = self.locations.get(&entity).copied()?;
        if from == Zone::Removed {
            return None;
        }

        self.list_mut(owner, from).retain(|&e| e != entity);
        self.locations.insert(entity, (owner, to));
        insert_at(self.list_mut(owner, to), entity, position);

        Some(from)
    }

    /// Move the top card of one zone onto the top of another.
    pub fn move_top(&mut self, owner: PlayerId, from: Zone, to: Zone) -> Option<EntityId> {
        let entity = self.top(owner, from)?;
        self.move_card(entity, to, ZonePosition::Top)?;
        Some(entity)
    }

    /// Owner and zone of a card.
    #[must_use]
    pub fn location(&self, entity: EntityId) -> Option<(PlayerId, Zone)> {
        self.locations.get(&entity).copied()
    }

    /// Zone of a card.
    #[must_use]
    pub fn zone_of(&self, entity: EntityId) -> Option<Zone> {
        self.location(entity).map(|(_, zone)| zone)
    }

    /// Check if a card sits in a specific player's zone.
    #[must_use]
    pub fn is_in(&self, entity: EntityId, owner: PlayerId, zone: Zone) -> bool {
        self.locations.get(&entity) == Some(&(owner, zone))
    }

    /// Cards in a zone, bottom first.
    #[must_use]
    pub fn cards(&self, owner: PlayerId, zone: Zone) -> &[EntityId] {
        &self.zones[owner].lists[zone.index()]
    }

    #[must_use]
    pub fn len(&self, owner: PlayerId, zone: Zone) -> usize {
        self.cards(owner, zone).len()
    }

    #[must_use]
    pub fn is_empty(&self, owner: PlayerId, zone: Zone) -> bool {
        self.cards(owner, zone).is_empty()
    }

    /// Top card of a zone (last in the list).
    #[must_use]
    pub fn top(&self, owner: PlayerId, zone: Zone) -> Option<EntityId> {
        self.cards(owner, zone).last().copied()
    }

    /// Shuffle one zone.
    pub fn shuffle(&mut self, owner: PlayerId, zone: Zone, rng: &mut GameRng) {
        rng.shuffle(self.list_mut(owner, zone));
    }

    /// Cards a player owns across every zone.
    #[must_use]
    pub fn owned_count(&self, owner: PlayerId) -> usize {
        self.zones[owner].lists.iter().map(Vec::len).sum()
    }

    /// Every placed entity, in no particular order.
    pub fn entities(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.locations.keys().copied()
    }

    /// Check if the manager contains an entity.
    #[must_use]
    pub fn contains(&self, entity: EntityId) -> bool {
        self.locations.contains_key(&entity)
    }

    fn list_mut(&mut self, owner: PlayerId, zone: Zone) -> &mut Vec<EntityId> {
        &mut self.zones[owner].lists[zone.index()]
    }
}

fn insert_at(list: &mut Vec<EntityId>, entity: EntityId, position: ZonePosition) {
    match position {
        ZonePosition::Top => list.push(entity),
        ZonePosition::Bottom => list.insert(0, entity),
        ZonePosition::Index(i) => {
            let idx = i.min(list.len());
            list.insert(idx, entity);
        }
    }
}
