//! Game state.
//!
//! `GameState` is the complete authoritative state of one game. It is
//! plain data: every rule lives in `rules`, and external code only ever
//! gets a shared reference to it between engine calls.
//!
//! ## Ownership
//!
//! Cards live in one flat arena keyed by `EntityId`; players are indexed by
//! `PlayerId`. Nothing holds a back-pointer: a card's owner is an id and its
//! location is looked up in the `ZoneManager`.

use std::collections::BTreeMap;

use im::Vector;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::action::ActionRecord;
use super::entity::EntityId;
use super::player::{PlayerId, PlayerMap};
use crate::cards::CardInstance;
use crate::rules::Phase;
use crate::zones::{Zone, ZoneManager};

/// Lifecycle of a game.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    /// No players dealt yet, or dealt but `start_game` not called.
    #[default]
    Setup,
    InProgress,
    Finished,
}

/// Why a player lost.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LossReason {
    /// Had to draw from an empty deck.
    DeckOut,
    /// Took damage with no life cards left.
    LifeCardsExhausted,
    Concession,
}

impl std::fmt::Display for LossReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            LossReason::DeckOut => "deck-out",
            LossReason::LifeCardsExhausted => "life cards exhausted",
            LossReason::Concession => "concession",
        })
    }
}

/// Final result of a finished game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameOutcome {
    pub winner: PlayerId,
    pub loser: PlayerId,
    pub reason: LossReason,
}

/// Per-player bookkeeping outside the zones.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerState {
    pub id: String,
    pub name: String,
    /// Untapped azoth the player can still spend.
    pub azoth_available: u32,
    pub azoth_played_this_turn: u32,
    /// Deck size plus flag at setup; the conservation target.
    pub starting_cards: usize,
}

/// Declarations for the combat in progress.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatState {
    /// Attackers in declaration order.
    pub attackers: Vec<EntityId>,
    /// Attacker -> its blocker.
    pub blocks: BTreeMap<EntityId, EntityId>,
    pub attackers_declared: bool,
    pub blockers_declared: bool,
}

impl CombatState {
    #[must_use]
    pub fn is_attacking(&self, card: EntityId) -> bool {
        self.attackers.contains(&card)
    }

    #[must_use]
    pub fn blocker_of(&self, attacker: EntityId) -> Option<EntityId> {
        self.blocks.get(&attacker).copied()
    }

    /// Attackers declared but not yet resolved.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.attackers_declared && !self.attackers.is_empty()
    }
}

/// A life card lost to damage that its owner may still burst-play or claim.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingBurst {
    pub player: PlayerId,
    pub card: EntityId,
}

/// Complete game state.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub status: GameStatus,
    pub players: PlayerMap<PlayerState>,
    pub zones: ZoneManager,
    cards: FxHashMap<EntityId, CardInstance>,

    pub active_player: PlayerId,
    /// Starts at 1, increments whenever player 0 becomes active again.
    pub turn: u32,
    pub phase: Phase,
    pub combat: CombatState,
    pub pending_bursts: Vec<PendingBurst>,

    pub winner: Option<PlayerId>,
    pub game_over: bool,
    pub outcome: Option<GameOutcome>,

    /// Every accepted caller action, oldest first.
    pub history: Vector<ActionRecord>,

    /// Set once the first Start phase has run, which skips its draw.
    pub(crate) opening_turn_done: bool,
    next_entity_id: u32,
}

impl GameState {
    /// An empty state awaiting setup.
    #[must_use]
    pub fn new() -> Self {
        Self {
            turn: 1,
            next_entity_id: EntityId::FIRST_CARD,
            ..Self::default()
        }
    }

    // === Entity Management ===

    /// Allocate a new card entity ID.
    pub fn alloc_entity(&mut self) -> EntityId {
        let id = EntityId(self.next_entity_id);
        self.next_entity_id += 1;
        id
    }

    /// Put a new card into the arena and the given zone.
    pub fn add_card(&mut self, card: CardInstance, zone: Zone) {
        let entity_id = card.entity_id;
        let owner = card.owner;
        self.cards.insert(entity_id, card);
        self.zones.add(entity_id, owner, zone, crate::zones::ZonePosition::Top);
    }

    #[must_use]
    pub fn card(&self, entity_id: EntityId) -> Option<&CardInstance> {
        self.cards.get(&entity_id)
    }

    pub fn card_mut(&mut self, entity_id: EntityId) -> Option<&mut CardInstance> {
        self.cards.get_mut(&entity_id)
    }

    /// Instances in one zone, bottom first.
    pub fn cards_in(&self, player: PlayerId, zone: Zone) -> impl Iterator<Item = &CardInstance> {
        self.zones
            .cards(player, zone)
            .iter()
            .filter_map(move |id| self.cards.get(id))
    }

    /// Whether `card` is on `player`'s field.
    #[must_use]
    pub fn is_on_field(&self, card: EntityId) -> bool {
        self.zones.zone_of(card) == Some(Zone::Field)
    }

    #[must_use]
    pub fn life_cards(&self, player: PlayerId) -> usize {
        self.zones.len(player, Zone::LifeCards)
    }

    #[must_use]
    pub fn hand_size(&self, player: PlayerId) -> usize {
        self.zones.len(player, Zone::Hand)
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.game_over
    }

    /// The player whose turn it is not.
    #[must_use]
    pub fn defending_player(&self) -> PlayerId {
        self.active_player.opponent()
    }

    /// Whether every player still owns exactly the cards they started with.
    #[must_use]
    pub fn conservation_holds(&self) -> bool {
        self.players
            .iter()
            .all(|(id, player)| self.zones.owned_count(id) == player.starting_cards)
    }
}
