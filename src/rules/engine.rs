//! The game engine.
//!
//! `GameEngine` owns one game: its state, options, card registry, RNG, log
//! and event bus. All rules run through methods on it, spread across the
//! sibling modules by concern (phases, card play, combat, life and field
//! changes, trigger dispatch).
//!
//! ## Atomicity
//!
//! Every public action validates everything it needs before it mutates
//! anything. A rejected action returns a [`GameError`] and leaves the state,
//! log and history exactly as they were.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{debug, info};

use crate::cards::{CardDefinition, CardId, CardInstance, CardKind, CardRegistry};
use crate::core::{
    Action, ActionRecord, ConfigError, EntityId, GameError, GameOptions, GameResult, GameRng,
    GameRngState, GameState, GameStatus, PlayerId, PlayerState, SnapshotError, PLAYER_COUNT,
};
use crate::events::{EventBus, EventKind, GameEvent, GameLog, ListenerId, LogEntry};
use crate::zones::{Zone, ZonePosition};

use super::phase::Phase;

/// One player's seat at setup.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSetup {
    pub id: String,
    pub name: String,
    /// Deck list, top card first. May include one flag card.
    pub deck: Vec<CardId>,
}

impl PlayerSetup {
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, deck: Vec<CardId>) -> Self {
        Self { id: id.into(), name: name.into(), deck }
    }
}

/// Everything needed to resume a game later.
///
/// The card registry is not included; restore into an engine built with
/// the same card data.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub options: GameOptions,
    pub state: GameState,
    pub rng: GameRngState,
}

impl GameSnapshot {
    pub fn to_bytes(&self) -> Result<Vec<u8>, SnapshotError> {
        bincode::serialize(self).map_err(SnapshotError::Encode)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SnapshotError> {
        bincode::deserialize(bytes).map_err(SnapshotError::Decode)
    }
}

/// A two-player game.
///
/// ```
/// use konivrer_engine::cards::{CardDefinition, CardId, CardKind, CardRegistry, Element};
/// use konivrer_engine::core::{GameOptions, GameStatus};
/// use konivrer_engine::rules::{GameEngine, Phase, PlayerSetup};
///
/// let well = CardDefinition::new(CardId::new(1), "Ember Well", CardKind::Resource)
///     .with_element(Element::Fire);
/// let registry = CardRegistry::from_definitions([well]).unwrap();
///
/// let mut engine = GameEngine::new(GameOptions::default().with_seed(7), registry).unwrap();
/// let deck = vec![CardId::new(1); 40];
/// engine
///     .init_game(vec![
///         PlayerSetup::new("a", "Alice", deck.clone()),
///         PlayerSetup::new("b", "Bob", deck),
///     ])
///     .unwrap();
/// engine.start_game().unwrap();
///
/// let state = engine.game_state();
/// assert_eq!(state.status, GameStatus::InProgress);
/// assert_eq!(state.phase, Phase::Main);
/// ```
pub struct GameEngine {
    pub(crate) options: GameOptions,
    pub(crate) registry: CardRegistry,
    pub(crate) state: GameState,
    pub(crate) rng: GameRng,
    log: GameLog,
    events: EventBus,
    /// Cards whose destruction is in progress.
    pub(crate) destroying: FxHashSet<EntityId>,
    initialized: bool,
}

impl GameEngine {
    /// Create an engine with validated options and card data.
    pub fn new(options: GameOptions, registry: CardRegistry) -> Result<Self, ConfigError> {
        options.validate()?;
        let rng = GameRng::new(options.seed);
        Ok(Self {
            options,
            registry,
            state: GameState::new(),
            rng,
            log: GameLog::new(),
            events: EventBus::new(),
            destroying: FxHashSet::default(),
            initialized: false,
        })
    }

    // === Setup ===

    /// Build decks, deal life cards and opening hands, choose the first player.
    ///
    /// Leaves the game in `Setup`; call [`GameEngine::start_game`] to begin.
    pub fn init_game(&mut self, players: Vec<PlayerSetup>) -> Result<&GameState, ConfigError> {
        if self.initialized {
            return Err(ConfigError::AlreadyInitialized);
        }
        if players.len() != PLAYER_COUNT {
            return Err(ConfigError::WrongPlayerCount { count: players.len() });
        }
        for setup in &players {
            self.validate_deck(setup)?;
        }

        let mut state = GameState::new();
        for (seat, setup) in players.into_iter().enumerate() {
            let player = PlayerId::new(seat as u8);
            self.deal(&mut state, player, setup);
        }

        let first = match self.options.first_player {
            Some(player) => player,
            None if self.rng.coin_flip() => PlayerId::new(1),
            None => PlayerId::new(0),
        };
        state.active_player = first;

        self.state = state;
        self.initialized = true;

        info!(%first, seed = self.options.seed, "game initialized");
        self.log_event(
            "Game initialized",
            json!({
                "first_player": first.0,
                "players": self.state.players.iter().map(|(_, p)| p.name.clone()).collect::<Vec<_>>(),
            }),
        );
        self.emit(GameEvent::GameInitialized { first_player: first });
        Ok(&self.state)
    }

    fn validate_deck(&self, setup: &PlayerSetup) -> Result<(), ConfigError> {
        let mut size = 0;
        for &card in &setup.deck {
            let definition = self
                .registry
                .get(card)
                .ok_or(ConfigError::UnknownCardId { card })?;
            if definition.kind != CardKind::Flag {
                size += 1;
            }
        }
        if size < self.options.min_deck_size {
            return Err(ConfigError::DeckTooSmall {
                player: setup.id.clone(),
                size,
                min: self.options.min_deck_size,
            });
        }
        Ok(())
    }

    fn deal(&mut self, state: &mut GameState, player: PlayerId, setup: PlayerSetup) {
        state.players[player] = PlayerState {
            id: setup.id,
            name: setup.name,
            starting_cards: setup.deck.len(),
            ..PlayerState::default()
        };

        // Listed top first; the top of a zone is the end of its list.
        for &card in setup.deck.iter().rev() {
            if let Some(definition) = self.registry.get(card) {
                let id = state.alloc_entity();
                state.add_card(CardInstance::new(id, definition, player), Zone::Deck);
            }
        }

        if self.options.shuffle_decks {
            state.zones.shuffle(player, Zone::Deck, &mut self.rng);
        }

        if self.options.enable_flag_cards {
            let flag = state
                .zones
                .cards(player, Zone::Deck)
                .iter()
                .rev()
                .copied()
                .find(|&id| state.card(id).is_some_and(|c| c.kind == CardKind::Flag));
            if let Some(flag) = flag {
                state.zones.move_card(flag, Zone::Flag, ZonePosition::Top);
            }
        }

        for _ in 0..self.options.starting_life_cards {
            state.zones.move_top(player, Zone::Deck, Zone::LifeCards);
        }
        for _ in 0..self.options.starting_hand_size {
            state.zones.move_top(player, Zone::Deck, Zone::Hand);
        }
    }

    /// Begin play: the first player's opening turn runs up to Main.
    pub fn start_game(&mut self) -> GameResult<&GameState> {
        if !self.initialized {
            return Err(GameError::NotStarted);
        }
        if self.state.status != GameStatus::Setup {
            return Err(GameError::AlreadyStarted);
        }

        self.state.status = GameStatus::InProgress;
        self.log_event("Game started", json!({ "first_player": self.state.active_player.0 }));
        self.start_turn();
        Ok(&self.state)
    }

    // === Accessors ===

    #[must_use]
    pub fn game_state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub fn game_log(&self) -> &[LogEntry] {
        self.log.entries()
    }

    /// Accepted actions, oldest first.
    #[must_use]
    pub fn history(&self) -> &im::Vector<ActionRecord> {
        &self.state.history
    }

    #[must_use]
    pub fn options(&self) -> &GameOptions {
        &self.options
    }

    #[must_use]
    pub fn registry(&self) -> &CardRegistry {
        &self.registry
    }

    /// Definition of a card in this game.
    #[must_use]
    pub fn definition_of(&self, card: EntityId) -> Option<&CardDefinition> {
        self.state
            .card(card)
            .and_then(|instance| self.registry.get(instance.card_id))
    }

    // === Events ===

    /// Subscribe to one kind of event.
    pub fn on(&mut self, kind: EventKind, listener: impl FnMut(&GameEvent) + 'static) -> ListenerId {
        self.events.on(kind, listener)
    }

    /// Unsubscribe. Returns false if nothing was removed.
    pub fn off(&mut self, kind: EventKind, id: ListenerId) -> bool {
        self.events.off(kind, id)
    }

    pub(crate) fn emit(&mut self, event: GameEvent) {
        self.events.emit(&event);
    }

    /// Append to the game log, mirror to tracing, broadcast as `Log`.
    pub(crate) fn log_event(&mut self, event: &str, data: Value) {
        let turn = self.state.turn;
        let entry = self.log.append(turn, event, data).clone();
        debug!(turn, event, data = %entry.data, "game log");
        self.emit(GameEvent::Log(entry));
    }

    // === Actions ===

    /// Perform any action on behalf of `player`.
    ///
    /// Actions without a player parameter of their own (phase and combat
    /// steps) require `player` to be the active player.
    pub fn apply(&mut self, player: PlayerId, action: Action) -> GameResult<()> {
        let name = action.name();
        let result = match action {
            Action::DrawCard { count } => self.draw_card(player, count).map(drop),
            Action::PlayResource { card } => self.play_resource(player, card),
            Action::SummonFamiliar { card, azoth } => self.summon_familiar(player, card, &azoth),
            Action::TributeSummon { card, tributes, azoth } => {
                self.tribute_summon(player, card, &tributes, &azoth)
            }
            Action::CastSpell { card, azoth, targets } => {
                self.cast_spell(player, card, &azoth, &targets)
            }
            Action::ActivateBurst { card, targets } => self.activate_burst(player, card, &targets),
            Action::ClaimBurst { card } => self.claim_burst(player, card),
            Action::DeclareAttackers { attackers } => self.declare_attackers(player, &attackers),
            Action::DeclareBlockers { blocks } => self.declare_blockers(player, &blocks),
            Action::ResolveCombat => self
                .ensure_active(player)
                .and_then(|()| self.resolve_combat()),
            Action::EndPhase => self.ensure_active(player).and_then(|()| self.end_phase()),
            Action::EndTurn => self.ensure_active(player).and_then(|()| self.end_turn()),
            Action::Concede => self.concede(player),
        };
        result.inspect_err(|err| debug!(%player, action = name, error = %err, "action rejected"))
    }

    /// Append an accepted action to the history.
    pub(crate) fn record(&mut self, player: PlayerId, action: Action) {
        let record = ActionRecord {
            player,
            turn: self.state.turn,
            sequence: self.state.history.len() as u32,
            action,
        };
        self.state.history.push_back(record);
    }

    // === Snapshots ===

    /// Capture the full game for later [`GameEngine::restore`].
    #[must_use]
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            options: self.options.clone(),
            state: self.state.clone(),
            rng: self.rng.state(),
        }
    }

    /// Replace the current game with a snapshot.
    ///
    /// Listeners stay subscribed; the log restarts with a restore entry.
    pub fn restore(&mut self, snapshot: GameSnapshot) -> Result<(), ConfigError> {
        snapshot.options.validate()?;
        if let Some(card) = snapshot
            .state
            .zones
            .entities()
            .filter_map(|id| snapshot.state.card(id))
            .map(|instance| instance.card_id)
            .find(|id| !self.registry.contains(*id))
        {
            return Err(ConfigError::UnknownCardId { card });
        }

        self.options = snapshot.options;
        self.rng = GameRng::from_state(&snapshot.rng);
        self.state = snapshot.state;
        self.destroying.clear();
        self.initialized = true;
        self.log = GameLog::new();
        self.log_event(
            "Game restored",
            json!({ "turn": self.state.turn, "actions": self.state.history.len() }),
        );
        Ok(())
    }

    // === Validation helpers ===

    pub(crate) fn ensure_in_progress(&self) -> GameResult<()> {
        if self.state.game_over {
            return Err(GameError::GameOver);
        }
        if self.state.status != GameStatus::InProgress {
            return Err(GameError::NotStarted);
        }
        Ok(())
    }

    pub(crate) fn ensure_player(&self, player: PlayerId) -> GameResult<()> {
        if player.is_valid() {
            Ok(())
        } else {
            Err(GameError::UnknownPlayer { player })
        }
    }

    pub(crate) fn ensure_active(&self, player: PlayerId) -> GameResult<()> {
        self.ensure_player(player)?;
        if player != self.state.active_player {
            return Err(GameError::NotActivePlayer { player });
        }
        Ok(())
    }

    /// Game running, `player` active, phase Main.
    pub(crate) fn ensure_main_phase(&self, player: PlayerId, action: &'static str) -> GameResult<()> {
        self.ensure_in_progress()?;
        self.ensure_active(player)?;
        if self.state.phase != Phase::Main {
            return Err(GameError::WrongPhase { action, phase: self.state.phase });
        }
        Ok(())
    }

    pub(crate) fn require_in_zone(&self, card: EntityId, player: PlayerId, zone: Zone) -> GameResult<()> {
        if self.state.zones.is_in(card, player, zone) {
            Ok(())
        } else {
            Err(GameError::CardNotInZone { card, player, zone })
        }
    }

    /// Definition of a card the caller named, checking its kind.
    pub(crate) fn require_kind(&self, card: EntityId, expected: CardKind) -> GameResult<&CardDefinition> {
        let definition = self
            .definition_of(card)
            .ok_or(GameError::UnknownCard { card })?;
        if definition.kind != expected {
            return Err(GameError::WrongCardKind { card, expected, actual: definition.kind });
        }
        Ok(definition)
    }

    // === Movement ===

    /// Move a card to the top of another of its owner's zones.
    ///
    /// Runtime state is wiped whenever the card enters or leaves the field
    /// or resource zone, and a card leaving the graveyard closes any burst
    /// window it had. Returns the zone it left.
    pub(crate) fn relocate(&mut self, card: EntityId, to: Zone) -> Option<Zone> {
        let from = self.state.zones.move_card(card, to, ZonePosition::Top)?;
        if from != to && (from.tracks_instance_state() || to.tracks_instance_state()) {
            if let Some(instance) = self.state.card_mut(card) {
                instance.reset();
            }
        }
        if from == Zone::Graveyard && to != Zone::Graveyard {
            self.state.pending_bursts.retain(|burst| burst.card != card);
        }
        Some(from)
    }
}

impl std::fmt::Debug for GameEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameEngine")
            .field("status", &self.state.status)
            .field("turn", &self.state.turn)
            .field("phase", &self.state.phase)
            .field("active_player", &self.state.active_player)
            .field("cards", &self.registry.len())
            .field("log", &self.log.len())
            .finish()
    }
}
