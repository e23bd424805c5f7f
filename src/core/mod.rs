//! Core engine types: entities, players, state, actions, RNG, configuration, errors.

pub mod entity;
pub mod player;
pub mod rng;
pub mod config;
pub mod action;
pub mod state;
pub mod error;

pub use entity::EntityId;
pub use player::{PlayerId, PlayerMap, PLAYER_COUNT};
pub use rng::{GameRng, GameRngState};
pub use config::{GameOptions, LifeLossRule};
pub use action::{Action, ActionRecord, Block};
pub use state::{
    CombatState, GameOutcome, GameState, GameStatus, LossReason, PendingBurst, PlayerState,
};
pub use error::{ConfigError, GameError, GameResult, PaymentError, SnapshotError};
