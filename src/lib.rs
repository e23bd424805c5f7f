//! # konivrer-engine
//!
//! Rules engine for the KONIVRER two-player card game.
//!
//! ## Design Principles
//!
//! 1. **Validate, then mutate**: an illegal action returns a `GameError` and
//!    leaves the game untouched.
//!
//! 2. **Effects are data**: card abilities are `CardEffect` values resolved
//!    by one dispatcher, never code keyed on card names.
//!
//! 3. **Deterministic**: the same seed, decks and actions always produce the
//!    same game, and a snapshot resumes it exactly.
//!
//! ## Modules
//!
//! - `core`: entity IDs, players, state, actions, RNG, options, errors
//! - `cards`: card definitions, elements and costs, instances, registry
//! - `zones`: per-player zones and card movement
//! - `azoth`: resource payments
//! - `effects`: effect definitions, targeting, the effect dispatcher
//! - `triggers`: trigger points and effect conditions
//! - `events`: typed events, subscriptions, the game log
//! - `rules`: the `GameEngine`, phases, card play, combat, life cards

pub mod core;
pub mod cards;
pub mod zones;
pub mod azoth;
pub mod effects;
pub mod triggers;
pub mod events;
pub mod rules;

// Re-export commonly used types
pub use crate::core::{
    Action, ActionRecord, Block, ConfigError, EntityId, GameError, GameOptions, GameOutcome,
    GameResult, GameState, GameStatus, LifeLossRule, LossReason, PlayerId, SnapshotError,
};

pub use crate::cards::{AzothSupply, CardDefinition, CardId, CardKind, CardRegistry, Cost, Element};

pub use crate::zones::Zone;

pub use crate::effects::{Amount, CardEffect, EffectKind, TargetSpec};

pub use crate::triggers::{Condition, TriggerKind};

pub use crate::events::{EventKind, GameEvent, ListenerId, LogEntry};

pub use crate::rules::{GameEngine, GameSnapshot, Phase, PlayerSetup};
