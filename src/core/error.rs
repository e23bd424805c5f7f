//! Error types.
//!
//! Three families, matching how callers react to them:
//!
//! - [`GameError`]: an illegal action. Recoverable; the engine state is left
//!   exactly as it was before the call.
//! - [`ConfigError`]: bad options, card data, or player setup. Raised before
//!   a game starts.
//! - [`SnapshotError`]: a persisted snapshot could not be encoded or decoded.
//!
//! Losing the game is not an error; it is reported through the game state
//! and the `GameOver` event.

use thiserror::Error;

use crate::cards::{CardId, CardKind, Element};
use crate::rules::Phase;
use crate::zones::Zone;

use super::entity::EntityId;
use super::player::PlayerId;

/// Why a caller-named azoth payment was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaymentError {
    #[error("{card} was named more than once")]
    DuplicateSource { card: EntityId },

    #[error("{card} is not in the payer's resource zone")]
    NotInResourceZone { card: EntityId },

    #[error("{card} is already tapped")]
    Tapped { card: EntityId },

    #[error("cost needs {required} azoth but {provided} were named")]
    Insufficient { required: u32, provided: u32 },

    #[error("named azoth cannot cover the {element} requirement")]
    ElementShortfall { element: Element },
}

/// An action the rules do not allow in the current state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("no game is in progress")]
    NotStarted,

    #[error("the game has already started")]
    AlreadyStarted,

    #[error("the game is over")]
    GameOver,

    #[error("{action} is not allowed during the {phase} phase")]
    WrongPhase { action: &'static str, phase: Phase },

    #[error("{player} is not seated in this game")]
    UnknownPlayer { player: PlayerId },

    #[error("{player} is not the active player")]
    NotActivePlayer { player: PlayerId },

    #[error("the active player cannot declare blockers")]
    ActivePlayerCannotBlock,

    #[error("{card} is not in {player}'s {zone}")]
    CardNotInZone { card: EntityId, player: PlayerId, zone: Zone },

    #[error("{card} is a {actual}, expected a {expected}")]
    WrongCardKind { card: EntityId, expected: CardKind, actual: CardKind },

    #[error("{card} does not exist")]
    UnknownCard { card: EntityId },

    #[error("{player}'s {zone} is full ({max} cards)")]
    ZoneFull { player: PlayerId, zone: Zone, max: usize },

    #[error("already played {max} azoth this turn")]
    AzothLimitReached { max: u32 },

    #[error("invalid payment: {0}")]
    Payment(#[from] PaymentError),

    #[error("{card} requires at least one target")]
    MissingTargets { card: EntityId },

    #[error("{target} is not a legal target")]
    InvalidTarget { target: EntityId },

    #[error("{card} is tapped")]
    CardTapped { card: EntityId },

    #[error("{card} has summoning sickness")]
    SummoningSick { card: EntityId },

    #[error("{card} was named more than once")]
    DuplicateCard { card: EntityId },

    #[error("attackers were already declared this combat")]
    AttackersAlreadyDeclared,

    #[error("no attackers have been declared")]
    NoAttackersDeclared,

    #[error("blockers were already declared this combat")]
    BlockersAlreadyDeclared,

    #[error("{card} is not attacking")]
    NotAttacking { card: EntityId },

    #[error("{card} is already blocked")]
    AlreadyBlocked { card: EntityId },

    #[error("a tribute summon needs at least one tribute")]
    NoTributes,

    #[error("{feature} is disabled for this game")]
    FeatureDisabled { feature: &'static str },

    #[error("{card} has no open burst window for {player}")]
    NoBurstWindow { card: EntityId, player: PlayerId },
}

/// Invalid setup, raised before any game starts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("a game needs exactly 2 players, got {count}")]
    WrongPlayerCount { count: usize },

    #[error("{player}'s deck has {size} cards, minimum is {min}")]
    DeckTooSmall { player: String, size: usize, min: usize },

    #[error("unknown card definition {card}")]
    UnknownCardId { card: CardId },

    #[error("card definition {card} registered twice")]
    DuplicateDefinition { card: CardId },

    #[error("card definition {card} is invalid: {reason}")]
    InvalidDefinition { card: CardId, reason: String },

    #[error("invalid option {field}: {reason}")]
    InvalidOption { field: &'static str, reason: String },

    #[error("this engine already holds a game")]
    AlreadyInitialized,
}

/// A snapshot could not be encoded or decoded.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("snapshot encoding failed: {0}")]
    Encode(#[source] bincode::Error),

    #[error("snapshot decoding failed: {0}")]
    Decode(#[source] bincode::Error),
}

/// Shorthand for engine results.
pub type GameResult<T> = Result<T, GameError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payment_error_converts() {
        let err: GameError = PaymentError::Insufficient { required: 3, provided: 1 }.into();
        assert_eq!(
            err.to_string(),
            "invalid payment: cost needs 3 azoth but 1 were named"
        );
    }

    #[test]
    fn test_phase_error_message() {
        let err = GameError::WrongPhase { action: "summon", phase: Phase::Combat };
        assert_eq!(err.to_string(), "summon is not allowed during the Combat phase");
    }

    #[test]
    fn test_config_error_message() {
        let err = ConfigError::DeckTooSmall { player: "alice".into(), size: 12, min: 40 };
        assert!(err.to_string().contains("12 cards"));
    }
}
