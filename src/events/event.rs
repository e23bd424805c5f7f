//! Observable game events.
//!
//! Events carry data only; observers cannot reach back into the engine
//! through them. Each variant has a matching [`EventKind`] used as the
//! subscription key.

use serde::{Deserialize, Serialize};

use crate::core::{Block, EntityId, LossReason, PlayerId};
use crate::rules::Phase;
use crate::zones::Zone;

use super::log::LogEntry;

/// Something observable happened.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    GameInitialized { first_player: PlayerId },
    TurnStarted { turn: u32, player: PlayerId },
    PhaseChanged { phase: Phase, player: PlayerId },
    CardsDrawn { player: PlayerId, cards: Vec<EntityId> },
    ResourcePlayed { player: PlayerId, card: EntityId },
    FamiliarSummoned {
        player: PlayerId,
        card: EntityId,
        tributes: Vec<EntityId>,
        counters: u32,
    },
    SpellCast { player: PlayerId, card: EntityId, targets: Vec<EntityId> },
    BurstActivated { player: PlayerId, card: EntityId, targets: Vec<EntityId> },
    AttackersDeclared { player: PlayerId, attackers: Vec<EntityId> },
    BlockersDeclared { player: PlayerId, blocks: Vec<Block> },
    /// Life cards lost, in removal order.
    PlayerDamaged {
        player: PlayerId,
        amount: u32,
        lost: Vec<EntityId>,
        remaining: usize,
    },
    CardDestroyed { player: PlayerId, card: EntityId },
    CardBanished { player: PlayerId, card: EntityId, from: Zone },
    /// `card` is `None` when life cards were restored to a player.
    CardHealed { player: PlayerId, card: Option<EntityId>, amount: u32 },
    GameOver { winner: PlayerId, loser: PlayerId, reason: LossReason },
    Log(LogEntry),
}

/// Subscription key for [`GameEvent`] variants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    GameInitialized,
    TurnStarted,
    PhaseChanged,
    CardsDrawn,
    ResourcePlayed,
    FamiliarSummoned,
    SpellCast,
    BurstActivated,
    AttackersDeclared,
    BlockersDeclared,
    PlayerDamaged,
    CardDestroyed,
    CardBanished,
    CardHealed,
    GameOver,
    Log,
}

impl GameEvent {
    #[must_use]
    pub fn kind(&self) -> EventKind {
        match self {
            GameEvent::GameInitialized { .. } => EventKind::GameInitialized,
            GameEvent::TurnStarted { .. } => EventKind::TurnStarted,
            GameEvent::PhaseChanged { .. } => EventKind::PhaseChanged,
            GameEvent::CardsDrawn { .. } => EventKind::CardsDrawn,
            GameEvent::ResourcePlayed { .. } => EventKind::ResourcePlayed,
            GameEvent::FamiliarSummoned { .. } => EventKind::FamiliarSummoned,
            GameEvent::SpellCast { .. } => EventKind::SpellCast,
            GameEvent::BurstActivated { .. } => EventKind::BurstActivated,
            GameEvent::AttackersDeclared { .. } => EventKind::AttackersDeclared,
            GameEvent::BlockersDeclared { .. } => EventKind::BlockersDeclared,
            GameEvent::PlayerDamaged { .. } => EventKind::PlayerDamaged,
            GameEvent::CardDestroyed { .. } => EventKind::CardDestroyed,
            GameEvent::CardBanished { .. } => EventKind::CardBanished,
            GameEvent::CardHealed { .. } => EventKind::CardHealed,
            GameEvent::GameOver { .. } => EventKind::GameOver,
            GameEvent::Log(_) => EventKind::Log,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_matches_variant() {
        let event = GameEvent::CardsDrawn { player: PlayerId::new(0), cards: vec![EntityId(4)] };
        assert_eq!(event.kind(), EventKind::CardsDrawn);

        let over = GameEvent::GameOver {
            winner: PlayerId::new(1),
            loser: PlayerId::new(0),
            reason: LossReason::DeckOut,
        };
        assert_eq!(over.kind(), EventKind::GameOver);
    }

    #[test]
    fn test_event_json_tag() {
        let event = GameEvent::PhaseChanged { phase: Phase::Combat, player: PlayerId::new(1) };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "phase_changed");
        assert_eq!(json["phase"], "Combat");
    }
}
