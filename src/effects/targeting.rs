//! Target specification and selection.
//!
//! `TargetSpec` describes targets on the card; `TargetSelector` turns it
//! into concrete targets against the state at the moment the effect
//! resolves, so anything that changed earlier in the same resolution is
//! taken into account.

use serde::{Deserialize, Serialize};

use crate::core::{EntityId, GameState, PlayerId};
use crate::zones::Zone;

/// How an effect picks its targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetSpec {
    /// The source card itself while on the field; for player-only effects,
    /// its controller.
    SelfCard,
    Opponent,
    /// The source card's controller.
    Controller,
    AllFriendly,
    AllEnemy,
    /// Every field card, player 0's first.
    AllCreatures,
    /// Whatever the caller named when playing the card.
    Explicit,
}

/// What kinds of thing an effect can affect.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TargetScope {
    pub players: bool,
    pub field: bool,
    pub graveyard: bool,
}

impl TargetScope {
    pub const NONE: Self = Self { players: false, field: false, graveyard: false };
    pub const PLAYERS: Self = Self { players: true, field: false, graveyard: false };
    pub const FIELD: Self = Self { players: false, field: true, graveyard: false };
    pub const PLAYERS_AND_FIELD: Self = Self { players: true, field: true, graveyard: false };
    pub const FIELD_AND_GRAVEYARD: Self = Self { players: false, field: true, graveyard: true };
}

/// A resolved target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Target {
    Player(PlayerId),
    Card(EntityId),
}

/// Resolves `TargetSpec`s into concrete targets.
pub struct TargetSelector;

impl TargetSelector {
    /// Concrete targets for one effect resolution.
    #[must_use]
    pub fn select(
        spec: TargetSpec,
        scope: TargetScope,
        state: &GameState,
        source: EntityId,
        controller: PlayerId,
        explicit: &[EntityId],
    ) -> Vec<Target> {
        let opponent = controller.opponent();
        let field = |player: PlayerId| {
            state
                .zones
                .cards(player, Zone::Field)
                .iter()
                .map(|&id| Target::Card(id))
                .collect::<Vec<_>>()
        };

        match spec {
            TargetSpec::SelfCard if scope.field && state.is_on_field(source) => {
                vec![Target::Card(source)]
            }
            TargetSpec::SelfCard | TargetSpec::Controller if scope.players => {
                vec![Target::Player(controller)]
            }
            TargetSpec::Opponent if scope.players => vec![Target::Player(opponent)],
            TargetSpec::AllFriendly if scope.field => field(controller),
            TargetSpec::AllEnemy if scope.field => field(opponent),
            TargetSpec::AllCreatures if scope.field => {
                PlayerId::both().flat_map(field).collect()
            }
            TargetSpec::Explicit => explicit
                .iter()
                .filter(|&&id| Self::is_legal(state, scope, id))
                .map(|&id| match id.as_player() {
                    Some(player) => Target::Player(player),
                    None => Target::Card(id),
                })
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Whether an explicit id is something an effect with `scope` can affect.
    #[must_use]
    pub fn is_legal(state: &GameState, scope: TargetScope, id: EntityId) -> bool {
        if let Some(player) = id.as_player() {
            return scope.players && player.is_valid();
        }
        match state.zones.zone_of(id) {
            Some(Zone::Field) => scope.field,
            Some(Zone::Graveyard) => scope.graveyard,
            _ => false,
        }
    }
}
