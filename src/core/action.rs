//! Caller actions and action history.
//!
//! Every method on the engine's public surface has an `Action` variant, so
//! a front end, a script or a replay can drive a game through
//! `GameEngine::apply` alone. Accepted actions are appended to
//! `GameState::history` as `ActionRecord`s.

use serde::{Deserialize, Serialize};

use super::entity::EntityId;
use super::player::PlayerId;

/// One blocker assignment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Block {
    pub blocker: EntityId,
    pub attacker: EntityId,
}

impl Block {
    #[must_use]
    pub const fn new(blocker: EntityId, attacker: EntityId) -> Self {
        Self { blocker, attacker }
    }
}

/// A caller-driven game action.
///
/// Externally tagged so snapshots can carry history through non-self-describing
/// formats.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    DrawCard { count: usize },
    PlayResource { card: EntityId },
    SummonFamiliar { card: EntityId, azoth: Vec<EntityId> },
    TributeSummon { card: EntityId, tributes: Vec<EntityId>, azoth: Vec<EntityId> },
    CastSpell { card: EntityId, azoth: Vec<EntityId>, targets: Vec<EntityId> },
    ActivateBurst { card: EntityId, targets: Vec<EntityId> },
    ClaimBurst { card: EntityId },
    DeclareAttackers { attackers: Vec<EntityId> },
    DeclareBlockers { blocks: Vec<Block> },
    ResolveCombat,
    EndPhase,
    EndTurn,
    Concede,
}

impl Action {
    /// Short name used in logs.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Action::DrawCard { .. } => "draw_card",
            Action::PlayResource { .. } => "play_resource",
            Action::SummonFamiliar { .. } => "summon_familiar",
            Action::TributeSummon { .. } => "tribute_summon",
            Action::CastSpell { .. } => "cast_spell",
            Action::ActivateBurst { .. } => "activate_burst",
            Action::ClaimBurst { .. } => "claim_burst",
            Action::DeclareAttackers { .. } => "declare_attackers",
            Action::DeclareBlockers { .. } => "declare_blockers",
            Action::ResolveCombat => "resolve_combat",
            Action::EndPhase => "end_phase",
            Action::EndTurn => "end_turn",
            Action::Concede => "concede",
        }
    }
}

/// An accepted action with context.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    pub player: PlayerId,
    pub action: Action,
    pub turn: u32,
    /// Position in the game's history, starting at 0.
    pub sequence: u32,
}
