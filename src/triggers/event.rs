//! Trigger tags.
//!
//! A `TriggerKind` names a point in the game where card effects may fire.
//! Global triggers consult every card on both fields plus the flags;
//! card triggers only consult the card the event happened to.

use serde::{Deserialize, Serialize};

/// Which cards a trigger consults when raised.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TriggerScope {
    /// Every field card and flag, both players.
    Global,
    /// Only the card the event is about.
    Card,
}

/// When a card effect fires.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerKind {
    TurnStart,
    TurnEnd,
    MainPhaseStart,
    CombatPhaseStart,
    PostCombatPhaseStart,
    AfterCombat,
    OnSummon,
    OnAttack,
    OnBlock,
    BeforeDamage,
    OnDestroy,
    /// Spells and bursts: resolves when the card is played.
    OnPlay,
}

impl TriggerKind {
    #[must_use]
    pub const fn scope(self) -> TriggerScope {
        match self {
            TriggerKind::TurnStart
            | TriggerKind::TurnEnd
            | TriggerKind::MainPhaseStart
            | TriggerKind::CombatPhaseStart
            | TriggerKind::PostCombatPhaseStart
            | TriggerKind::AfterCombat => TriggerScope::Global,
            TriggerKind::OnSummon
            | TriggerKind::OnAttack
            | TriggerKind::OnBlock
            | TriggerKind::BeforeDamage
            | TriggerKind::OnDestroy
            | TriggerKind::OnPlay => TriggerScope::Card,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            TriggerKind::TurnStart => "turnStart",
            TriggerKind::TurnEnd => "turnEnd",
            TriggerKind::MainPhaseStart => "mainPhaseStart",
            TriggerKind::CombatPhaseStart => "combatPhaseStart",
            TriggerKind::PostCombatPhaseStart => "postCombatPhaseStart",
            TriggerKind::AfterCombat => "afterCombat",
            TriggerKind::OnSummon => "onSummon",
            TriggerKind::OnAttack => "onAttack",
            TriggerKind::OnBlock => "onBlock",
            TriggerKind::BeforeDamage => "beforeDamage",
            TriggerKind::OnDestroy => "onDestroy",
            TriggerKind::OnPlay => "onPlay",
        }
    }
}

impl std::fmt::Display for TriggerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scopes() {
        assert_eq!(TriggerKind::TurnStart.scope(), TriggerScope::Global);
        assert_eq!(TriggerKind::AfterCombat.scope(), TriggerScope::Global);
        assert_eq!(TriggerKind::OnDestroy.scope(), TriggerScope::Card);
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&TriggerKind::BeforeDamage).unwrap();
        assert_eq!(json, "\"before_damage\"");
        assert_eq!(TriggerKind::BeforeDamage.to_string(), "beforeDamage");
    }
}
