//! Finding effects that respond to a trigger.
//!
//! Scans read the card registry and the current zones and return a snapshot
//! of matching effects in resolution order. The snapshot is taken when the
//! trigger is raised; the dispatcher re-checks each source before resolving.

use crate::cards::CardRegistry;
use crate::core::{EntityId, GameState, PlayerId};
use crate::effects::CardEffect;
use crate::zones::Zone;

use super::event::{TriggerKind, TriggerScope};

/// An effect queued for resolution by a raised trigger.
#[derive(Clone, Debug, PartialEq)]
pub struct TriggeredEffect {
    pub source: EntityId,
    pub controller: PlayerId,
    pub trigger: TriggerKind,
    pub effect: CardEffect,
}

/// Collect effects for a trigger.
///
/// Global triggers visit player 0 then player 1; for each, field cards in
/// field order, then the flag (when `include_flags`). Card triggers only
/// visit `subject`.
#[must_use]
pub fn collect_triggers(
    state: &GameState,
    registry: &CardRegistry,
    trigger: TriggerKind,
    subject: Option<EntityId>,
    include_flags: bool,
) -> Vec<TriggeredEffect> {
    let mut found = Vec::new();

    match trigger.scope() {
        TriggerScope::Global => {
            for player in PlayerId::both() {
                let sources = state.zones.cards(player, Zone::Field).iter();
                let flags: &[EntityId] = if include_flags {
                    state.zones.cards(player, Zone::Flag)
                } else {
                    &[]
                };
                for &source in sources.chain(flags.iter()) {
                    push_matching(state, registry, trigger, source, &mut found);
                }
            }
        }
        TriggerScope::Card => {
            if let Some(source) = subject {
                push_matching(state, registry, trigger, source, &mut found);
            }
        }
    }

    found
}

fn push_matching(
    state: &GameState,
    registry: &CardRegistry,
    trigger: TriggerKind,
    source: EntityId,
    found: &mut Vec<TriggeredEffect>,
) {
    let Some(instance) = state.card(source) else {
        return;
    };
    let Some(definition) = registry.get(instance.card_id) else {
        return;
    };
    found.extend(
        definition
            .effects
            .iter()
            .filter(|effect| effect.trigger == trigger)
            .map(|effect| TriggeredEffect {
                source,
                controller: instance.owner,
                trigger,
                effect: effect.clone(),
            }),
    );
}
