//! Azoth payment planning.
//!
//! Every untapped card in a player's resource zone supplies one azoth per
//! turn. A payment names the exact cards to tap; the ledger checks that
//! those cards can cover the cost and works out which card pays which part
//! of it.
//!
//! Element requirements are matched to sources with augmenting paths, so a
//! dual-element card is never spent on the wrong requirement when another
//! assignment would cover everything. Sources left after the elemental part
//! pay generic cost; any beyond that are excess.

use rustc_hash::FxHashSet;
use smallvec::SmallVec;

use crate::cards::{AzothSupply, CardKind, CardRegistry, Cost, Element, ElementSet};
use crate::core::{EntityId, GameState, PaymentError, PlayerId};
use crate::zones::Zone;

/// One card tapped as part of a payment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlannedTap {
    pub card: EntityId,
    /// Element this card pays, or its first element for generic cost.
    pub element: Element,
    /// Lock `element` in as this card's only element from now on. Only set
    /// when the card paid an element-typed unit; generic payment is no choice.
    pub commits: bool,
}

/// A validated payment.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PaymentPlan {
    pub taps: Vec<PlannedTap>,
    /// Azoth named beyond the cost total.
    pub excess: u32,
}

impl PaymentPlan {
    #[must_use]
    pub fn len(&self) -> usize {
        self.taps.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.taps.is_empty()
    }
}

/// Azoth accounting for both players.
pub struct AzothLedger;

impl AzothLedger {
    /// Check that `named` can pay `cost` for `player` and plan the taps.
    ///
    /// Nothing is mutated; call [`AzothLedger::execute`] with the plan once
    /// every other check of the action has passed.
    pub fn plan(
        state: &GameState,
        registry: &CardRegistry,
        player: PlayerId,
        cost: &Cost,
        named: &[EntityId],
    ) -> Result<PaymentPlan, PaymentError> {
        let mut seen = FxHashSet::default();
        let mut supplies: Vec<(ElementSet, bool)> = Vec::with_capacity(named.len());

        for &card in named {
            if !seen.insert(card) {
                return Err(PaymentError::DuplicateSource { card });
            }
            if !state.zones.is_in(card, player, Zone::ResourceZone) {
                return Err(PaymentError::NotInResourceZone { card });
            }
            let instance = state
                .card(card)
                .ok_or(PaymentError::NotInResourceZone { card })?;
            if instance.tapped {
                return Err(PaymentError::Tapped { card });
            }
            let definition = registry
                .get(instance.card_id)
                .ok_or(PaymentError::NotInResourceZone { card })?;

            let supply = match instance.committed_element {
                Some(element) => SmallVec::from_slice(&[element]),
                None => definition.elements.clone(),
            };
            let commits = definition.supply == AzothSupply::Committed
                && instance.committed_element.is_none();
            supplies.push((supply, commits));
        }

        let required = cost.total();
        let provided = named.len() as u32;
        if provided < required {
            return Err(PaymentError::Insufficient { required, provided });
        }

        let units: Vec<Element> = cost.element_units().collect();
        let owner = match_units(&units, &supplies)?;

        let taps = named
            .iter()
            .zip(&supplies)
            .zip(&owner)
            .map(|((&card, (supply, commits)), unit)| PlannedTap {
                card,
                element: unit
                    .map(|u| units[u])
                    .or_else(|| supply.first().copied())
                    .unwrap_or(Element::Generic),
                commits: *commits && unit.is_some(),
            })
            .collect();

        Ok(PaymentPlan { taps, excess: provided - required })
    }

    /// Tap the planned cards and spend the player's available azoth.
    pub fn execute(state: &mut GameState, player: PlayerId, plan: &PaymentPlan) {
        for tap in &plan.taps {
            if let Some(card) = state.card_mut(tap.card) {
                card.tapped = true;
                if tap.commits {
                    card.committed_element = Some(tap.element);
                }
            }
        }
        let available = &mut state.players[player].azoth_available;
        *available = available.saturating_sub(plan.taps.len() as u32);
    }

    /// Untapped resource cards a player could tap right now, bottom first.
    #[must_use]
    pub fn untapped(state: &GameState, player: PlayerId) -> Vec<EntityId> {
        state
            .cards_in(player, Zone::ResourceZone)
            .filter(|card| !card.tapped && card.kind == CardKind::Resource)
            .map(|card| card.entity_id)
            .collect()
    }

    /// How many untapped sources can produce each element.
    ///
    /// A dual-element card counts toward both of its elements.
    #[must_use]
    pub fn available_supply(
        state: &GameState,
        registry: &CardRegistry,
        player: PlayerId,
    ) -> Vec<(Element, u32)> {
        let mut counts = [0u32; Element::ALL.len()];
        for card in state.cards_in(player, Zone::ResourceZone).filter(|c| !c.tapped) {
            let elements: ElementSet = match card.committed_element {
                Some(element) => SmallVec::from_slice(&[element]),
                None => registry
                    .get(card.card_id)
                    .map(|def| def.elements.clone())
                    .unwrap_or_default(),
            };
            for element in elements {
                if let Some(i) = Element::ALL.iter().position(|e| *e == element) {
                    counts[i] += 1;
                }
            }
        }
        Element::ALL
            .iter()
            .zip(counts)
            .filter(|(_, n)| *n > 0)
            .map(|(e, n)| (*e, n))
            .collect()
    }

    /// Whether every untapped source together could pay `cost`.
    #[must_use]
    pub fn can_afford(
        state: &GameState,
        registry: &CardRegistry,
        player: PlayerId,
        cost: &Cost,
    ) -> bool {
        let sources = Self::untapped(state, player);
        Self::plan(state, registry, player, cost, &sources).is_ok()
    }
}

/// Assign each elemental unit to a distinct source. Returns, per source,
/// the index of the unit it pays (if any).
fn match_units(
    units: &[Element],
    supplies: &[(ElementSet, bool)],
) -> Result<Vec<Option<usize>>, PaymentError> {
    let mut owner: Vec<Option<usize>> = vec![None; supplies.len()];

    for (unit, &element) in units.iter().enumerate() {
        let mut visited = vec![false; supplies.len()];
        if !augment(unit, units, supplies, &mut visited, &mut owner) {
            return Err(PaymentError::ElementShortfall { element });
        }
    }

    Ok(owner)
}

fn augment(
    unit: usize,
    units: &[Element],
    supplies: &[(ElementSet, bool)],
    visited: &mut [bool],
    owner: &mut [Option<usize>],
) -> bool {
    for source in 0..supplies.len() {
        if visited[source] || !supplies[source].0.contains(&units[unit]) {
            continue;
        }
        visited[source] = true;
        let free = match owner[source] {
            None => true,
            Some(previous) => augment(previous, units, supplies, visited, owner),
        };
        if free {
            owner[source] = Some(unit);
            return true;
        }
    }
    false
}
