//! Property tests: random action sequences against engine invariants.

mod common;

use common::*;
use konivrer_engine::azoth::AzothLedger;
use konivrer_engine::cards::{
    AzothSupply, CardDefinition, CardId, CardInstance, CardKind, CardRegistry, Cost, Element,
};
use konivrer_engine::core::{Action, Block, EntityId, GameOptions, GameState, PlayerId};
use konivrer_engine::rules::{GameEngine, PlayerSetup};
use konivrer_engine::zones::Zone;
use proptest::prelude::*;

fn mixed_deck() -> Vec<CardId> {
    let mut cards = Vec::new();
    for (card, copies) in [
        (EMBER_WELL, 14),
        (TIDE_POOL, 4),
        (ASH_HOUND, 4),
        (CINDER_FOX, 4),
        (SHELL_CRAB, 4),
        (HILL_GIANT, 2),
        (STONE_GOLEM, 1),
        (GRAVE_MOTH, 2),
        (SPARK, 3),
        (INSIGHT, 2),
        (MENDING, 2),
        (BACKFIRE, 2),
        (WAR_BANNER, 1),
    ] {
        cards.extend(std::iter::repeat(card).take(copies));
    }
    cards
}

fn new_game(seed: u64) -> GameEngine {
    let mut engine = GameEngine::new(GameOptions::default().with_seed(seed), registry()).unwrap();
    engine
        .init_game(vec![
            PlayerSetup::new("p0", "Alice", mixed_deck()),
            PlayerSetup::new("p1", "Bob", mixed_deck()),
        ])
        .unwrap();
    engine.start_game().unwrap();
    engine
}

fn pick(cards: &[EntityId], index: u8) -> Option<EntityId> {
    if cards.is_empty() {
        None
    } else {
        Some(cards[index as usize % cards.len()])
    }
}

fn field_of(engine: &GameEngine, player: PlayerId) -> Vec<EntityId> {
    engine.game_state().zones.cards(player, Zone::Field).to_vec()
}

/// Turn a random choice into a plausible action for the current state.
fn choose(engine: &GameEngine, choice: u8, index: u8) -> Option<(PlayerId, Action)> {
    let state = engine.game_state();
    let active = state.active_player;
    let defender = active.opponent();
    let hand = state.zones.cards(active, Zone::Hand).to_vec();
    let azoth = AzothLedger::untapped(state, active);

    let action = match choice {
        0 => Action::PlayResource { card: pick(&hand, index)? },
        1 => Action::SummonFamiliar { card: pick(&hand, index)?, azoth },
        2 => Action::CastSpell {
            card: pick(&hand, index)?,
            azoth,
            targets: vec![EntityId::player(defender)],
        },
        3 => {
            let ready = state
                .cards_in(active, Zone::Field)
                .filter(|c| c.can_attack())
                .map(|c| c.entity_id)
                .collect();
            Action::DeclareAttackers { attackers: ready }
        }
        4 => {
            let blocker = pick(&field_of(engine, defender), index)?;
            let attacker = pick(&state.combat.attackers, index)?;
            return Some((defender, Action::DeclareBlockers { blocks: vec![Block::new(blocker, attacker)] }));
        }
        5 => Action::EndPhase,
        6 => Action::EndTurn,
        7 => {
            let owner = PlayerId::new(index % 2);
            let windows = engine.burst_windows(owner);
            let card = pick(&windows, index)?;
            return Some((owner, Action::ActivateBurst { card, targets: Vec::new() }));
        }
        _ => Action::ClaimBurst { card: pick(&engine.burst_windows(defender), index)? },
    };
    let player = if matches!(action, Action::ClaimBurst { .. }) { defender } else { active };
    Some((player, action))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn prop_invariants_hold_under_random_play(
        seed in any::<u64>(),
        steps in prop::collection::vec((0u8..9, any::<u8>()), 1..120),
    ) {
        let mut engine = new_game(seed);

        for (choice, index) in steps {
            if engine.game_state().game_over {
                break;
            }
            let Some((player, action)) = choose(&engine, choice, index) else {
                continue;
            };
            let before = engine.game_state().clone();
            let log_len = engine.game_log().len();

            if engine.apply(player, action).is_err() {
                // Rejected actions change nothing.
                prop_assert_eq!(engine.game_state(), &before);
                prop_assert_eq!(engine.game_log().len(), log_len);
            }

            let state = engine.game_state();
            prop_assert!(state.conservation_holds());
            for p in PlayerId::both() {
                prop_assert!(state.zones.len(p, Zone::Field) <= engine.options().max_field_size);
                prop_assert!(state.zones.len(p, Zone::Flag) <= 1);
                prop_assert!(
                    state.players[p].azoth_available as usize
                        <= state.zones.len(p, Zone::ResourceZone)
                );
                prop_assert!(state.players[p].azoth_played_this_turn <= engine.options().max_azoth_per_turn);
                for card in state.cards_in(p, Zone::Field) {
                    prop_assert_eq!(card.kind, CardKind::Familiar);
                    prop_assert!(card.health() > 0);
                }
            }
        }
    }

    #[test]
    fn prop_same_seed_same_game(
        seed in any::<u64>(),
        steps in prop::collection::vec((0u8..9, any::<u8>()), 1..60),
    ) {
        let mut a = new_game(seed);
        let mut b = new_game(seed);

        for (choice, index) in steps {
            if let Some((player, action)) = choose(&a, choice, index) {
                let left = a.apply(player, action.clone());
                let right = b.apply(player, action);
                prop_assert_eq!(left, right);
            }
        }
        prop_assert_eq!(a.game_state(), b.game_state());
    }
}

const STEAM_VENT: CardId = CardId::new(50);
const PRISM_SHARD: CardId = CardId::new(51);
const QUARRY: CardId = CardId::new(52);
const TEST_BEAST: CardId = CardId::new(60);

const SOURCES: [CardId; 5] = [EMBER_WELL, TIDE_POOL, STEAM_VENT, PRISM_SHARD, QUARRY];

/// Fixture cards plus multi-element resources and a familiar costing `cost`.
fn payment_registry(cost: &Cost) -> CardRegistry {
    let mut registry = registry();
    let extra = [
        CardDefinition::new(STEAM_VENT, "Steam Vent", CardKind::Resource)
            .with_element(Element::Fire)
            .with_element(Element::Water),
        CardDefinition::new(PRISM_SHARD, "Prism Shard", CardKind::Resource)
            .with_element(Element::Air)
            .with_element(Element::Earth)
            .with_supply(AzothSupply::Committed),
        CardDefinition::new(QUARRY, "Quarry", CardKind::Resource).with_element(Element::Earth),
        CardDefinition::new(TEST_BEAST, "Test Beast", CardKind::Familiar)
            .with_element(Element::Fire)
            .with_cost(cost.clone())
            .with_stats(1, 1),
    ];
    for card in extra {
        registry.register(card).unwrap();
    }
    registry
}

fn cost_strategy() -> impl Strategy<Value = Cost> {
    (0u32..3, 0u32..3, 0u32..2, 0u32..2, 0u32..2).prop_map(|(generic, fire, water, earth, air)| {
        Cost::generic(generic)
            .with(Element::Fire, fire)
            .with(Element::Water, water)
            .with(Element::Earth, earth)
            .with(Element::Air, air)
    })
}

fn sources_strategy() -> impl Strategy<Value = Vec<CardId>> {
    prop::collection::vec(prop::sample::select(SOURCES.to_vec()), 0..=6)
}

/// Exhaustive check: some distinct source covers every element unit and
/// enough sources remain for the rest.
fn coverable(registry: &CardRegistry, sources: &[CardId], cost: &Cost) -> bool {
    fn assign(units: &[Element], supplies: &[Vec<Element>], used: &mut [bool]) -> bool {
        let Some((&unit, rest)) = units.split_first() else {
            return true;
        };
        for i in 0..supplies.len() {
            if !used[i] && supplies[i].contains(&unit) {
                used[i] = true;
                if assign(rest, supplies, used) {
                    return true;
                }
                used[i] = false;
            }
        }
        false
    }

    if sources.len() < cost.total() as usize {
        return false;
    }
    let supplies: Vec<Vec<Element>> =
        sources.iter().map(|id| registry.get(*id).unwrap().elements.to_vec()).collect();
    let units: Vec<Element> = cost.element_units().collect();
    assign(&units, &supplies, &mut vec![false; supplies.len()])
}

/// A started game where P0 holds `Test Beast` and has `sources` in play.
fn game_with_resources(registry: CardRegistry, sources: &[CardId]) -> (GameEngine, EntityId, Vec<EntityId>) {
    let mut deck0 = vec![HILL_GIANT; 4];
    deck0.push(TEST_BEAST);
    deck0.extend_from_slice(sources);
    deck0.resize(40, HILL_GIANT);

    let options = options().with_max_azoth_per_turn(SOURCES.len() as u32 + 1);
    let mut engine = GameEngine::new(options, registry).unwrap();
    engine
        .init_game(vec![
            PlayerSetup::new("p0", "Alice", deck0),
            PlayerSetup::new("p1", "Bob", plain_deck()),
        ])
        .unwrap();
    engine.start_game().unwrap();
    engine.draw_card(P0, sources.len()).unwrap();

    let beast = find(&engine, P0, Zone::Hand, TEST_BEAST);
    let in_hand: Vec<EntityId> = engine
        .game_state()
        .cards_in(P0, Zone::Hand)
        .filter(|c| c.kind == CardKind::Resource)
        .map(|c| c.entity_id)
        .collect();
    for &card in &in_hand {
        engine.play_resource(P0, card).unwrap();
    }
    (engine, beast, in_hand)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn prop_ledger_accepts_exactly_coverable_payments(
        sources in sources_strategy(),
        cost in cost_strategy(),
    ) {
        let registry = payment_registry(&cost);
        let mut state = GameState::new();
        let named: Vec<EntityId> = sources
            .iter()
            .map(|card| {
                let id = state.alloc_entity();
                let def = registry.get(*card).unwrap();
                state.add_card(CardInstance::new(id, def, P0), Zone::ResourceZone);
                id
            })
            .collect();

        let plan = AzothLedger::plan(&state, &registry, P0, &cost, &named);
        prop_assert_eq!(plan.is_ok(), coverable(&registry, &sources, &cost));

        if let Ok(plan) = plan {
            prop_assert_eq!(plan.len(), named.len());
            prop_assert_eq!(plan.excess as usize, named.len() - cost.total() as usize);
            for unit in cost.element_units() {
                let paying = plan.taps.iter().filter(|t| t.element == unit).count();
                prop_assert!(paying as u32 >= cost.amount_of(unit));
            }
        }
    }

    #[test]
    fn prop_summon_agrees_with_coverage(
        sources in sources_strategy(),
        cost in cost_strategy(),
    ) {
        let registry = payment_registry(&cost);
        let expected = coverable(&registry, &sources, &cost);
        let (mut engine, beast, azoth) = game_with_resources(registry, &sources);
        let before = engine.game_state().clone();

        let result = engine.summon_familiar(P0, beast, &azoth);
        prop_assert_eq!(result.is_ok(), expected, "{:?}", result);

        let state = engine.game_state();
        if expected {
            prop_assert!(state.is_on_field(beast));
            prop_assert!(azoth.iter().all(|id| state.card(*id).unwrap().tapped));
            prop_assert_eq!(state.card(beast).unwrap().counters as usize, azoth.len() - cost.total() as usize);
        } else {
            prop_assert_eq!(state, &before);
        }
    }
}
