//! Shared fixtures for integration tests.
//!
//! Decks are built unshuffled so card positions are predictable: the first
//! four cards listed become life cards (the fourth on top), the next five
//! the opening hand, and the rest the draw pile.

#![allow(dead_code)]

use konivrer_engine::cards::{
    CardDefinition, CardId, CardKind, CardRegistry, Cost, Element,
};
use konivrer_engine::core::{EntityId, GameOptions, PlayerId};
use konivrer_engine::effects::{Amount, CardEffect, EffectKind, TargetSpec};
use konivrer_engine::rules::{GameEngine, Phase, PlayerSetup};
use konivrer_engine::triggers::{Condition, TriggerKind};
use konivrer_engine::zones::Zone;

pub const P0: PlayerId = PlayerId::new(0);
pub const P1: PlayerId = PlayerId::new(1);

pub const EMBER_WELL: CardId = CardId::new(1);
pub const TIDE_POOL: CardId = CardId::new(2);
pub const ASH_HOUND: CardId = CardId::new(10);
pub const CINDER_FOX: CardId = CardId::new(11);
pub const SHELL_CRAB: CardId = CardId::new(12);
pub const STONE_GOLEM: CardId = CardId::new(13);
pub const HILL_GIANT: CardId = CardId::new(14);
pub const GRAVE_MOTH: CardId = CardId::new(15);
pub const SPARK: CardId = CardId::new(20);
pub const INSIGHT: CardId = CardId::new(21);
pub const MENDING: CardId = CardId::new(22);
pub const BACKFIRE: CardId = CardId::new(30);
pub const WAR_BANNER: CardId = CardId::new(40);

/// Install a test subscriber; `RUST_LOG=konivrer_engine=debug` shows the game log.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn registry() -> CardRegistry {
    let cards = [
        CardDefinition::new(EMBER_WELL, "Ember Well", CardKind::Resource).with_element(Element::Fire),
        CardDefinition::new(TIDE_POOL, "Tide Pool", CardKind::Resource).with_element(Element::Water),
        CardDefinition::new(ASH_HOUND, "Ash Hound", CardKind::Familiar)
            .with_element(Element::Fire)
            .with_cost(Cost::generic(1))
            .with_stats(1, 1),
        CardDefinition::new(CINDER_FOX, "Cinder Fox", CardKind::Familiar)
            .with_element(Element::Fire)
            .with_cost(Cost::generic(1))
            .with_stats(3, 2),
        CardDefinition::new(SHELL_CRAB, "Shell Crab", CardKind::Familiar)
            .with_element(Element::Water)
            .with_cost(Cost::generic(1))
            .with_stats(2, 3),
        CardDefinition::new(STONE_GOLEM, "Stone Golem", CardKind::Familiar)
            .with_element(Element::Earth)
            .with_cost(Cost::generic(2))
            .with_stats(4, 5),
        CardDefinition::new(HILL_GIANT, "Hill Giant", CardKind::Familiar)
            .with_element(Element::Earth)
            .with_stats(4, 4),
        CardDefinition::new(GRAVE_MOTH, "Grave Moth", CardKind::Familiar)
            .with_element(Element::Dark)
            .with_stats(1, 1)
            .with_effect(CardEffect::new(TriggerKind::OnDestroy, TargetSpec::Controller, EffectKind::draw(1))),
        CardDefinition::new(SPARK, "Spark", CardKind::Spell)
            .with_element(Element::Fire)
            .with_cost(Cost::free().with(Element::Fire, 1))
            .with_effect(CardEffect::new(
                TriggerKind::OnPlay,
                TargetSpec::Explicit,
                EffectKind::Damage { amount: Amount::Scaled { base: 2 } },
            ))
            .requiring_target(),
        CardDefinition::new(INSIGHT, "Insight", CardKind::Spell)
            .with_element(Element::Water)
            .with_effect(CardEffect::new(TriggerKind::OnPlay, TargetSpec::Controller, EffectKind::draw(2))),
        CardDefinition::new(MENDING, "Mending", CardKind::Spell)
            .with_element(Element::Water)
            .with_effect(CardEffect::new(TriggerKind::OnPlay, TargetSpec::Controller, EffectKind::heal(2))),
        CardDefinition::new(BACKFIRE, "Backfire", CardKind::Burst)
            .with_element(Element::Fire)
            .with_effect(CardEffect::new(
                TriggerKind::OnPlay,
                TargetSpec::Opponent,
                EffectKind::Damage { amount: Amount::Scaled { base: 0 } },
            )),
        CardDefinition::new(WAR_BANNER, "War Banner", CardKind::Flag)
            .with_element(Element::Fire)
            .with_effect(
                CardEffect::new(TriggerKind::TurnStart, TargetSpec::AllFriendly, EffectKind::boost(1, 0))
                    .when(Condition::ControllerIsActive),
            ),
    ];
    CardRegistry::from_definitions(cards).expect("test cards are valid")
}

/// A deck with the given life cards and hand, padded with resources to 40.
pub fn deck(life: [CardId; 4], hand: [CardId; 5], draws: &[CardId]) -> Vec<CardId> {
    let mut cards: Vec<CardId> = life.into_iter().chain(hand).chain(draws.iter().copied()).collect();
    while cards.len() < 40 {
        cards.push(EMBER_WELL);
    }
    cards
}

/// Forty resource cards.
pub fn plain_deck() -> Vec<CardId> {
    vec![EMBER_WELL; 40]
}

/// Unshuffled, player 0 first, one azoth per turn.
pub fn options() -> GameOptions {
    GameOptions::default().without_shuffle().with_first_player(P0).with_seed(11)
}

/// An engine with both decks dealt and the game started.
pub fn start(options: GameOptions, deck0: Vec<CardId>, deck1: Vec<CardId>) -> GameEngine {
    init_tracing();
    let mut engine = GameEngine::new(options, registry()).expect("valid options");
    engine
        .init_game(vec![
            PlayerSetup::new("p0", "Alice", deck0),
            PlayerSetup::new("p1", "Bob", deck1),
        ])
        .expect("valid setup");
    engine.start_game().expect("game starts");
    engine
}

/// First card with this definition in a player's zone.
pub fn find(engine: &GameEngine, player: PlayerId, zone: Zone, card: CardId) -> EntityId {
    find_all(engine, player, zone, card)
        .first()
        .copied()
        .unwrap_or_else(|| panic!("{card} not in {player}'s {zone}"))
}

pub fn find_all(engine: &GameEngine, player: PlayerId, zone: Zone, card: CardId) -> Vec<EntityId> {
    engine
        .game_state()
        .cards_in(player, zone)
        .filter(|c| c.card_id == card)
        .map(|c| c.entity_id)
        .collect()
}

/// End phases until `phase` is reached.
pub fn advance_to(engine: &mut GameEngine, phase: Phase) {
    for _ in 0..10 {
        if engine.game_state().phase == phase {
            return;
        }
        engine.end_phase().expect("phase advances");
    }
    panic!("never reached {phase}");
}

/// Play a resource and summon a familiar with it.
pub fn summon_with_resource(engine: &mut GameEngine, player: PlayerId, familiar: CardId) -> EntityId {
    let well = find(engine, player, Zone::Hand, EMBER_WELL);
    engine.play_resource(player, well).expect("resource played");
    let card = find(engine, player, Zone::Hand, familiar);
    engine.summon_familiar(player, card, &[well]).expect("familiar summoned");
    card
}
