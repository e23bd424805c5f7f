//! Combat and life-card integration tests.

mod common;

use common::*;
use konivrer_engine::core::{Block, EntityId, GameError, GameOptions, LifeLossRule, LossReason};
use konivrer_engine::events::{EventKind, GameEvent};
use konivrer_engine::rules::{GameEngine, Phase};
use konivrer_engine::zones::Zone;
use std::cell::RefCell;
use std::rc::Rc;

/// P0 summons a Hill Giant (free, 4/4) on turn 1; returns at P0's turn 2 Main.
fn giant_ready(options: GameOptions) -> (GameEngine, EntityId) {
    let hand = [HILL_GIANT, EMBER_WELL, EMBER_WELL, EMBER_WELL, EMBER_WELL];
    let mut engine = start(options, deck([EMBER_WELL; 4], hand, &[]), plain_deck());
    let giant = find(&engine, P0, Zone::Hand, HILL_GIANT);
    engine.summon_familiar(P0, giant, &[]).unwrap();
    engine.end_turn().unwrap();
    engine.end_turn().unwrap();
    (engine, giant)
}

#[test]
fn test_blocked_combat_is_simultaneous() {
    let fox_hand = [CINDER_FOX, EMBER_WELL, EMBER_WELL, EMBER_WELL, EMBER_WELL];
    let crab_hand = [SHELL_CRAB, EMBER_WELL, EMBER_WELL, EMBER_WELL, EMBER_WELL];
    let mut engine = start(
        options(),
        deck([EMBER_WELL; 4], fox_hand, &[]),
        deck([EMBER_WELL; 4], crab_hand, &[]),
    );

    let fox = summon_with_resource(&mut engine, P0, CINDER_FOX);
    engine.end_turn().unwrap();
    let crab = summon_with_resource(&mut engine, P1, SHELL_CRAB);
    engine.end_turn().unwrap();

    let destroyed = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&destroyed);
    engine.on(EventKind::CardDestroyed, move |event| {
        if let GameEvent::CardDestroyed { card, .. } = event {
            sink.borrow_mut().push(*card);
        }
    });

    advance_to(&mut engine, Phase::Combat);
    engine.declare_attackers(P0, &[fox]).unwrap();
    engine.declare_blockers(P1, &[Block::new(crab, fox)]).unwrap();
    engine.resolve_combat().unwrap();

    // 3/2 into 2/3: each takes lethal damage.
    let state = engine.game_state();
    assert_eq!(state.zones.zone_of(fox), Some(Zone::Graveyard));
    assert_eq!(state.zones.zone_of(crab), Some(Zone::Graveyard));
    assert_eq!(*destroyed.borrow(), vec![crab, fox]);
    assert_eq!(state.life_cards(P0), 4);
    assert_eq!(state.life_cards(P1), 4);
    assert_eq!(state.phase, Phase::PostCombat);

    // Runtime state is wiped in the graveyard.
    assert_eq!(state.card(fox).unwrap().damage, 0);
    assert!(!state.card(fox).unwrap().tapped);
}

#[test]
fn test_unblocked_attack_strips_life_cards() {
    let (mut engine, giant) = giant_ready(options());
    // Top of the stack is the end of the zone, so removal order is reversed.
    let removal_order: Vec<EntityId> =
        engine.game_state().zones.cards(P1, Zone::LifeCards).iter().rev().copied().collect();

    let damaged = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&damaged);
    engine.on(EventKind::PlayerDamaged, move |event| sink.borrow_mut().push(event.clone()));

    advance_to(&mut engine, Phase::Combat);
    engine.declare_attackers(P0, &[giant]).unwrap();
    engine.resolve_combat().unwrap();

    let state = engine.game_state();
    assert_eq!(state.life_cards(P1), 0);
    assert_eq!(state.zones.cards(P1, Zone::Graveyard).to_vec(), removal_order);
    // Emptying the stack exactly is not a loss.
    assert!(!state.game_over);

    let events = damaged.borrow();
    let GameEvent::PlayerDamaged { player, amount, lost, remaining } = &events[0] else {
        panic!("expected PlayerDamaged");
    };
    assert_eq!(*player, P1);
    assert_eq!(*amount, 4);
    assert_eq!(*lost, removal_order);
    assert_eq!(*remaining, 0);
    assert!(state.card(giant).unwrap().tapped);
}

#[test]
fn test_excess_damage_discarded_when_configured() {
    let rule = options().with_life_loss_rule(LifeLossRule::ExcessDiscarded);
    let (mut engine, giant) = giant_ready(rule);
    for _ in 0..2 {
        advance_to(&mut engine, Phase::Combat);
        engine.declare_attackers(P0, &[giant]).unwrap();
        engine.resolve_combat().unwrap();
        engine.end_turn().unwrap();
        engine.end_turn().unwrap();
    }
    assert!(!engine.game_state().game_over);
    assert_eq!(engine.game_state().life_cards(P1), 0);
}

#[test]
fn test_damage_on_empty_stack_loses_by_default() {
    let (mut engine, giant) = giant_ready(options());
    assert_eq!(engine.options().life_loss_rule, LifeLossRule::DamageOnEmptyStack);

    advance_to(&mut engine, Phase::Combat);
    engine.declare_attackers(P0, &[giant]).unwrap();
    engine.resolve_combat().unwrap();
    assert!(!engine.game_state().game_over);

    engine.end_turn().unwrap();
    engine.end_turn().unwrap();
    advance_to(&mut engine, Phase::Combat);
    engine.declare_attackers(P0, &[giant]).unwrap();
    engine.resolve_combat().unwrap();

    let outcome = engine.game_state().outcome.unwrap();
    assert_eq!(outcome.loser, P1);
    assert_eq!(outcome.reason, LossReason::LifeCardsExhausted);
    // Combat stops short of PostCombat once the game is decided.
    assert_eq!(engine.game_state().phase, Phase::Combat);
}

#[test]
fn test_declaration_rules() {
    let hand = [HILL_GIANT, ASH_HOUND, EMBER_WELL, EMBER_WELL, EMBER_WELL];
    let mut engine = start(options(), deck([EMBER_WELL; 4], hand, &[]), plain_deck());
    let giant = find(&engine, P0, Zone::Hand, HILL_GIANT);
    engine.summon_familiar(P0, giant, &[]).unwrap();

    advance_to(&mut engine, Phase::Combat);
    assert_eq!(
        engine.declare_attackers(P0, &[giant]),
        Err(GameError::SummoningSick { card: giant })
    );
    assert_eq!(engine.declare_blockers(P1, &[]), Err(GameError::NoAttackersDeclared));

    engine.end_turn().unwrap();
    engine.end_turn().unwrap();
    advance_to(&mut engine, Phase::Combat);

    assert_eq!(
        engine.declare_attackers(P0, &[giant, giant]),
        Err(GameError::DuplicateCard { card: giant })
    );
    engine.declare_attackers(P0, &[giant]).unwrap();
    assert_eq!(engine.declare_attackers(P0, &[]), Err(GameError::AttackersAlreadyDeclared));
    assert_eq!(engine.declare_blockers(P0, &[]), Err(GameError::ActivePlayerCannotBlock));

    let well = find(&engine, P1, Zone::Hand, EMBER_WELL);
    assert!(matches!(
        engine.declare_blockers(P1, &[Block::new(well, giant)]),
        Err(GameError::CardNotInZone { .. })
    ));

    engine.declare_blockers(P1, &[]).unwrap();
    assert_eq!(engine.declare_blockers(P1, &[]), Err(GameError::BlockersAlreadyDeclared));
}

#[test]
fn test_ending_combat_resolves_pending_attack() {
    let (mut engine, giant) = giant_ready(options());
    advance_to(&mut engine, Phase::Combat);
    engine.declare_attackers(P0, &[giant]).unwrap();

    engine.end_phase().unwrap();

    assert_eq!(engine.game_state().phase, Phase::PostCombat);
    assert_eq!(engine.game_state().life_cards(P1), 0);
}

#[test]
fn test_end_turn_abandons_combat() {
    let (mut engine, giant) = giant_ready(options());
    advance_to(&mut engine, Phase::Combat);
    engine.declare_attackers(P0, &[giant]).unwrap();

    engine.end_turn().unwrap();

    assert_eq!(engine.game_state().life_cards(P1), 4);
    assert!(engine.game_state().combat.attackers.is_empty());
    // Refresh untapped the attacker.
    assert!(!engine.game_state().card(giant).unwrap().tapped);
}

#[test]
fn test_resolve_outside_combat() {
    let mut engine = start(options(), plain_deck(), plain_deck());
    assert_eq!(
        engine.resolve_combat(),
        Err(GameError::WrongPhase { action: "resolving combat", phase: Phase::Main })
    );
}
