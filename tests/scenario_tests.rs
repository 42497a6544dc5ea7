//! End-to-end scenarios through the public engine API.

mod common;

use common::{Table, O, P};
use manacore::core::{Action, ActionType, Step, Target};
use manacore::rules::{effective_power, effective_toughness};
use manacore::{RulesEngine, Zone};

// =============================================================================
// Burn
// =============================================================================

/// Lightning Blast for 4 takes the opponent from 20 to 16.
#[test]
fn test_lightning_blast_to_face() {
    let mut table = Table::main_phase();
    let blast = table.add("Lightning Blast", P, Zone::Hand);
    table.lands("Mountain", P, 4);

    table.cast(P, blast, &[Target::Player(O)]);
    assert_eq!(table.life(O), 20);

    table.resolve_stack();

    assert_eq!(table.life(O), 16);
    assert!(table.in_graveyard(P, blast));
    assert_eq!(table.state.priority_player, P);
}

/// Shock kills a 2/2; state-based actions move it to its owner's graveyard.
#[test]
fn test_shock_kills_bears() {
    let mut table = Table::main_phase();
    let shock = table.add("Shock", P, Zone::Hand);
    table.lands("Mountain", P, 1);
    let bears = table.add("Grizzly Bears", O, Zone::Battlefield);

    table.cast(P, shock, &[Target::Card(bears)]);
    table.resolve_stack();

    assert!(!table.on_battlefield(bears));
    assert!(table.in_graveyard(O, bears));
}

// =============================================================================
// Combat tricks
// =============================================================================

/// Giant Growth saves a blocked Grizzly Bears and wears off at cleanup.
#[test]
fn test_giant_growth_survives_combat_and_wears_off() {
    let mut table = Table::main_phase();
    let bears = table.add("Grizzly Bears", P, Zone::Battlefield);
    let growth = table.add("Giant Growth", P, Zone::Hand);
    table.lands("Forest", P, 1);
    let giant = table.add("Hill Giant", O, Zone::Battlefield);

    table.advance_to(Step::DeclareAttackers);
    table.apply(Action::attack(P, &[bears]));
    table.pass_both();
    assert_eq!(table.state.step, Step::DeclareBlockers);
    assert_eq!(table.state.priority_player, O);

    table.apply(Action::block(O, &[(giant, bears)]));
    assert_eq!(table.state.priority_player, P);

    table.cast(P, growth, &[Target::Card(bears)]);
    table.resolve_stack();
    let card = table.state.battlefield_card(bears).unwrap();
    assert_eq!(effective_power(&table.state, table.engine.catalog(), card), 5);

    table.pass_both();
    assert_eq!(table.state.step, Step::CombatDamage);
    assert!(!table.on_battlefield(giant));
    assert_eq!(table.state.battlefield_card(bears).unwrap().damage, 3);
    assert_eq!(table.life(O), 20);

    table.apply(Action::end_turn(P));
    let card = table.state.battlefield_card(bears).unwrap();
    assert_eq!(card.damage, 0);
    assert!(card.temporary_modifications.is_empty());
    assert_eq!(effective_power(&table.state, table.engine.catalog(), card), 2);
    assert_eq!(table.state.active_player, O);
}

/// Giant Growth in response to Lightning Blast: 4 damage on a 5/5 is one short.
#[test]
fn test_giant_growth_survives_exactly_four_damage() {
    let mut table = Table::main_phase();
    let bears = table.add("Grizzly Bears", P, Zone::Battlefield);
    let growth = table.add("Giant Growth", P, Zone::Hand);
    table.lands("Forest", P, 1);
    let blast = table.add("Lightning Blast", O, Zone::Hand);
    table.lands("Mountain", O, 4);

    table.pass();
    table.cast(O, blast, &[Target::Card(bears)]);
    table.pass();
    table.cast(P, growth, &[Target::Card(bears)]);
    table.resolve_stack();

    let card = table.state.battlefield_card(bears).unwrap();
    assert_eq!(card.damage, 4);
    assert_eq!(effective_toughness(&table.state, table.engine.catalog(), card), 5);
    assert!(table.in_graveyard(O, blast));
    assert!(table.in_graveyard(P, growth));

    table.apply(Action::end_turn(P));
    assert!(table.on_battlefield(bears));
    assert_eq!(table.state.battlefield_card(bears).unwrap().damage, 0);
}

/// The same Lightning Blast without the pump is lethal.
#[test]
fn test_lightning_blast_kills_unpumped_bears() {
    let mut table = Table::main_phase();
    let bears = table.add("Grizzly Bears", P, Zone::Battlefield);
    let blast = table.add("Lightning Blast", O, Zone::Hand);
    table.lands("Mountain", O, 4);

    table.pass();
    table.cast(O, blast, &[Target::Card(bears)]);
    table.resolve_stack();

    assert!(!table.on_battlefield(bears));
    assert!(table.in_graveyard(P, bears));
}

/// Fear: only black or artifact creatures may block.
#[test]
fn test_fear_blocking() {
    let mut table = Table::main_phase();
    let legion = table.add("Severed Legion", P, Zone::Battlefield);
    let bears = table.add("Grizzly Bears", O, Zone::Battlefield);
    let corpse = table.add("Walking Corpse", O, Zone::Battlefield);

    table.advance_to(Step::DeclareAttackers);
    table.apply(Action::attack(P, &[legion]));
    table.pass_both();

    let err = table.try_apply(Action::block(O, &[(bears, legion)])).unwrap_err();
    assert!(err.mentions("Fear"));

    table.apply(Action::block(O, &[(corpse, legion)]));
    table.pass_both();

    assert!(!table.on_battlefield(legion));
    assert!(!table.on_battlefield(corpse));
    assert_eq!(table.life(O), 20);
}

/// An unblocked attack reaches the defending player.
#[test]
fn test_unblocked_attack() {
    let mut table = Table::main_phase();
    let giant = table.add("Hill Giant", P, Zone::Battlefield);

    table.advance_to(Step::DeclareAttackers);
    table.apply(Action::attack(P, &[giant]));
    table.advance_to(Step::EndCombat);

    assert_eq!(table.life(O), 17);
    assert!(table.state.battlefield_card(giant).unwrap().attacking);

    table.pass_both();
    assert_eq!(table.state.step, Step::Main2);
    assert!(!table.state.battlefield_card(giant).unwrap().attacking);
}

// =============================================================================
// Sacrifice, tokens, tutors, auras
// =============================================================================

/// Diabolic Edict leaves the target player owing a sacrifice.
#[test]
fn test_diabolic_edict_pending_sacrifice() {
    let mut table = Table::main_phase();
    let edict = table.add("Diabolic Edict", P, Zone::Hand);
    table.lands("Swamp", P, 2);
    let bears = table.add("Grizzly Bears", O, Zone::Battlefield);
    let giant = table.add("Hill Giant", O, Zone::Battlefield);
    table.add("Forest", O, Zone::Battlefield);

    table.cast(P, edict, &[Target::Player(O)]);
    table.resolve_stack();

    let pending = table.state.pending_sacrifice.unwrap();
    assert_eq!(pending.player, O);
    assert_eq!(table.engine.acting_player(&table.state), Some(O));
    assert!(table.engine.legal_actions(&table.state, P).is_empty());

    let options = table.engine.legal_actions(&table.state, O);
    assert_eq!(options.len(), 2);
    assert!(options.iter().all(|a| a.action_type() == ActionType::SacrificePermanent));

    assert!(table.try_apply(Action::pass(P)).is_err());
    table.apply(Action::sacrifice(O, bears));

    assert!(table.state.pending_sacrifice.is_none());
    assert!(table.in_graveyard(O, bears));
    assert!(table.on_battlefield(giant));
}

/// Raise the Alarm creates two Soldier tokens, which vanish when they die.
#[test]
fn test_raise_the_alarm_tokens() {
    let mut table = Table::main_phase();
    let alarm = table.add("Raise the Alarm", P, Zone::Hand);
    table.lands("Plains", P, 2);
    let bolt = table.add("Lightning Bolt", O, Zone::Hand);
    table.lands("Mountain", O, 1);

    table.cast(P, alarm, &[]);
    table.resolve_stack();

    let tokens: Vec<_> = table
        .state
        .player(P)
        .battlefield
        .iter()
        .filter(|c| c.is_token)
        .map(|c| c.instance_id)
        .collect();
    assert_eq!(tokens.len(), 2);
    assert!(table.state.battlefield_card(tokens[0]).unwrap().summoning_sick);

    table.pass();
    table.cast(O, bolt, &[Target::Card(tokens[0])]);
    table.resolve_stack();

    assert!(!table.on_battlefield(tokens[0]));
    assert!(table.state.find_card(tokens[0]).is_none());
    assert_eq!(table.state.player(P).graveyard.len(), 1);
}

/// Rampant Growth fetches a basic land tapped.
#[test]
fn test_rampant_growth() {
    let mut table = Table::main_phase();
    let growth = table.add("Rampant Growth", P, Zone::Hand);
    table.lands("Forest", P, 2);
    table.add("Grizzly Bears", P, Zone::Library);
    let swamp = table.add("Swamp", P, Zone::Library);

    table.cast(P, growth, &[]);
    table.resolve_stack();

    let land = table.state.battlefield_card(swamp).unwrap();
    assert!(land.tapped);
    assert_eq!(table.state.player(P).library.len(), 1);
}

/// Holy Strength enchants a creature and falls off when it dies.
#[test]
fn test_holy_strength() {
    let mut table = Table::main_phase();
    let lions = table.add("Savannah Lions", P, Zone::Battlefield);
    let aura = table.add("Holy Strength", P, Zone::Hand);
    table.lands("Plains", P, 1);
    let blast = table.add("Lightning Blast", O, Zone::Hand);
    table.lands("Mountain", O, 4);

    table.cast(P, aura, &[Target::Card(lions)]);
    table.resolve_stack();

    let card = table.state.battlefield_card(lions).unwrap();
    assert_eq!(card.attachments.as_slice(), &[aura]);
    assert_eq!(effective_power(&table.state, table.engine.catalog(), card), 3);

    table.pass();
    table.cast(O, blast, &[Target::Card(lions)]);
    table.resolve_stack();

    assert!(!table.on_battlefield(lions));
    assert!(!table.on_battlefield(aura));
    assert!(table.in_graveyard(P, aura));
}

// =============================================================================
// Losing
// =============================================================================

/// Drawing from an empty library loses at the next state-based check.
#[test]
fn test_deck_out_loses() {
    let mut table = Table::main_phase();
    table.state.turn_count = 2;
    table.state.step = Step::Draw;
    table.state.draw_taken = false;

    table.apply(Action::draw(P));

    assert!(table.state.game_over);
    assert_eq!(table.state.winner, Some(O));
    assert!(table.engine.legal_actions(&table.state, O).is_empty());
    assert!(table.try_apply(Action::pass(O)).unwrap_err().mentions("over"));
}

/// Burn to exactly zero ends the game.
#[test]
fn test_burn_out() {
    let mut table = Table::main_phase();
    table.state.player_mut(O).life = 3;
    let bolt = table.add("Lightning Bolt", P, Zone::Hand);
    table.lands("Mountain", P, 1);

    table.cast(P, bolt, &[Target::Player(O)]);
    table.resolve_stack();

    assert!(table.state.game_over);
    assert_eq!(table.engine.is_terminal(&table.state), Some(manacore::GameResult::Winner(P)));
}
