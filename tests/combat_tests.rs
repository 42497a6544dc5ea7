//! Combat: declarations, evasion and damage.

mod common;

use common::{Table, O, P};
use manacore::core::{Action, ActionType, Step};
use manacore::{InstanceId, Zone};

/// Walk to declare blockers with `attackers` attacking.
fn attack_with(table: &mut Table, attackers: &[InstanceId]) {
    table.advance_to(Step::DeclareAttackers);
    table.apply(Action::attack(P, attackers));
    table.pass_both();
    assert_eq!(table.state.step, Step::DeclareBlockers);
}

/// Declare blocks and move on to combat damage.
fn block_and_fight(table: &mut Table, pairs: &[(InstanceId, InstanceId)]) {
    table.apply(Action::block(O, pairs));
    table.pass_both();
    assert_eq!(table.state.step, Step::CombatDamage);
}

// =============================================================================
// Attacking
// =============================================================================

/// Attacking taps the creature unless it has vigilance.
#[test]
fn test_attack_taps_without_vigilance() {
    let mut table = Table::main_phase();
    let bears = table.add("Grizzly Bears", P, Zone::Battlefield);
    let angel = table.add("Serra Angel", P, Zone::Battlefield);

    table.advance_to(Step::DeclareAttackers);
    table.apply(Action::attack(P, &[bears, angel]));

    assert!(table.state.battlefield_card(bears).unwrap().tapped);
    assert!(!table.state.battlefield_card(angel).unwrap().tapped);
    assert_eq!(table.state.priority_player, P);
}

/// Summoning-sick creatures can't attack; haste overrides it.
#[test]
fn test_summoning_sickness_and_haste() {
    let mut table = Table::main_phase();
    let bears = table.add_sick("Grizzly Bears", P, Zone::Battlefield);
    let goblin = table.add_sick("Raging Goblin", P, Zone::Battlefield);

    table.advance_to(Step::DeclareAttackers);
    let err = table.try_apply(Action::attack(P, &[bears])).unwrap_err();
    assert!(err.mentions("summoning sickness"));

    table.apply(Action::attack(P, &[goblin]));
    table.advance_to(Step::CombatDamage);
    assert_eq!(table.life(O), 19);
}

/// Defenders never attack.
#[test]
fn test_defender_cannot_attack() {
    let mut table = Table::main_phase();
    let wall = table.add("Wall of Stone", P, Zone::Battlefield);

    table.advance_to(Step::DeclareAttackers);
    let err = table.try_apply(Action::attack(P, &[wall])).unwrap_err();
    assert!(err.mentions("Defender"));
}

/// The non-active player can't declare attackers, and attacks happen once.
#[test]
fn test_attack_declaration_rules() {
    let mut table = Table::main_phase();
    let bears = table.add("Grizzly Bears", P, Zone::Battlefield);
    table.add("Grizzly Bears", O, Zone::Battlefield);

    assert!(table.try_apply(Action::attack(P, &[bears])).is_err());

    table.advance_to(Step::DeclareAttackers);
    let attacks = table.engine.legal_actions(&table.state, P);
    let declarations = attacks
        .iter()
        .filter(|a| a.action_type() == ActionType::DeclareAttackers)
        .count();
    assert_eq!(declarations, 2);

    table.apply(Action::attack(P, &[]));
    assert!(table.try_apply(Action::attack(P, &[bears])).is_err());
}

/// With no attackers the combat skips straight to its end.
#[test]
fn test_no_attackers_skips_blocks() {
    let mut table = Table::main_phase();
    table.add("Grizzly Bears", P, Zone::Battlefield);

    table.advance_to(Step::DeclareAttackers);
    table.apply(Action::attack(P, &[]));
    table.pass_both();

    assert_eq!(table.state.step, Step::EndCombat);
}

// =============================================================================
// Evasion
// =============================================================================

/// Flying is blocked only by flying or reach.
#[test]
fn test_flying_and_reach() {
    let mut table = Table::main_phase();
    let drake = table.add("Wind Drake", P, Zone::Battlefield);
    let bears = table.add("Grizzly Bears", O, Zone::Battlefield);
    let spider = table.add("Giant Spider", O, Zone::Battlefield);

    attack_with(&mut table, &[drake]);

    let err = table.try_apply(Action::block(O, &[(bears, drake)])).unwrap_err();
    assert!(err.mentions("Flying"));

    block_and_fight(&mut table, &[(spider, drake)]);
    assert!(!table.on_battlefield(drake));
    assert_eq!(table.state.battlefield_card(spider).unwrap().damage, 2);
}

/// Menace needs two blockers; damage goes to the first until lethal.
#[test]
fn test_menace_and_damage_order() {
    let mut table = Table::main_phase();
    let brute = table.add("Boggart Brute", P, Zone::Battlefield);
    let first = table.add("Grizzly Bears", O, Zone::Battlefield);
    let second = table.add("Grizzly Bears", O, Zone::Battlefield);

    attack_with(&mut table, &[brute]);

    let err = table.try_apply(Action::block(O, &[(first, brute)])).unwrap_err();
    assert!(err.mentions("Menace"));

    block_and_fight(&mut table, &[(first, brute), (second, brute)]);

    assert!(!table.on_battlefield(brute));
    assert!(!table.on_battlefield(first));
    assert_eq!(table.state.battlefield_card(second).unwrap().damage, 1);
}

/// Intimidate allows artifact blockers and blockers sharing a color.
#[test]
fn test_intimidate() {
    let mut table = Table::main_phase();
    let boar = table.add("Bladetusk Boar", P, Zone::Battlefield);
    let bears = table.add("Grizzly Bears", O, Zone::Battlefield);
    let ogre = table.add("Gray Ogre", O, Zone::Battlefield);
    let soldier = table.add("Yotian Soldier", O, Zone::Battlefield);

    attack_with(&mut table, &[boar]);

    let err = table.try_apply(Action::block(O, &[(bears, boar)])).unwrap_err();
    assert!(err.mentions("Intimidate"));

    let validate = |blocker| table.engine.validate_action(&table.state, &Action::block(O, &[(blocker, boar)]));
    assert!(validate(ogre).is_empty());
    assert!(validate(soldier).is_empty());
}

/// Swampwalk is unblockable while the defender controls a Swamp.
#[test]
fn test_swampwalk() {
    let mut table = Table::main_phase();
    let wraith = table.add("Bog Wraith", P, Zone::Battlefield);
    let bears = table.add("Grizzly Bears", O, Zone::Battlefield);
    let swamp = table.add("Swamp", O, Zone::Battlefield);

    attack_with(&mut table, &[wraith]);

    let err = table.try_apply(Action::block(O, &[(bears, wraith)])).unwrap_err();
    assert!(err.mentions("Swamp"));

    table.state.move_card(swamp, Zone::Graveyard);
    assert!(table
        .engine
        .validate_action(&table.state, &Action::block(O, &[(bears, wraith)]))
        .is_empty());
}

/// A tapped creature can't block, and one creature blocks at most once.
#[test]
fn test_blocker_restrictions() {
    let mut table = Table::main_phase();
    let a = table.add("Grizzly Bears", P, Zone::Battlefield);
    let b = table.add("Savannah Lions", P, Zone::Battlefield);
    let tapped = table.add("Hill Giant", O, Zone::Battlefield);
    let blocker = table.add("Walking Corpse", O, Zone::Battlefield);
    table.state.battlefield_card_mut(tapped).unwrap().tapped = true;

    attack_with(&mut table, &[a, b]);

    let err = table.try_apply(Action::block(O, &[(tapped, a)])).unwrap_err();
    assert!(err.mentions("tapped"));

    let err = table
        .try_apply(Action::block(O, &[(blocker, a), (blocker, b)]))
        .unwrap_err();
    assert!(err.mentions("one attacker"));

    let err = table.try_apply(Action::block(P, &[])).unwrap_err();
    assert!(!err.errors.is_empty());
}

// =============================================================================
// Damage
// =============================================================================

/// Lifelink gains its controller the damage dealt.
#[test]
fn test_lifelink() {
    let mut table = Table::main_phase();
    let hawk = table.add("Vampire Nighthawk", P, Zone::Battlefield);

    attack_with(&mut table, &[hawk]);
    block_and_fight(&mut table, &[]);

    assert_eq!(table.life(O), 18);
    assert_eq!(table.life(P), 22);
}

/// Protection prevents damage from sources of that color.
#[test]
fn test_protection_prevents_combat_damage() {
    let mut table = Table::main_phase();
    let corpse = table.add("Walking Corpse", P, Zone::Battlefield);
    let knight = table.add("White Knight", O, Zone::Battlefield);

    attack_with(&mut table, &[corpse]);
    block_and_fight(&mut table, &[(knight, corpse)]);

    assert_eq!(table.state.battlefield_card(knight).unwrap().damage, 0);
    assert!(!table.on_battlefield(corpse));
}

/// Attackers and blockers leave combat when it ends.
#[test]
fn test_combat_cleared_after_end_combat() {
    let mut table = Table::main_phase();
    let bears = table.add("Grizzly Bears", P, Zone::Battlefield);
    let wall = table.add("Wall of Stone", O, Zone::Battlefield);

    attack_with(&mut table, &[bears]);
    block_and_fight(&mut table, &[(wall, bears)]);
    assert_eq!(table.state.battlefield_card(wall).unwrap().blocking, Some(bears));

    table.pass_both();
    table.pass_both();
    assert_eq!(table.state.step, Step::Main2);
    assert_eq!(table.state.battlefield_card(wall).unwrap().blocking, None);
    assert!(!table.state.battlefield_card(bears).unwrap().attacking);
    assert_eq!(table.state.battlefield_card(wall).unwrap().damage, 2);
}
