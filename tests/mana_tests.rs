//! Mana payment: auto-tap, floating mana, painful sources and X costs.

mod common;

use common::{Table, O, P};
use manacore::core::{Action, EngineConfig, ManaPoolEmptying, Step, Target};
use manacore::{CardCatalog, Color, Engine, ManaType, Zone};
use std::sync::Arc;

fn untapped(table: &Table, name: &str) -> usize {
    let id = table.engine.catalog().get_by_name(name).unwrap().id;
    table
        .state
        .player(P)
        .battlefield
        .iter()
        .filter(|c| c.card_id == id && !c.tapped)
        .count()
}

// =============================================================================
// Auto-tap
// =============================================================================

/// Casting taps exactly enough lands and leaves the pool empty.
#[test]
fn test_auto_tap_pays_exact_cost() {
    let mut table = Table::main_phase();
    let giant = table.add("Hill Giant", P, Zone::Hand);
    table.lands("Mountain", P, 5);

    table.cast(P, giant, &[]);

    assert_eq!(untapped(&table, "Mountain"), 1);
    assert!(table.state.player(P).mana_pool.is_empty());
    assert_eq!(table.state.stack.len(), 1);
}

/// Missing a colored source is reported, and nothing is tapped.
#[test]
fn test_insufficient_colored_mana() {
    let mut table = Table::main_phase();
    let bears = table.add("Grizzly Bears", P, Zone::Hand);
    table.lands("Mountain", P, 3);

    let err = table.try_apply(Action::cast(P, bears, &[])).unwrap_err();
    assert!(err.mentions("Not enough mana"));
    assert_eq!(untapped(&table, "Mountain"), 3);
}

/// Summoning-sick mana creatures can't pay; ones that have been around can.
#[test]
fn test_mana_creature_needs_to_be_ready() {
    let mut table = Table::main_phase();
    let bears = table.add("Grizzly Bears", P, Zone::Hand);
    table.lands("Forest", P, 1);
    let elves = table.add_sick("Llanowar Elves", P, Zone::Battlefield);

    assert!(table.try_apply(Action::cast(P, bears, &[])).is_err());

    table.state.battlefield_card_mut(elves).unwrap().summoning_sick = false;
    table.cast(P, bears, &[]);
    assert!(table.state.battlefield_card(elves).unwrap().tapped);
}

/// Auto-tap prefers a basic land over a painland for colored mana.
#[test]
fn test_auto_tap_avoids_pain() {
    let mut table = Table::main_phase();
    let growth = table.add("Giant Growth", P, Zone::Hand);
    let bears = table.add("Grizzly Bears", P, Zone::Battlefield);
    let brushland = table.add("Brushland", P, Zone::Battlefield);
    table.lands("Forest", P, 1);

    table.cast(P, growth, &[Target::Card(bears)]);

    assert_eq!(table.life(P), 20);
    assert!(!table.state.battlefield_card(brushland).unwrap().tapped);
}

/// When only a painland can make the color, paying costs 1 life.
#[test]
fn test_painland_colored_payment_hurts() {
    let mut table = Table::main_phase();
    let lions = table.add("Savannah Lions", P, Zone::Hand);
    table.add("Brushland", P, Zone::Battlefield);

    table.cast(P, lions, &[]);

    assert_eq!(table.life(P), 19);
}

/// Generic mana from a painland is free.
#[test]
fn test_painland_generic_payment_is_free() {
    let mut table = Table::main_phase();
    let bears = table.add("Grizzly Bears", P, Zone::Hand);
    table.add("Brushland", P, Zone::Battlefield);
    table.lands("Forest", P, 1);

    table.cast(P, bears, &[]);

    assert_eq!(table.life(P), 20);
}

/// Sol Ring overpays a one-mana cost; the extra mana floats.
#[test]
fn test_sol_ring_leftover_floats() {
    let mut table = Table::main_phase();
    table.add("Sol Ring", P, Zone::Battlefield);
    let ring = table.add("Sol Ring", P, Zone::Hand);

    table.cast(P, ring, &[]);

    assert_eq!(table.state.player(P).mana_pool.get(ManaType::Colorless), 1);
}

// =============================================================================
// Manual mana abilities and the pool
// =============================================================================

/// City of Brass makes the chosen color and deals 1 damage.
#[test]
fn test_city_of_brass_choice() {
    let mut table = Table::main_phase();
    let city = table.add("City of Brass", P, Zone::Battlefield);

    table.apply(Action::activate(P, city, 0, &[]).with_mana_color(Color::Blue));

    assert_eq!(table.state.player(P).mana_pool.get(ManaType::Blue), 1);
    assert_eq!(table.life(P), 19);
    assert!(table.state.battlefield_card(city).unwrap().tapped);
}

/// Floating mana pays before any land is tapped.
#[test]
fn test_floating_mana_is_used_first() {
    let mut table = Table::main_phase();
    let mountain = table.add("Mountain", P, Zone::Battlefield);
    table.lands("Mountain", P, 1);
    let shock = table.add("Shock", P, Zone::Hand);

    table.apply(Action::activate(P, mountain, 0, &[]));
    assert_eq!(table.state.player(P).mana_pool.get(ManaType::Red), 1);

    table.cast(P, shock, &[Target::Player(O)]);

    assert!(table.state.player(P).mana_pool.is_empty());
    assert_eq!(untapped(&table, "Mountain"), 1);
}

/// Unspent mana empties when the step changes.
#[test]
fn test_pool_empties_between_steps() {
    let mut table = Table::main_phase();
    let mountain = table.add("Mountain", P, Zone::Battlefield);

    table.apply(Action::activate(P, mountain, 0, &[]));
    table.pass();
    assert_eq!(table.state.player(P).mana_pool.total(), 1);

    table.pass();
    assert_eq!(table.state.step, Step::BeginCombat);
    assert!(table.state.player(P).mana_pool.is_empty());
}

/// With end-of-turn emptying, mana survives into combat.
#[test]
fn test_pool_survives_steps_when_configured() {
    let config = EngineConfig {
        mana_pool_empties: ManaPoolEmptying::EndOfTurn,
        ..EngineConfig::default()
    };
    let mut table = Table::main_phase();
    table.engine = Engine::new(Arc::new(CardCatalog::core_set()), config);
    let mountain = table.add("Mountain", P, Zone::Battlefield);

    table.apply(Action::activate(P, mountain, 0, &[]));
    table.pass_both();
    assert_eq!(table.state.step, Step::BeginCombat);
    assert_eq!(table.state.player(P).mana_pool.total(), 1);

    table.apply(Action::end_turn(P));
    assert!(table.state.player(P).mana_pool.is_empty());
}

// =============================================================================
// X costs
// =============================================================================

/// Fireball pays X plus its red and deals X.
#[test]
fn test_fireball_x() {
    let mut table = Table::main_phase();
    let fireball = table.add("Fireball", P, Zone::Hand);
    table.lands("Mountain", P, 5);

    table.apply(Action::cast_with_x(P, fireball, &[Target::Player(O)], 4));
    assert_eq!(untapped(&table, "Mountain"), 0);

    table.resolve_stack();
    assert_eq!(table.life(O), 16);
}

/// X beyond what the lands can pay is rejected.
#[test]
fn test_fireball_unaffordable_x() {
    let mut table = Table::main_phase();
    let fireball = table.add("Fireball", P, Zone::Hand);
    table.lands("Mountain", P, 3);

    let err = table
        .try_apply(Action::cast_with_x(P, fireball, &[Target::Player(O)], 3))
        .unwrap_err();
    assert!(err.mentions("Not enough mana"));
}

/// Stream of Life with X = 0 is legal and gains nothing.
#[test]
fn test_stream_of_life_zero() {
    let mut table = Table::main_phase();
    let stream = table.add("Stream of Life", P, Zone::Hand);
    table.lands("Forest", P, 1);

    table.apply(Action::cast_with_x(P, stream, &[Target::Player(P)], 0));
    table.resolve_stack();

    assert_eq!(table.life(P), 20);
    assert!(table.in_graveyard(P, stream));
}
