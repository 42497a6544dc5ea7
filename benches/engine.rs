use manacore::core::GameState;
use manacore::sim::play_random_games;
use manacore::{Engine, PlayerId, RulesEngine, SimConfig};

criterion::criterion_main!(benches);
criterion::criterion_group! {
    name = benches;
    config = criterion::Criterion::default()
        .without_plots()
        .sample_size(20)
        .measurement_time(std::time::Duration::from_secs(2));
    targets =
        cloning_midgame_state,
        enumerating_legal_actions,
        applying_an_action,
        playing_random_games,
}

fn deck() -> Vec<String> {
    let mut cards = Vec::new();
    for (name, count) in [
        ("Mountain", 9),
        ("Forest", 8),
        ("Grizzly Bears", 4),
        ("Raging Goblin", 3),
        ("Hill Giant", 3),
        ("Shock", 3),
        ("Lightning Bolt", 2),
        ("Giant Growth", 2),
        ("Fireball", 2),
        ("Llanowar Elves", 2),
        ("Mogg Fanatic", 2),
    ] {
        cards.extend(std::iter::repeat(name.to_string()).take(count));
    }
    cards
}

/// A state a few turns into a random game.
fn midgame(engine: &Engine) -> GameState {
    let build = |seed| engine.initialize_game(&deck(), &deck(), seed).unwrap();
    let config = SimConfig::default().with_max_actions(150);
    play_random_games(engine, build, 1, 42, &config).remove(0).final_state
}

fn cloning_midgame_state(c: &mut criterion::Criterion) {
    let engine = Engine::with_core_set();
    let state = midgame(&engine);
    c.bench_function("clone a midgame GameState", |b| b.iter(|| state.clone()));
}

fn enumerating_legal_actions(c: &mut criterion::Criterion) {
    let engine = Engine::with_core_set();
    let state = midgame(&engine);
    let player = engine.acting_player(&state).unwrap_or(PlayerId::Player);
    c.bench_function("enumerate legal actions", |b| {
        b.iter(|| engine.legal_actions(&state, player))
    });
}

fn applying_an_action(c: &mut criterion::Criterion) {
    let engine = Engine::with_core_set();
    let state = midgame(&engine);
    let player = engine.acting_player(&state).unwrap_or(PlayerId::Player);
    let action = engine.legal_actions(&state, player).pop();
    c.bench_function("apply one action", |b| {
        b.iter(|| action.as_ref().map(|a| engine.apply_action(&state, a)))
    });
}

fn playing_random_games(c: &mut criterion::Criterion) {
    let engine = Engine::with_core_set();
    let config = SimConfig::default();
    c.bench_function("play 10 random games", |b| {
        b.iter(|| {
            let build = |seed| engine.initialize_game(&deck(), &deck(), seed).unwrap();
            play_random_games(&engine, build, 10, 7, &config)
        })
    });
}
