//! Determinism, setup and replay.

mod common;

use common::{red_green_deck, white_black_deck};
use manacore::core::{Action, ActionKind, GameState, PlayerId, SetupError, Step};
use manacore::sim::play_random_games;
use manacore::{ActionLog, Engine, InstanceId, ReplayError, RulesEngine, SimConfig};

fn build(engine: &Engine) -> impl Fn(u64) -> GameState + '_ {
    move |seed| {
        engine
            .initialize_game(&red_green_deck(), &white_black_deck(), seed)
            .unwrap()
    }
}

// =============================================================================
// Setup
// =============================================================================

/// A new game: shuffled libraries, opening hands, untap step of turn 1.
#[test]
fn test_initial_state() {
    let engine = Engine::with_core_set();
    let state = build(&engine)(1);

    assert_eq!(state.turn_count, 1);
    assert_eq!(state.step, Step::Untap);
    assert_eq!(state.active_player, PlayerId::Player);
    for player in PlayerId::BOTH {
        let p = state.player(player);
        assert_eq!(p.life, 20);
        assert_eq!(p.hand.len(), 7);
        assert_eq!(p.library.len(), 33);
        assert!(p.battlefield.is_empty());
    }
    assert!(state.action_history.is_empty());
}

/// Same seed, same shuffle; different seeds almost surely differ.
#[test]
fn test_seeded_shuffle() {
    let engine = Engine::with_core_set();
    let a = build(&engine)(99);
    let b = build(&engine)(99);
    let c = build(&engine)(100);

    assert_eq!(a, b);
    let names = |s: &GameState| -> Vec<_> { s.player(PlayerId::Player).library.iter().map(|c| c.card_id).collect() };
    assert_ne!(names(&a), names(&c));
}

/// Unknown names and short decks are setup errors.
#[test]
fn test_setup_errors() {
    let engine = Engine::with_core_set();

    let mut deck = red_green_deck();
    deck[3] = "Black Lotus".to_string();
    let err = engine.initialize_game(&deck, &white_black_deck(), 1).unwrap_err();
    assert_eq!(err, SetupError::UnknownCard("Black Lotus".to_string()));

    let short = vec!["Forest".to_string(); 3];
    let err = engine.initialize_game(&short, &white_black_deck(), 1).unwrap_err();
    assert!(matches!(err, SetupError::DeckTooSmall { player: PlayerId::Player, size: 3, .. }));
}

// =============================================================================
// Reproducibility
// =============================================================================

/// Random games from the same seed play out identically.
#[test]
fn test_random_games_reproduce() {
    let engine = Engine::with_core_set();
    let config = SimConfig::default().with_max_actions(1500);

    let first = play_random_games(&engine, build(&engine), 4, 2024, &config);
    let second = play_random_games(&engine, build(&engine), 4, 2024, &config);

    assert_eq!(first, second);
    for result in &first {
        assert!(result.actions > 0);
        if let Some(outcome) = result.result {
            assert_eq!(engine.is_terminal(&result.final_state), Some(outcome));
        }
    }
}

/// Replaying a recorded game rebuilds the final snapshot exactly.
#[test]
fn test_replay_from_log() {
    let engine = Engine::with_core_set();
    let config = SimConfig::default().with_max_actions(600);
    let result = play_random_games(&engine, build(&engine), 1, 7, &config).remove(0);
    let final_state = result.final_state;

    let mut log = ActionLog::new(final_state.rng.seed(), red_green_deck(), white_black_deck());
    log.record_history(&final_state);
    assert_eq!(log.actions.len(), result.actions);

    let bytes = log.to_bytes().unwrap();
    let restored = ActionLog::from_bytes(&bytes).unwrap();
    assert_eq!(engine.replay(&restored).unwrap(), final_state);
}

/// A tampered log fails at the first bad action.
#[test]
fn test_replay_rejects_tampered_log() {
    let engine = Engine::with_core_set();
    let mut log = ActionLog::new(5, red_green_deck(), white_black_deck());
    log.push(Action::untap(PlayerId::Player));
    log.push(Action::play_land(PlayerId::Player, InstanceId(100_000)));

    match engine.replay(&log) {
        Err(ReplayError::Rejected { index, source }) => {
            assert_eq!(index, 1);
            assert!(!source.errors.is_empty());
        }
        other => panic!("expected a rejection, got {other:?}"),
    }
}

// =============================================================================
// Serialization
// =============================================================================

/// Actions use an externally tagged JSON form.
#[test]
fn test_action_json_shape() {
    let action = Action::play_land(PlayerId::Player, InstanceId(5));
    let json = serde_json::to_string(&action).unwrap();
    assert_eq!(json, r#"{"player":"player","kind":{"PLAY_LAND":{"card":5}}}"#);

    let pass: Action = serde_json::from_str(r#"{"player":"opponent","kind":"PASS_PRIORITY"}"#).unwrap();
    assert_eq!(pass, Action::pass(PlayerId::Opponent));

    let cast: Action = serde_json::from_str(r#"{"player":"player","kind":{"CAST_SPELL":{"card":7}}}"#).unwrap();
    assert!(matches!(cast.kind, ActionKind::CastSpell { x_value: None, .. }));
}

/// A mid-game snapshot survives bincode, RNG included.
#[test]
fn test_state_bincode_round_trip() {
    let engine = Engine::with_core_set();
    let config = SimConfig::default().with_max_actions(200);
    let state = play_random_games(&engine, build(&engine), 1, 3, &config).remove(0).final_state;

    let bytes = bincode::serialize(&state).unwrap();
    let restored: GameState = bincode::deserialize(&bytes).unwrap();
    assert_eq!(restored, state);

    if let Some(player) = engine.acting_player(&state) {
        let actions = engine.legal_actions(&state, player);
        assert_eq!(engine.legal_actions(&restored, player), actions);
    }
}
