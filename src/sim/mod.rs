//! Game simulation: bots and a driver loop.
//!
//! Bots consume the engine through [`RulesEngine`] and may only choose from
//! `legal_actions`. The driver enforces an action ceiling; the rules core
//! has no notion of timeouts.

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::core::{Action, GameRng, GameState, PlayerId, PlayerMap};
use crate::rules::{GameResult, RulesEngine};

/// A player strategy.
pub trait Bot<E: RulesEngine>: Send {
    /// Pick an action for `player`. `None` when nothing is legal.
    fn choose_action(&mut self, engine: &E, state: &GameState, player: PlayerId) -> Option<Action>;

    /// Display name.
    fn name(&self) -> &str {
        "bot"
    }
}

/// Chooses uniformly among legal actions with a seeded RNG.
#[derive(Clone, Debug)]
pub struct RandomBot {
    rng: GameRng,
}

impl RandomBot {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self { rng: GameRng::new(seed) }
    }
}

impl<E: RulesEngine> Bot<E> for RandomBot {
    fn choose_action(&mut self, engine: &E, state: &GameState, player: PlayerId) -> Option<Action> {
        let mut actions = engine.legal_actions(state, player);
        let idx = self.rng.pick(actions.len())?;
        Some(actions.swap_remove(idx))
    }

    fn name(&self) -> &str {
        "random"
    }
}

/// Simulation limits.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SimConfig {
    /// Maximum actions before the game is abandoned.
    pub max_actions: usize,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self { max_actions: 5000 }
    }
}

impl SimConfig {
    /// Set the action ceiling.
    #[must_use]
    pub fn with_max_actions(mut self, max: usize) -> Self {
        self.max_actions = max;
        self
    }
}

/// Outcome of one simulated game.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SimulationResult {
    /// `None` when the action ceiling was hit or nobody could act.
    pub result: Option<GameResult>,
    /// Actions applied.
    pub actions: usize,
    /// Turn reached.
    pub turns: u32,
    /// The final snapshot.
    pub final_state: GameState,
}

impl SimulationResult {
    /// Whether the game reached a result.
    #[must_use]
    pub fn finished(&self) -> bool {
        self.result.is_some()
    }
}

/// Drive a game with one bot per seat until it ends or hits the ceiling.
pub fn play_game<E: RulesEngine>(
    engine: &E,
    state: GameState,
    bots: &mut PlayerMap<Box<dyn Bot<E>>>,
    config: &SimConfig,
) -> SimulationResult {
    let mut state = state;
    let mut actions = 0;

    while actions < config.max_actions {
        if engine.is_terminal(&state).is_some() {
            break;
        }
        let Some(player) = engine.acting_player(&state) else {
            break;
        };
        let Some(action) = bots[player].choose_action(engine, &state, player) else {
            debug!("{player} has no legal action");
            break;
        };
        match engine.apply_action(&state, &action) {
            Ok(next) => state = next,
            Err(err) => {
                warn!("{} chose an illegal action: {err}", bots[player].name());
                break;
            }
        }
        actions += 1;
    }

    let result = engine.is_terminal(&state);
    debug!("simulation ended after {actions} action(s) on turn {}: {result:?}", state.turn_count);
    SimulationResult {
        result,
        actions,
        turns: state.turn_count,
        final_state: state,
    }
}

/// Play `count` random-vs-random games from `build(seed)` starting states.
///
/// Game seeds are forked from `seed`, so the batch is reproducible.
pub fn play_random_games<E: RulesEngine>(
    engine: &E,
    build: impl Fn(u64) -> GameState,
    count: usize,
    seed: u64,
    config: &SimConfig,
) -> Vec<SimulationResult> {
    let mut rng = GameRng::new(seed);
    (0..count)
        .map(|_| {
            let game_seed = rng.fork().seed();
            let mut bots: PlayerMap<Box<dyn Bot<E>>> = PlayerMap::new(|player| {
                Box::new(RandomBot::new(game_seed.wrapping_add(player.index() as u64 + 1))) as Box<dyn Bot<E>>
            });
            play_game(engine, build(game_seed), &mut bots, config)
        })
        .collect()
}
